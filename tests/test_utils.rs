#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::Mutex;

use devautomate_client::{
    confirm::ConfirmPrompt,
    entities::{comment::CommentDraft, project::ProjectDraft, tutorial::TutorialDraft},
    identity::{StaticIdentity, UserId},
};

pub fn sample_user() -> UserId {
    UserId::random()
}

pub fn signed_in(owner: &UserId) -> StaticIdentity {
    StaticIdentity::signed_in(owner.clone())
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn valid_project_draft() -> ProjectDraft {
    ProjectDraft {
        id: String::new(),
        name: "Site institucional".into(),
        description: "Desenvolvimento completo do site da empresa".into(),
        kind: "Desenvolvimento Web".into(),
        start_date: Some(date(2025, 1, 10)),
        end_date: Some(date(2025, 3, 20)),
    }
}

pub fn valid_tutorial_draft() -> TutorialDraft {
    TutorialDraft {
        id: String::new(),
        name: "Curso de Docker".into(),
        description: "Containers do zero ao deploy em produção".into(),
        duration: "4 horas".into(),
        kind: "DevOps".into(),
        posted_date: Some(date(2025, 5, 2)),
    }
}

pub fn valid_comment_draft() -> CommentDraft {
    CommentDraft {
        id: String::new(),
        title: "Muito bom".into(),
        body: "Explicação clara e direta ao ponto".into(),
        rating: "4".into(),
        tutorial_id: "12".into(),
        image_url: "https://example.com/foto.png".into(),
    }
}

/// Confirmation double with a fixed answer that records every prompt shown.
/// Clones share the recorded prompts.
#[derive(Clone)]
pub struct RecordingConfirm {
    answer: bool,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl RecordingConfirm {
    pub fn accepting() -> Self {
        RecordingConfirm {
            answer: true,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn declining() -> Self {
        RecordingConfirm {
            answer: false,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }

    pub fn was_asked(&self) -> bool {
        !self.prompts.lock().is_empty()
    }
}

#[async_trait]
impl ConfirmPrompt for RecordingConfirm {
    async fn confirm(&self, message: &str) -> bool {
        self.prompts.lock().push(message.to_string());
        self.answer
    }
}
