use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::{
    constants::IMAGE_URL_RE,
    entities::record::{EntityDraft, EntityRecord, new_validation_error},
    errors::{FieldIssue, field_issues},
    identity::UserId,
};

// ───── Constants ──────────────────────────────────────────────────────
const MIN_TITLE_LENGTH: u64 = 3;
const MAX_TITLE_LENGTH: u64 = 20;
const MIN_BODY_LENGTH: u64 = 3;
const MAX_BODY_LENGTH: u64 = 100;

pub const RATING_MIN: i32 = 1;
pub const RATING_MAX: i32 = 5;

pub fn clamp_rating(value: i32) -> i32 {
    value.clamp(RATING_MIN, RATING_MAX)
}

// ───── Stored record ─────────────────────────────────────────────────

/// A tutorial comment as the REST collection holds it. The comments API has
/// no owner scoping and no server timestamps, so only the id is
/// store-assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub body: String,
    pub rating: i32,
    #[serde(default)]
    pub tutorial_id: String,
    pub image_url: String,
}

impl EntityRecord for Comment {
    const COLLECTION: &'static str = "comments";
    type Draft = CommentDraft;

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        None
    }

    fn assign_meta(&mut self, id: String, _owner: &UserId, _created_at: DateTime<Utc>) {
        self.id = id;
    }
}

// ───── Form draft ────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct CommentDraft {
    pub id: String,

    #[validate(length(
        min = MIN_TITLE_LENGTH,
        max = MAX_TITLE_LENGTH,
        message = "Título deve ter entre 3 e 20 caracteres."
    ))]
    pub title: String,

    #[validate(length(
        min = MIN_BODY_LENGTH,
        max = MAX_BODY_LENGTH,
        message = "Comentário deve ter entre 3 e 100 caracteres."
    ))]
    pub body: String,

    pub rating: String,

    pub tutorial_id: String,

    #[validate(custom(function = "validate_image_url"))]
    pub image_url: String,
}

impl CommentDraft {
    /// A rating that fails to parse blocks submission; a parseable value
    /// outside 1..=5 only warns and is clamped at save.
    fn rating_issues(&self) -> Vec<FieldIssue> {
        match self.rating.trim().parse::<i32>() {
            Err(_) => vec![FieldIssue::error(
                "rating",
                "Avaliação deve ser um número entre 1 e 5.",
            )],
            Ok(value) if !(RATING_MIN..=RATING_MAX).contains(&value) => vec![FieldIssue::advisory(
                "rating",
                "Avaliação será ajustada entre 1 e 5.",
            )],
            Ok(_) => Vec::new(),
        }
    }
}

impl EntityDraft for CommentDraft {
    type Record = Comment;

    fn from_record(record: &Comment) -> Self {
        CommentDraft {
            id: record.id.clone(),
            title: record.title.clone(),
            body: record.body.clone(),
            rating: record.rating.to_string(),
            tutorial_id: record.tutorial_id.clone(),
            image_url: record.image_url.clone(),
        }
    }

    fn into_record(self) -> Comment {
        Comment {
            id: self.id,
            title: self.title,
            body: self.body,
            rating: self
                .rating
                .trim()
                .parse()
                .map(clamp_rating)
                .unwrap_or(RATING_MIN),
            tutorial_id: self.tutorial_id,
            image_url: self.image_url,
        }
    }

    fn check(&self) -> Vec<FieldIssue> {
        let mut issues = match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => field_issues(errors),
        };
        issues.extend(self.rating_issues());
        issues
    }

    fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.body.is_empty()
            && self.rating.is_empty()
            && self.tutorial_id.is_empty()
            && self.image_url.is_empty()
    }

    fn differs_from(&self, baseline: &Comment) -> bool {
        self.title != baseline.title
            || self.body != baseline.body
            || self.rating != baseline.rating.to_string()
            || self.tutorial_id != baseline.tutorial_id
            || self.image_url != baseline.image_url
    }
}

// ───── Validation Helpers ───────────────────────────────────────────

fn validate_image_url(value: &str) -> Result<(), ValidationError> {
    if !IMAGE_URL_RE.is_match(value) {
        return Err(new_validation_error(
            "invalid_image",
            "Imagem deve ser uma URL HTTPS válida ou base64.",
        ));
    }
    Ok(())
}
