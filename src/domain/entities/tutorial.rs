use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::{
    entities::project::validate_description,
    entities::record::{
        EntityDraft, EntityRecord, format_date, new_validation_error, parse_date, required_text,
    },
    errors::{FieldIssue, field_issues},
    identity::UserId,
};

const MIN_NAME_LENGTH: usize = 3;

pub const TUTORIAL_KINDS: [&str; 8] = [
    "Programação",
    "Design",
    "Marketing Digital",
    "Banco de Dados",
    "DevOps",
    "Inteligência Artificial",
    "Mobile",
    "Cloud Computing",
];

// ───── Stored record ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tutorial {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub description: String,
    pub duration: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub posted_date: String,
    #[serde(default)]
    pub owner_id: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl EntityRecord for Tutorial {
    const COLLECTION: &'static str = "tutoriais";
    type Draft = TutorialDraft;

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn assign_meta(&mut self, id: String, owner: &UserId, created_at: DateTime<Utc>) {
        self.id = id;
        self.owner_id = owner.to_string();
        self.created_at = Some(created_at);
    }
}

// ───── Form draft ────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct TutorialDraft {
    pub id: String,

    #[validate(custom(function = "validate_tutorial_name"))]
    pub name: String,

    #[validate(custom(function = "validate_description"))]
    pub description: String,

    #[validate(custom(function = "validate_duration"))]
    pub duration: String,

    #[validate(custom(function = "validate_tutorial_kind"))]
    pub kind: String,

    pub posted_date: Option<NaiveDate>,
}

impl EntityDraft for TutorialDraft {
    type Record = Tutorial;

    fn from_record(record: &Tutorial) -> Self {
        TutorialDraft {
            id: record.id.clone(),
            name: record.name.clone(),
            description: record.description.clone(),
            duration: record.duration.clone(),
            kind: record.kind.clone(),
            posted_date: parse_date(&record.posted_date),
        }
    }

    fn into_record(self) -> Tutorial {
        Tutorial {
            id: self.id,
            name: self.name,
            description: self.description,
            duration: self.duration,
            kind: self.kind,
            posted_date: self.posted_date.map(format_date).unwrap_or_default(),
            owner_id: String::new(),
            created_at: None,
        }
    }

    fn check(&self) -> Vec<FieldIssue> {
        let mut issues = match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => field_issues(errors),
        };
        if self.posted_date.is_none() {
            issues.push(FieldIssue::error("postedDate", "A data de postagem é obrigatória"));
        }
        issues
    }

    fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.description.is_empty()
            && self.duration.is_empty()
            && self.kind.is_empty()
            && self.posted_date.is_none()
    }

    fn differs_from(&self, baseline: &Tutorial) -> bool {
        self.name != baseline.name
            || self.description != baseline.description
            || self.duration != baseline.duration
            || self.kind != baseline.kind
            || self.posted_date.map(format_date).unwrap_or_default() != baseline.posted_date
    }
}

// ───── Validation Helpers ───────────────────────────────────────────

fn validate_tutorial_name(name: &str) -> Result<(), ValidationError> {
    required_text(
        name,
        MIN_NAME_LENGTH,
        "O nome do tutorial deve ter pelo menos 3 caracteres",
    )
}

fn validate_duration(duration: &str) -> Result<(), ValidationError> {
    required_text(duration, 1, "A duração é obrigatória")
}

fn validate_tutorial_kind(kind: &str) -> Result<(), ValidationError> {
    if kind.is_empty() || !TUTORIAL_KINDS.contains(&kind) {
        return Err(new_validation_error(
            "unknown_kind",
            "O tipo de tutorial é obrigatório",
        ));
    }
    Ok(())
}
