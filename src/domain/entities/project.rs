use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::{
    entities::record::{
        EntityDraft, EntityRecord, format_date, new_validation_error, parse_date, required_text,
    },
    errors::{FieldIssue, field_issues},
    identity::UserId,
};

// ───── Constants ──────────────────────────────────────────────────────
const MIN_NAME_LENGTH: usize = 3;
const MIN_DESCRIPTION_LENGTH: usize = 10;

pub const PROJECT_KINDS: [&str; 5] = [
    "Desenvolvimento Web",
    "Aplicativo Mobile",
    "Design UX/UI",
    "Automação",
    "Inteligência Artificial",
];

// ───── Stored record ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub owner_id: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl EntityRecord for Project {
    const COLLECTION: &'static str = "projetos";
    type Draft = ProjectDraft;

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
pub struct ProjectDraft {
    pub id: String,

    #[validate(custom(function = "validate_project_name"))]
    pub name: String,

    #[validate(custom(function = "validate_description"))]
    pub description: String,

    #[validate(custom(function = "validate_project_kind"))]
    pub kind: String,

    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ProjectDraft {
    fn date_issues(&self) -> Vec<FieldIssue> {
        let mut issues = Vec::new();
        if self.start_date.is_none() {
            issues.push(FieldIssue::error("startDate", "A data de início é obrigatória"));
        }
        if self.end_date.is_none() {
            issues.push(FieldIssue::error("endDate", "A data de finalização é obrigatória"));
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                issues.push(FieldIssue::error(
                    "dateRange",
                    "A data de início não pode ser posterior à data de finalização",
                ));
            }
        }
        issues
    }
}

impl EntityDraft for ProjectDraft {
    type Record = Project;

    fn from_record(record: &Project) -> Self {
        ProjectDraft {
            id: record.id.clone(),
            name: record.name.clone(),
            description: record.description.clone(),
            kind: record.kind.clone(),
            start_date: parse_date(&record.start_date),
            end_date: parse_date(&record.end_date),
        }
    }

    fn into_record(self) -> Project {
        Project {
            id: self.id,
            name: self.name,
            description: self.description,
            kind: self.kind,
            start_date: self.start_date.map(format_date).unwrap_or_default(),
            end_date: self.end_date.map(format_date).unwrap_or_default(),
            owner_id: String::new(),
            created_at: None,
        }
    }

    fn check(&self) -> Vec<FieldIssue> {
        let mut issues = match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => field_issues(errors),
        };
        issues.extend(self.date_issues());
        issues
    }

    fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.description.is_empty()
            && self.kind.is_empty()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }

    fn differs_from(&self, baseline: &Project) -> bool {
        self.name != baseline.name
            || self.description != baseline.description
            || self.kind != baseline.kind
            || self.start_date.map(format_date).unwrap_or_default() != baseline.start_date
            || self.end_date.map(format_date).unwrap_or_default() != baseline.end_date
    }
}

// ───── Validation Helpers ───────────────────────────────────────────

fn validate_project_name(name: &str) -> Result<(), ValidationError> {
    required_text(
        name,
        MIN_NAME_LENGTH,
        "O nome do projeto deve ter pelo menos 3 caracteres",
    )
}

pub(crate) fn validate_description(description: &str) -> Result<(), ValidationError> {
    required_text(
        description,
        MIN_DESCRIPTION_LENGTH,
        "A descrição deve ter pelo menos 10 caracteres",
    )
}

fn validate_project_kind(kind: &str) -> Result<(), ValidationError> {
    if kind.is_empty() || !PROJECT_KINDS.contains(&kind) {
        return Err(new_validation_error(
            "unknown_kind",
            "O tipo de projeto é obrigatório",
        ));
    }
    Ok(())
}
