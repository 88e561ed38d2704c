use std::fmt;

use serde::Serialize;
use validator::ValidationErrors;

#[derive(Debug)]
pub enum AppError {
    Validation(Vec<FieldIssue>),
    Unauthenticated,
    NotFound(String),
    Network(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(issues) => {
                let messages = issues
                    .iter()
                    .map(|i| format!("{}:{}", i.field, i.message))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "validation error: {}", messages)
            }
            AppError::Unauthenticated => write!(f, "Unauthenticated user"),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Network(msg) => write!(f, "Network failure: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(field_issues(errors))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.status() == Some(reqwest::StatusCode::NOT_FOUND) {
            return AppError::NotFound("Record not found".into());
        }
        AppError::Network(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// A single field-scoped validation finding. Advisory issues are shown to
/// the user but do not block submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
    pub advisory: bool,
}

impl FieldIssue {
    pub fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        FieldIssue {
            field: field.into(),
            message: message.into(),
            advisory: false,
        }
    }

    pub fn advisory(field: impl Into<String>, message: impl Into<String>) -> Self {
        FieldIssue {
            field: field.into(),
            message: message.into(),
            advisory: true,
        }
    }
}

pub(crate) fn field_issues(errors: ValidationErrors) -> Vec<FieldIssue> {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(|e| FieldIssue {
                field: field_key(field.as_ref()),
                message: e
                    .message
                    .as_ref()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "Invalid value".to_string()),
                advisory: false,
            })
        })
        .collect()
}

/// Issue keys use the store's camelCase field names; the `kind` draft field
/// maps to the wire name `type`.
pub(crate) fn field_key(field: &str) -> String {
    if field == "kind" {
        return "type".to_string();
    }
    let mut key = String::with_capacity(field.len());
    let mut upper_next = false;
    for ch in field.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            key.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            key.push(ch);
        }
    }
    key
}
