use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::{
    constants::EMAIL_RE,
    entities::record::new_validation_error,
    errors::{FieldIssue, field_issues},
};

const MIN_PASSWORD_LENGTH: usize = 6;

/// Sign-in form input. The authentication exchange itself happens in the
/// identity collaborator; only the field checks live here.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Credentials {
    #[validate(custom(function = "validate_email"))]
    pub email: String,

    #[validate(custom(function = "validate_password"))]
    pub password: String,
}

impl Credentials {
    pub fn check(&self) -> Vec<FieldIssue> {
        match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => field_issues(errors),
        }
    }
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    if !EMAIL_RE.is_match(&email.to_lowercase()) {
        return Err(new_validation_error("invalid_email", "Email inválido"));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.len() <= MIN_PASSWORD_LENGTH {
        return Err(new_validation_error(
            "password_too_short",
            "A senha deve ter mais de 6 caracteres",
        ));
    }
    Ok(())
}
