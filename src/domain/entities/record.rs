use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Serialize, de::DeserializeOwned};
use validator::ValidationError;

use crate::constants::DATE_FMT;
use crate::errors::FieldIssue;
use crate::identity::UserId;

/// A persisted record as the remote store holds it.
///
/// `id` is empty until the store assigns one on first create; the store also
/// stamps owner and creation time through [`EntityRecord::assign_meta`].
/// Collections without owner scoping (comments) only take the id.
pub trait EntityRecord:
    Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    const COLLECTION: &'static str;
    type Draft: EntityDraft<Record = Self>;

    fn id(&self) -> &str;
    fn created_at(&self) -> Option<DateTime<Utc>>;
    fn assign_meta(&mut self, id: String, owner: &UserId, created_at: DateTime<Utc>);
}

/// The editable field values of a record being created or edited.
pub trait EntityDraft: Clone + fmt::Debug + Default + Send + Sync + 'static {
    type Record: EntityRecord<Draft = Self>;

    fn from_record(record: &Self::Record) -> Self;
    fn into_record(self) -> Self::Record;

    /// Full validation pass. Empty means valid; advisory issues do not block
    /// submission.
    fn check(&self) -> Vec<FieldIssue>;

    /// True when every field still holds its empty/default value.
    fn is_empty(&self) -> bool;

    /// Field-for-field value comparison against the persisted baseline.
    /// Dates compare through their canonical formatted representation.
    fn differs_from(&self, baseline: &Self::Record) -> bool;
}

/// Unsaved changes exist: against the baseline when editing, against the
/// empty draft when creating.
pub fn is_dirty<D: EntityDraft>(draft: &D, baseline: Option<&D::Record>) -> bool {
    match baseline {
        Some(record) => draft.differs_from(record),
        None => !draft.is_empty(),
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FMT).to_string()
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FMT).ok()
}

pub(crate) fn required_text(
    value: &str,
    min: usize,
    message: &'static str,
) -> Result<(), ValidationError> {
    if value.trim().len() < min {
        return Err(new_validation_error("min_length", message));
    }
    Ok(())
}

pub(crate) fn new_validation_error(code: &'static str, msg: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(msg));
    err
}
