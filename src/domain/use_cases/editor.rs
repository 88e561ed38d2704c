use std::sync::Arc;

use crate::{
    confirm::ConfirmPrompt,
    entities::record::{EntityDraft, EntityRecord, is_dirty},
    errors::{AppError, FieldIssue},
    identity::{IdentityProvider, require_user},
    repositories::store::RecordStore,
};

const DISCARD_PROMPT: &str = "Tem certeza que deseja descartar as alterações?";
const DELETE_PROMPT: &str = "Deseja realmente excluir este item?";

/// Which surface a record manager screen is currently showing.
#[derive(Debug)]
pub enum EditorMode<R: EntityRecord> {
    List,
    Form {
        draft: R::Draft,
        baseline: Option<R>,
        issues: Vec<FieldIssue>,
    },
}

#[derive(Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Persisted; the caller refreshes the list next.
    Saved { id: String },
    /// Blocking validation issues; the form stays up with them displayed.
    Invalid,
    /// Not in form mode; nothing happened.
    Ignored,
}

#[derive(Debug, PartialEq, Eq)]
pub enum CancelOutcome {
    Closed,
    /// User declined to discard; the form stays up unchanged.
    Kept,
    Ignored,
}

#[derive(Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Removed; the caller refreshes the list next.
    Removed,
    /// User declined the confirmation dialog.
    Declined,
    Ignored,
}

/// Two-state machine behind every record manager screen: a list of the
/// owner's records, or a form editing one draft. One engine serves all
/// entity types through the draft/record schema traits.
///
/// Submission is optimistic: no existence check precedes the store call, and
/// nothing is rolled back locally on failure; the draft simply stays up.
pub struct RecordEditor<R, S, C>
where
    R: EntityRecord,
    S: RecordStore<R>,
    C: ConfirmPrompt,
{
    store: Arc<S>,
    confirm: C,
    mode: EditorMode<R>,
    guarded_delete: bool,
}

impl<R, S, C> RecordEditor<R, S, C>
where
    R: EntityRecord,
    S: RecordStore<R>,
    C: ConfirmPrompt,
{
    pub fn new(store: Arc<S>, confirm: C) -> Self {
        RecordEditor {
            store,
            confirm,
            mode: EditorMode::List,
            guarded_delete: false,
        }
    }

    /// Variant whose delete action is gated on a blocking confirmation
    /// dialog (the comments screen).
    pub fn with_guarded_delete(store: Arc<S>, confirm: C) -> Self {
        RecordEditor {
            store,
            confirm,
            mode: EditorMode::List,
            guarded_delete: true,
        }
    }

    pub fn mode(&self) -> &EditorMode<R> {
        &self.mode
    }

    pub fn is_list(&self) -> bool {
        matches!(self.mode, EditorMode::List)
    }

    pub fn is_form(&self) -> bool {
        !self.is_list()
    }

    pub fn draft(&self) -> Option<&R::Draft> {
        match &self.mode {
            EditorMode::Form { draft, .. } => Some(draft),
            EditorMode::List => None,
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut R::Draft> {
        match &mut self.mode {
            EditorMode::Form { draft, .. } => Some(draft),
            EditorMode::List => None,
        }
    }

    pub fn issues(&self) -> &[FieldIssue] {
        match &self.mode {
            EditorMode::Form { issues, .. } => issues,
            EditorMode::List => &[],
        }
    }

    /// Opens the form over an empty draft. No-op outside list mode.
    pub fn open_add(&mut self) {
        if self.is_list() {
            self.mode = EditorMode::Form {
                draft: R::Draft::default(),
                baseline: None,
                issues: Vec::new(),
            };
        }
    }

    /// Opens the form over an existing record. No-op outside list mode.
    pub fn open_edit(&mut self, record: R) {
        if self.is_list() {
            self.mode = EditorMode::Form {
                draft: R::Draft::from_record(&record),
                baseline: Some(record),
                issues: Vec::new(),
            };
        }
    }

    /// Clears the issues attached to one field; the field is not
    /// re-validated until the next submit.
    pub fn touch_field(&mut self, field: &str) {
        if let EditorMode::Form { issues, .. } = &mut self.mode {
            issues.retain(|i| i.field != field);
        }
    }

    /// Validates the draft and persists it, creating when there is no
    /// baseline and no carried id, updating otherwise. On success the
    /// editor returns to the list; on adapter failure the form and draft
    /// stay untouched and the error propagates.
    pub async fn submit<I>(&mut self, identity: &I) -> Result<SubmitOutcome, AppError>
    where
        I: IdentityProvider + ?Sized,
    {
        let (record, existing_id) = match &mut self.mode {
            EditorMode::Form {
                draft,
                baseline,
                issues,
            } => {
                let found = draft.check();
                if found.iter().any(|i| !i.advisory) {
                    *issues = found;
                    return Ok(SubmitOutcome::Invalid);
                }
                *issues = found;
                let record = draft.clone().into_record();
                let existing_id = baseline
                    .as_ref()
                    .map(|b| b.id().to_string())
                    .or_else(|| (!record.id().is_empty()).then(|| record.id().to_string()));
                (record, existing_id)
            }
            EditorMode::List => return Ok(SubmitOutcome::Ignored),
        };

        let owner = require_user(identity)?;
        let saved = match existing_id {
            Some(id) => self.store.update(&owner, &id, record).await?,
            None => self.store.create(&owner, record).await?,
        };

        tracing::info!(collection = R::COLLECTION, id = %saved.id(), "record saved");
        self.mode = EditorMode::List;
        Ok(SubmitOutcome::Saved {
            id: saved.id().to_string(),
        })
    }

    /// Leaves the form. A dirty draft requires the user to confirm
    /// discarding; declining keeps the form exactly as it was.
    pub async fn cancel(&mut self) -> CancelOutcome {
        let dirty = match &self.mode {
            EditorMode::Form {
                draft, baseline, ..
            } => is_dirty(draft, baseline.as_ref()),
            EditorMode::List => return CancelOutcome::Ignored,
        };

        if dirty && !self.confirm.confirm(DISCARD_PROMPT).await {
            return CancelOutcome::Kept;
        }

        self.mode = EditorMode::List;
        CancelOutcome::Closed
    }

    /// Deletes a record from list mode. The guarded variant asks first. A
    /// `NotFound` failure means the list is stale; callers refresh on it.
    pub async fn delete<I>(&mut self, identity: &I, id: &str) -> Result<DeleteOutcome, AppError>
    where
        I: IdentityProvider + ?Sized,
    {
        if !self.is_list() {
            return Ok(DeleteOutcome::Ignored);
        }
        if self.guarded_delete && !self.confirm.confirm(DELETE_PROMPT).await {
            return Ok(DeleteOutcome::Declined);
        }

        let owner = require_user(identity)?;
        self.store.remove(&owner, id).await?;

        tracing::info!(collection = R::COLLECTION, id, "record deleted");
        Ok(DeleteOutcome::Removed)
    }
}
