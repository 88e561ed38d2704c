mod test_utils;

use test_utils::*;

use std::sync::Arc;

use async_trait::async_trait;
use mockall::mock;

use devautomate_client::{
    entities::{
        comment::Comment,
        project::Project,
        record::{EntityDraft, EntityRecord},
        tutorial::Tutorial,
    },
    errors::AppError,
    identity::{StaticIdentity, UserId},
    repositories::{memory_repo::MemoryRealtimeStore, store::RecordStore},
    use_cases::{
        editor::{CancelOutcome, DeleteOutcome, RecordEditor, SubmitOutcome},
        sync::ListSync,
    },
};

mock! {
    pub CommentStore {}

    #[async_trait]
    impl RecordStore<Comment> for CommentStore {
        async fn create(&self, owner: &UserId, record: Comment) -> Result<Comment, AppError>;
        async fn update(&self, owner: &UserId, id: &str, record: Comment) -> Result<Comment, AppError>;
        async fn remove(&self, owner: &UserId, id: &str) -> Result<(), AppError>;
        async fn list(&self, owner: &UserId) -> Result<Vec<Comment>, AppError>;
    }
}

fn tutorial_editor() -> (
    Arc<MemoryRealtimeStore<Tutorial>>,
    RecordEditor<Tutorial, MemoryRealtimeStore<Tutorial>, RecordingConfirm>,
    RecordingConfirm,
) {
    let store = Arc::new(MemoryRealtimeStore::new());
    let confirm = RecordingConfirm::accepting();
    let editor = RecordEditor::new(store.clone(), confirm.clone());
    (store, editor, confirm)
}

#[tokio::test]
async fn add_then_submit_creates_record_and_returns_to_list() {
    let (store, mut editor, _confirm) = tutorial_editor();
    let owner = sample_user();
    let identity = signed_in(&owner);

    editor.open_add();
    *editor.draft_mut().unwrap() = valid_tutorial_draft();

    let outcome = editor.submit(&identity).await.unwrap();
    let SubmitOutcome::Saved { id } = outcome else {
        panic!("expected save, got {outcome:?}");
    };
    assert!(!id.is_empty());
    assert!(editor.is_list());

    let records = store.list(&owner).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, id);
    assert_eq!(records[0].name, "Curso de Docker");
    assert_eq!(records[0].posted_date, "02/05/2025");
    assert_eq!(records[0].owner_id, owner.to_string());
    assert!(records[0].created_at.is_some());
}

#[tokio::test]
async fn invalid_draft_keeps_form_and_never_reaches_store() {
    let store = Arc::new(MemoryRealtimeStore::<Project>::new());
    let mut editor = RecordEditor::new(store.clone(), RecordingConfirm::accepting());
    let owner = sample_user();
    let identity = signed_in(&owner);

    editor.open_add();
    *editor.draft_mut().unwrap() = devautomate_client::entities::project::ProjectDraft {
        description: "short".into(),
        ..valid_project_draft()
    };

    assert_eq!(editor.submit(&identity).await.unwrap(), SubmitOutcome::Invalid);
    assert!(editor.is_form());
    assert_eq!(editor.issues().len(), 1);
    assert_eq!(editor.issues()[0].field, "description");
    assert!(store.list(&owner).await.unwrap().is_empty());
}

#[tokio::test]
async fn editing_updates_in_place_and_preserves_metadata() {
    let (store, mut editor, _confirm) = tutorial_editor();
    let owner = sample_user();
    let identity = signed_in(&owner);

    let first = store
        .create(&owner, valid_tutorial_draft().into_record())
        .await
        .unwrap();
    let second_draft = devautomate_client::entities::tutorial::TutorialDraft {
        name: "Curso de Kubernetes".into(),
        ..valid_tutorial_draft()
    };
    let second = store.create(&owner, second_draft.into_record()).await.unwrap();

    editor.open_edit(first.clone());
    editor.draft_mut().unwrap().duration = "6 horas".into();
    let outcome = editor.submit(&identity).await.unwrap();
    assert_eq!(
        outcome,
        SubmitOutcome::Saved {
            id: first.id.clone()
        }
    );

    let records = store.list(&owner).await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, first.id);
    assert_eq!(records[0].duration, "6 horas");
    assert_eq!(records[0].created_at, first.created_at);
    assert_eq!(records[1].id, second.id);
}

#[tokio::test]
async fn submit_outside_form_mode_is_ignored() {
    let (_store, mut editor, _confirm) = tutorial_editor();
    let identity = signed_in(&sample_user());

    assert_eq!(editor.submit(&identity).await.unwrap(), SubmitOutcome::Ignored);
}

#[tokio::test]
async fn open_edit_while_form_is_active_is_a_noop() {
    let (_store, mut editor, _confirm) = tutorial_editor();

    editor.open_add();
    editor.draft_mut().unwrap().name = "Rascunho".into();
    editor.open_edit(valid_tutorial_draft().into_record());

    assert_eq!(editor.draft().unwrap().name, "Rascunho");
}

#[tokio::test]
async fn cancel_with_clean_draft_skips_confirmation() {
    let (_store, mut editor, confirm) = tutorial_editor();

    editor.open_add();
    assert_eq!(editor.cancel().await, CancelOutcome::Closed);
    assert!(editor.is_list());
    assert!(!confirm.was_asked());
}

#[tokio::test]
async fn declining_discard_keeps_the_edited_draft() {
    let store = Arc::new(MemoryRealtimeStore::<Tutorial>::new());
    let confirm = RecordingConfirm::declining();
    let mut editor = RecordEditor::new(store.clone(), confirm.clone());
    let owner = sample_user();

    let record = store
        .create(&owner, valid_tutorial_draft().into_record())
        .await
        .unwrap();

    editor.open_edit(record);
    editor.draft_mut().unwrap().name = "Nome alterado".into();

    assert_eq!(editor.cancel().await, CancelOutcome::Kept);
    assert!(editor.is_form());
    assert_eq!(editor.draft().unwrap().name, "Nome alterado");
    assert_eq!(
        confirm.prompts(),
        vec!["Tem certeza que deseja descartar as alterações?"]
    );
}

#[tokio::test]
async fn confirming_discard_returns_to_list_without_store_mutation() {
    let (store, mut editor, confirm) = tutorial_editor();
    let owner = sample_user();

    let record = store
        .create(&owner, valid_tutorial_draft().into_record())
        .await
        .unwrap();
    let before = store.list(&owner).await.unwrap();

    editor.open_edit(record);
    editor.draft_mut().unwrap().name = "Nome alterado".into();

    assert_eq!(editor.cancel().await, CancelOutcome::Closed);
    assert!(editor.is_list());
    assert!(confirm.was_asked());
    assert_eq!(store.list(&owner).await.unwrap(), before);
}

#[tokio::test]
async fn touching_a_field_clears_only_its_issues() {
    let (_store, mut editor, _confirm) = tutorial_editor();
    let identity = signed_in(&sample_user());

    editor.open_add();
    *editor.draft_mut().unwrap() = devautomate_client::entities::tutorial::TutorialDraft {
        name: "ab".into(),
        description: "curta".into(),
        ..valid_tutorial_draft()
    };

    assert_eq!(editor.submit(&identity).await.unwrap(), SubmitOutcome::Invalid);
    assert_eq!(editor.issues().len(), 2);

    editor.touch_field("name");
    assert_eq!(editor.issues().len(), 1);
    assert_eq!(editor.issues()[0].field, "description");
}

#[tokio::test]
async fn tutorial_delete_is_immediate_and_unprompted() {
    let (store, mut editor, confirm) = tutorial_editor();
    let owner = sample_user();
    let identity = signed_in(&owner);

    let record = store
        .create(&owner, valid_tutorial_draft().into_record())
        .await
        .unwrap();

    let outcome = editor.delete(&identity, record.id()).await.unwrap();
    assert_eq!(outcome, DeleteOutcome::Removed);
    assert!(!confirm.was_asked());
    assert!(store.list(&owner).await.unwrap().is_empty());
}

#[tokio::test]
async fn guarded_delete_asks_before_removing() {
    let owner = sample_user();
    let identity = signed_in(&owner);

    let expected_owner = owner.clone();
    let mut mock = MockCommentStore::new();
    mock.expect_remove()
        .withf(move |o, id| *o == expected_owner && id == "42")
        .times(1)
        .returning(|_, _| Ok(()));
    let confirm = RecordingConfirm::accepting();
    let mut editor =
        RecordEditor::<Comment, _, _>::with_guarded_delete(Arc::new(mock), confirm.clone());

    let outcome = editor.delete(&identity, "42").await.unwrap();
    assert_eq!(outcome, DeleteOutcome::Removed);
    assert_eq!(confirm.prompts(), vec!["Deseja realmente excluir este item?"]);
}

#[tokio::test]
async fn declined_delete_never_reaches_store() {
    let owner = sample_user();
    let identity = signed_in(&owner);

    let mut mock = MockCommentStore::new();
    mock.expect_remove().times(0);
    let confirm = RecordingConfirm::declining();
    let mut editor =
        RecordEditor::<Comment, _, _>::with_guarded_delete(Arc::new(mock), confirm.clone());

    let outcome = editor.delete(&identity, "42").await.unwrap();
    assert_eq!(outcome, DeleteOutcome::Declined);
    assert!(confirm.was_asked());
}

#[tokio::test]
async fn failed_comment_delete_leaves_list_untouched() {
    let owner = sample_user();
    let identity = signed_in(&owner);

    let stored = valid_comment_draft().into_record();
    let mut listed = stored.clone();
    listed.id = "42".into();

    let mut mock = MockCommentStore::new();
    let snapshot = vec![listed.clone()];
    mock.expect_list()
        .returning(move |_| Ok(snapshot.clone()));
    mock.expect_remove()
        .returning(|_, _| Err(AppError::Network("connection reset".into())));
    let store = Arc::new(mock);

    let mut list: ListSync<Comment, _> = ListSync::new(store.clone(), owner.clone());
    list.refresh().await.unwrap();
    assert_eq!(list.items().len(), 1);

    let mut editor =
        RecordEditor::<Comment, _, _>::with_guarded_delete(store, RecordingConfirm::accepting());
    let err = editor.delete(&identity, "42").await.unwrap_err();
    assert!(matches!(err, AppError::Network(_)));

    assert_eq!(list.items(), std::slice::from_ref(&listed));
}

#[tokio::test]
async fn updating_a_vanished_record_reports_not_found() {
    let (store, mut editor, _confirm) = tutorial_editor();
    let owner = sample_user();
    let identity = signed_in(&owner);

    let mut ghost = valid_tutorial_draft().into_record();
    ghost.id = "gone".into();

    editor.open_edit(ghost);
    editor.draft_mut().unwrap().name = "Sem destino".into();

    let err = editor.submit(&identity).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(editor.is_form());
    assert!(store.list(&owner).await.unwrap().is_empty());
}

#[tokio::test]
async fn operations_require_a_signed_in_user() {
    let (_store, mut editor, _confirm) = tutorial_editor();
    let identity = StaticIdentity::signed_out();

    editor.open_add();
    *editor.draft_mut().unwrap() = valid_tutorial_draft();

    let err = editor.submit(&identity).await.unwrap_err();
    assert!(matches!(err, AppError::Unauthenticated));
    assert!(editor.is_form());
    assert_eq!(editor.draft().unwrap().name, "Curso de Docker");
}

#[tokio::test]
async fn advisory_rating_does_not_block_submission() {
    let owner = sample_user();
    let identity = signed_in(&owner);

    let mut mock = MockCommentStore::new();
    mock.expect_create()
        .withf(|_, record| record.rating == 5)
        .times(1)
        .returning(|_, mut record: Comment| {
            record.id = "7".into();
            Ok(record)
        });
    let mut editor =
        RecordEditor::<Comment, _, _>::with_guarded_delete(Arc::new(mock), RecordingConfirm::accepting());

    editor.open_add();
    *editor.draft_mut().unwrap() = devautomate_client::entities::comment::CommentDraft {
        rating: "9".into(),
        ..valid_comment_draft()
    };

    let outcome = editor.submit(&identity).await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Saved { id: "7".into() });
}
