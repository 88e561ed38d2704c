use chrono::Utc;

use devautomate_client::{
    AppState,
    confirm::AlwaysConfirm,
    identity::{StaticIdentity, UserId, require_user},
    repositories::store::RealtimeStore,
    settings::AppConfig,
    use_cases::{
        editor::{RecordEditor, SubmitOutcome},
        sync::ListSync,
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = match AppConfig::new() {
        Ok(cfg) => {
            tracing::info!("Loaded configuration: {:?}", cfg);
            cfg
        }
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let state = AppState::new(&config)?;
    let identity = StaticIdentity::signed_in(UserId::random());
    let owner = require_user(&identity)?;

    tracing::info!("🚀 Starting {} client v{}", config.name, env!("CARGO_PKG_VERSION"));

    // Walk a tutorial through its whole lifecycle against the realtime store.
    let mut editor = RecordEditor::new(state.tutorials.clone(), AlwaysConfirm);
    let mut stream = state.tutorials.subscribe(&owner);
    let mut list = ListSync::new(state.tutorials.clone(), owner.clone());

    editor.open_add();
    if let Some(draft) = editor.draft_mut() {
        draft.name = "Rust para iniciantes".into();
        draft.description = "Introdução prática à linguagem Rust".into();
        draft.duration = "2 horas".into();
        draft.kind = "Programação".into();
        draft.posted_date = Some(Utc::now().date_naive());
    }

    let saved_id = match editor.submit(&identity).await? {
        SubmitOutcome::Saved { id } => id,
        other => anyhow::bail!("tutorial submit rejected: {:?}", other),
    };

    if let Some(snapshot) = stream.changed().await {
        list.apply_snapshot(snapshot);
    }
    tracing::info!(count = list.items().len(), "tutoriais sincronizados");

    let Some(stored) = list.items().first().cloned() else {
        anyhow::bail!("saved tutorial missing from the synchronized list");
    };
    editor.open_edit(stored);
    if let Some(draft) = editor.draft_mut() {
        draft.duration = "3 horas".into();
    }
    editor.submit(&identity).await?;

    editor.delete(&identity, &saved_id).await?;
    list.refresh().await?;
    tracing::info!(count = list.items().len(), "tutorial removido");

    println!("{}", serde_json::to_string_pretty(list.items())?);
    Ok(())
}
