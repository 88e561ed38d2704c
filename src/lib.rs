mod domain;
mod infrastructure;
mod interfaces;
pub mod constants;
pub mod errors;
pub mod settings;

pub use domain::{entities, use_cases};
pub use infrastructure::{confirm, identity};
pub use interfaces::repositories;

use std::sync::Arc;

use entities::{project::Project, tutorial::Tutorial};
use errors::AppError;
use repositories::{memory_repo::MemoryRealtimeStore, rest_repo::RestCommentStore};
use settings::AppConfig;

/// One store adapter per collection, shared by the record manager screens.
pub struct AppState {
    pub projects: Arc<MemoryRealtimeStore<Project>>,
    pub tutorials: Arc<MemoryRealtimeStore<Tutorial>>,
    pub comments: Arc<RestCommentStore>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        Ok(AppState {
            projects: Arc::new(MemoryRealtimeStore::new()),
            tutorials: Arc::new(MemoryRealtimeStore::new()),
            comments: Arc::new(RestCommentStore::new(config)?),
        })
    }
}
