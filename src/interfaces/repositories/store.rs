use async_trait::async_trait;
use futures::Stream;
use tokio::sync::watch;

use crate::{entities::record::EntityRecord, errors::AppError, identity::UserId};

/// Remote store capability set, one instance per collection. Identity is an
/// explicit parameter on every operation; adapters never read ambient auth
/// state.
#[async_trait]
pub trait RecordStore<R: EntityRecord>: Send + Sync {
    /// Persists a new record. The store assigns the id and creation time and
    /// stamps the owner; the stored record is returned.
    async fn create(&self, owner: &UserId, record: R) -> Result<R, AppError>;

    /// Merges the record's domain fields into the existing entry, preserving
    /// store-assigned metadata. `NotFound` if the id does not exist.
    async fn update(&self, owner: &UserId, id: &str, record: R) -> Result<R, AppError>;

    async fn remove(&self, owner: &UserId, id: &str) -> Result<(), AppError>;

    /// Pulls the owner's collection in insertion order.
    async fn list(&self, owner: &UserId) -> Result<Vec<R>, AppError>;
}

/// Stores that can push the full collection to subscribers on every change.
pub trait RealtimeStore<R: EntityRecord>: RecordStore<R> {
    fn subscribe(&self, owner: &UserId) -> RecordStream<R>;
}

/// Subscription handle for one owner's collection. Each snapshot is the full
/// ordered collection; dropping the handle unsubscribes.
pub struct RecordStream<R> {
    rx: watch::Receiver<Vec<R>>,
}

impl<R: Clone + Send + Sync + 'static> RecordStream<R> {
    pub(crate) fn new(rx: watch::Receiver<Vec<R>>) -> Self {
        RecordStream { rx }
    }

    /// Latest snapshot without waiting.
    pub fn current(&self) -> Vec<R> {
        self.rx.borrow().clone()
    }

    /// Waits for the next snapshot. `None` once the store is gone.
    pub async fn changed(&mut self) -> Option<Vec<R>> {
        match self.rx.changed().await {
            Ok(()) => Some(self.rx.borrow_and_update().clone()),
            Err(_) => None,
        }
    }

    pub fn into_stream(self) -> impl Stream<Item = Vec<R>> {
        futures::stream::unfold(self, |mut handle| async move {
            handle.changed().await.map(|snapshot| (snapshot, handle))
        })
    }
}
