use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use parking_lot::RwLock;
use tokio::sync::watch;
use uuid::Uuid;

use crate::{
    entities::record::EntityRecord,
    errors::AppError,
    identity::UserId,
    repositories::store::{RealtimeStore, RecordStore, RecordStream},
};

struct OwnerCollection<R> {
    records: RwLock<Vec<R>>,
    tx: watch::Sender<Vec<R>>,
}

impl<R: Clone> OwnerCollection<R> {
    fn new() -> Self {
        let (tx, _rx) = watch::channel(Vec::new());
        OwnerCollection {
            records: RwLock::new(Vec::new()),
            tx,
        }
    }

    fn publish(&self) {
        self.tx.send_replace(self.records.read().clone());
    }
}

/// Realtime store backing projects and tutorials: per-owner collections with
/// push fan-out of the full snapshot on every change. Insertion order is
/// preserved; updates keep the record's position.
pub struct MemoryRealtimeStore<R: EntityRecord> {
    collections: DashMap<UserId, OwnerCollection<R>>,
}

impl<R: EntityRecord> MemoryRealtimeStore<R> {
    pub fn new() -> Self {
        MemoryRealtimeStore {
            collections: DashMap::new(),
        }
    }

    /// Live subscriptions for one owner. Drops of [`RecordStream`] handles
    /// deregister immediately.
    pub fn subscriber_count(&self, owner: &UserId) -> usize {
        self.collections
            .get(owner)
            .map(|c| c.tx.receiver_count())
            .unwrap_or(0)
    }
}

impl<R: EntityRecord> Default for MemoryRealtimeStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: EntityRecord> RecordStore<R> for MemoryRealtimeStore<R> {
    async fn create(&self, owner: &UserId, mut record: R) -> Result<R, AppError> {
        let entry = self
            .collections
            .entry(owner.clone())
            .or_insert_with(OwnerCollection::new);
        record.assign_meta(Uuid::new_v4().to_string(), owner, Utc::now());
        entry.records.write().push(record.clone());
        entry.publish();
        tracing::debug!(collection = R::COLLECTION, id = %record.id(), "record created");
        Ok(record)
    }

    async fn update(&self, owner: &UserId, id: &str, mut record: R) -> Result<R, AppError> {
        let entry = self
            .collections
            .get(owner)
            .ok_or_else(|| AppError::NotFound("Record not found".into()))?;
        {
            let mut records = entry.records.write();
            let Some(position) = records.iter().position(|r| r.id() == id) else {
                return Err(AppError::NotFound("Record not found".into()));
            };
            let created_at = records[position].created_at().unwrap_or_else(Utc::now);
            record.assign_meta(id.to_string(), owner, created_at);
            records[position] = record.clone();
        }
        entry.publish();
        tracing::debug!(collection = R::COLLECTION, id, "record updated");
        Ok(record)
    }

    async fn remove(&self, owner: &UserId, id: &str) -> Result<(), AppError> {
        if let Some(entry) = self.collections.get(owner) {
            let removed = {
                let mut records = entry.records.write();
                let before = records.len();
                records.retain(|r| r.id() != id);
                records.len() != before
            };
            if removed {
                entry.publish();
                tracing::debug!(collection = R::COLLECTION, id, "record removed");
            }
        }
        // Removing an id that is already gone is not an error; the caller
        // re-syncs afterwards either way.
        Ok(())
    }

    async fn list(&self, owner: &UserId) -> Result<Vec<R>, AppError> {
        Ok(self
            .collections
            .get(owner)
            .map(|c| c.records.read().clone())
            .unwrap_or_default())
    }
}

impl<R: EntityRecord> RealtimeStore<R> for MemoryRealtimeStore<R> {
    fn subscribe(&self, owner: &UserId) -> RecordStream<R> {
        let entry = self
            .collections
            .entry(owner.clone())
            .or_insert_with(OwnerCollection::new);
        RecordStream::new(entry.tx.subscribe())
    }
}
