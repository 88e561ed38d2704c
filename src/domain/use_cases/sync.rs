use std::sync::Arc;

use crate::{
    entities::record::EntityRecord, errors::AppError, identity::UserId,
    repositories::store::RecordStore,
};

/// Client-side mirror of one owner's collection, fed by pull
/// ([`ListSync::refresh`]) or by snapshots from a realtime subscription
/// ([`ListSync::apply_snapshot`]). Every successful sync replaces the
/// collection wholesale; a failed pull keeps the previous items.
pub struct ListSync<R, S>
where
    R: EntityRecord,
    S: RecordStore<R> + ?Sized,
{
    store: Arc<S>,
    owner: UserId,
    items: Vec<R>,
    loading: bool,
}

impl<R, S> ListSync<R, S>
where
    R: EntityRecord,
    S: RecordStore<R> + ?Sized,
{
    pub fn new(store: Arc<S>, owner: UserId) -> Self {
        ListSync {
            store,
            owner,
            items: Vec::new(),
            loading: false,
        }
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub async fn refresh(&mut self) -> Result<(), AppError> {
        self.loading = true;
        match self.store.list(&self.owner).await {
            Ok(records) => {
                self.items = records;
                self.loading = false;
                Ok(())
            }
            Err(err) => {
                self.loading = false;
                tracing::warn!(collection = R::COLLECTION, error = %err, "list refresh failed");
                Err(err)
            }
        }
    }

    pub fn apply_snapshot(&mut self, records: Vec<R>) {
        self.items = records;
        self.loading = false;
    }
}
