//! Time-bounded snapshot of the record store for the browse view.
//!
//! Browsing re-runs filters often; the snapshot is reloaded from the store
//! only once it is older than the TTL, or on explicit [`SnapshotCache::refresh`].
//! A reload first asks the collection to re-read its backing storage.

use crate::errors::StoreError;
use crate::models::ArticleRecord;
use crate::store::{DocumentCollection, RecordStore};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

/// How long a loaded snapshot stays fresh.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

#[derive(Debug)]
pub struct SnapshotCache<C> {
    store: RecordStore<C>,
    ttl: Duration,
    cached: Option<(Instant, Arc<Vec<ArticleRecord>>)>,
}

impl<C: DocumentCollection> SnapshotCache<C> {
    pub fn new(store: RecordStore<C>, ttl: Duration) -> Self {
        Self {
            store,
            ttl,
            cached: None,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The current snapshot, reloaded first if missing or stale.
    pub async fn snapshot(&mut self) -> Result<Arc<Vec<ArticleRecord>>, StoreError> {
        match &self.cached {
            Some((loaded_at, records)) if loaded_at.elapsed() < self.ttl => {
                debug!(records = records.len(), "Serving cached snapshot");
                Ok(Arc::clone(records))
            }
            _ => self.refresh().await,
        }
    }

    /// Reload from the store regardless of age.
    #[instrument(level = "debug", skip_all)]
    pub async fn refresh(&mut self) -> Result<Arc<Vec<ArticleRecord>>, StoreError> {
        self.store.reload().await?;
        let records = Arc::new(self.store.get_all().await?);
        debug!(records = records.len(), "Loaded snapshot");
        self.cached = Some((Instant::now(), Arc::clone(&records)));
        Ok(records)
    }

    /// Drop the snapshot so the next call reloads.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}
