//! Collection held entirely in memory.

use super::{DocumentCollection, DocumentId, StoredDocument};
use crate::errors::StoreError;
use crate::models::ArticleRecord;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Ordered documents plus the next id to hand out.
#[derive(Debug, Default)]
pub(crate) struct Documents {
    next_id: DocumentId,
    docs: Vec<StoredDocument>,
}

impl Documents {
    pub(crate) fn from_docs(docs: Vec<StoredDocument>) -> Self {
        let next_id = docs.iter().map(|d| d.id + 1).max().unwrap_or(0);
        Self { next_id, docs }
    }

    pub(crate) fn docs(&self) -> &[StoredDocument] {
        &self.docs
    }

    pub(crate) fn find_one<P>(&self, predicate: P) -> Option<StoredDocument>
    where
        P: Fn(&ArticleRecord) -> bool,
    {
        self.docs.iter().find(|d| predicate(&d.record)).cloned()
    }

    pub(crate) fn find<P>(&self, predicate: P) -> Vec<ArticleRecord>
    where
        P: Fn(&ArticleRecord) -> bool,
    {
        self.docs
            .iter()
            .filter(|d| predicate(&d.record))
            .map(|d| d.record.clone())
            .collect()
    }

    /// Swap in `record` for document `id`, returning the previous record.
    pub(crate) fn replace(&mut self, id: DocumentId, record: ArticleRecord) -> Result<ArticleRecord, StoreError> {
        let doc = self
            .docs
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or(StoreError::MissingDocument(id))?;
        Ok(std::mem::replace(&mut doc.record, record))
    }

    pub(crate) fn push(&mut self, record: ArticleRecord) -> DocumentId {
        let id = self.next_id;
        self.next_id += 1;
        self.docs.push(StoredDocument { id, record });
        id
    }

    /// Undo the most recent [`push`](Self::push).
    pub(crate) fn pop(&mut self) {
        if self.docs.pop().is_some() {
            self.next_id -= 1;
        }
    }
}

/// Collection kept entirely in memory; cloning shares the same documents.
#[derive(Debug, Clone, Default)]
pub struct MemoryCollection {
    documents: Arc<RwLock<Documents>>,
}

impl MemoryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.docs().len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl DocumentCollection for MemoryCollection {
    async fn find_one<P>(&self, predicate: P) -> Result<Option<StoredDocument>, StoreError>
    where
        P: Fn(&ArticleRecord) -> bool,
    {
        Ok(self.documents.read().await.find_one(predicate))
    }

    async fn update_one(&self, id: DocumentId, record: &ArticleRecord) -> Result<(), StoreError> {
        self.documents.write().await.replace(id, record.clone())?;
        Ok(())
    }

    async fn insert_one(&self, record: &ArticleRecord) -> Result<DocumentId, StoreError> {
        Ok(self.documents.write().await.push(record.clone()))
    }

    async fn find<P>(&self, predicate: P) -> Result<Vec<ArticleRecord>, StoreError>
    where
        P: Fn(&ArticleRecord) -> bool,
    {
        Ok(self.documents.read().await.find(predicate))
    }
}
