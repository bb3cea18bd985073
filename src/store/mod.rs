//! Persistence of article records keyed by link.
//!
//! The store is written against a minimal document-collection interface,
//! [`DocumentCollection`], with the four primitives a document database
//! offers: `find_one`, `update_one`, `insert_one` and `find`. Two collections
//! are provided:
//!
//! | Collection | Module | Notes |
//! |------------|--------|-------|
//! | In-memory | [`memory`] | Tests and embedding |
//! | JSON file | [`json_file`] | Persistent, rewritten after every write |
//!
//! [`RecordStore`] layers the upsert-by-link contract on top.
//!
//! # Concurrency
//!
//! `upsert_all` performs a lookup followed by a write for each record. It
//! assumes a single writer; two concurrent upserts of the same new link
//! could both insert.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileCollection;
pub use memory::MemoryCollection;

use crate::errors::StoreError;
use crate::models::ArticleRecord;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Collection-assigned identity of a stored document.
pub type DocumentId = u64;

/// A record together with the identity the collection gave it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StoredDocument {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    #[serde(flatten)]
    pub record: ArticleRecord,
}

/// A document collection holding [`ArticleRecord`]s.
pub trait DocumentCollection {
    /// First document whose record satisfies `predicate`.
    async fn find_one<P>(&self, predicate: P) -> Result<Option<StoredDocument>, StoreError>
    where
        P: Fn(&ArticleRecord) -> bool;

    /// Replace the record stored under `id`, keeping the id.
    async fn update_one(&self, id: DocumentId, record: &ArticleRecord) -> Result<(), StoreError>;

    /// Store a new document and return its id.
    async fn insert_one(&self, record: &ArticleRecord) -> Result<DocumentId, StoreError>;

    /// Every record satisfying `predicate`, in collection order.
    async fn find<P>(&self, predicate: P) -> Result<Vec<ArticleRecord>, StoreError>
    where
        P: Fn(&ArticleRecord) -> bool;

    /// Pick up writes made behind this handle's back, if the backend can see them.
    async fn reload(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Article records keyed by `link`.
#[derive(Debug)]
pub struct RecordStore<C> {
    collection: C,
}

impl<C: DocumentCollection> RecordStore<C> {
    pub fn new(collection: C) -> Self {
        Self { collection }
    }

    pub fn collection(&self) -> &C {
        &self.collection
    }

    /// Insert or replace each record by its `link`.
    ///
    /// Records are written one at a time. On error the batch stops at the
    /// failing record and everything before it stays written.
    ///
    /// # Returns
    ///
    /// The number of records processed.
    #[instrument(level = "info", skip_all, fields(batch = records.len()))]
    pub async fn upsert_all(&self, records: &[ArticleRecord]) -> Result<usize, StoreError> {
        let mut inserted = 0usize;
        let mut updated = 0usize;

        for record in records {
            let existing = self
                .collection
                .find_one(|stored| stored.link == record.link)
                .await?;

            match existing {
                Some(doc) => {
                    self.collection.update_one(doc.id, record).await?;
                    debug!(id = doc.id, link = %record.link, "Updated record");
                    updated += 1;
                }
                None => {
                    let id = self.collection.insert_one(record).await?;
                    debug!(id, link = %record.link, "Inserted record");
                    inserted += 1;
                }
            }
        }

        let processed = inserted + updated;
        info!(processed, inserted, updated, "Upserted records");
        Ok(processed)
    }

    /// Re-read the underlying collection.
    pub async fn reload(&self) -> Result<(), StoreError> {
        self.collection.reload().await
    }

    /// Every stored record, in the collection's natural order.
    #[instrument(level = "debug", skip_all)]
    pub async fn get_all(&self) -> Result<Vec<ArticleRecord>, StoreError> {
        self.collection.find(|_| true).await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{ArticleStub, Category, ArticleDetail, Tag};
    use chrono::Utc;

    pub(crate) fn record(link: &str, title: &str) -> ArticleRecord {
        let stub = ArticleStub {
            title: title.to_string(),
            link: link.to_string(),
            thumbnail: None,
        };
        let mut detail = ArticleDetail::retrieval_error();
        detail.title = title.to_string();
        detail.author = "Author".to_string();
        ArticleRecord::assemble(
            stub,
            detail,
            None,
            &Category::new("Web", "https://blog.test/web/"),
            Utc::now(),
        )
    }

    /// Rejects inserts of one specific link.
    struct RejectingCollection {
        inner: MemoryCollection,
        reject_link: String,
    }

    impl DocumentCollection for RejectingCollection {
        async fn find_one<P>(&self, predicate: P) -> Result<Option<StoredDocument>, StoreError>
        where
            P: Fn(&ArticleRecord) -> bool,
        {
            self.inner.find_one(predicate).await
        }

        async fn update_one(&self, id: DocumentId, record: &ArticleRecord) -> Result<(), StoreError> {
            self.inner.update_one(id, record).await
        }

        async fn insert_one(&self, record: &ArticleRecord) -> Result<DocumentId, StoreError> {
            if record.link == self.reject_link {
                return Err(StoreError::Rejected(record.link.clone()));
            }
            self.inner.insert_one(record).await
        }

        async fn find<P>(&self, predicate: P) -> Result<Vec<ArticleRecord>, StoreError>
        where
            P: Fn(&ArticleRecord) -> bool,
        {
            self.inner.find(predicate).await
        }
    }

    #[tokio::test]
    async fn test_upsert_inserts_new_records() {
        let store = RecordStore::new(MemoryCollection::new());
        let count = store
            .upsert_all(&[record("https://blog.test/a", "A"), record("https://blog.test/b", "B")])
            .await
            .unwrap();

        assert_eq!(count, 2);
        assert_eq!(store.get_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_upsert_twice_is_idempotent() {
        let store = RecordStore::new(MemoryCollection::new());
        let batch = vec![record("https://blog.test/a", "A"), record("https://blog.test/b", "B")];

        store.upsert_all(&batch).await.unwrap();
        let first = store.get_all().await.unwrap();
        let count = store.upsert_all(&batch).await.unwrap();
        let second = store.get_all().await.unwrap();

        assert_eq!(count, 2);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_upsert_replaces_without_merging() {
        let store = RecordStore::new(MemoryCollection::new());
        let mut original = record("https://blog.test/a", "Old");
        original.tags.push(Tag {
            name: "kept?".to_string(),
            ..Default::default()
        });
        original.thumbnail = Some("https://blog.test/old.jpg".to_string());
        store.upsert_all(&[original]).await.unwrap();
        let id_before = store
            .collection()
            .find_one(|r| r.link == "https://blog.test/a")
            .await
            .unwrap()
            .unwrap()
            .id;

        let replacement = record("https://blog.test/a", "New");
        store.upsert_all(&[replacement.clone()]).await.unwrap();

        let all = store.get_all().await.unwrap();
        assert_eq!(all, vec![replacement]);
        assert!(all[0].tags.is_empty());
        assert!(all[0].thumbnail.is_none());

        let id_after = store
            .collection()
            .find_one(|r| r.link == "https://blog.test/a")
            .await
            .unwrap()
            .unwrap()
            .id;
        assert_eq!(id_before, id_after);
    }

    #[tokio::test]
    async fn test_failure_keeps_earlier_records() {
        let store = RecordStore::new(RejectingCollection {
            inner: MemoryCollection::new(),
            reject_link: "https://blog.test/b".to_string(),
        });
        let batch = [
            record("https://blog.test/a", "A"),
            record("https://blog.test/b", "B"),
            record("https://blog.test/c", "C"),
        ];

        let result = store.upsert_all(&batch).await;
        assert!(matches!(result, Err(StoreError::Rejected(_))));

        let links: Vec<String> = store
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.link)
            .collect();
        assert_eq!(links, ["https://blog.test/a"]);
    }

    #[test]
    fn test_stored_document_shape() {
        let doc = StoredDocument {
            id: 7,
            record: record("https://blog.test/a", "A"),
        };
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["_id"], 7);
        assert_eq!(value["link"], "https://blog.test/a");

        let back: StoredDocument = serde_json::from_value(value).unwrap();
        assert_eq!(back, doc);
    }
}
