//! Document collection persisted as a JSON array on disk.
//!
//! The whole file is loaded on [`JsonFileCollection::open`] and rewritten
//! after every successful write, so each upserted record is committed on its
//! own. Writes go to a sibling temporary file that is then renamed over the
//! target, and a failed write leaves the in-memory view unchanged.
//! [`reload`](DocumentCollection::reload) re-reads the file to pick up writes
//! from other processes.
//!
//! # File Format
//!
//! ```text
//! [
//!   { "_id": 0, "list_title": "...", "link": "https://...", ... },
//!   { "_id": 1, ... }
//! ]
//! ```

use super::memory::Documents;
use super::{DocumentCollection, DocumentId, StoredDocument};
use crate::errors::StoreError;
use crate::models::ArticleRecord;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

#[derive(Debug)]
pub struct JsonFileCollection {
    path: PathBuf,
    documents: Mutex<Documents>,
}

impl JsonFileCollection {
    /// Open the collection at `path`; a missing file is an empty collection.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be read or is not a JSON array of
    /// stored documents.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let docs = read_docs(&path).await?;
        info!(documents = docs.len(), "Opened JSON collection");

        Ok(Self {
            path,
            documents: Mutex::new(Documents::from_docs(docs)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, docs: &[StoredDocument]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(docs)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, json).await?;
        fs::rename(&tmp, &self.path).await?;
        debug!(path = %self.path.display(), documents = docs.len(), "Wrote JSON collection");
        Ok(())
    }
}

async fn read_docs(path: &Path) -> Result<Vec<StoredDocument>, StoreError> {
    match fs::read_to_string(path).await {
        Ok(text) if text.trim().is_empty() => Ok(Vec::new()),
        Ok(text) => Ok(serde_json::from_str(&text)?),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

impl DocumentCollection for JsonFileCollection {
    async fn find_one<P>(&self, predicate: P) -> Result<Option<StoredDocument>, StoreError>
    where
        P: Fn(&ArticleRecord) -> bool,
    {
        Ok(self.documents.lock().await.find_one(predicate))
    }

    async fn update_one(&self, id: DocumentId, record: &ArticleRecord) -> Result<(), StoreError> {
        let mut documents = self.documents.lock().await;
        let previous = documents.replace(id, record.clone())?;

        if let Err(e) = self.persist(documents.docs()).await {
            documents.replace(id, previous)?;
            return Err(e);
        }
        Ok(())
    }

    async fn insert_one(&self, record: &ArticleRecord) -> Result<DocumentId, StoreError> {
        let mut documents = self.documents.lock().await;
        let id = documents.push(record.clone());

        if let Err(e) = self.persist(documents.docs()).await {
            documents.pop();
            return Err(e);
        }
        Ok(id)
    }

    async fn find<P>(&self, predicate: P) -> Result<Vec<ArticleRecord>, StoreError>
    where
        P: Fn(&ArticleRecord) -> bool,
    {
        Ok(self.documents.lock().await.find(predicate))
    }

    async fn reload(&self) -> Result<(), StoreError> {
        let mut documents = self.documents.lock().await;
        let docs = read_docs(&self.path).await?;
        debug!(documents = docs.len(), "Reloaded JSON collection");
        *documents = Documents::from_docs(docs);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::RecordStore;
    use crate::store::tests::record;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let collection = JsonFileCollection::open(dir.path().join("articles.json"))
            .await
            .unwrap();
        assert!(collection.find(|_| true).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_records_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("articles.json");

        {
            let store = RecordStore::new(JsonFileCollection::open(&path).await.unwrap());
            store
                .upsert_all(&[record("https://blog.test/a", "A"), record("https://blog.test/b", "B")])
                .await
                .unwrap();
        }

        let store = RecordStore::new(JsonFileCollection::open(&path).await.unwrap());
        let all = store.get_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].link, "https://blog.test/a");

        store
            .upsert_all(&[record("https://blog.test/a", "A2"), record("https://blog.test/c", "C")])
            .await
            .unwrap();
        let titles: Vec<String> = store
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.list_title)
            .collect();
        assert_eq!(titles, ["A2", "B", "C"]);

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"_id\": 2"));
        assert!(!dir.path().join("nested").join("articles.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_reload_sees_other_writer() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("articles.json");
        let reader = JsonFileCollection::open(&path).await.unwrap();
        let writer = JsonFileCollection::open(&path).await.unwrap();

        writer.insert_one(&record("https://blog.test/a", "A")).await.unwrap();
        assert!(reader.find(|_| true).await.unwrap().is_empty());

        reader.reload().await.unwrap();
        let found = reader.find_one(|r| r.link == "https://blog.test/a").await.unwrap();
        assert_eq!(found.map(|d| d.id), Some(0));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("articles.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = JsonFileCollection::open(&path).await;
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_failed_write_rolls_back_memory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("articles.json");
        let collection = JsonFileCollection::open(&path).await.unwrap();
        collection.insert_one(&record("https://blog.test/a", "A")).await.unwrap();

        // A directory where the temporary file should go makes the write fail.
        std::fs::create_dir(dir.path().join("articles.json.tmp")).unwrap();

        let result = collection.insert_one(&record("https://blog.test/b", "B")).await;
        assert!(matches!(result, Err(StoreError::Io(_))));

        let links: Vec<String> = collection
            .find(|_| true)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.link)
            .collect();
        assert_eq!(links, ["https://blog.test/a"]);
    }
}
