use crate::storage::backend::BookStore;
use async_trait::async_trait;
use quire_types::{Book, BookId};
use std::path::PathBuf;

/// Book records stored as `{id}.json` files in one directory.
pub struct FilesystemBookStore {
    base_path: PathBuf,
}

impl FilesystemBookStore {
    pub async fn new(base_path: PathBuf) -> Result<Self, String> {
        tokio::fs::create_dir_all(&base_path)
            .await
            .map_err(|e| format!("Failed to create book directory: {}", e))?;

        Ok(Self { base_path })
    }

    /// `None` for ids that could name a file outside the directory.
    fn record_path(&self, id: &BookId) -> Option<PathBuf> {
        let id = id.as_str();
        let safe = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        safe.then(|| self.base_path.join(format!("{}.json", id)))
    }
}

#[async_trait]
impl BookStore for FilesystemBookStore {
    async fn get(&self, id: &BookId) -> Result<Option<Book>, String> {
        let Some(path) = self.record_path(id) else {
            tracing::debug!("Rejected book id '{}'", id);
            return Ok(None);
        };

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(format!("Failed to read {}: {}", path.display(), e)),
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| format!("Invalid book record {}: {}", path.display(), e))
    }

    async fn put(&self, book: Book) -> Result<(), String> {
        let path = self
            .record_path(&book.id)
            .ok_or_else(|| format!("Invalid book id '{}'", book.id))?;
        let json = serde_json::to_vec_pretty(&book)
            .map_err(|e| format!("Failed to serialize book: {}", e))?;

        tokio::fs::write(&path, json)
            .await
            .map_err(|e| format!("Failed to write {}: {}", path.display(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_types::UserId;
    use tempfile::TempDir;

    fn book(id: &str) -> Book {
        Book {
            id: BookId::from(id),
            owner_id: UserId::from("ada"),
            title: "Atlas".to_string(),
            subtitle: None,
            author: None,
            cover_image: None,
            chapters: vec![],
        }
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let dir = TempDir::new().unwrap();
        let store = FilesystemBookStore::new(dir.path().to_path_buf()).await.unwrap();

        store.put(book("atlas-1")).await.unwrap();
        let loaded = store.get(&BookId::from("atlas-1")).await.unwrap();
        assert_eq!(loaded, Some(book("atlas-1")));
        assert!(dir.path().join("atlas-1.json").exists());
    }

    #[tokio::test]
    async fn test_missing_and_unsafe_ids_are_not_found() {
        let dir = TempDir::new().unwrap();
        let store = FilesystemBookStore::new(dir.path().to_path_buf()).await.unwrap();

        assert_eq!(store.get(&BookId::from("nope")).await.unwrap(), None);
        assert_eq!(store.get(&BookId::from("../etc/passwd")).await.unwrap(), None);
        assert!(store.put(book("a/b")).await.is_err());
    }

    #[tokio::test]
    async fn test_reads_records_written_by_the_authoring_app() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("b7.json"),
            r#"{"id":"b7","userId":"ada","title":"Atlas","coverImage":"/uploads/c.png",
                "chapters":[{"title":"One","content":"Hi"}]}"#,
        )
        .unwrap();
        let store = FilesystemBookStore::new(dir.path().to_path_buf()).await.unwrap();

        let loaded = store.get(&BookId::from("b7")).await.unwrap().unwrap();
        assert_eq!(loaded.owner_id, UserId::from("ada"));
        assert_eq!(loaded.cover_image.as_deref(), Some("/uploads/c.png"));
        assert_eq!(loaded.chapters.len(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_record_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("bad.json"), "{ not json").unwrap();
        let store = FilesystemBookStore::new(dir.path().to_path_buf()).await.unwrap();
        assert!(store.get(&BookId::from("bad")).await.is_err());
    }
}
