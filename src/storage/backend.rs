use async_trait::async_trait;
use quire_types::{Book, BookId};

/// Where book records come from.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Fetches a book; `Ok(None)` when no record has this id.
    async fn get(&self, id: &BookId) -> Result<Option<Book>, String>;

    /// Stores or replaces a book record.
    async fn put(&self, book: Book) -> Result<(), String>;
}
