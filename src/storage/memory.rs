use crate::storage::backend::BookStore;
use async_trait::async_trait;
use quire_types::{Book, BookId};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Book records held in memory, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryBookStore {
    books: RwLock<HashMap<BookId, Book>>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, book: Book) -> Self {
        self.books
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(book.id.clone(), book);
        self
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn get(&self, id: &BookId) -> Result<Option<Book>, String> {
        let books = self
            .books
            .read()
            .map_err(|_| "book store lock poisoned".to_string())?;
        Ok(books.get(id).cloned())
    }

    async fn put(&self, book: Book) -> Result<(), String> {
        let mut books = self
            .books
            .write()
            .map_err(|_| "book store lock poisoned".to_string())?;
        books.insert(book.id.clone(), book);
        Ok(())
    }
}
