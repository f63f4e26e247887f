//! In-memory book store

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::book::{Book, BookFilter, BookPayload};

/// Ordered book collection shared by all requests.
///
/// Insertion order is preserved. Writers hold the lock for the whole of each
/// operation so lookups and mutations never interleave.
#[derive(Clone, Default)]
pub struct BookStore {
    books: Arc<RwLock<Vec<Book>>>,
}

impl BookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a book and report whether it can be found afterwards
    pub async fn insert(&self, book: Book) -> bool {
        let mut books = self.books.write().await;
        let id = book.id.clone();
        books.push(book);
        books.iter().any(|b| b.id == id)
    }

    /// Books matching the filter, in store order
    pub async fn list(&self, filter: &BookFilter) -> Vec<Book> {
        self.books
            .read()
            .await
            .iter()
            .filter(|book| filter.matches(book))
            .cloned()
            .collect()
    }

    pub async fn get(&self, id: &str) -> Option<Book> {
        self.books.read().await.iter().find(|b| b.id == id).cloned()
    }

    /// Apply an update to the book with the given id. Returns `None` if absent.
    pub async fn update<F>(&self, id: &str, payload: BookPayload, now: F) -> Option<Book>
    where
        F: FnOnce() -> chrono::DateTime<chrono::Utc>,
    {
        let mut books = self.books.write().await;
        let book = books.iter_mut().find(|b| b.id == id)?;
        book.apply(payload, now());
        Some(book.clone())
    }

    /// Remove the book with the given id. Returns `None` if absent.
    pub async fn remove(&self, id: &str) -> Option<Book> {
        let mut books = self.books.write().await;
        let index = books.iter().position(|b| b.id == id)?;
        Some(books.remove(index))
    }

    pub async fn len(&self) -> usize {
        self.books.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.books.read().await.is_empty()
    }
}
