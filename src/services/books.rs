//! Book catalog service

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::book::{timestamp_now, Book, BookAction, BookPayload, BookQuery, BookSummary},
    repository::Repository,
};

use super::ids::IdGenerator;

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
    ids: Arc<dyn IdGenerator>,
}

impl BooksService {
    pub fn new(repository: Repository, ids: Arc<dyn IdGenerator>) -> Self {
        Self { repository, ids }
    }

    /// Add a book and return its new id
    pub async fn create(&self, payload: BookPayload) -> AppResult<String> {
        payload.check(BookAction::Add)?;

        let id = self.ids.generate();
        let book = Book::new(id.clone(), payload, timestamp_now());

        if !self.repository.books.insert(book).await {
            tracing::error!("Book {} missing after insert", id);
            return Err(AppError::Internal(BookAction::Add.failure_prefix().to_string()));
        }

        tracing::info!("Book added id={}", id);
        Ok(id)
    }

    /// List books with at most one filter applied
    pub async fn list(&self, query: &BookQuery) -> Vec<BookSummary> {
        let filter = query.filter();
        tracing::debug!("Listing books with filter {:?}", filter);
        self.repository
            .books
            .list(&filter)
            .await
            .iter()
            .map(BookSummary::from)
            .collect()
    }

    /// Number of books in the store
    pub async fn count(&self) -> usize {
        self.repository.books.len().await
    }

    /// Get a book by id
    pub async fn get(&self, id: &str) -> AppResult<Book> {
        self.repository
            .books
            .get(id)
            .await
            .ok_or_else(|| AppError::NotFound("book not found".to_string()))
    }

    /// Replace a book's fields; validation runs before the lookup
    pub async fn update(&self, id: &str, payload: BookPayload) -> AppResult<Book> {
        payload.check(BookAction::Update)?;

        let book = self
            .repository
            .books
            .update(id, payload, timestamp_now)
            .await
            .ok_or_else(|| not_found(BookAction::Update))?;

        tracing::info!("Book updated id={}", id);
        Ok(book)
    }

    /// Delete a book by id
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.repository
            .books
            .remove(id)
            .await
            .ok_or_else(|| not_found(BookAction::Delete))?;

        tracing::info!("Book deleted id={}", id);
        Ok(())
    }
}

fn not_found(action: BookAction) -> AppError {
    AppError::NotFound(format!("{}. id not found", action.failure_prefix()))
}
