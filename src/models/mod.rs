//! Data models for the Bookshelf server

pub mod book;
pub mod envelope;

// Re-export commonly used types
pub use book::{Book, BookAction, BookFilter, BookPayload, BookQuery, BookSummary};
pub use envelope::{ApiResponse, NoData, ResponseStatus};
