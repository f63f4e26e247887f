//! Repository layer holding the in-memory store

pub mod books;

pub use books::BookStore;

/// Main repository struct, created once at startup
#[derive(Clone, Default)]
pub struct Repository {
    pub books: BookStore,
}

impl Repository {
    /// Create a repository with an empty store
    pub fn new() -> Self {
        Self {
            books: BookStore::new(),
        }
    }
}
