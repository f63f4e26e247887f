//! Business logic services

pub mod books;
pub mod ids;

use std::sync::Arc;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: books::BooksService,
}

impl Services {
    /// Create all services with the given repository and id generator
    pub fn new(repository: Repository, ids: Arc<dyn ids::IdGenerator>) -> Self {
        Self {
            books: books::BooksService::new(repository, ids),
        }
    }
}
