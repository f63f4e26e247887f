//! Bookshelf server
//!
//! A REST JSON API for managing an in-memory catalog of books.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Wire a fresh, empty store into the services
    pub fn new(ids: Arc<dyn services::ids::IdGenerator>) -> Self {
        let repository = repository::Repository::new();
        Self {
            services: Arc::new(services::Services::new(repository, ids)),
        }
    }
}
