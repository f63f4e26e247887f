//! Book model and related request types.
//!
//! Request payloads are read leniently: a field carrying the wrong JSON type
//! is treated as absent, so every payload reaches the business rules instead
//! of being rejected by the extractor.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnError};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::error::{AppError, AppResult};

/// Book record held in the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Opaque identifier, assigned at creation
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    /// Total number of pages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
    /// Pages read so far
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_page: Option<u32>,
    /// Whether the book is currently being read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading: Option<bool>,
    /// Derived: `pageCount == readPage`
    pub finished: bool,
    pub inserted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Short book representation for listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookSummary {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            name: book.name.clone(),
            publisher: book.publisher.clone(),
        }
    }
}

/// Create / update book request
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_reading_progress"))]
pub struct BookPayload {
    /// Book name (required, non-empty)
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub year: Option<i32>,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub author: Option<String>,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub summary: Option<String>,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub publisher: Option<String>,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub page_count: Option<u32>,
    /// Must not exceed `pageCount`
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub read_page: Option<u32>,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub reading: Option<bool>,
}

fn validate_reading_progress(payload: &BookPayload) -> Result<(), ValidationError> {
    match (payload.read_page, payload.page_count) {
        (Some(read), Some(total)) if read > total => Err(ValidationError::new("read_page_exceeds_page_count")),
        _ => Ok(()),
    }
}

/// Mutating operations, used to word failure messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookAction {
    Add,
    Update,
    Delete,
}

impl BookAction {
    pub fn failure_prefix(self) -> &'static str {
        match self {
            BookAction::Add => "Failed to add book",
            BookAction::Update => "Failed to update book",
            BookAction::Delete => "Failed to delete book",
        }
    }
}

impl BookPayload {
    /// Check the business rules in order: name first, then reading progress.
    pub fn check(&self, action: BookAction) -> AppResult<()> {
        let errors = match self.validate() {
            Ok(()) => return Ok(()),
            Err(errors) => errors,
        };

        if errors.field_errors().contains_key("name") {
            return Err(AppError::Validation(format!(
                "{}. name is required",
                action.failure_prefix()
            )));
        }

        Err(AppError::Validation(format!(
            "{}. readPage must not exceed pageCount",
            action.failure_prefix()
        )))
    }

    /// Whether the reading progress marks the book as finished
    pub fn is_finished(&self) -> bool {
        self.page_count == self.read_page
    }
}

/// Current time at the precision used for book timestamps
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

impl Book {
    /// Build a new book from a checked payload
    pub fn new(id: String, payload: BookPayload, now: DateTime<Utc>) -> Self {
        let finished = payload.is_finished();
        Self {
            id,
            name: payload.name.unwrap_or_default(),
            year: payload.year,
            author: payload.author,
            summary: payload.summary,
            publisher: payload.publisher,
            page_count: payload.page_count,
            read_page: payload.read_page,
            reading: payload.reading,
            finished,
            inserted_at: now,
            updated_at: now,
        }
    }

    /// Replace every user-supplied field, keeping `id` and `insertedAt`.
    ///
    /// `updatedAt` always moves forward, even when `now` does not.
    pub fn apply(&mut self, payload: BookPayload, now: DateTime<Utc>) {
        self.finished = payload.is_finished();
        self.name = payload.name.unwrap_or_default();
        self.year = payload.year;
        self.author = payload.author;
        self.summary = payload.summary;
        self.publisher = payload.publisher;
        self.page_count = payload.page_count;
        self.read_page = payload.read_page;
        self.reading = payload.reading;
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::milliseconds(1)
        };
    }
}

/// Query-string boolean: `"1"` is true, any other value is false.
pub fn parse_flag(value: &str) -> bool {
    value == "1"
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Book list query parameters
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
pub struct BookQuery {
    /// Case-insensitive substring of the book name
    pub name: Option<String>,
    /// `1` for books being read, `0` for the others
    pub reading: Option<String>,
    /// `1` for finished books, `0` for the others
    pub finished: Option<String>,
}

/// The single filter applied to a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookFilter {
    Name(String),
    Reading(bool),
    Finished(bool),
    All,
}

impl BookQuery {
    /// Pick one filter: the first non-empty parameter among name, reading
    /// and finished wins. Filters are never combined.
    pub fn filter(&self) -> BookFilter {
        if let Some(name) = present(&self.name) {
            return BookFilter::Name(name.to_lowercase());
        }
        if let Some(reading) = present(&self.reading) {
            return BookFilter::Reading(parse_flag(reading));
        }
        if let Some(finished) = present(&self.finished) {
            return BookFilter::Finished(parse_flag(finished));
        }
        BookFilter::All
    }
}

impl BookFilter {
    pub fn matches(&self, book: &Book) -> bool {
        match self {
            BookFilter::Name(needle) => book.name.to_lowercase().contains(needle.as_str()),
            BookFilter::Reading(reading) => book.reading == Some(*reading),
            BookFilter::Finished(finished) => book.finished == *finished,
            BookFilter::All => true,
        }
    }
}
