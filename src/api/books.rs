//! Book endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        book::{Book, BookPayload, BookQuery, BookSummary},
        envelope::{ApiResponse, NoData},
    },
    AppState,
};

use super::BookBody;

/// Data returned after a book is added
#[derive(Serialize, ToSchema)]
pub struct CreatedBook {
    #[serde(rename = "bookId")]
    pub book_id: String,
}

/// Data returned by the book listing
#[derive(Serialize, ToSchema)]
pub struct BookList {
    pub books: Vec<BookSummary>,
}

/// Data returned for a single book
#[derive(Serialize, ToSchema)]
pub struct BookDetail {
    pub book: Book,
}

/// Add a book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookPayload,
    responses(
        (status = 201, description = "Book added", body = ApiResponse<CreatedBook>),
        (status = 400, description = "Missing name or readPage greater than pageCount"),
        (status = 500, description = "Book could not be stored")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    BookBody(payload): BookBody,
) -> AppResult<(StatusCode, Json<ApiResponse<CreatedBook>>)> {
    let book_id = state.services.books.create(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            "Book added successfully",
            CreatedBook { book_id },
        )),
    ))
}

/// List books, filtered by name, reading or finished (first one present wins)
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "List of books", body = ApiResponse<BookList>)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    query: Option<Query<BookQuery>>,
) -> Json<ApiResponse<BookList>> {
    let query = query.map(|Query(q)| q).unwrap_or_default();
    let books = state.services.books.list(&query).await;
    Json(ApiResponse::success(BookList { books }))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{bookId}",
    tag = "books",
    params(("bookId" = String, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = ApiResponse<BookDetail>),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> AppResult<Json<ApiResponse<BookDetail>>> {
    let book = state.services.books.get(&book_id).await?;
    Ok(Json(ApiResponse::success(BookDetail { book })))
}

/// Update a book
#[utoipa::path(
    put,
    path = "/books/{bookId}",
    tag = "books",
    params(("bookId" = String, Path, description = "Book ID")),
    request_body = BookPayload,
    responses(
        (status = 200, description = "Book updated", body = ApiResponse<NoData>),
        (status = 400, description = "Missing name or readPage greater than pageCount"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
    BookBody(payload): BookBody,
) -> AppResult<Json<ApiResponse<NoData>>> {
    state.services.books.update(&book_id, payload).await?;
    Ok(Json(ApiResponse::message("Book updated successfully")))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{bookId}",
    tag = "books",
    params(("bookId" = String, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book deleted", body = ApiResponse<NoData>),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> AppResult<Json<ApiResponse<NoData>>> {
    state.services.books.delete(&book_id).await?;
    Ok(Json(ApiResponse::message("Book deleted successfully")))
}
