//! API integration tests

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::util::ServiceExt;

use bookshelf_server::{api, services::ids::NanoIdGenerator, AppError, AppState};

fn app() -> Router {
    let state = AppState::new(Arc::new(NanoIdGenerator::default()));
    api::create_router(state)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("Failed to build request"),
        None => builder.body(Body::empty()).expect("Failed to build request"),
    };

    let response = app.clone().oneshot(request).await.expect("Failed to send request");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Failed to parse response")
    };
    (status, body)
}

/// Helper to add a book and return its id
async fn create_book(app: &Router, book: Value) -> String {
    let (status, body) = send(app, Method::POST, "/books", Some(book)).await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["bookId"].as_str().expect("No book ID").to_string()
}

async fn book_count(app: &Router) -> usize {
    let (_, body) = send(app, Method::GET, "/books", None).await;
    body["data"]["books"].as_array().expect("No books array").len()
}

#[tokio::test]
async fn test_health_check() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["books"], 0);
}

#[tokio::test]
async fn test_create_and_get_finished_book() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/books",
        Some(json!({ "name": "A", "pageCount": 100, "readPage": 100 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "success");
    let id = body["data"]["bookId"].as_str().expect("No book ID");
    assert_eq!(id.len(), 12);

    let (status, body) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    let book = &body["data"]["book"];
    assert_eq!(book["id"], id);
    assert_eq!(book["finished"], true);
    assert_eq!(book["insertedAt"], book["updatedAt"]);
}

#[tokio::test]
async fn test_create_full_book() {
    let app = app();
    let id = create_book(
        &app,
        json!({
            "name": "Buku A",
            "year": 2010,
            "author": "John Doe",
            "summary": "Lorem ipsum dolor sit amet",
            "publisher": "Dicoding Indonesia",
            "pageCount": 100,
            "readPage": 25,
            "reading": false
        }),
    )
    .await;

    let (_, body) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    let book = &body["data"]["book"];
    assert_eq!(book["year"], 2010);
    assert_eq!(book["author"], "John Doe");
    assert_eq!(book["publisher"], "Dicoding Indonesia");
    assert_eq!(book["readPage"], 25);
    assert_eq!(book["reading"], false);
    assert_eq!(book["finished"], false);
}

#[tokio::test]
async fn test_create_without_name_is_rejected() {
    let app = app();

    for payload in [json!({ "pageCount": 10, "readPage": 1 }), json!({ "name": "" }), json!({ "name": 7 })] {
        let (status, body) = send(&app, Method::POST, "/books", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "fail");
        assert_eq!(body["message"], "Failed to add book. name is required");
    }

    assert_eq!(book_count(&app).await, 0);
}

#[tokio::test]
async fn test_create_with_malformed_body_is_rejected() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/books")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .expect("Failed to build request");

    let response = app.clone().oneshot(request).await.expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(book_count(&app).await, 0);
}

#[tokio::test]
async fn test_create_with_read_page_over_page_count_is_rejected() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/books",
        Some(json!({ "name": "A", "pageCount": 10, "readPage": 11 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Failed to add book. readPage must not exceed pageCount");
    assert_eq!(book_count(&app).await, 0);
}

#[tokio::test]
async fn test_get_unknown_book() {
    let app = app();
    create_book(&app, json!({ "name": "A" })).await;

    let (status, body) = send(&app, Method::GET, "/books/doesnotexist", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "book not found");
}

#[tokio::test]
async fn test_list_projects_id_name_publisher() {
    let app = app();
    let id = create_book(&app, json!({ "name": "A", "publisher": "P", "author": "X" })).await;

    let (status, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["books"], json!([{ "id": id, "name": "A", "publisher": "P" }]));
}

#[tokio::test]
async fn test_list_name_takes_precedence_over_reading() {
    let app = app();
    create_book(&app, json!({ "name": "Alpha", "reading": true, "pageCount": 10, "readPage": 1 })).await;
    create_book(&app, json!({ "name": "Beta", "reading": false, "pageCount": 10, "readPage": 10 })).await;

    let (_, body) = send(&app, Method::GET, "/books?name=Alpha&reading=0", None).await;
    let books = body["data"]["books"].as_array().expect("No books array");
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["name"], "Alpha");

    let (_, body) = send(&app, Method::GET, "/books?name=alp", None).await;
    assert_eq!(body["data"]["books"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_list_reading_and_finished_filters() {
    let app = app();
    create_book(&app, json!({ "name": "Alpha", "reading": true, "pageCount": 10, "readPage": 1 })).await;
    create_book(&app, json!({ "name": "Beta", "reading": false, "pageCount": 10, "readPage": 10 })).await;

    let (_, body) = send(&app, Method::GET, "/books?reading=1", None).await;
    assert_eq!(body["data"]["books"][0]["name"], "Alpha");
    assert_eq!(body["data"]["books"].as_array().map(Vec::len), Some(1));

    let (_, body) = send(&app, Method::GET, "/books?reading=0&finished=0", None).await;
    assert_eq!(body["data"]["books"][0]["name"], "Beta");
    assert_eq!(body["data"]["books"].as_array().map(Vec::len), Some(1));

    let (_, body) = send(&app, Method::GET, "/books?finished=1", None).await;
    assert_eq!(body["data"]["books"][0]["name"], "Beta");
    assert_eq!(body["data"]["books"].as_array().map(Vec::len), Some(1));

    let (_, body) = send(&app, Method::GET, "/books?finished=0", None).await;
    assert_eq!(body["data"]["books"][0]["name"], "Alpha");
    assert_eq!(body["data"]["books"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_update_changes_only_target() {
    let app = app();
    let target = create_book(&app, json!({ "name": "A", "pageCount": 10, "readPage": 2 })).await;
    let other = create_book(&app, json!({ "name": "B", "publisher": "P" })).await;

    let (_, before) = send(&app, Method::GET, &format!("/books/{}", target), None).await;
    let (_, other_before) = send(&app, Method::GET, &format!("/books/{}", other), None).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/books/{}", target),
        Some(json!({ "name": "A2", "pageCount": 10, "readPage": 10, "reading": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Book updated successfully");

    let (_, after) = send(&app, Method::GET, &format!("/books/{}", target), None).await;
    let (_, other_after) = send(&app, Method::GET, &format!("/books/{}", other), None).await;

    let before = &before["data"]["book"];
    let after = &after["data"]["book"];
    assert_eq!(after["id"], before["id"]);
    assert_eq!(after["insertedAt"], before["insertedAt"]);
    assert_ne!(after["updatedAt"], before["updatedAt"]);
    assert_eq!(after["name"], "A2");
    assert_eq!(after["finished"], true);
    assert_eq!(after["reading"], true);
    assert_eq!(other_after, other_before);
}

#[tokio::test]
async fn test_update_with_empty_name_leaves_store_unchanged() {
    let app = app();
    let id = create_book(&app, json!({ "name": "A", "pageCount": 10, "readPage": 5 })).await;
    let (_, before) = send(&app, Method::GET, &format!("/books/{}", id), None).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/books/{}", id),
        Some(json!({ "name": "", "pageCount": 10, "readPage": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Failed to update book. name is required");

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/books/{}", id),
        Some(json!({ "name": "A", "pageCount": 10, "readPage": 50 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Failed to update book. readPage must not exceed pageCount");

    let (_, after) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    assert_eq!(after, before);
}

#[tokio::test]
async fn test_update_unknown_book() {
    let app = app();

    let (status, body) = send(&app, Method::PUT, "/books/unknown", Some(json!({ "name": "A" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Failed to update book. id not found");

    // Validation runs before the lookup
    let (status, _) = send(&app, Method::PUT, "/books/unknown", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_book() {
    let app = app();
    let id = create_book(&app, json!({ "name": "A" })).await;
    create_book(&app, json!({ "name": "B" })).await;

    let (status, body) = send(&app, Method::DELETE, &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Book deleted successfully");
    assert_eq!(book_count(&app).await, 1);

    let (status, body) = send(&app, Method::DELETE, &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Failed to delete book. id not found");
    assert_eq!(book_count(&app).await, 1);

    let (status, _) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_present_reading_flag_blocks_finished() {
    let app = app();
    create_book(&app, json!({ "name": "Alpha", "reading": true, "pageCount": 10, "readPage": 1 })).await;
    create_book(&app, json!({ "name": "Beta", "reading": false, "pageCount": 10, "readPage": 10 })).await;

    // Any value other than "1" selects reading == false
    let (_, body) = send(&app, Method::GET, "/books?reading=2&finished=0", None).await;
    let books = body["data"]["books"].as_array().expect("No books array");
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["name"], "Beta");

    let (_, body) = send(&app, Method::GET, "/books?reading=yes", None).await;
    let books = body["data"]["books"].as_array().expect("No books array");
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["name"], "Beta");

    let (_, body) = send(&app, Method::GET, "/books?finished=x", None).await;
    let books = body["data"]["books"].as_array().expect("No books array");
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["name"], "Alpha");
}

#[tokio::test]
async fn test_internal_error_renders_error_envelope() {
    let app = Router::new().route(
        "/broken",
        axum::routing::get(|| async { Err::<(), _>(AppError::Internal("Failed to add book".to_string())) }),
    );

    let (status, body) = send(&app, Method::GET, "/broken", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "status": "error", "message": "Failed to add book" }));
}
