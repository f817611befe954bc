/// Book routes
///
/// Listing and reading books is public; creating requires authentication;
/// updating, deleting, and granting readers additionally require ownership.
/// The ownership check runs before any mutation touches the row.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use bookvault_shared::auth::authorization::require_ownership;
use bookvault_shared::directory::{ResourceStore, UserDirectory};
use bookvault_shared::models::book::{Book, CreateBook, UpdateBook};
use bookvault_shared::models::user::User;

use crate::app::{AppState, CurrentUser};
use crate::error::{ApiError, ApiResult};
use crate::response::ApiResponse;

/// Request to create a book
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookRequest {
    /// Book title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    /// Book text/content
    #[validate(length(min = 1, message = "Text is required"))]
    pub text: String,
}

/// Request to update a book
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBookRequest {
    /// New title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    /// New text/content
    #[validate(length(min = 1, message = "Text is required"))]
    pub text: String,
}

/// Request to grant read access
#[derive(Debug, Deserialize)]
pub struct AddReaderRequest {
    /// User to grant read access to
    pub user_id: i64,
}

/// A book together with its granted readers
#[derive(Debug, Serialize)]
pub struct BookWithReaders {
    /// The book itself
    #[serde(flatten)]
    pub book: Book,

    /// Users granted read access
    pub readers: Vec<User>,
}

/// Resolves a book's owner or fails with 404
async fn owner_or_not_found(state: &AppState, book_id: i64) -> ApiResult<i64> {
    state
        .db
        .owner_of(book_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Book with ID {} not found", book_id)))
}

/// Checks that a user exists or fails with 404
async fn ensure_user_exists(directory: &dyn UserDirectory, user_id: i64) -> ApiResult<()> {
    directory
        .find_by_id(user_id)
        .await?
        .map(|_| ())
        .ok_or_else(|| ApiError::NotFound(format!("User with ID {} not found", user_id)))
}

/// GET /books
pub async fn list_books(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<Book>>>> {
    let books = Book::list(&state.db).await?;

    Ok(Json(ApiResponse::new(
        "Books retrieved successfully",
        books,
    )))
}

/// GET /books/:id
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ApiResponse<BookWithReaders>>> {
    let book = Book::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Book with ID {} not found", id)))?;

    let readers = Book::list_readers(&state.db, id).await?;

    Ok(Json(ApiResponse::new(
        "Book retrieved successfully",
        BookWithReaders { book, readers },
    )))
}

/// POST /books
///
/// The caller becomes the owner; the request body cannot name one.
pub async fn create_book(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Json(request): Json<CreateBookRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Book>>)> {
    request.validate()?;

    let book = Book::create(
        &state.db,
        identity.id,
        CreateBook {
            title: request.title,
            text: request.text,
        },
    )
    .await?;

    tracing::info!(book_id = book.id, owner_id = identity.id, "Book created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("Book created successfully", book)),
    ))
}

/// PUT /books/:id
pub async fn update_book(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path(id): Path<i64>,
    Json(request): Json<UpdateBookRequest>,
) -> ApiResult<Json<ApiResponse<Book>>> {
    request.validate()?;

    let owner = owner_or_not_found(&state, id).await?;
    require_ownership(&identity, owner)?;

    let book = Book::update(
        &state.db,
        id,
        UpdateBook {
            title: request.title,
            text: request.text,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("Book with ID {} not found", id)))?;

    Ok(Json(ApiResponse::new("Book updated successfully", book)))
}

/// DELETE /books/:id
pub async fn delete_book(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<ApiResponse<()>>> {
    let owner = owner_or_not_found(&state, id).await?;
    require_ownership(&identity, owner)?;

    Book::delete(&state.db, id).await?;

    tracing::info!(book_id = id, "Book deleted");

    Ok(Json(ApiResponse::message("Book deleted successfully")))
}

/// POST /books/:id/readers
///
/// Only the owner may grant read access. Granting twice is a no-op.
pub async fn add_reader(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path(id): Path<i64>,
    Json(request): Json<AddReaderRequest>,
) -> ApiResult<Json<ApiResponse<()>>> {
    let owner = owner_or_not_found(&state, id).await?;
    require_ownership(&identity, owner)?;

    // Unknown grantees are a 404, not a foreign-key blowup
    ensure_user_exists(&state.db, request.user_id).await?;

    Book::add_reader(&state.db, id, request.user_id).await?;

    Ok(Json(ApiResponse::message("Reader added successfully")))
}
