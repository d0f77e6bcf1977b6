use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::debug;
use uuid::Uuid;

use crate::middleware::{ApiJson, ApiQuery, AuthUser};
use crate::types::Envelope;
use crate::types::books::{
    BookData, BookListResponse, CreateBookRequest, ListBooksParams, UpdateBookRequest,
};
use crate::{FolioError, router::FolioState};

/// Ids that don't parse can't name a stored book.
fn book_id(raw: &str) -> Result<Uuid, FolioError> {
    Uuid::parse_str(raw).map_err(|_| FolioError::BookNotFound)
}

/// GET /api/v1/books
pub async fn list_books(
    State(state): State<FolioState>,
    ApiQuery(params): ApiQuery<ListBooksParams>,
) -> Result<Json<BookListResponse>, FolioError> {
    let query = params.into_query(state.page_limits)?;
    let page = state.catalog.get_all_books(query).await?;
    Ok(Json(BookListResponse {
        status: "success",
        page,
    }))
}

/// POST /api/v1/books
pub async fn create_book(
    State(state): State<FolioState>,
    AuthUser(user): AuthUser,
    ApiJson(body): ApiJson<CreateBookRequest>,
) -> Result<impl IntoResponse, FolioError> {
    let data = body.validate()?;
    debug!(user_id = %user.id, "create book requested");
    let book = state.catalog.create_book(data).await?;
    Ok((StatusCode::CREATED, Json(Envelope::success(BookData { book }))))
}

/// GET /api/v1/books/{id}
pub async fn get_book(
    State(state): State<FolioState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<BookData>>, FolioError> {
    let book = state.catalog.get_book_by_id(book_id(&id)?).await?;
    Ok(Json(Envelope::success(BookData { book })))
}

/// PATCH /api/v1/books/{id}
pub async fn update_book(
    State(state): State<FolioState>,
    AuthUser(_user): AuthUser,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<UpdateBookRequest>,
) -> Result<Json<Envelope<BookData>>, FolioError> {
    let patch = body.validate()?;
    let book = state.catalog.update_book(book_id(&id)?, patch).await?;
    Ok(Json(Envelope::success(BookData { book })))
}

/// DELETE /api/v1/books/{id}
pub async fn delete_book(
    State(state): State<FolioState>,
    AuthUser(_user): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, FolioError> {
    state.catalog.delete_book(book_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}
