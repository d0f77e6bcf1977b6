use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum FolioError {
    #[error("{0}")]
    Validation(String),

    #[error("Username already exists")]
    DuplicateUsername,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    Unauthenticated(&'static str),

    #[error("Book not found")]
    BookNotFound,

    #[error("Can't find {0} on this server!")]
    RouteNotFound(String),

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("Too many login attempts. Please try again later.")]
    TooManyAttempts,

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Store actor error: {0}")]
    StoreUnavailable(String),

    #[error("Blocking task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl FolioError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            FolioError::Validation(_) | FolioError::DuplicateUsername => StatusCode::BAD_REQUEST,
            FolioError::InvalidCredentials | FolioError::Unauthenticated(_) => {
                StatusCode::UNAUTHORIZED
            }
            FolioError::BookNotFound | FolioError::RouteNotFound(_) => StatusCode::NOT_FOUND,
            FolioError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            FolioError::TooManyAttempts => StatusCode::TOO_MANY_REQUESTS,
            FolioError::PasswordHash(_)
            | FolioError::Token(_)
            | FolioError::StoreUnavailable(_)
            | FolioError::TaskJoin(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for FolioError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let body = if status.is_server_error() {
            // Internal details stay in the log.
            error!(error = %self, "request failed");
            ApiErrorBody {
                status: "error",
                message: "Something went wrong!".to_string(),
            }
        } else {
            ApiErrorBody {
                status: "fail",
                message: self.to_string(),
            }
        };
        (status, Json(body)).into_response()
    }
}

/// Uniform error body: `{"status": "fail" | "error", "message": ...}`.
#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub status: &'static str,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn render(err: FolioError) -> (StatusCode, serde_json::Value) {
        let resp = err.into_response();
        let status = resp.status();
        let body = to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("failed to read body");
        (status, serde_json::from_slice(&body).expect("body was not json"))
    }

    #[tokio::test]
    async fn client_errors_are_reported_as_fail() {
        let (status, body) = render(FolioError::BookNotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], "fail");
        assert_eq!(body["message"], "Book not found");

        let (status, body) = render(FolioError::RouteNotFound("/nope".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Can't find /nope on this server!");

        let (status, body) = render(FolioError::PayloadTooLarge).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["status"], "fail");
    }

    #[tokio::test]
    async fn server_errors_hide_details() {
        let (status, body) =
            render(FolioError::StoreUnavailable("mailbox closed".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "Something went wrong!");
    }
}
