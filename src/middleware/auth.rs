use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use headers::{Authorization, authorization::Bearer};

use crate::db::PublicUser;
use crate::error::FolioError;
use crate::service::AuthService;

pub const NOT_LOGGED_IN: &str = "You are not logged in! Please log in to get access.";

/// Gate for protected routes.
/// Requires `Authorization: Bearer <token>` naming a user that still exists;
/// the resolved user is handed to the handler.
#[derive(Debug, Clone)]
pub struct AuthUser(pub PublicUser);

impl<S> FromRequestParts<S> for AuthUser
where
    AuthService: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = FolioError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| FolioError::Unauthenticated(NOT_LOGGED_IN))?;

        let auth = AuthService::from_ref(state);
        let user = auth.authenticate(bearer.token()).await?;
        Ok(Self(user))
    }
}
