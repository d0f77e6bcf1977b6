use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::middleware::ApiJson;
use crate::types::auth::{CredentialsRequest, LoginResponse, UserData};
use crate::types::Envelope;
use crate::{FolioError, router::FolioState};

/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<FolioState>,
    ApiJson(body): ApiJson<CredentialsRequest>,
) -> Result<impl IntoResponse, FolioError> {
    let (username, password) = body.require()?;
    let user = state.auth.register(&username, &password).await?;
    Ok((StatusCode::CREATED, Json(Envelope::success(UserData { user }))))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<FolioState>,
    ApiJson(body): ApiJson<CredentialsRequest>,
) -> Result<Json<LoginResponse>, FolioError> {
    let (username, password) = body.require()?;
    let outcome = state.auth.login(&username, &password).await?;
    Ok(Json(LoginResponse {
        status: "success",
        token: outcome.token,
        data: UserData { user: outcome.user },
    }))
}
