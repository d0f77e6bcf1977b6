use crate::db::PublicUser;
use crate::error::FolioError;
use serde::{Deserialize, Serialize};

/// Body of `POST /auth/register` and `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl CredentialsRequest {
    /// Both fields must be present and non-empty.
    pub fn require(self) -> Result<(String, String), FolioError> {
        match (self.username, self.password) {
            (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => Ok((u, p)),
            _ => Err(FolioError::Validation(
                "Please provide username and password".to_string(),
            )),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserData {
    pub user: PublicUser,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub status: &'static str,
    pub token: String,
    pub data: UserData,
}
