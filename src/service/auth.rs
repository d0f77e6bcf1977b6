use crate::db::PublicUser;
use crate::error::FolioError;
use crate::service::store_actor::StoreHandle;
use crate::service::token::TokenIssuer;

use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const INVALID_TOKEN: &str = "Invalid token. Please log in again.";
pub const USER_GONE: &str = "The user belonging to this token does no longer exist.";

/// Hashed at startup and checked against when the username is unknown.
const DUMMY_PASSWORD: &str = "folio-unknown-user-placeholder";
/// Limiter keys kept before stale ones are dropped.
const LIMITER_PRUNE_THRESHOLD: usize = 1024;

#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub user: PublicUser,
}

/// Registration, login and bearer-token resolution.
#[derive(Clone)]
pub struct AuthService {
    store: StoreHandle,
    tokens: TokenIssuer,
    bcrypt_cost: u32,
    dummy_hash: Arc<str>,
    login_limiter: Option<Arc<DefaultKeyedRateLimiter<String>>>,
}

impl AuthService {
    pub fn new(
        store: StoreHandle,
        tokens: TokenIssuer,
        bcrypt_cost: u32,
        login_attempts_per_minute: u32,
    ) -> Result<Self, FolioError> {
        let dummy_hash = bcrypt::hash(DUMMY_PASSWORD, bcrypt_cost)?;
        let login_limiter = NonZeroU32::new(login_attempts_per_minute)
            .map(|n| Arc::new(RateLimiter::keyed(Quota::per_minute(n))));
        Ok(Self {
            store,
            tokens,
            bcrypt_cost,
            dummy_hash: Arc::from(dummy_hash),
            login_limiter,
        })
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<PublicUser, FolioError> {
        // Cheap check first so duplicates don't pay for a bcrypt round.
        if self.store.find_user_by_name(username).await?.is_some() {
            return Err(FolioError::DuplicateUsername);
        }

        let password = password.to_owned();
        let cost = self.bcrypt_cost;
        let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;

        // The store re-checks atomically; a concurrent registration may have won.
        let user = self
            .store
            .insert_user(username, hash)
            .await?
            .ok_or(FolioError::DuplicateUsername)?;

        info!(user_id = %user.id, username = %user.username, "user registered");
        Ok(PublicUser::from(&user))
    }

    /// Unknown usernames and wrong passwords fail identically, and both pay
    /// for one bcrypt verification. Only failures count against the limiter.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, FolioError> {
        let user = self.store.find_user_by_name(username).await?;

        let password = password.to_owned();
        let hash = match &user {
            Some(u) => u.password_hash.clone(),
            None => self.dummy_hash.to_string(),
        };
        let matches =
            tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;

        let user = match user {
            Some(user) if matches => user,
            _ => return Err(self.reject_login(username)),
        };

        let token = self.tokens.issue(user.id)?;
        info!(user_id = %user.id, "user logged in");
        Ok(LoginOutcome {
            token,
            user: PublicUser::from(&user),
        })
    }

    fn reject_login(&self, username: &str) -> FolioError {
        let Some(limiter) = &self.login_limiter else {
            warn!(%username, "login failed");
            return FolioError::InvalidCredentials;
        };

        if limiter.len() > LIMITER_PRUNE_THRESHOLD {
            limiter.retain_recent();
            limiter.shrink_to_fit();
            debug!(keys = limiter.len(), "pruned login limiter");
        }

        if limiter.check_key(&username.to_owned()).is_err() {
            warn!(%username, "login throttled");
            FolioError::TooManyAttempts
        } else {
            warn!(%username, "login failed");
            FolioError::InvalidCredentials
        }
    }

    /// Resolve a bearer token to the user it names.
    pub async fn authenticate(&self, token: &str) -> Result<PublicUser, FolioError> {
        let claims = self.tokens.verify(token).map_err(|e| {
            warn!(error = %e, "rejected bearer token");
            FolioError::Unauthenticated(INVALID_TOKEN)
        })?;

        self.store
            .find_user_by_id(claims.id)
            .await?
            .map(|u| PublicUser::from(&u))
            .ok_or(FolioError::Unauthenticated(USER_GONE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::store_actor;
    use chrono::TimeDelta;

    async fn service(attempts: u32) -> AuthService {
        let store = store_actor::spawn().await.expect("spawn store actor");
        AuthService::new(
            store,
            TokenIssuer::new(b"unit-test", TimeDelta::hours(1)),
            4,
            attempts,
        )
        .expect("build auth service")
    }

    #[tokio::test]
    async fn register_then_login() {
        let auth = service(0).await;
        let user = auth.register("dora", "explorer").await.unwrap();
        assert_eq!(user.username, "dora");

        let outcome = auth.login("dora", "explorer").await.unwrap();
        assert_eq!(outcome.user, user);
        assert_eq!(auth.authenticate(&outcome.token).await.unwrap(), user);
    }

    #[tokio::test]
    async fn duplicate_registration_fails() {
        let auth = service(0).await;
        auth.register("eve", "pw").await.unwrap();
        let err = auth.register("eve", "other").await.unwrap_err();
        assert!(matches!(err, FolioError::DuplicateUsername));
    }

    #[tokio::test]
    async fn bad_password_and_unknown_user_look_the_same() {
        let auth = service(0).await;
        auth.register("frank", "right").await.unwrap();

        let wrong = auth.login("frank", "wrong").await.unwrap_err();
        let unknown = auth.login("nobody", "right").await.unwrap_err();
        assert!(matches!(wrong, FolioError::InvalidCredentials));
        assert_eq!(wrong.to_string(), unknown.to_string());
        assert_eq!(wrong.status_code(), unknown.status_code());
    }

    #[tokio::test]
    async fn token_for_unknown_user_is_rejected() {
        let auth = service(0).await;
        let stray = auth.tokens.issue(uuid::Uuid::new_v4()).unwrap();
        let err = auth.authenticate(&stray).await.unwrap_err();
        assert_eq!(err.to_string(), USER_GONE);

        let err = auth.authenticate("garbage").await.unwrap_err();
        assert_eq!(err.to_string(), INVALID_TOKEN);
    }

    #[tokio::test]
    async fn failed_logins_are_throttled_per_username() {
        let auth = service(2).await;
        auth.register("gina", "pw").await.unwrap();

        for _ in 0..2 {
            let err = auth.login("gina", "nope").await.unwrap_err();
            assert!(matches!(err, FolioError::InvalidCredentials));
        }
        let err = auth.login("gina", "nope").await.unwrap_err();
        assert!(matches!(err, FolioError::TooManyAttempts));

        // Other usernames have their own budget.
        let err = auth.login("henry", "pw").await.unwrap_err();
        assert!(matches!(err, FolioError::InvalidCredentials));
    }

    #[tokio::test]
    async fn correct_password_wins_over_exhausted_budget() {
        let auth = service(2).await;
        let user = auth.register("iris", "right").await.unwrap();

        for _ in 0..5 {
            assert!(auth.login("iris", "guess").await.is_err());
        }
        let outcome = auth.login("iris", "right").await.unwrap();
        assert_eq!(outcome.user, user);
    }

    #[tokio::test]
    async fn successful_logins_do_not_spend_the_budget() {
        let auth = service(1).await;
        auth.register("jules", "pw").await.unwrap();

        for _ in 0..3 {
            auth.login("jules", "pw").await.unwrap();
        }
        let err = auth.login("jules", "bad").await.unwrap_err();
        assert!(matches!(err, FolioError::InvalidCredentials));
    }

    #[tokio::test]
    async fn placeholder_hash_never_authenticates() {
        let auth = service(0).await;
        let err = auth.login("nobody", DUMMY_PASSWORD).await.unwrap_err();
        assert!(matches!(err, FolioError::InvalidCredentials));
    }

    #[tokio::test]
    async fn invalid_bcrypt_cost_is_rejected_at_construction() {
        let store = store_actor::spawn().await.expect("spawn store actor");
        let result = AuthService::new(
            store,
            TokenIssuer::new(b"unit-test", TimeDelta::hours(1)),
            2,
            0,
        );
        assert!(matches!(result, Err(FolioError::PasswordHash(_))));
    }
}
