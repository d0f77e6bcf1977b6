use axum::{
    Router,
    extract::{DefaultBodyLimit, FromRef},
    http::{Method, header},
    routing::{get, post},
};
use chrono::TimeDelta;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

use crate::FolioError;
use crate::config::Config;
use crate::handlers::{assets, auth, books};
use crate::service::{AuthService, CatalogService, StoreHandle, TokenIssuer};
use crate::types::books::PageLimits;

/// Maximum accepted request body (64 KiB).
pub const MAX_BODY_SIZE: usize = 64 * 1024;
/// Longest token lifetime honoured from config (one year).
pub const MAX_TOKEN_TTL_SECS: u64 = 365 * 24 * 3600;

#[derive(Clone)]
pub struct FolioState {
    pub auth: AuthService,
    pub catalog: CatalogService,
    pub page_limits: PageLimits,
}

impl FolioState {
    pub fn new(store: StoreHandle, cfg: &Config) -> Result<Self, FolioError> {
        let ttl_secs = cfg.token_ttl_secs.min(MAX_TOKEN_TTL_SECS);
        let ttl = TimeDelta::seconds(i64::try_from(ttl_secs).unwrap_or(i64::from(u32::MAX)));
        let tokens = TokenIssuer::new(cfg.jwt_secret.as_bytes(), ttl);
        Ok(Self {
            auth: AuthService::new(
                store.clone(),
                tokens,
                cfg.bcrypt_cost,
                cfg.login_attempts_per_minute,
            )?,
            catalog: CatalogService::new(store),
            page_limits: PageLimits {
                default_limit: cfg.default_page_size.max(1),
                max_limit: cfg.max_page_size.max(1),
            },
        })
    }
}

impl FromRef<FolioState> for AuthService {
    fn from_ref(state: &FolioState) -> Self {
        state.auth.clone()
    }
}

pub fn folio_router(state: FolioState) -> Router {
    let api = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/{id}",
            get(books::get_book)
                .patch(books::update_book)
                .delete(books::delete_book),
        )
        .method_not_allowed_fallback(assets::route_not_found);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(3600));

    Router::new()
        .nest("/api/v1", api)
        .route("/health", get(assets::health))
        .method_not_allowed_fallback(assets::route_not_found)
        .fallback(assets::static_or_not_found)
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .layer(cors)
}
