//! Request extractors shared by the handlers.

pub mod auth;
pub mod json;
pub mod query;

pub use auth::AuthUser;
pub use json::ApiJson;
pub use query::ApiQuery;
