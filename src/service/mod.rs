//! Application services and the actor that owns the in-memory stores.

pub mod auth;
pub mod catalog;
pub mod store_actor;
pub mod token;

pub use auth::{AuthService, LoginOutcome};
pub use catalog::CatalogService;
pub use store_actor::StoreHandle;
pub use token::{Claims, TokenIssuer};
