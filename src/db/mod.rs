//! In-memory storage: records plus the two stores that hold them.
//!
//! Layout:
//! - `models.rs`: record types and the safe user projection
//! - `query.rs`: filter/sort/page parameters and the page result
//! - `catalog.rs`: book collection
//! - `users.rs`: account collection

pub mod catalog;
pub mod models;
pub mod query;
pub mod users;

pub use catalog::CatalogStore;
pub use models::{Book, BookPatch, NewBook, PublicUser, User};
pub use query::{BookFilter, BookPage, BookQuery, Pagination, SortField, SortSpec};
pub use users::CredentialStore;
