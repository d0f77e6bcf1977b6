//! Request and response bodies of the HTTP API.

pub mod auth;
pub mod books;
pub mod envelope;

pub use envelope::Envelope;
