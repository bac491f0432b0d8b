//! HTTP collaborators for the learning API: error taxonomy, request helpers,
//! payload types and the `ApiClient` that implements the session and
//! generation traits.

pub mod client;
pub mod errors;
pub mod http;
pub mod types;

pub use client::ApiClient;
pub use errors::AppError;
