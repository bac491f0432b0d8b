//! # Coursegen (learning content client)
//!
//! `coursegen` is the client side of an education platform. Most of the
//! platform is presentation; this crate holds the part with coordination
//! logic:
//!
//! - **Bootstrap:** a one-time session probe that blocks every guarded route
//!   until it resolves. A failed probe means "signed out", never "retry".
//! - **Route guard:** a pure decision per route (`render`, `loading`,
//!   `redirect to /login`), with the redirect replacing history.
//! - **Content generation:** two independent slots (module and course outline)
//!   tracked through `idle → pending → succeeded|failed`. A success closes the
//!   creation surface, navigates once, and clears both slots after a short
//!   grace delay. Late responses for a reset slot are dropped by generation.
//!
//! Stores are `tokio::sync::watch` channels owned by an explicit
//! [`app::AppContext`]; nothing is global.

pub mod api;
pub mod app;
pub mod cli;
pub mod creation;
pub mod navigation;
pub mod routes;
pub mod session;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
