//! Session state and the bootstrap gate. The store probes the server once and
//! exposes a read-only snapshot for guards and routes; only the probe's
//! completion writes to it.

pub mod gate;
pub mod store;

pub use gate::{BootstrapGate, GateView};
pub use store::SessionStore;

use crate::api::AppError;
use async_trait::async_trait;

/// The application's belief about the current user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Session {
    /// Only meaningful once `initialized` is true.
    pub is_authenticated: bool,
    pub is_loading: bool,
    /// Flips false to true exactly once, whatever the probe outcome.
    pub initialized: bool,
}

/// Probes whether the current user has a valid session.
#[async_trait]
pub trait AuthProbe: Send + Sync {
    async fn check_session(&self) -> Result<bool, AppError>;
}
