use super::{Session, SessionStore};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// What the application shell shows while the gate is mounted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateView {
    /// Blocking indicator for the whole tree.
    Loading,
    Ready(Session),
}

/// Blocks the application until the session probe resolves.
pub struct BootstrapGate {
    store: Arc<SessionStore>,
    mounted: AtomicBool,
}

impl BootstrapGate {
    #[must_use]
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self {
            store,
            mounted: AtomicBool::new(false),
        }
    }

    /// Triggers the session probe on first mount only.
    pub fn mount(&self) {
        if !self.mounted.swap(true, Ordering::SeqCst) {
            self.store.request_check();
        }
    }

    #[must_use]
    pub fn view(&self) -> GateView {
        let session = self.store.snapshot();
        if session.initialized {
            GateView::Ready(session)
        } else {
            GateView::Loading
        }
    }

    /// Mounts the gate and resolves once the app may render.
    pub async fn open(&self) -> Session {
        self.mount();
        self.store.initialized().await
    }
}
