use super::{AuthProbe, Session};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Holds the session and runs the one-time auth probe.
pub struct SessionStore {
    state: watch::Sender<Session>,
    requested: AtomicBool,
    probe: Arc<dyn AuthProbe>,
}

impl SessionStore {
    #[must_use]
    pub fn new(probe: Arc<dyn AuthProbe>) -> Self {
        let (state, _) = watch::channel(Session::default());
        Self {
            state,
            requested: AtomicBool::new(false),
            probe,
        }
    }

    /// Starts the auth probe. Only the first call does anything; it returns
    /// `true` when it started the probe.
    ///
    /// A failed probe resolves to "not authenticated" and is never retried.
    pub fn request_check(self: &Arc<Self>) -> bool {
        if self.requested.swap(true, Ordering::SeqCst) {
            debug!("session check already requested");
            return false;
        }

        self.state.send_modify(|session| session.is_loading = true);

        let store = Arc::clone(self);
        tokio::spawn(async move {
            let authenticated = match store.probe.check_session().await {
                Ok(authenticated) => authenticated,
                Err(err) => {
                    warn!("session check failed, continuing signed out: {err}");
                    false
                }
            };
            store.complete(authenticated);
        });

        true
    }

    fn complete(&self, authenticated: bool) {
        self.state.send_modify(|session| {
            session.is_authenticated = authenticated;
            session.is_loading = false;
            session.initialized = true;
        });
        info!(authenticated, "session initialized");
    }

    #[must_use]
    pub fn snapshot(&self) -> Session {
        *self.state.borrow()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Waits until the probe has resolved. Does not start it.
    pub async fn initialized(&self) -> Session {
        let mut rx = self.state.subscribe();
        // The sender lives in `self`, so the channel cannot close here.
        let session = match rx.wait_for(|session| session.initialized).await {
            Ok(session) => *session,
            Err(_) => self.snapshot(),
        };
        session
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::api::AppError;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Notify;

    /// Probe that counts calls and answers once released.
    pub(crate) struct StubProbe {
        pub calls: AtomicUsize,
        pub outcome: Result<bool, AppError>,
        pub release: Notify,
        pub gated: bool,
    }

    impl StubProbe {
        pub(crate) fn answering(outcome: Result<bool, AppError>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                outcome,
                release: Notify::new(),
                gated: false,
            })
        }

        pub(crate) fn gated(outcome: Result<bool, AppError>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                outcome,
                release: Notify::new(),
                gated: true,
            })
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AuthProbe for StubProbe {
        async fn check_session(&self) -> Result<bool, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.gated {
                self.release.notified().await;
            }
            self.outcome.clone()
        }
    }

    #[tokio::test]
    async fn request_check_runs_probe_once() {
        let probe = StubProbe::answering(Ok(true));
        let store = Arc::new(SessionStore::new(probe.clone()));

        assert!(store.request_check());
        assert!(!store.request_check());
        assert!(store.snapshot().is_loading);

        let session = store.initialized().await;
        assert!(!store.request_check());

        assert_eq!(probe.calls(), 1);
        assert_eq!(
            session,
            Session {
                is_authenticated: true,
                is_loading: false,
                initialized: true,
            }
        );
    }

    #[tokio::test]
    async fn probe_failure_resolves_signed_out() {
        let probe = StubProbe::answering(Err(AppError::Network("offline".to_string())));
        let store = Arc::new(SessionStore::new(probe));

        store.request_check();
        let session = store.initialized().await;

        assert!(session.initialized);
        assert!(!session.is_authenticated);
        assert!(!session.is_loading);
    }

    #[tokio::test]
    async fn initialized_never_reverts() {
        let probe = StubProbe::gated(Ok(false));
        let store = Arc::new(SessionStore::new(probe.clone()));
        let mut rx = store.subscribe();

        store.request_check();
        probe.release.notify_one();

        let mut seen_initialized = false;
        while rx.changed().await.is_ok() {
            let session = *rx.borrow_and_update();
            if seen_initialized {
                assert!(session.initialized);
            }
            seen_initialized |= session.initialized;
            if session.initialized {
                break;
            }
        }
        assert!(seen_initialized);
        assert!(store.snapshot().initialized);
    }
}
