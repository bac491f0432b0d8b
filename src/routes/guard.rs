use super::Route;
use crate::{
    navigation::{NavigateOptions, Navigator, LOGIN_PATH},
    session::{Session, SessionStore},
};
use std::sync::Arc;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteDecision {
    Render,
    ShowLoadingIndicator,
    RedirectToLogin,
}

/// UX-only guard; real access control must live on the API.
pub struct RouteGuard {
    store: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl RouteGuard {
    #[must_use]
    pub fn new(store: Arc<SessionStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self { store, navigator }
    }

    /// Public routes always render, even for signed-in users. A session that
    /// has not resolved yet counts as loading.
    #[must_use]
    pub fn decide(session: &Session, require_auth: bool) -> RouteDecision {
        if !require_auth {
            return RouteDecision::Render;
        }
        if session.is_loading || !session.initialized {
            return RouteDecision::ShowLoadingIndicator;
        }
        if session.is_authenticated {
            RouteDecision::Render
        } else {
            RouteDecision::RedirectToLogin
        }
    }

    /// Evaluates `route` against the current session and performs the login
    /// redirect, replacing history, when needed.
    pub fn admit(&self, route: &Route) -> RouteDecision {
        let decision = Self::decide(&self.store.snapshot(), route.require_auth);
        debug!(path = route.path, ?decision, "route guard");
        if decision == RouteDecision::RedirectToLogin {
            self.navigator
                .navigate(LOGIN_PATH, NavigateOptions::replace());
        }
        decision
    }
}
