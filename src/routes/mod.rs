//! Named routes of the client and the per-route auth guard.

pub mod guard;

pub use guard::{RouteDecision, RouteGuard};

use crate::navigation::{HOME_PATH, LOGIN_PATH};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub require_auth: bool,
}

impl Route {
    #[must_use]
    pub const fn public(path: &'static str) -> Self {
        Self {
            path,
            require_auth: false,
        }
    }

    #[must_use]
    pub const fn guarded(path: &'static str) -> Self {
        Self {
            path,
            require_auth: true,
        }
    }
}

pub const LOGIN: Route = Route::public(LOGIN_PATH);
pub const DASHBOARD: Route = Route::guarded(HOME_PATH);
pub const LESSONS: Route = Route::guarded("/lessons");
pub const REVIEWS: Route = Route::guarded("/reviews");
pub const NEW_CONTENT: Route = Route::guarded("/courses/new");
