//! Application context: owns every store handle and the background effect.
//! Routes and commands receive the context instead of reaching for globals.

pub mod config;

use crate::{
    api::ApiClient,
    creation::{
        CourseOutlineGenerator, CreationOrchestrator, CreationSurface, ModuleGenerator,
        NavigationEffect,
    },
    navigation::History,
    routes::RouteGuard,
    session::{AuthProbe, BootstrapGate, SessionStore},
};
use config::AppConfig;
use std::{sync::Arc, time::Duration};
use tokio::task::JoinHandle;

/// The external services the core depends on.
#[derive(Clone)]
pub struct Collaborators {
    pub auth: Arc<dyn AuthProbe>,
    pub modules: Arc<dyn ModuleGenerator>,
    pub courses: Arc<dyn CourseOutlineGenerator>,
}

impl Collaborators {
    #[must_use]
    pub fn from_api(api: &Arc<ApiClient>) -> Self {
        Self {
            auth: api.clone(),
            modules: api.clone(),
            courses: api.clone(),
        }
    }
}

pub struct AppContext {
    pub session: Arc<SessionStore>,
    pub gate: BootstrapGate,
    pub guard: RouteGuard,
    pub history: Arc<History>,
    pub orchestrator: Arc<CreationOrchestrator>,
    pub surface: Arc<CreationSurface>,
    pub effect: Arc<NavigationEffect>,
    effect_task: JoinHandle<()>,
}

impl AppContext {
    /// Wires the stores together and starts the navigation effect. Must be
    /// called from within a tokio runtime.
    #[must_use]
    pub fn new(collaborators: Collaborators, grace_delay: Duration) -> Self {
        let session = Arc::new(SessionStore::new(collaborators.auth));
        let history = Arc::new(History::default());
        let orchestrator = Arc::new(CreationOrchestrator::new(
            collaborators.modules,
            collaborators.courses,
        ));
        let surface = Arc::new(CreationSurface::new(Arc::clone(&orchestrator)));
        let effect = Arc::new(NavigationEffect::new(
            Arc::clone(&orchestrator),
            Arc::clone(&surface),
            history.clone(),
            grace_delay,
        ));
        let effect_task = Arc::clone(&effect).spawn();

        Self {
            gate: BootstrapGate::new(Arc::clone(&session)),
            guard: RouteGuard::new(Arc::clone(&session), history.clone()),
            session,
            history,
            orchestrator,
            surface,
            effect,
            effect_task,
        }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig, api: &Arc<ApiClient>) -> Self {
        Self::new(Collaborators::from_api(api), config.grace_delay)
    }
}

impl Drop for AppContext {
    fn drop(&mut self) {
        self.effect_task.abort();
    }
}
