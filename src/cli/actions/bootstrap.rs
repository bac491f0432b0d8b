use crate::{
    api::ApiClient,
    app::{config::AppConfig, AppContext},
    cli::globals::GlobalArgs,
    navigation::{NavigateOptions, Navigator},
    routes::{Route, RouteDecision},
    session::Session,
};
use anyhow::{bail, Result};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct Bootstrapped {
    pub config: AppConfig,
    pub api: Arc<ApiClient>,
    pub ctx: AppContext,
    pub session: Session,
}

/// Builds the client, primes the CSRF cookie and waits for the one-time
/// session probe. Every command goes through here before touching a route.
///
/// # Errors
///
/// Returns an error if the configuration or HTTP client is invalid.
pub async fn bootstrap(globals: &GlobalArgs) -> Result<Bootstrapped> {
    let config = globals.to_config()?;
    let api = Arc::new(ApiClient::from_config(&config)?);

    match api.issue_csrf_token().await {
        Ok(true) => debug!("CSRF cookie issued"),
        Ok(false) => warn!("CSRF endpoint did not report success"),
        Err(err) => warn!("CSRF cookie not issued: {err}"),
    }

    let ctx = AppContext::from_config(&config, &api);
    let session = ctx.gate.open().await;

    Ok(Bootstrapped {
        config,
        api,
        ctx,
        session,
    })
}

/// Navigates to `route` and applies the guard.
///
/// # Errors
///
/// Returns an error when the guard redirects to the login page.
pub fn enter(ctx: &AppContext, route: &Route) -> Result<()> {
    ctx.history.navigate(route.path, NavigateOptions::default());
    match ctx.guard.admit(route) {
        RouteDecision::Render => Ok(()),
        RouteDecision::RedirectToLogin => bail!(
            "not signed in, redirected to {} (set --session-cookie)",
            ctx.history.current()
        ),
        RouteDecision::ShowLoadingIndicator => bail!("session check has not resolved"),
    }
}
