use crate::{
    cli::{actions::bootstrap::bootstrap, globals::GlobalArgs},
    routes::{self, RouteDecision},
};
use anyhow::Result;

/// Lands on the dashboard and prints whether the configured session is
/// signed in.
/// # Errors
/// Returns an error if the client cannot be configured.
pub async fn execute(globals: GlobalArgs) -> Result<()> {
    let app = bootstrap(&globals).await?;

    match app.ctx.guard.admit(&routes::DASHBOARD) {
        RouteDecision::Render => println!("signed in ({})", app.config.api_base_url),
        RouteDecision::RedirectToLogin | RouteDecision::ShowLoadingIndicator => println!(
            "signed out ({}), redirected to {}",
            app.config.api_base_url,
            app.ctx.history.current()
        ),
    }

    Ok(())
}
