use crate::{
    api::types::{CourseOutlineInput, ModuleInput},
    app::AppContext,
    cli::{
        actions::bootstrap::{bootstrap, enter},
        globals::GlobalArgs,
    },
    creation::{CreationKind, CreationTicket},
    routes,
};
use anyhow::{anyhow, bail, Result};
use std::time::Duration;
use tokio::{signal, time::timeout};
use tracing::info;

/// Upper bound for the navigation and grace-delay reset after a success.
const SETTLE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug)]
pub struct ModuleArgs {
    pub globals: GlobalArgs,
    pub prompt: String,
    pub course_id: Option<String>,
}

#[derive(Debug)]
pub struct CourseArgs {
    pub globals: GlobalArgs,
    pub prompt: String,
}

/// Generates a module and prints the lesson path navigated to.
/// # Errors
/// Returns an error if signed out, cancelled, or generation fails.
pub async fn execute_module(args: ModuleArgs) -> Result<()> {
    let app = bootstrap(&args.globals).await?;
    enter(&app.ctx, &routes::NEW_CONTENT)?;

    app.ctx.surface.open();
    let ticket = app.ctx.surface.submit_module(ModuleInput {
        prompt: args.prompt,
        course_id: args.course_id,
    })?;

    finish(&app.ctx, ticket, app.config.grace_delay).await
}

/// Generates a course outline and prints the course path navigated to.
/// # Errors
/// Returns an error if signed out, cancelled, or generation fails.
pub async fn execute_course(args: CourseArgs) -> Result<()> {
    let app = bootstrap(&args.globals).await?;
    enter(&app.ctx, &routes::NEW_CONTENT)?;

    app.ctx.surface.open();
    let ticket = app
        .ctx
        .surface
        .submit_course_outline(CourseOutlineInput {
            prompt: args.prompt,
        })?;

    finish(&app.ctx, ticket, app.config.grace_delay).await
}

/// Waits for the outcome. Ctrl-C closes the surface, which discards the
/// request the same way closing the dialog does.
async fn finish(ctx: &AppContext, ticket: CreationTicket, grace_delay: Duration) -> Result<()> {
    let kind: CreationKind = ticket.kind;
    info!(%kind, "waiting for generation");

    tokio::select! {
        () = ticket.finished() => {}
        _ = signal::ctrl_c() => {
            ctx.surface.close();
            bail!("{kind} generation cancelled");
        }
    }

    let state = ctx.orchestrator.snapshot();
    if let Some(err) = state.failure(kind) {
        ctx.surface.close();
        if err.is_rejection() {
            bail!("{kind} request rejected: {err}");
        }
        bail!("{kind} generation failed: {err}");
    }

    timeout(SETTLE_TIMEOUT + grace_delay, ctx.orchestrator.settled())
        .await
        .map_err(|_| anyhow!("{kind} generation did not settle"))?;

    println!("{}", ctx.history.current());
    Ok(())
}
