use crate::cli::actions::{create, listings, status, Action};
use anyhow::Result;

/// Execute the provided action.
// Single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Status(globals) => status::execute(globals).await,
        Action::CreateModule(args) => create::execute_module(args).await,
        Action::CreateCourse(args) => create::execute_course(args).await,
        Action::Lessons(globals) => listings::execute_lessons(globals).await,
        Action::Reviews(globals) => listings::execute_reviews(globals).await,
    }
}
