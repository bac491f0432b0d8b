pub mod bootstrap;
pub mod create;
pub mod listings;
pub mod status;

// Internal "interpreter" for `Action`, kept apart so `mod.rs` stays small.
mod run;

use crate::cli::globals::GlobalArgs;

#[derive(Debug)]
pub enum Action {
    Status(GlobalArgs),
    CreateModule(create::ModuleArgs),
    CreateCourse(create::CourseArgs),
    Lessons(GlobalArgs),
    Reviews(GlobalArgs),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
