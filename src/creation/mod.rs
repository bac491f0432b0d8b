//! Content generation: two independent slots (module and course outline),
//! the modal surface that starts them, and the navigation effect that runs
//! when one succeeds.
//!
//! Every slot carries a generation counter. A completion is applied only if
//! its generation still matches the slot, so responses that arrive after a
//! reset are dropped instead of leaking into the next attempt.

pub mod effect;
pub mod orchestrator;
pub mod surface;

pub use effect::NavigationEffect;
pub use orchestrator::{CreationOrchestrator, CreationTicket};
pub use surface::CreationSurface;

use crate::api::{
    types::{CourseOutlineInput, CreatedCourseRef, CreatedModuleRef, ModuleInput},
    AppError,
};
use async_trait::async_trait;
use regex::Regex;
use std::{fmt, sync::LazyLock};
use thiserror::Error;

#[async_trait]
pub trait ModuleGenerator: Send + Sync {
    async fn create_module(&self, input: &ModuleInput) -> Result<CreatedModuleRef, AppError>;
}

#[async_trait]
pub trait CourseOutlineGenerator: Send + Sync {
    async fn create_course_outline(
        &self,
        input: &CourseOutlineInput,
    ) -> Result<CreatedCourseRef, AppError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CreationKind {
    Module,
    CourseOutline,
}

impl fmt::Display for CreationKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreationKind::Module => write!(formatter, "module"),
            CreationKind::CourseOutline => write!(formatter, "course outline"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CreationStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CreationError {
    #[error("Please describe what you want to learn.")]
    InvalidPrompt,
    #[error("The server returned an invalid identifier: {0:?}")]
    InvalidIdentifier(String),
    #[error("{0}")]
    Api(#[from] AppError),
    #[error("The creation dialog is closed.")]
    SurfaceClosed,
    #[error("A {0} is already being generated.")]
    Busy(CreationKind),
}

impl CreationError {
    /// True when the input was refused, locally or by a 4xx response, as
    /// opposed to the server or network failing.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        match self {
            CreationError::InvalidPrompt => true,
            CreationError::Api(err) => err.is_validation(),
            _ => false,
        }
    }
}

/// One tracked creation workflow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreationRequest<T> {
    pub status: CreationStatus,
    /// Display message, kept until the slot is retried or reset.
    pub error: Option<String>,
    pub result: Option<T>,
    failure: Option<CreationError>,
    generation: u64,
    /// Completion order within the store; 0 until settled.
    settled_at: u64,
    consumed: bool,
}

impl<T> Default for CreationRequest<T> {
    fn default() -> Self {
        Self {
            status: CreationStatus::Idle,
            error: None,
            result: None,
            failure: None,
            generation: 0,
            settled_at: 0,
            consumed: false,
        }
    }
}

impl<T> CreationRequest<T> {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.status == CreationStatus::Idle
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == CreationStatus::Pending
    }

    /// Starts a new attempt, superseding any in-flight one.
    fn begin(&mut self) -> u64 {
        self.clear();
        self.status = CreationStatus::Pending;
        self.generation
    }

    /// Back to idle; in-flight completions become stale.
    fn clear(&mut self) {
        self.generation += 1;
        self.status = CreationStatus::Idle;
        self.error = None;
        self.result = None;
        self.failure = None;
        self.settled_at = 0;
        self.consumed = false;
    }

    /// Applies a completion if it belongs to the current attempt. `sequence`
    /// records when it landed relative to the other slot.
    fn settle(
        &mut self,
        generation: u64,
        sequence: u64,
        outcome: Result<T, CreationError>,
    ) -> bool {
        if generation != self.generation || self.status != CreationStatus::Pending {
            return false;
        }
        self.settled_at = sequence;
        match outcome {
            Ok(created) => {
                self.status = CreationStatus::Succeeded;
                self.result = Some(created);
            }
            Err(err) => {
                self.status = CreationStatus::Failed;
                self.error = Some(err.to_string());
                self.failure = Some(err);
            }
        }
        true
    }

    /// Completion sequence of an unconsumed success.
    fn claimable(&self) -> Option<u64> {
        (self.status == CreationStatus::Succeeded && !self.consumed).then_some(self.settled_at)
    }

    /// Hands out a successful result exactly once.
    fn claim(&mut self) -> Option<&T> {
        self.claimable()?;
        self.consumed = true;
        self.result.as_ref()
    }
}

/// Snapshot published to subscribers after every mutation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CreationState {
    pub module: CreationRequest<CreatedModuleRef>,
    pub course_outline: CreationRequest<CreatedCourseRef>,
    /// Bumped by every start and reset; at most one navigation per cycle.
    cycle: u64,
    navigated_cycle: Option<u64>,
    completions: u64,
}

impl CreationState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.module.is_idle() && self.course_outline.is_idle()
    }

    #[must_use]
    pub fn status(&self, kind: CreationKind) -> CreationStatus {
        match kind {
            CreationKind::Module => self.module.status,
            CreationKind::CourseOutline => self.course_outline.status,
        }
    }

    #[must_use]
    pub fn error(&self, kind: CreationKind) -> Option<&str> {
        match kind {
            CreationKind::Module => self.module.error.as_deref(),
            CreationKind::CourseOutline => self.course_outline.error.as_deref(),
        }
    }

    #[must_use]
    pub fn failure(&self, kind: CreationKind) -> Option<&CreationError> {
        match kind {
            CreationKind::Module => self.module.failure.as_ref(),
            CreationKind::CourseOutline => self.course_outline.failure.as_ref(),
        }
    }

    fn next_completion(&mut self) -> u64 {
        self.completions += 1;
        self.completions
    }

    fn clear(&mut self) {
        self.module.clear();
        self.course_outline.clear();
        self.cycle += 1;
        self.navigated_cycle = None;
    }
}

pub(crate) fn validate_prompt(prompt: &str) -> Result<(), CreationError> {
    if prompt.trim().is_empty() {
        Err(CreationError::InvalidPrompt)
    } else {
        Ok(())
    }
}

static URL_SAFE_ID: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").ok());

/// Identifiers end up in navigation paths, so only URL-safe ids pass.
pub(crate) fn valid_identifier(id: &str) -> bool {
    URL_SAFE_ID.as_ref().is_some_and(|re| re.is_match(id))
}

pub(crate) fn check_identifier(id: &str) -> Result<(), CreationError> {
    if valid_identifier(id) {
        Ok(())
    } else {
        Err(CreationError::InvalidIdentifier(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_must_not_be_blank() {
        assert_eq!(validate_prompt("  \n"), Err(CreationError::InvalidPrompt));
        assert_eq!(validate_prompt("Intro to graphs"), Ok(()));
    }

    #[test]
    fn identifiers_are_url_safe() {
        assert!(valid_identifier("c1"));
        assert!(valid_identifier("01JABCDEF_x-y"));
        assert!(!valid_identifier(""));
        assert!(!valid_identifier("c1/../admin"));
        assert!(!valid_identifier("a b"));
        assert_eq!(
            check_identifier("x?y"),
            Err(CreationError::InvalidIdentifier("x?y".to_string()))
        );
    }

    #[test]
    fn settle_ignores_stale_generations() {
        let mut slot = CreationRequest::<u8>::default();
        let first = slot.begin();
        let second = slot.begin();
        assert_ne!(first, second);

        assert!(!slot.settle(first, 1, Ok(1)));
        assert!(slot.is_pending());

        assert!(slot.settle(second, 2, Ok(2)));
        assert_eq!(slot.status, CreationStatus::Succeeded);
        assert_eq!(slot.result, Some(2));
    }

    #[test]
    fn settle_after_clear_is_dropped() {
        let mut slot = CreationRequest::<u8>::default();
        let generation = slot.begin();
        slot.clear();
        assert!(!slot.settle(generation, 1, Ok(7)));
        assert!(slot.is_idle());
        assert_eq!(slot.result, None);
    }

    #[test]
    fn failure_keeps_display_message() {
        let mut slot = CreationRequest::<u8>::default();
        let generation = slot.begin();
        let err = CreationError::Api(AppError::Http {
            status: 422,
            message: "Prompt is too short".to_string(),
        });
        assert!(slot.settle(generation, 1, Err(err)));
        assert_eq!(slot.status, CreationStatus::Failed);
        assert_eq!(
            slot.error.as_deref(),
            Some("Request failed (422): Prompt is too short")
        );
        assert!(slot.failure.as_ref().is_some_and(CreationError::is_rejection));
    }

    #[test]
    fn rejection_is_input_or_client_error() {
        assert!(CreationError::InvalidPrompt.is_rejection());
        assert!(!CreationError::Api(AppError::Http {
            status: 503,
            message: "overloaded".to_string(),
        })
        .is_rejection());
        assert!(!CreationError::Api(AppError::Network("reset".to_string())).is_rejection());
        assert!(!CreationError::InvalidIdentifier("a/b".to_string()).is_rejection());
    }

    #[test]
    fn earlier_completion_is_claimable_first() {
        let mut state = CreationState::default();
        let module = state.module.begin();
        let course = state.course_outline.begin();

        let created_course = CreatedCourseRef {
            course_id: "c9".to_string(),
        };
        let created_module = CreatedModuleRef {
            course_id: "c1".to_string(),
            lesson_id: "l1".to_string(),
        };
        let first = state.next_completion();
        assert!(state.course_outline.settle(course, first, Ok(created_course)));
        let second = state.next_completion();
        assert!(state.module.settle(module, second, Ok(created_module)));

        assert!(state.course_outline.claimable() < state.module.claimable());
        state.clear();
        assert_eq!(state.course_outline.claimable(), None);
    }

    #[test]
    fn claim_hands_out_result_once() {
        let mut slot = CreationRequest::<u8>::default();
        let generation = slot.begin();
        assert_eq!(slot.claim(), None);
        slot.settle(generation, 1, Ok(3));
        assert_eq!(slot.claim(), Some(&3));
        assert_eq!(slot.claim(), None);
    }

    #[test]
    fn state_clear_resets_both_slots() {
        let mut state = CreationState::default();
        state.module.begin();
        let generation = state.course_outline.begin();
        state
            .course_outline
            .settle(generation, 1, Err(CreationError::InvalidPrompt));

        state.clear();

        assert!(state.is_idle());
        assert_eq!(state.error(CreationKind::CourseOutline), None);
        assert_eq!(state.status(CreationKind::Module), CreationStatus::Idle);
    }
}
