use super::{CreationError, CreationKind, CreationOrchestrator, CreationTicket};
use crate::api::types::{CourseOutlineInput, ModuleInput};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// The modal that starts creations. It exposes one action at a time: a start
/// is refused while either slot is pending.
pub struct CreationSurface {
    open: watch::Sender<bool>,
    orchestrator: Arc<CreationOrchestrator>,
}

impl CreationSurface {
    #[must_use]
    pub fn new(orchestrator: Arc<CreationOrchestrator>) -> Self {
        let (open, _) = watch::channel(false);
        Self { open, orchestrator }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        *self.open.borrow()
    }

    /// Opens on a clean `idle/idle` state.
    pub fn open(&self) {
        self.orchestrator.reset();
        self.open.send_replace(true);
        debug!("creation surface opened");
    }

    /// User-initiated close: discards anything in flight immediately.
    pub fn close(&self) {
        self.open.send_replace(false);
        self.orchestrator.reset();
        debug!("creation surface closed");
    }

    /// Hides the surface after a success; the grace-delay reset clears state.
    pub fn dismiss(&self) {
        self.open.send_replace(false);
    }

    /// # Errors
    ///
    /// Returns `SurfaceClosed` if the surface is not open, or `Busy` while a
    /// creation is pending.
    pub fn submit_module(&self, input: ModuleInput) -> Result<CreationTicket, CreationError> {
        self.ensure_ready()?;
        Ok(self.orchestrator.start_module_creation(input))
    }

    /// # Errors
    ///
    /// Returns `SurfaceClosed` if the surface is not open, or `Busy` while a
    /// creation is pending.
    pub fn submit_course_outline(
        &self,
        input: CourseOutlineInput,
    ) -> Result<CreationTicket, CreationError> {
        self.ensure_ready()?;
        Ok(self.orchestrator.start_course_outline_creation(input))
    }

    fn ensure_ready(&self) -> Result<(), CreationError> {
        if !self.is_open() {
            return Err(CreationError::SurfaceClosed);
        }
        let state = self.orchestrator.snapshot();
        if state.module.is_pending() {
            return Err(CreationError::Busy(CreationKind::Module));
        }
        if state.course_outline.is_pending() {
            return Err(CreationError::Busy(CreationKind::CourseOutline));
        }
        Ok(())
    }
}
