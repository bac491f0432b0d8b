use super::{
    check_identifier, validate_prompt, CourseOutlineGenerator, CreationError, CreationKind,
    CreationRequest, CreationState, ModuleGenerator,
};
use crate::{
    api::types::{CourseOutlineInput, ModuleInput},
    navigation::{course_path, module_lesson_path},
};
use std::{
    future::Future,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, PoisonError,
    },
    time::Duration,
};
use tokio::{sync::watch, task::JoinHandle, time::sleep};
use tracing::{debug, info, warn};

/// Handle on one started creation attempt.
#[derive(Debug)]
pub struct CreationTicket {
    pub kind: CreationKind,
    pub generation: u64,
    handle: JoinHandle<()>,
}

impl CreationTicket {
    /// Waits until the collaborator call has completed and its outcome was
    /// applied or discarded.
    pub async fn finished(self) {
        if let Err(err) = self.handle.await {
            warn!(kind = %self.kind, "creation task ended abnormally: {err}");
        }
    }
}

#[derive(Debug)]
struct ScheduledReset {
    id: u64,
    handle: JoinHandle<()>,
}

/// Owns the module and course-outline slots.
pub struct CreationOrchestrator {
    state: watch::Sender<CreationState>,
    modules: Arc<dyn ModuleGenerator>,
    courses: Arc<dyn CourseOutlineGenerator>,
    scheduled_reset: Mutex<Option<ScheduledReset>>,
    reset_ids: AtomicU64,
}

impl CreationOrchestrator {
    #[must_use]
    pub fn new(
        modules: Arc<dyn ModuleGenerator>,
        courses: Arc<dyn CourseOutlineGenerator>,
    ) -> Self {
        let (state, _) = watch::channel(CreationState::default());
        Self {
            state,
            modules,
            courses,
            scheduled_reset: Mutex::new(None),
            reset_ids: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> CreationState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CreationState> {
        self.state.subscribe()
    }

    /// Waits until both slots are idle again.
    pub async fn settled(&self) -> CreationState {
        let mut rx = self.state.subscribe();
        let state = match rx.wait_for(CreationState::is_idle).await {
            Ok(state) => state.clone(),
            Err(_) => self.snapshot(),
        };
        state
    }

    pub fn start_module_creation(self: &Arc<Self>, input: ModuleInput) -> CreationTicket {
        let modules = Arc::clone(&self.modules);
        self.start(
            CreationKind::Module,
            |state| &mut state.module,
            async move {
                validate_prompt(&input.prompt)?;
                let created = modules.create_module(&input).await?;
                check_identifier(&created.course_id)?;
                check_identifier(&created.lesson_id)?;
                Ok::<_, CreationError>(created)
            },
        )
    }

    pub fn start_course_outline_creation(
        self: &Arc<Self>,
        input: CourseOutlineInput,
    ) -> CreationTicket {
        let courses = Arc::clone(&self.courses);
        self.start(
            CreationKind::CourseOutline,
            |state| &mut state.course_outline,
            async move {
                validate_prompt(&input.prompt)?;
                let created = courses.create_course_outline(&input).await?;
                check_identifier(&created.course_id)?;
                Ok::<_, CreationError>(created)
            },
        )
    }

    fn start<T, S, F>(self: &Arc<Self>, kind: CreationKind, slot: S, work: F) -> CreationTicket
    where
        T: Send + Sync + 'static,
        S: Fn(&mut CreationState) -> &mut CreationRequest<T> + Send + 'static,
        F: Future<Output = Result<T, CreationError>> + Send + 'static,
    {
        self.cancel_scheduled_reset();

        let mut generation = 0;
        self.state.send_modify(|state| {
            state.cycle += 1;
            generation = slot(state).begin();
        });
        info!(%kind, generation, "creation started");

        let orchestrator = Arc::clone(self);
        let handle = tokio::spawn(async move {
            let outcome = work.await;
            let succeeded = outcome.is_ok();
            let applied = orchestrator.state.send_if_modified(|state| {
                let sequence = state.next_completion();
                slot(state).settle(generation, sequence, outcome)
            });
            if applied {
                info!(%kind, generation, succeeded, "creation finished");
            } else {
                debug!(%kind, generation, "stale creation result discarded");
            }
        });

        CreationTicket {
            kind,
            generation,
            handle,
        }
    }

    /// Forces both slots back to idle. In-flight responses are discarded when
    /// they arrive.
    pub fn reset(&self) {
        self.cancel_scheduled_reset();
        self.state.send_modify(CreationState::clear);
        debug!("creation state reset");
    }

    /// Resets after `delay` unless cancelled by `reset()`, a new start, or a
    /// later schedule.
    pub fn schedule_reset(self: &Arc<Self>, delay: Duration) {
        let id = self.reset_ids.fetch_add(1, Ordering::SeqCst) + 1;
        let orchestrator = Arc::clone(self);
        let handle = tokio::spawn(async move {
            sleep(delay).await;
            orchestrator.fire_scheduled_reset(id);
        });

        let previous = self
            .scheduled_reset
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(ScheduledReset { id, handle });
        if let Some(previous) = previous {
            previous.handle.abort();
        }
    }

    #[must_use]
    pub fn has_scheduled_reset(&self) -> bool {
        self.scheduled_reset
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn fire_scheduled_reset(&self, id: u64) {
        {
            let mut scheduled = self
                .scheduled_reset
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if scheduled.as_ref().map(|s| s.id) != Some(id) {
                return;
            }
            // Running inside this task; drop the handle without aborting.
            scheduled.take();
        }
        self.state.send_modify(CreationState::clear);
        debug!("grace delay elapsed, creation state cleared");
    }

    fn cancel_scheduled_reset(&self) {
        let scheduled = self
            .scheduled_reset
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(scheduled) = scheduled {
            scheduled.handle.abort();
            debug!("scheduled reset cancelled");
        }
    }

    /// Consumes the earliest-settled unconsumed success and returns its
    /// navigation target. Yields nothing once a navigation has been dispatched
    /// in the current cycle.
    pub fn claim_navigation(&self) -> Option<String> {
        let mut target = None;
        self.state.send_if_modified(|state| {
            if state.navigated_cycle == Some(state.cycle) {
                return false;
            }
            let course_first = match (
                state.module.claimable(),
                state.course_outline.claimable(),
            ) {
                (Some(module), Some(course)) => course < module,
                (None, Some(_)) => true,
                _ => false,
            };
            target = if course_first {
                state
                    .course_outline
                    .claim()
                    .map(|created| course_path(&created.course_id))
            } else {
                state
                    .module
                    .claim()
                    .map(|created| module_lesson_path(&created.course_id, &created.lesson_id))
            };
            if target.is_some() {
                state.navigated_cycle = Some(state.cycle);
            }
            // Bookkeeping only; subscribers see no visible change.
            false
        });
        target
    }
}
