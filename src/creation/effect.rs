use super::{CreationOrchestrator, CreationSurface};
use crate::navigation::{NavigateOptions, Navigator};
use std::{sync::Arc, time::Duration};
use tokio::task::JoinHandle;
use tracing::info;

/// Turns a successful creation into exactly one navigation: close the
/// surface, navigate, then clear both slots after the grace delay.
pub struct NavigationEffect {
    orchestrator: Arc<CreationOrchestrator>,
    surface: Arc<CreationSurface>,
    navigator: Arc<dyn Navigator>,
    grace_delay: Duration,
}

impl NavigationEffect {
    #[must_use]
    pub fn new(
        orchestrator: Arc<CreationOrchestrator>,
        surface: Arc<CreationSurface>,
        navigator: Arc<dyn Navigator>,
        grace_delay: Duration,
    ) -> Self {
        Self {
            orchestrator,
            surface,
            navigator,
            grace_delay,
        }
    }

    /// Runs the side effects for an unconsumed success, if any, and returns
    /// the path navigated to. Safe to call on every notification.
    pub fn react(&self) -> Option<String> {
        let path = self.orchestrator.claim_navigation()?;
        self.surface.dismiss();
        self.navigator.navigate(&path, NavigateOptions::default());
        self.orchestrator.schedule_reset(self.grace_delay);
        info!(path, "creation complete, navigated");
        Some(path)
    }

    /// Reacts to every change of the creation store until aborted.
    pub fn spawn(self: Arc<Self>) -> JoinHandle<()> {
        let mut rx = self.orchestrator.subscribe();
        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                self.react();
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api::types::CreatedCourseRef,
        creation::orchestrator::tests::{course_input, module_input, module_ref, orchestrator},
        navigation::History,
    };
    use tokio::time::sleep;

    struct Harness {
        orchestrator: Arc<CreationOrchestrator>,
        generator: Arc<crate::creation::orchestrator::tests::ScriptedGenerator>,
        surface: Arc<CreationSurface>,
        history: Arc<History>,
        effect: Arc<NavigationEffect>,
    }

    fn harness() -> Harness {
        let (orchestrator, generator) = orchestrator();
        let surface = Arc::new(CreationSurface::new(Arc::clone(&orchestrator)));
        let history = Arc::new(History::default());
        let effect = Arc::new(NavigationEffect::new(
            Arc::clone(&orchestrator),
            Arc::clone(&surface),
            history.clone(),
            Duration::from_millis(100),
        ));
        Harness {
            orchestrator,
            generator,
            surface,
            history,
            effect,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn module_success_navigates_then_resets_after_grace() {
        let h = harness();
        let watcher = Arc::clone(&h.effect).spawn();
        let reply = h.generator.module_reply();

        h.surface.open();
        let ticket = h.surface.submit_module(module_input("Graphs")).unwrap();
        reply.send(Ok(module_ref("c1", "l1"))).unwrap();
        ticket.finished().await;
        tokio::task::yield_now().await;

        assert_eq!(h.history.current(), "/courses/c1/lessons/l1");
        assert!(!h.surface.is_open());
        assert!(!h.orchestrator.snapshot().is_idle());

        sleep(Duration::from_millis(101)).await;
        assert!(h.orchestrator.snapshot().is_idle());
        assert_eq!(h.history.entries(), vec!["/", "/courses/c1/lessons/l1"]);

        watcher.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn course_outline_success_targets_course_page() {
        let h = harness();
        let watcher = Arc::clone(&h.effect).spawn();
        let reply = h.generator.course_reply();

        h.surface.open();
        let ticket = h
            .surface
            .submit_course_outline(course_input("Rust"))
            .unwrap();
        reply
            .send(Ok(CreatedCourseRef {
                course_id: "c9".to_string(),
            }))
            .unwrap();
        ticket.finished().await;

        let state = h.orchestrator.settled().await;
        assert!(state.is_idle());
        assert_eq!(h.history.current(), "/courses/c9");

        watcher.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn later_started_kind_resolving_first_wins_navigation() {
        let h = harness();
        let watcher = Arc::clone(&h.effect).spawn();
        let module_reply = h.generator.module_reply();
        let course_reply = h.generator.course_reply();

        h.surface.open();
        let module = h.orchestrator.start_module_creation(module_input("Graphs"));
        let course = h
            .orchestrator
            .start_course_outline_creation(course_input("Rust"));
        tokio::task::yield_now().await;

        // Both land before the watcher gets to run.
        course_reply
            .send(Ok(CreatedCourseRef {
                course_id: "c9".to_string(),
            }))
            .unwrap();
        module_reply.send(Ok(module_ref("c1", "l1"))).unwrap();
        course.finished().await;
        module.finished().await;
        tokio::task::yield_now().await;

        assert_eq!(h.history.current(), "/courses/c9");
        assert!(!h.surface.is_open());

        h.orchestrator.settled().await;
        assert_eq!(h.history.entries(), vec!["/", "/courses/c9"]);

        watcher.abort();
    }

    #[tokio::test]
    async fn repeated_notifications_navigate_once() {
        let h = harness();
        let reply = h.generator.module_reply();

        h.surface.open();
        let ticket = h.surface.submit_module(module_input("Graphs")).unwrap();
        reply.send(Ok(module_ref("c1", "l1"))).unwrap();
        ticket.finished().await;

        assert_eq!(h.effect.react(), Some("/courses/c1/lessons/l1".to_string()));
        assert_eq!(h.effect.react(), None);
        assert_eq!(h.effect.react(), None);
        assert_eq!(h.history.entries().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn closing_before_success_never_navigates() {
        let h = harness();
        let watcher = Arc::clone(&h.effect).spawn();
        let reply = h.generator.module_reply();

        h.surface.open();
        let ticket = h.surface.submit_module(module_input("Graphs")).unwrap();
        h.surface.close();

        reply.send(Ok(module_ref("c1", "l1"))).unwrap();
        ticket.finished().await;
        sleep(Duration::from_millis(500)).await;

        assert_eq!(h.history.entries(), vec!["/"]);
        assert!(h.orchestrator.snapshot().is_idle());

        watcher.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn discarded_result_does_not_leak_into_next_attempt() {
        let h = harness();
        let watcher = Arc::clone(&h.effect).spawn();
        let stale_reply = h.generator.module_reply();
        let fresh_reply = h.generator.module_reply();

        h.surface.open();
        let stale = h.surface.submit_module(module_input("first")).unwrap();
        h.surface.close();

        h.surface.open();
        let fresh = h.surface.submit_module(module_input("second")).unwrap();

        stale_reply.send(Ok(module_ref("c1", "stale"))).unwrap();
        stale.finished().await;
        assert!(h.orchestrator.snapshot().module.is_pending());
        assert_eq!(h.history.entries(), vec!["/"]);

        fresh_reply.send(Ok(module_ref("c1", "fresh"))).unwrap();
        fresh.finished().await;
        h.orchestrator.settled().await;

        assert_eq!(h.history.entries(), vec!["/", "/courses/c1/lessons/fresh"]);
        watcher.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn reopening_after_success_starts_idle() {
        let h = harness();
        let watcher = Arc::clone(&h.effect).spawn();
        let reply = h.generator.module_reply();

        h.surface.open();
        let ticket = h.surface.submit_module(module_input("Graphs")).unwrap();
        reply.send(Ok(module_ref("c1", "l1"))).unwrap();
        ticket.finished().await;
        tokio::task::yield_now().await;
        assert!(!h.surface.is_open());

        // Reopened inside the grace window.
        h.surface.open();
        assert!(h.orchestrator.snapshot().is_idle());
        assert!(!h.orchestrator.has_scheduled_reset());

        sleep(Duration::from_millis(200)).await;
        assert!(h.orchestrator.snapshot().is_idle());
        assert_eq!(h.history.entries().len(), 2);

        watcher.abort();
    }
}
