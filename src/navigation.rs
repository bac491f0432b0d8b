//! Client-side navigation. The core only issues absolute paths; `History`
//! keeps the back stack so callers can inspect where a flow ended up.

use std::sync::{Mutex, PoisonError};
use tracing::info;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavigateOptions {
    /// Overwrite the current history entry instead of pushing a new one.
    pub replace: bool,
}

impl NavigateOptions {
    #[must_use]
    pub fn replace() -> Self {
        Self { replace: true }
    }
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str, options: NavigateOptions);
}

/// Lesson page of a freshly generated module.
#[must_use]
pub fn module_lesson_path(course_id: &str, lesson_id: &str) -> String {
    format!("/courses/{course_id}/lessons/{lesson_id}")
}

/// Overview page of a freshly generated course outline.
#[must_use]
pub fn course_path(course_id: &str) -> String {
    format!("/courses/{course_id}")
}

/// In-memory history stack.
#[derive(Debug)]
pub struct History {
    entries: Mutex<Vec<String>>,
}

impl History {
    #[must_use]
    pub fn new(initial: &str) -> Self {
        Self {
            entries: Mutex::new(vec![initial.to_string()]),
        }
    }

    #[must_use]
    pub fn current(&self) -> String {
        self.entries()
            .last()
            .cloned()
            .unwrap_or_else(|| HOME_PATH.to_string())
    }

    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(HOME_PATH)
    }
}

impl Navigator for History {
    fn navigate(&self, path: &str, options: NavigateOptions) {
        info!(path, replace = options.replace, "navigate");
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if options.replace {
            entries.pop();
        }
        entries.push(path.to_string());
    }
}
