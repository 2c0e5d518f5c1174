//! # Scripting Types
//!
//! Handle types for Rhai scripting integration.
//!
//! ## Responsibilities
//! - **ProjectHandle**: Wrapper around a `Session` for script access
//! - **ShapeHandle**: Reference to one shape of that session

use crate::session::Session;
use crate::shape::ShapeId;
use std::sync::{Arc, Mutex};

/// Wrapper around `Session` for Rhai scripting.
#[derive(Clone)]
pub struct ProjectHandle {
    pub session: Arc<Mutex<Session>>,
}

impl ProjectHandle {
    pub fn new(session: Session) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
        }
    }

    /// Runs `f` with the session locked. A poisoned lock is recovered since
    /// every session mutation leaves it consistent.
    pub fn with<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut guard = self
            .session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard)
    }

    pub fn shape(&self, id: impl Into<ShapeId>) -> ShapeHandle {
        ShapeHandle {
            session: self.session.clone(),
            id: id.into(),
        }
    }
}

/// Handle to a specific shape in the session's project.
#[derive(Clone)]
pub struct ShapeHandle {
    pub session: Arc<Mutex<Session>>,
    pub id: ShapeId,
}

impl ShapeHandle {
    pub fn with<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut guard = self
            .session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard)
    }
}
