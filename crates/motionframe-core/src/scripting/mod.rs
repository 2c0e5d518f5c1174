//! # Scripting Module
//!
//! Rhai scripting API bindings for authoring projects.
//!
//! ## Responsibilities
//! - **Engine Setup**: Registers all types and functions with Rhai.
//! - **Shape Creation**: `add_circle`, `add_rect`, `add_text`, `add_polygon`.
//! - **Animation**: `key`, `capture`, canned animations, `sample`.
//!
//! ## Pattern
//! All bindings follow: `engine.register_fn("name", |handle, ...| { ... })`
//!
//! ## Module Structure
//! - `types`: Handle types (ProjectHandle, ShapeHandle)
//! - `utils`: Conversions (numbers, property maps, errors)
//! - `api/`: Sub-modules for project and animation

mod api;
pub mod types;
pub mod utils;

pub use types::{ProjectHandle, ShapeHandle};

use crate::errors::{MotionError, Result};
use crate::project::Project;
use rhai::Engine;
use tracing::{info, instrument};

/// Registers the motionframe API into the provided Rhai `Engine`.
///
/// This exposes the `Project` and `Shape` types and their methods.
pub fn register_rhai_api(engine: &mut Engine) {
    api::register_all(engine);
}

/// Evaluates a script that ends with a `Project` value and returns that project.
#[instrument(level = "info", skip_all, fields(bytes = source.len()))]
pub fn run_script(source: &str) -> Result<Project> {
    let mut engine = Engine::new();
    register_rhai_api(&mut engine);

    let handle = engine
        .eval::<ProjectHandle>(source)
        .map_err(|e| MotionError::Script(e.to_string()))?;
    let project = handle.with(|session| session.project().clone());
    info!(
        shapes = project.shapes.len(),
        keyframes = project.keyframes.len(),
        "script evaluated"
    );
    Ok(project)
}
