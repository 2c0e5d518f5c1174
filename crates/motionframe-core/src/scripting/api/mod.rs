//! # API Module
//!
//! Aggregates all Rhai API sub-modules and provides a single registration point.
//!
//! ## Sub-modules
//! - **project**: Project creation, shape creation and editing
//! - **animation**: Keyframes, canned animations, sampling

pub mod animation;
pub mod project;

use rhai::Engine;

/// Register all API functions with the Rhai engine.
pub fn register_all(engine: &mut Engine) {
    project::register(engine);
    animation::register(engine);
}
