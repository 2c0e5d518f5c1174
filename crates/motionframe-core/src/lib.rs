//! # Motionframe Core
//!
//! `motionframe-core` is a keyframe animation engine for 2D shapes on a fixed canvas.
//!
//! Every shape owns a time-ordered track of sparse property keyframes. Sampling a
//! track at any millisecond yields the interpolated property set, which callers
//! merge onto the shape's base record before drawing.
//!
//! ## Core Features
//!
//! *   **Deterministic Sampling**: The same tracks and time always produce the same patch.
//! *   **Easing**: Linear, quadratic, cubic, back, elastic and bounce curves.
//! *   **Sparse Patches**: Numbers interpolate, colors, text and flags switch at the midpoint.
//! *   **Canned Animations**: Bounce, spin, scale pulse and fade generators.
//! *   **Frame Export**: Fixed-rate stepping with progress and cancellation.
//! *   **Scripting**: Built-in bindings for Rhai to author projects from scripts.
//!
//! ## Usage
//!
//! The core entry point is the [`Session`] struct, which owns a [`Project`] and the
//! [`AnimationEngine`] built from its keyframes.
//!
//! ```rust
//! use motionframe_core::{Easing, Project, PropertyPatch, Session, Shape};
//!
//! let mut session = Session::new(Project::new("Demo"));
//! session.add_shape(Shape::circle("ball", 0.0, 0.0));
//! session
//!     .add_keyframe("ball", 0.0, PropertyPatch::new().with_x(0.0), Easing::Linear)
//!     .unwrap();
//! session
//!     .add_keyframe("ball", 1000.0, PropertyPatch::new().with_x(100.0), Easing::Linear)
//!     .unwrap();
//!
//! let patch = session.evaluate("ball", 500.0).unwrap();
//! assert_eq!(patch.x, Some(50.0));
//! ```

/// Easing curves mapping linear progress to eased progress.
pub mod easing;

/// Sparse property patches and per-property interpolation rules.
pub mod patch;

/// Base shape records.
pub mod shape;

pub mod keyframe;

/// Time-ordered keyframes of one shape.
pub mod track;

/// Per-shape tracks and time sampling.
pub mod engine;

/// Canned animation generators.
pub mod presets;

pub mod errors;

/// Project document and JSON persistence.
pub mod project;

pub mod playback;

/// Editing session tying a project to its engine.
pub mod session;

/// Fixed-rate frame export.
pub mod export;

/// Rhai scripting API bindings.
pub mod scripting;

pub use easing::Easing;
pub use engine::{AnimationEngine, SharedEngine};
pub use errors::{MotionError, Result};
pub use export::{export_frames, CancelToken, ExportSettings, Frame, FrameSink};
pub use keyframe::{Keyframe, KeyframeId};
pub use patch::{Interpolate, PropertyPatch, PropertyValue};
pub use playback::Playhead;
pub use presets::CannedAnimation;
pub use project::Project;
pub use session::Session;
pub use shape::{Shape, ShapeId, ShapeKind, Vertex};
pub use track::KeyframeTrack;
