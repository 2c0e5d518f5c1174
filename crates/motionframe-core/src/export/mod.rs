//! # Export Module
//!
//! Frame-by-frame evaluation of a session for export.
//!
//! ## Responsibilities
//! - **Frame Loop**: Steps the timeline at the export frame rate.
//! - **Sinks**: Hands each resolved frame to a `FrameSink` (encoders live outside).
//! - **Control**: Progress callback and cancellation between frames.

pub mod frames;
pub mod sink;

pub use frames::{
    export_frames, frame_count, frame_index_at, frame_time_ms, CancelToken, ExportSettings,
    Frame,
};
pub use sink::{FrameCollector, FrameSink, JsonLinesSink};
