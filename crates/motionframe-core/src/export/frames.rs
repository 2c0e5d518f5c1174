//! # Frame Export
//!
//! Steps a session's timeline and resolves every visible shape per frame.
//!
//! ## Key Functions
//! - `export_frames`: Main export entry point.
//! - `frame_time_ms` / `frame_index_at`: Frame and millisecond conversions.

use super::sink::FrameSink;
use crate::errors::{MotionError, Result};
use crate::project::Project;
use crate::session::Session;
use crate::shape::Shape;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Output parameters for an export run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSettings {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Length to export in milliseconds.
    #[serde(default = "default_duration")]
    pub duration: f64,
}

fn default_width() -> u32 {
    1920
}

fn default_height() -> u32 {
    1080
}

fn default_fps() -> u32 {
    30
}

fn default_duration() -> f64 {
    5000.0
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            fps: default_fps(),
            duration: default_duration(),
        }
    }
}

impl ExportSettings {
    /// Settings matching a project's own canvas, frame rate and duration.
    pub fn from_project(project: &Project) -> Self {
        Self {
            width: project.width,
            height: project.height,
            fps: project.fps,
            duration: project.duration,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.fps == 0 {
            return Err(MotionError::InvalidSettings("fps must be positive".into()));
        }
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(MotionError::InvalidSettings(format!(
                "duration must be a non-negative number of milliseconds, got {}",
                self.duration
            )));
        }
        if self.width == 0 || self.height == 0 {
            return Err(MotionError::InvalidSettings(format!(
                "frame size {}x{} is empty",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

/// Number of frames covering `duration_ms` at `fps` (rounded up).
pub fn frame_count(duration_ms: f64, fps: u32) -> usize {
    ((duration_ms / 1000.0) * fps as f64).ceil() as usize
}

/// Timeline time of frame `index` in milliseconds.
pub fn frame_time_ms(index: usize, fps: u32) -> f64 {
    index as f64 * (1000.0 / fps as f64)
}

/// Index of the frame being shown at `time_ms`.
pub fn frame_index_at(time_ms: f64, fps: u32) -> usize {
    ((time_ms.max(0.0) / 1000.0) * fps as f64).floor() as usize
}

/// One resolved frame: visible shapes, back to front.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub index: usize,
    pub time: f64,
    pub background_color: String,
    pub shapes: Vec<Shape>,
}

/// Cooperative cancellation flag, checked between frames.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Resolves every frame of the session and writes it to `sink`.
///
/// `on_progress` receives `(i + 1) / count` after each frame. The cancel
/// token is polled before each frame; a cancelled run returns
/// [`MotionError::Cancelled`] and leaves the sink unfinished.
///
/// Returns the number of frames written.
#[instrument(level = "info", skip_all, fields(fps = settings.fps, duration = settings.duration))]
pub fn export_frames<S: FrameSink + ?Sized>(
    session: &Session,
    settings: &ExportSettings,
    sink: &mut S,
    mut on_progress: impl FnMut(f64),
    cancel: &CancelToken,
) -> Result<usize> {
    settings.validate()?;
    let total = frame_count(settings.duration, settings.fps);
    info!(frames = total, "starting frame export");

    for index in 0..total {
        if cancel.is_cancelled() {
            warn!(frame = index, "export cancelled");
            return Err(MotionError::Cancelled { frame: index });
        }

        let time = frame_time_ms(index, settings.fps);
        let frame = Frame {
            index,
            time,
            background_color: session.project().background_color.clone(),
            shapes: session.frame_at(time),
        };
        sink.write_frame(&frame)?;
        on_progress((index + 1) as f64 / total as f64);
    }

    sink.finish()?;
    info!(frames = total, "frame export complete");
    Ok(total)
}
