//! # Project Module
//!
//! The durable source of truth: shapes plus the flat keyframe list.
//!
//! ## Responsibilities
//! - **Shapes**: Add, update (patch merge), delete with keyframe cascade.
//! - **Keyframes**: Flat list with at most one keyframe per (shape, time).
//! - **Persistence format**: camelCase JSON compatible with saved editor projects.
//!
//! The project never touches the animation engine; see [`crate::session::Session`]
//! for the pairing that keeps the engine rebuilt.

use crate::errors::{MotionError, Result};
use crate::keyframe::Keyframe;
use crate::patch::PropertyPatch;
use crate::shape::{Shape, ShapeId};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, instrument};

/// A motion-graphics project.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Timeline length in milliseconds.
    #[serde(default = "default_duration")]
    pub duration: f64,
    #[serde(default = "default_background")]
    pub background_color: String,
    #[serde(default)]
    pub shapes: Vec<Shape>,
    #[serde(default)]
    pub keyframes: Vec<Keyframe>,
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

fn default_background() -> String {
    "#000000".to_string()
}

impl Project {
    /// Creates an empty 1920x1080, 30 fps, 5 second project.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: format!("project-{:016x}", rand::random::<u64>()),
            name: name.into(),
            width: default_width(),
            height: default_height(),
            fps: default_fps(),
            duration: default_duration(),
            background_color: default_background(),
            shapes: Vec::new(),
            keyframes: Vec::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[instrument(level = "debug", skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    #[instrument(level = "debug", skip_all, fields(path = %path.as_ref().display()))]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        Ok(())
    }

    pub fn shape(&self, id: &str) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    pub fn shape_mut(&mut self, id: &str) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id == id)
    }

    /// Adds a shape, returning its id.
    pub fn add_shape(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id.clone();
        self.shapes.push(shape);
        id
    }

    /// Merges `updates` onto the base record of a shape.
    pub fn update_shape(&mut self, id: &str, updates: &PropertyPatch) -> Result<()> {
        let shape = self
            .shape_mut(id)
            .ok_or_else(|| MotionError::ShapeNotFound(id.to_string()))?;
        shape.apply(updates);
        Ok(())
    }

    /// Removes a shape and every keyframe that belongs to it.
    pub fn delete_shape(&mut self, id: &str) -> Result<Shape> {
        let idx = self
            .shapes
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| MotionError::ShapeNotFound(id.to_string()))?;
        let before = self.keyframes.len();
        self.keyframes.retain(|k| k.shape_id != id);
        debug!(
            shape_id = id,
            removed_keyframes = before - self.keyframes.len(),
            "shape deleted"
        );
        Ok(self.shapes.remove(idx))
    }

    /// Appends a keyframe, replacing one already at the same (shape, time).
    pub fn add_keyframe(&mut self, keyframe: Keyframe) -> Result<()> {
        if self.shape(&keyframe.shape_id).is_none() {
            return Err(MotionError::ShapeNotFound(keyframe.shape_id));
        }
        self.keyframes
            .retain(|k| !(k.shape_id == keyframe.shape_id && k.time == keyframe.time));
        self.keyframes.push(keyframe);
        Ok(())
    }

    /// Removes every keyframe with the given id. Ids are not guaranteed
    /// unique in loaded documents.
    pub fn remove_keyframe(&mut self, id: &str) -> Result<Vec<Keyframe>> {
        let (removed, kept) = std::mem::take(&mut self.keyframes)
            .into_iter()
            .partition::<Vec<_>, _>(|k| k.id == id);
        self.keyframes = kept;
        if removed.is_empty() {
            return Err(MotionError::KeyframeNotFound(id.to_string()));
        }
        Ok(removed)
    }

    /// Keyframes of one shape, in list order.
    pub fn keyframes_for<'a>(&'a self, shape_id: &'a str) -> impl Iterator<Item = &'a Keyframe> {
        self.keyframes.iter().filter(move |k| k.shape_id == shape_id)
    }
}
