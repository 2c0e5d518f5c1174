//! # Session Module
//!
//! An editing session: one [`Project`], the [`AnimationEngine`] derived from
//! it, and the playhead.
//!
//! ## Responsibilities
//! - **Authoring**: Every keyframe mutation goes to the project list first and
//!   then rebuilds the engine from that list.
//! - **Resolution**: Merges evaluated patches onto base shapes for rendering.
//!
//! Sessions replace a process-wide engine; several can coexist.

use crate::easing::Easing;
use crate::engine::AnimationEngine;
use crate::errors::{MotionError, Result};
use crate::keyframe::{generate_id, Keyframe, KeyframeId};
use crate::patch::PropertyPatch;
use crate::playback::Playhead;
use crate::presets::CannedAnimation;
use crate::project::Project;
use crate::shape::{Shape, ShapeId};
use tracing::{debug, info, instrument};

/// Easing assigned to keyframes authored without an explicit curve.
pub const DEFAULT_KEYFRAME_EASING: Easing = Easing::EaseInOut;

/// Project, derived engine and playhead for one open document.
#[derive(Clone, Debug)]
pub struct Session {
    project: Project,
    engine: AnimationEngine,
    pub playhead: Playhead,
}

impl Session {
    pub fn new(project: Project) -> Self {
        let engine = AnimationEngine::from_keyframes(&project.keyframes);
        Self {
            project,
            engine,
            playhead: Playhead::new(),
        }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn engine(&self) -> &AnimationEngine {
        &self.engine
    }

    pub fn into_project(self) -> Project {
        self.project
    }

    /// Replaces the open project and resets the playhead.
    #[instrument(level = "info", skip_all, fields(project = %project.name))]
    pub fn load_project(&mut self, project: Project) {
        self.project = project;
        self.playhead = Playhead::new();
        self.rebuild();
        info!(
            shapes = self.project.shapes.len(),
            keyframes = self.project.keyframes.len(),
            "project loaded"
        );
    }

    fn rebuild(&mut self) {
        self.engine.rebuild(&self.project.keyframes);
    }

    /// Sets the timeline length, pulling the playhead back inside it.
    pub fn set_duration(&mut self, duration_ms: f64) {
        self.project.duration = duration_ms.max(0.0);
        let current = self.playhead.current_time;
        self.playhead.seek(current, self.project.duration);
    }

    pub fn set_fps(&mut self, fps: u32) {
        self.project.fps = fps.max(1);
    }

    pub fn set_background(&mut self, color: impl Into<String>) {
        self.project.background_color = color.into();
    }

    pub fn add_shape(&mut self, shape: Shape) -> ShapeId {
        self.project.add_shape(shape)
    }

    pub fn update_shape(&mut self, id: &str, updates: &PropertyPatch) -> Result<()> {
        self.project.update_shape(id, updates)
    }

    /// Deletes a shape and its keyframes.
    pub fn delete_shape(&mut self, id: &str) -> Result<Shape> {
        let shape = self.project.delete_shape(id)?;
        self.rebuild();
        Ok(shape)
    }

    /// Adds a keyframe with a generated id. Returns the id.
    pub fn add_keyframe(
        &mut self,
        shape_id: &str,
        time: f64,
        properties: PropertyPatch,
        easing: Easing,
    ) -> Result<KeyframeId> {
        let keyframe = Keyframe::generated(shape_id, time, properties, easing);
        let id = keyframe.id.clone();
        self.insert_keyframe(keyframe)?;
        Ok(id)
    }

    /// Adds a fully formed keyframe, keeping its id and easing.
    pub fn insert_keyframe(&mut self, keyframe: Keyframe) -> Result<()> {
        debug!(shape_id = %keyframe.shape_id, time = keyframe.time, "add keyframe");
        self.project.add_keyframe(keyframe)?;
        self.rebuild();
        Ok(())
    }

    /// Keys the current transform of a shape's base record at `time`.
    pub fn capture_keyframe(&mut self, shape_id: &str, time: f64) -> Result<KeyframeId> {
        let patch = self
            .project
            .shape(shape_id)
            .ok_or_else(|| MotionError::ShapeNotFound(shape_id.to_string()))?
            .capture_transform();
        self.add_keyframe(shape_id, time, patch, DEFAULT_KEYFRAME_EASING)
    }

    /// Expands a canned animation and inserts each keyframe in order, under
    /// fresh ids and with the preset's easing.
    ///
    /// A bounce without an explicit origin is offset from the shape's base y.
    pub fn apply_animation(
        &mut self,
        shape_id: &str,
        animation: &CannedAnimation,
        start_time: f64,
        duration: f64,
    ) -> Result<Vec<KeyframeId>> {
        let base_y = self
            .project
            .shape(shape_id)
            .ok_or_else(|| MotionError::ShapeNotFound(shape_id.to_string()))?
            .y;
        let animation = match *animation {
            CannedAnimation::Bounce {
                amplitude,
                origin_y: None,
            } => CannedAnimation::Bounce {
                amplitude,
                origin_y: Some(base_y),
            },
            ref other => other.clone(),
        };

        // Preset ids repeat across applications; project ids must not.
        let mut ids = Vec::new();
        for mut keyframe in animation.generate(shape_id, start_time, duration) {
            keyframe.id = generate_id();
            ids.push(keyframe.id.clone());
            self.insert_keyframe(keyframe)?;
        }
        Ok(ids)
    }

    /// Removes every keyframe with this id.
    pub fn remove_keyframe(&mut self, id: &str) -> Result<Vec<Keyframe>> {
        let removed = self.project.remove_keyframe(id)?;
        self.rebuild();
        Ok(removed)
    }

    /// Interpolated patch of a shape at `time`, `None` if unanimated.
    pub fn evaluate(&self, shape_id: &str, time: f64) -> Option<PropertyPatch> {
        self.engine.evaluate(shape_id, time)
    }

    /// The shape as it renders at `time`.
    pub fn resolve_shape(&self, shape_id: &str, time: f64) -> Option<Shape> {
        let base = self.project.shape(shape_id)?;
        Some(self.resolve(base, time))
    }

    fn resolve(&self, base: &Shape, time: f64) -> Shape {
        match self.engine.evaluate(&base.id, time) {
            Some(patch) => base.with_patch(&patch),
            None => base.clone(),
        }
    }

    /// Every visible shape at `time`, resolved and ordered back to front.
    pub fn frame_at(&self, time: f64) -> Vec<Shape> {
        let mut shapes: Vec<Shape> = self
            .project
            .shapes
            .iter()
            .map(|s| self.resolve(s, time))
            .filter(|s| s.visible)
            .collect();
        shapes.sort_by_key(|s| s.z_index);
        shapes
    }

    /// Shapes at the playhead.
    pub fn current_frame(&self) -> Vec<Shape> {
        self.frame_at(self.playhead.current_time)
    }

    /// Advances the playhead against the project duration.
    pub fn tick(&mut self, delta_ms: f64) -> f64 {
        self.playhead.tick(delta_ms, self.project.duration)
    }

    pub fn seek(&mut self, time: f64) {
        self.playhead.seek(time, self.project.duration);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Project::new("Untitled"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        let mut session = Session::default();
        session.add_shape(Shape::circle("c", 100.0, 200.0));
        session
    }

    #[test]
    fn keyframe_edits_rebuild_engine() {
        let mut session = session();
        let id = session
            .add_keyframe("c", 0.0, PropertyPatch::new().with_x(0.0), Easing::Linear)
            .unwrap();
        assert!(session.engine().is_animated("c"));
        session.remove_keyframe(&id).unwrap();
        assert!(!session.engine().is_animated("c"));
        assert!(session.remove_keyframe(&id).is_err());
    }

    #[test]
    fn capture_uses_default_easing_and_transform() {
        let mut session = session();
        let id = session.capture_keyframe("c", 250.0).unwrap();
        let kf = session
            .project()
            .keyframes
            .iter()
            .find(|k| k.id == id)
            .unwrap();
        assert_eq!(kf.easing, Easing::EaseInOut);
        assert_eq!(kf.properties.x, Some(100.0));
        assert_eq!(kf.properties.fill, None);
    }

    #[test]
    fn apply_animation_keeps_generator_easing() {
        let mut session = session();
        let ids = session
            .apply_animation("c", &CannedAnimation::rotate(), 0.0, 1000.0)
            .unwrap();
        assert_eq!(ids.len(), 2);
        assert!(session
            .project()
            .keyframes
            .iter()
            .all(|k| k.easing == Easing::Linear));
        let rotation = session.evaluate("c", 500.0).unwrap().rotation.unwrap();
        assert!((rotation - 180.0).abs() < 1e-9);
    }

    #[test]
    fn bounce_defaults_to_shape_origin() {
        let mut session = session();
        session
            .apply_animation("c", &CannedAnimation::bounce(), 0.0, 800.0)
            .unwrap();
        let start = session.resolve_shape("c", 0.0).unwrap();
        assert!((start.y - 200.0).abs() < 1e-9);
    }

    #[test]
    fn bounce_with_explicit_zero_origin_is_absolute() {
        let mut session = session();
        let animation: CannedAnimation =
            serde_json::from_str(r#"{"kind":"bounce","amplitude":50,"origin_y":0}"#).unwrap();
        session.apply_animation("c", &animation, 0.0, 800.0).unwrap();
        let first = session.evaluate("c", 0.0).unwrap();
        assert!(first.y.unwrap().abs() < 1e-9);
        let quarter = session.evaluate("c", 200.0).unwrap();
        assert!((quarter.y.unwrap() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn frame_at_filters_hidden_and_orders_by_z() {
        let mut session = Session::default();
        session.add_shape(Shape::circle("top", 0.0, 0.0).with_z_index(10));
        session.add_shape(Shape::circle("bottom", 0.0, 0.0).with_z_index(1));
        session.add_shape(Shape::circle("hidden", 0.0, 0.0).with_z_index(5));
        session
            .add_keyframe(
                "hidden",
                0.0,
                PropertyPatch::new().with_visible(false),
                Easing::Linear,
            )
            .unwrap();

        let ids: Vec<String> = session.frame_at(100.0).into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["bottom".to_string(), "top".to_string()]);
    }

    #[test]
    fn remove_keyframe_stops_every_duplicate() {
        let mut session = Session::default();
        session.add_shape(Shape::circle("a", 0.0, 0.0));
        session.add_shape(Shape::circle("b", 0.0, 0.0));
        for shape in ["a", "b"] {
            let patch = PropertyPatch::new().with_x(5.0);
            let keyframe = Keyframe::new("k", shape, 0.0, patch, Easing::Linear);
            session.insert_keyframe(keyframe).unwrap();
        }

        let removed = session.remove_keyframe("k").unwrap();
        assert_eq!(removed.len(), 2);
        assert!(session.project().keyframes.is_empty());
        assert!(!session.engine().is_animated("a"));
        assert!(!session.engine().is_animated("b"));
    }

    #[test]
    fn delete_shape_clears_its_track() {
        let mut session = session();
        session.capture_keyframe("c", 0.0).unwrap();
        session.delete_shape("c").unwrap();
        assert_eq!(session.engine().track_count(), 0);
        assert!(session.project().keyframes.is_empty());
    }
}
