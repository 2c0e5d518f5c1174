//! # Animation Engine
//!
//! Owns one [`KeyframeTrack`] per animated shape and answers "what does this
//! shape look like at time T".
//!
//! ## Responsibilities
//! - **Index**: Derived per-shape track map, rebuilt wholesale from the
//!   project's flat keyframe list (the source of truth).
//! - **Evaluation**: Neighbour search, easing, per-property interpolation.
//!
//! Evaluation takes `&self` and never mutates, so hosts sharing an engine
//! across threads wrap it in a single-writer lock ([`SharedEngine`]).

use crate::keyframe::Keyframe;
use crate::patch::PropertyPatch;
use crate::shape::ShapeId;
use crate::track::KeyframeTrack;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};
use tracing::{debug, instrument};

/// An engine shared between a writer (authoring) and readers (render, export).
pub type SharedEngine = Arc<RwLock<AnimationEngine>>;

/// Per-shape keyframe tracks and the interpolation query.
#[derive(Clone, Debug, Default)]
pub struct AnimationEngine {
    tracks: BTreeMap<ShapeId, KeyframeTrack>,
}

impl AnimationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an engine from a flat keyframe list.
    pub fn from_keyframes<'a>(keyframes: impl IntoIterator<Item = &'a Keyframe>) -> Self {
        let mut engine = Self::new();
        for keyframe in keyframes {
            engine.add_keyframe(keyframe.clone());
        }
        engine
    }

    /// Wraps the engine for sharing across threads.
    pub fn into_shared(self) -> SharedEngine {
        Arc::new(RwLock::new(self))
    }

    /// Inserts a keyframe into its shape's track, creating the track if needed.
    ///
    /// A keyframe already present at the same time on that track is replaced.
    pub fn add_keyframe(&mut self, keyframe: Keyframe) {
        self.tracks
            .entry(keyframe.shape_id.clone())
            .or_insert_with(|| KeyframeTrack::new(keyframe.shape_id.clone()))
            .insert(keyframe);
    }

    /// Removes every keyframe carrying `keyframe_id`, on any track.
    ///
    /// Tracks left empty are dropped. Returns the removed keyframes.
    pub fn remove_keyframe(&mut self, keyframe_id: &str) -> Vec<Keyframe> {
        let mut removed = Vec::new();
        for track in self.tracks.values_mut() {
            while let Some(keyframe) = track.remove(keyframe_id) {
                removed.push(keyframe);
            }
        }

        self.tracks.retain(|_, track| {
            if track.is_empty() {
                debug!(shape_id = track.shape_id(), "dropping empty track");
            }
            !track.is_empty()
        });
        removed
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    /// Replaces every track with ones derived from `keyframes`.
    ///
    /// List order only matters for keyframes sharing a (shape, time) slot:
    /// the later one wins. An empty list clears the engine.
    #[instrument(level = "debug", skip_all, fields(count = keyframes.len()))]
    pub fn rebuild(&mut self, keyframes: &[Keyframe]) {
        *self = Self::from_keyframes(keyframes);
        debug!(tracks = self.tracks.len(), "engine rebuilt");
    }

    pub fn track(&self, shape_id: &str) -> Option<&KeyframeTrack> {
        self.tracks.get(shape_id)
    }

    /// All tracks, ordered by shape id.
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_animated(&self, shape_id: &str) -> bool {
        self.tracks.contains_key(shape_id)
    }

    /// Interpolated property patch of `shape_id` at `time` (milliseconds).
    ///
    /// Returns `None` for unanimated shapes; the caller then renders the
    /// shape's static properties. Before the first keyframe the first pose is
    /// held, after the last keyframe the last pose is held.
    pub fn evaluate(&self, shape_id: &str, time: f64) -> Option<PropertyPatch> {
        let track = self.tracks.get(shape_id)?;
        let neighbors = track.neighbors(time);

        match (neighbors.prev, neighbors.next) {
            (None, Some(next)) => Some(next.properties.clone()),
            (Some(prev), None) => Some(prev.properties.clone()),
            (Some(prev), Some(next)) => {
                let span = next.time - prev.time;
                let progress = if span == 0.0 {
                    0.0
                } else {
                    (time - prev.time) / span
                };
                let eased = next.easing.apply(progress);
                Some(PropertyPatch::interpolate(
                    &prev.properties,
                    &next.properties,
                    eased,
                ))
            }
            (None, None) => None,
        }
    }
}
