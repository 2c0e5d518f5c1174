//! # Keyframe Track
//!
//! All keyframes of one shape, kept sorted ascending by time.
//!
//! A track never holds two keyframes at the same time: inserting at an
//! occupied time replaces the occupant.

use crate::keyframe::Keyframe;
use crate::shape::ShapeId;

/// The time-ordered keyframes belonging to one shape.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyframeTrack {
    shape_id: ShapeId,
    keyframes: Vec<Keyframe>,
}

/// The keyframes bracketing a query time.
#[derive(Clone, Copy, Debug)]
pub struct Neighbors<'a> {
    /// Latest keyframe with `time <= t`.
    pub prev: Option<&'a Keyframe>,
    /// Earliest keyframe with `time > t`.
    pub next: Option<&'a Keyframe>,
}

impl KeyframeTrack {
    pub fn new(shape_id: impl Into<ShapeId>) -> Self {
        Self {
            shape_id: shape_id.into(),
            keyframes: Vec::new(),
        }
    }

    pub fn shape_id(&self) -> &str {
        &self.shape_id
    }

    /// Sorted keyframes.
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    /// Inserts `keyframe`, replacing any keyframe at the same time.
    ///
    /// Returns the replaced keyframe, if any.
    pub fn insert(&mut self, keyframe: Keyframe) -> Option<Keyframe> {
        let replaced = self
            .keyframes
            .iter()
            .position(|k| k.time == keyframe.time)
            .map(|i| self.keyframes.remove(i));

        let idx = self.keyframes.partition_point(|k| k.time <= keyframe.time);
        self.keyframes.insert(idx, keyframe);
        replaced
    }

    /// Removes the keyframe with the given id.
    pub fn remove(&mut self, keyframe_id: &str) -> Option<Keyframe> {
        let idx = self.keyframes.iter().position(|k| k.id == keyframe_id)?;
        Some(self.keyframes.remove(idx))
    }

    /// Finds the keyframes surrounding `time`.
    pub fn neighbors(&self, time: f64) -> Neighbors<'_> {
        let idx = self.keyframes.partition_point(|k| k.time <= time);
        Neighbors {
            prev: idx.checked_sub(1).map(|i| &self.keyframes[i]),
            next: self.keyframes.get(idx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;
    use crate::patch::PropertyPatch;

    fn kf(id: &str, time: f64, x: f64) -> Keyframe {
        Keyframe::new(id, "s", time, PropertyPatch::new().with_x(x), Easing::Linear)
    }

    #[test]
    fn insert_keeps_order() {
        let mut track = KeyframeTrack::new("s");
        track.insert(kf("c", 300.0, 3.0));
        track.insert(kf("a", 100.0, 1.0));
        track.insert(kf("b", 200.0, 2.0));
        let times: Vec<f64> = track.keyframes().iter().map(|k| k.time).collect();
        assert_eq!(times, vec![100.0, 200.0, 300.0]);
    }

    #[test]
    fn insert_at_same_time_replaces() {
        let mut track = KeyframeTrack::new("s");
        track.insert(kf("a", 100.0, 1.0));
        track.insert(kf("b", 200.0, 2.0));
        let replaced = track.insert(kf("a2", 100.0, 9.0));
        assert_eq!(replaced.map(|k| k.id), Some("a".to_string()));
        assert_eq!(track.len(), 2);
        assert_eq!(track.keyframes()[0].id, "a2");
        assert_eq!(track.keyframes()[0].properties.x, Some(9.0));
    }

    #[test]
    fn remove_by_id() {
        let mut track = KeyframeTrack::new("s");
        track.insert(kf("a", 100.0, 1.0));
        assert!(track.remove("missing").is_none());
        assert!(track.remove("a").is_some());
        assert!(track.is_empty());
    }

    #[test]
    fn neighbors_bracket_query_time() {
        let mut track = KeyframeTrack::new("s");
        track.insert(kf("a", 0.0, 0.0));
        track.insert(kf("b", 1000.0, 1.0));

        let before = track.neighbors(-5.0);
        assert!(before.prev.is_none());
        assert_eq!(before.next.map(|k| k.id.as_str()), Some("a"));

        let exact = track.neighbors(0.0);
        assert_eq!(exact.prev.map(|k| k.id.as_str()), Some("a"));
        assert_eq!(exact.next.map(|k| k.id.as_str()), Some("b"));

        let after = track.neighbors(1000.0);
        assert_eq!(after.prev.map(|k| k.id.as_str()), Some("b"));
        assert!(after.next.is_none());
    }
}
