use crate::easing::Easing;
use crate::patch::PropertyPatch;
use crate::shape::ShapeId;
use serde::{Deserialize, Serialize};

/// Identifier of a keyframe within a project.
pub type KeyframeId = String;

/// A timestamped, partial property assignment for one shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keyframe {
    pub id: KeyframeId,
    /// Offset on the timeline in milliseconds. Not required to be frame aligned.
    pub time: f64,
    pub shape_id: ShapeId,
    /// Only the properties this keyframe constrains.
    #[serde(default)]
    pub properties: PropertyPatch,
    /// Governs the approach into this keyframe from the previous one.
    #[serde(default)]
    pub easing: Easing,
}

impl Keyframe {
    pub fn new(
        id: impl Into<KeyframeId>,
        shape_id: impl Into<ShapeId>,
        time: f64,
        properties: PropertyPatch,
        easing: Easing,
    ) -> Self {
        Self {
            id: id.into(),
            time,
            shape_id: shape_id.into(),
            properties,
            easing,
        }
    }

    /// Creates a keyframe with a freshly generated random id.
    pub fn generated(
        shape_id: impl Into<ShapeId>,
        time: f64,
        properties: PropertyPatch,
        easing: Easing,
    ) -> Self {
        Self::new(generate_id(), shape_id, time, properties, easing)
    }
}

/// Produces a random keyframe id (`kf-` followed by 16 hex digits).
pub fn generate_id() -> KeyframeId {
    format!("kf-{:016x}", rand::random::<u64>())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_editor_keyframe_json() {
        let json = r#"{
            "id": "k1",
            "time": 250.5,
            "shapeId": "s1",
            "properties": { "x": 10, "scaleY": 2 },
            "easing": "ease-out-cubic"
        }"#;
        let kf: Keyframe = serde_json::from_str(json).unwrap();
        assert_eq!(kf.shape_id, "s1");
        assert_eq!(kf.time, 250.5);
        assert_eq!(kf.properties.scale_y, Some(2.0));
        assert_eq!(kf.easing, Easing::EaseOutCubic);
    }

    #[test]
    fn unknown_easing_does_not_reject_keyframe() {
        let json = r#"{"id":"k","time":0,"shapeId":"s","properties":{},"easing":"zigzag"}"#;
        let kf: Keyframe = serde_json::from_str(json).unwrap();
        assert_eq!(kf.easing, Easing::Linear);
    }

    #[test]
    fn generated_ids_are_distinct() {
        let a = Keyframe::generated("s", 0.0, PropertyPatch::new(), Easing::Linear);
        let b = Keyframe::generated("s", 0.0, PropertyPatch::new(), Easing::Linear);
        assert_ne!(a.id, b.id);
        assert!(a.id.starts_with("kf-"));
    }
}
