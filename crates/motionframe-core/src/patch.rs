//! # Property Patch Module
//!
//! Sparse property assignments carried by keyframes and returned by evaluation.
//!
//! ## Responsibilities
//! - **PropertyPatch**: Only the properties a keyframe constrains are `Some`.
//! - **Interpolation policy**: Numeric properties blend linearly, colors,
//!   strings and booleans step at the midpoint.
//! - **Named access**: Get/set by property name for scripting and tooling.

use crate::shape::Vertex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Eased progress at which discrete properties switch from start to end value.
pub const STEP_THRESHOLD: f64 = 0.5;

/// Per-type interpolation between two optional keyframe values.
///
/// `start` belongs to the earlier keyframe, `end` to the later one, `t` is the
/// eased progress. When only one side is defined that side wins.
pub trait Interpolate: Sized + Clone {
    fn interpolate(start: Option<&Self>, end: Option<&Self>, t: f64) -> Option<Self>;
}

impl Interpolate for f64 {
    fn interpolate(start: Option<&Self>, end: Option<&Self>, t: f64) -> Option<Self> {
        match (start, end) {
            (Some(a), Some(b)) => Some(a + (b - a) * t),
            (_, Some(b)) => Some(*b),
            (Some(a), None) => Some(*a),
            (None, None) => None,
        }
    }
}

// Colors and text: hard switch at the midpoint. An empty start string counts
// as unset below the threshold.
impl Interpolate for String {
    fn interpolate(start: Option<&Self>, end: Option<&Self>, t: f64) -> Option<Self> {
        match end {
            Some(b) if t < STEP_THRESHOLD => {
                Some(start.filter(|a| !a.is_empty()).unwrap_or(b).clone())
            }
            Some(b) => Some(b.clone()),
            None => start.cloned(),
        }
    }
}

impl Interpolate for bool {
    fn interpolate(start: Option<&Self>, end: Option<&Self>, t: f64) -> Option<Self> {
        match end {
            Some(b) if t < STEP_THRESHOLD => Some(*start.unwrap_or(b)),
            Some(b) => Some(*b),
            None => start.copied(),
        }
    }
}

/// Which interpolation rule applies to a property.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PropertyCategory {
    Numeric,
    Color,
    Text,
    Boolean,
    /// Carried verbatim when holding the first/last pose, never interpolated.
    Held,
}

/// A dynamically typed property value, used for named access.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    Number(f64),
    Text(String),
    Bool(bool),
    Vertices(Vec<Vertex>),
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Number(n) => write!(f, "{}", n),
            PropertyValue::Text(s) => write!(f, "{}", s),
            PropertyValue::Bool(b) => write!(f, "{}", b),
            PropertyValue::Vertices(v) => write!(f, "[{} vertices]", v.len()),
        }
    }
}

/// Names of every animatable property, camelCase as stored in project files.
pub const PROPERTY_NAMES: [&str; 18] = [
    "x",
    "y",
    "width",
    "height",
    "radius",
    "rotation",
    "scaleX",
    "scaleY",
    "strokeWidth",
    "opacity",
    "fontSize",
    "fill",
    "stroke",
    "text",
    "fontFamily",
    "visible",
    "zIndex",
    "vertices",
];

/// A sparse mapping of shape properties.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertices: Option<Vec<Vertex>>,
}

impl PropertyPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Patch with only a position.
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    /// Patch with only a rotation in degrees.
    pub fn rotation(degrees: f64) -> Self {
        Self {
            rotation: Some(degrees),
            ..Default::default()
        }
    }

    /// Patch with a uniform scale.
    pub fn scale(value: f64) -> Self {
        Self {
            scale_x: Some(value),
            scale_y: Some(value),
            ..Default::default()
        }
    }

    /// Patch with only an opacity.
    pub fn opacity(value: f64) -> Self {
        Self {
            opacity: Some(value),
            ..Default::default()
        }
    }

    /// Builder: set x.
    pub fn with_x(mut self, x: f64) -> Self {
        self.x = Some(x);
        self
    }

    /// Builder: set y.
    pub fn with_y(mut self, y: f64) -> Self {
        self.y = Some(y);
        self
    }

    /// Builder: set fill color.
    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    /// Builder: set visibility.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }

    /// True if no property is constrained.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Interpolates between the patches of two neighbouring keyframes.
    ///
    /// `t` is the eased progress. Only numeric, color, text and boolean
    /// properties take part; `z_index` and `vertices` are not interpolated.
    pub fn interpolate(start: &PropertyPatch, end: &PropertyPatch, t: f64) -> PropertyPatch {
        fn lerp<T: Interpolate>(a: &Option<T>, b: &Option<T>, t: f64) -> Option<T> {
            T::interpolate(a.as_ref(), b.as_ref(), t)
        }

        PropertyPatch {
            x: lerp(&start.x, &end.x, t),
            y: lerp(&start.y, &end.y, t),
            width: lerp(&start.width, &end.width, t),
            height: lerp(&start.height, &end.height, t),
            radius: lerp(&start.radius, &end.radius, t),
            rotation: lerp(&start.rotation, &end.rotation, t),
            scale_x: lerp(&start.scale_x, &end.scale_x, t),
            scale_y: lerp(&start.scale_y, &end.scale_y, t),
            stroke_width: lerp(&start.stroke_width, &end.stroke_width, t),
            opacity: lerp(&start.opacity, &end.opacity, t),
            font_size: lerp(&start.font_size, &end.font_size, t),
            fill: lerp(&start.fill, &end.fill, t),
            stroke: lerp(&start.stroke, &end.stroke, t),
            text: lerp(&start.text, &end.text, t),
            font_family: lerp(&start.font_family, &end.font_family, t),
            visible: lerp(&start.visible, &end.visible, t),
            z_index: None,
            vertices: None,
        }
    }

    /// Interpolation rule for a property name, or `None` if unknown.
    pub fn category(name: &str) -> Option<PropertyCategory> {
        let category = match canonical_name(name)? {
            "x" | "y" | "width" | "height" | "radius" | "rotation" | "scaleX" | "scaleY"
            | "strokeWidth" | "opacity" | "fontSize" => PropertyCategory::Numeric,
            "fill" | "stroke" => PropertyCategory::Color,
            "text" | "fontFamily" => PropertyCategory::Text,
            "visible" => PropertyCategory::Boolean,
            _ => PropertyCategory::Held,
        };
        Some(category)
    }

    /// Reads a property by name (camelCase or snake_case).
    pub fn get(&self, name: &str) -> Option<PropertyValue> {
        use PropertyValue::*;
        match canonical_name(name)? {
            "x" => self.x.map(Number),
            "y" => self.y.map(Number),
            "width" => self.width.map(Number),
            "height" => self.height.map(Number),
            "radius" => self.radius.map(Number),
            "rotation" => self.rotation.map(Number),
            "scaleX" => self.scale_x.map(Number),
            "scaleY" => self.scale_y.map(Number),
            "strokeWidth" => self.stroke_width.map(Number),
            "opacity" => self.opacity.map(Number),
            "fontSize" => self.font_size.map(Number),
            "fill" => self.fill.clone().map(Text),
            "stroke" => self.stroke.clone().map(Text),
            "text" => self.text.clone().map(Text),
            "fontFamily" => self.font_family.clone().map(Text),
            "visible" => self.visible.map(Bool),
            "zIndex" => self.z_index.map(|z| Number(z as f64)),
            "vertices" => self.vertices.clone().map(Vertices),
            _ => None,
        }
    }

    /// Writes a property by name. Returns `false` if the name is unknown or
    /// the value has the wrong type for it.
    pub fn set(&mut self, name: &str, value: PropertyValue) -> bool {
        use PropertyValue::*;
        let Some(name) = canonical_name(name) else {
            return false;
        };
        match (name, value) {
            ("x", Number(v)) => self.x = Some(v),
            ("y", Number(v)) => self.y = Some(v),
            ("width", Number(v)) => self.width = Some(v),
            ("height", Number(v)) => self.height = Some(v),
            ("radius", Number(v)) => self.radius = Some(v),
            ("rotation", Number(v)) => self.rotation = Some(v),
            ("scaleX", Number(v)) => self.scale_x = Some(v),
            ("scaleY", Number(v)) => self.scale_y = Some(v),
            ("strokeWidth", Number(v)) => self.stroke_width = Some(v),
            ("opacity", Number(v)) => self.opacity = Some(v),
            ("fontSize", Number(v)) => self.font_size = Some(v),
            ("fill", Text(v)) => self.fill = Some(v),
            ("stroke", Text(v)) => self.stroke = Some(v),
            ("text", Text(v)) => self.text = Some(v),
            ("fontFamily", Text(v)) => self.font_family = Some(v),
            ("visible", Bool(v)) => self.visible = Some(v),
            ("zIndex", Number(v)) => self.z_index = Some(v as i64),
            ("vertices", Vertices(v)) => self.vertices = Some(v),
            _ => return false,
        }
        true
    }

    /// Iterates over the constrained properties as `(name, value)` pairs.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, PropertyValue)> + '_ {
        PROPERTY_NAMES
            .iter()
            .filter_map(move |name| self.get(name).map(|value| (*name, value)))
    }
}

/// Maps camelCase or snake_case property names onto the canonical camelCase name.
fn canonical_name(name: &str) -> Option<&'static str> {
    let name = match name {
        "scale_x" => "scaleX",
        "scale_y" => "scaleY",
        "stroke_width" => "strokeWidth",
        "font_size" => "fontSize",
        "font_family" => "fontFamily",
        "z_index" => "zIndex",
        other => other,
    };
    PROPERTY_NAMES.iter().copied().find(|n| *n == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_blend_and_one_sided_values() {
        assert_eq!(f64::interpolate(Some(&0.0), Some(&100.0), 0.25), Some(25.0));
        assert_eq!(f64::interpolate(None, Some(&7.0), 0.0), Some(7.0));
        assert_eq!(f64::interpolate(Some(&3.0), None, 0.9), Some(3.0));
        assert_eq!(f64::interpolate(None, None, 0.5), None);
    }

    #[test]
    fn strings_step_at_midpoint() {
        let a = "#000000".to_string();
        let b = "#ffffff".to_string();
        assert_eq!(String::interpolate(Some(&a), Some(&b), 0.49), Some(a.clone()));
        assert_eq!(String::interpolate(Some(&a), Some(&b), 0.5), Some(b.clone()));
        assert_eq!(String::interpolate(None, Some(&b), 0.0), Some(b.clone()));
        assert_eq!(String::interpolate(Some(&a), None, 0.99), Some(a));
    }

    #[test]
    fn empty_start_string_yields_end_below_threshold() {
        let empty = String::new();
        let b = "#ffffff".to_string();
        assert_eq!(String::interpolate(Some(&empty), Some(&b), 0.1), Some(b));
        assert_eq!(String::interpolate(Some(&empty), None, 0.1), Some(empty));
    }

    #[test]
    fn booleans_step_at_midpoint() {
        assert_eq!(bool::interpolate(Some(&false), Some(&true), 0.3), Some(false));
        assert_eq!(bool::interpolate(Some(&false), Some(&true), 0.5), Some(true));
        assert_eq!(bool::interpolate(None, Some(&true), 0.0), Some(true));
    }

    #[test]
    fn held_properties_are_dropped_between_keyframes() {
        let start = PropertyPatch {
            z_index: Some(3),
            x: Some(0.0),
            ..Default::default()
        };
        let end = PropertyPatch {
            z_index: Some(4),
            x: Some(10.0),
            ..Default::default()
        };
        let mid = PropertyPatch::interpolate(&start, &end, 0.5);
        assert_eq!(mid.x, Some(5.0));
        assert_eq!(mid.z_index, None);
    }

    #[test]
    fn named_access_accepts_both_spellings() {
        let mut patch = PropertyPatch::new();
        assert!(patch.set("scale_x", PropertyValue::Number(2.0)));
        assert!(patch.set("fontFamily", PropertyValue::Text("Mono".into())));
        assert!(!patch.set("opacity", PropertyValue::Text("half".into())));
        assert!(!patch.set("bogus", PropertyValue::Number(1.0)));
        assert_eq!(patch.get("scaleX"), Some(PropertyValue::Number(2.0)));
        assert_eq!(patch.entries().count(), 2);
        assert_eq!(
            PropertyPatch::category("stroke"),
            Some(PropertyCategory::Color)
        );
    }

    #[test]
    fn serializes_sparse_camel_case() {
        let json = serde_json::to_string(&PropertyPatch::scale(1.5)).unwrap();
        assert_eq!(json, r#"{"scaleX":1.5,"scaleY":1.5}"#);
        assert!(PropertyPatch::new().is_empty());
    }
}
