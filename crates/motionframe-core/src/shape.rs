//! # Shape Module
//!
//! The vector primitives placed on the canvas.
//!
//! ## Key Types
//! - `Shape`: Base (static) record of a primitive. Animation patches are merged onto it.
//! - `ShapeKind`: Circle, Rectangle, Polygon, Text.
//! - `Vertex`: A polygon point relative to the shape origin.

use crate::patch::PropertyPatch;
use serde::{Deserialize, Serialize};

/// Identifier of a shape within a project.
pub type ShapeId = String;

/// Discriminant of a shape.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Circle,
    Rectangle,
    Polygon,
    Text,
}

/// A polygon vertex.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
}

/// A positioned, styled vector primitive.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    pub id: ShapeId,
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    /// Rotation in degrees.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "default_scale")]
    pub scale_x: f64,
    #[serde(default = "default_scale")]
    pub scale_y: f64,
    pub fill: String,
    #[serde(default)]
    pub stroke: String,
    #[serde(default)]
    pub stroke_width: f64,
    /// 0.0 (transparent) to 1.0 (opaque).
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Render order; higher values draw on top.
    #[serde(default)]
    pub z_index: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertices: Option<Vec<Vertex>>,
}

fn default_scale() -> f64 {
    1.0
}

fn default_opacity() -> f64 {
    1.0
}

fn default_visible() -> bool {
    true
}

impl Shape {
    fn base(id: impl Into<ShapeId>, kind: ShapeKind, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            kind,
            x,
            y,
            width: None,
            height: None,
            radius: None,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            fill: String::new(),
            stroke: String::new(),
            stroke_width: 0.0,
            opacity: 1.0,
            visible: true,
            z_index: 0,
            text: None,
            font_size: None,
            font_family: None,
            vertices: None,
        }
    }

    /// A circle with the editor's default styling (radius 50, blue fill).
    pub fn circle(id: impl Into<ShapeId>, x: f64, y: f64) -> Self {
        Self {
            radius: Some(50.0),
            fill: "#4c6ef5".to_string(),
            stroke: "#364fc7".to_string(),
            stroke_width: 2.0,
            ..Self::base(id, ShapeKind::Circle, x, y)
        }
    }

    /// A 100x60 rectangle with the editor's default styling.
    pub fn rectangle(id: impl Into<ShapeId>, x: f64, y: f64) -> Self {
        Self {
            width: Some(100.0),
            height: Some(60.0),
            fill: "#51cf66".to_string(),
            stroke: "#37b24d".to_string(),
            stroke_width: 2.0,
            ..Self::base(id, ShapeKind::Rectangle, x, y)
        }
    }

    /// A text label, white 24px Inter.
    pub fn text(id: impl Into<ShapeId>, x: f64, y: f64, content: impl Into<String>) -> Self {
        Self {
            fill: "#ffffff".to_string(),
            text: Some(content.into()),
            font_size: Some(24.0),
            font_family: Some("Inter".to_string()),
            ..Self::base(id, ShapeKind::Text, x, y)
        }
    }

    /// A closed polygon through `vertices`.
    pub fn polygon(id: impl Into<ShapeId>, x: f64, y: f64, vertices: Vec<Vertex>) -> Self {
        Self {
            vertices: Some(vertices),
            fill: "#fab005".to_string(),
            stroke: "#f08c00".to_string(),
            stroke_width: 2.0,
            ..Self::base(id, ShapeKind::Polygon, x, y)
        }
    }

    /// Builder: set the z-order key.
    pub fn with_z_index(mut self, z_index: i64) -> Self {
        self.z_index = z_index;
        self
    }

    /// Merges `patch` onto this shape; patch values win.
    pub fn apply(&mut self, patch: &PropertyPatch) {
        if let Some(v) = patch.x {
            self.x = v;
        }
        if let Some(v) = patch.y {
            self.y = v;
        }
        if let Some(v) = patch.width {
            self.width = Some(v);
        }
        if let Some(v) = patch.height {
            self.height = Some(v);
        }
        if let Some(v) = patch.radius {
            self.radius = Some(v);
        }
        if let Some(v) = patch.rotation {
            self.rotation = v;
        }
        if let Some(v) = patch.scale_x {
            self.scale_x = v;
        }
        if let Some(v) = patch.scale_y {
            self.scale_y = v;
        }
        if let Some(v) = &patch.fill {
            self.fill = v.clone();
        }
        if let Some(v) = &patch.stroke {
            self.stroke = v.clone();
        }
        if let Some(v) = patch.stroke_width {
            self.stroke_width = v;
        }
        if let Some(v) = patch.opacity {
            self.opacity = v;
        }
        if let Some(v) = patch.visible {
            self.visible = v;
        }
        if let Some(v) = patch.z_index {
            self.z_index = v;
        }
        if let Some(v) = &patch.text {
            self.text = Some(v.clone());
        }
        if let Some(v) = patch.font_size {
            self.font_size = Some(v);
        }
        if let Some(v) = &patch.font_family {
            self.font_family = Some(v.clone());
        }
        if let Some(v) = &patch.vertices {
            self.vertices = Some(v.clone());
        }
    }

    /// Returns a copy with `patch` merged on top.
    pub fn with_patch(&self, patch: &PropertyPatch) -> Shape {
        let mut shape = self.clone();
        shape.apply(patch);
        shape
    }

    /// The transform and opacity of this shape as a patch, as captured by
    /// "add keyframe at current time".
    pub fn capture_transform(&self) -> PropertyPatch {
        PropertyPatch {
            x: Some(self.x),
            y: Some(self.y),
            rotation: Some(self.rotation),
            scale_x: Some(self.scale_x),
            scale_y: Some(self.scale_y),
            opacity: Some(self.opacity),
            ..Default::default()
        }
    }
}
