//! # Scripting Utilities
//!
//! Conversions between Rhai values and engine types.
//!
//! ## Responsibilities
//! - **Numbers**: `as_number` accepts both Rhai ints and floats
//! - **Vertices**: `points_to_vertices` reads `#{x, y}` arrays
//! - **Patches**: `patch_from_map` / `patch_to_map`
//! - **Errors**: `script_error` turns engine errors into Rhai runtime errors

use crate::patch::{PropertyCategory, PropertyPatch, PropertyValue};
use crate::shape::Vertex;
use rhai::{Array, Dynamic, EvalAltResult, Map};
use std::fmt::Display;

pub type RhaiResult<T> = Result<T, Box<EvalAltResult>>;

/// Converts any displayable error into a Rhai runtime error.
pub fn script_error(err: impl Display) -> Box<EvalAltResult> {
    err.to_string().into()
}

/// Reads an int or float as `f64`.
pub fn as_number(value: &Dynamic) -> RhaiResult<f64> {
    if let Ok(f) = value.as_float() {
        Ok(f)
    } else if let Ok(i) = value.as_int() {
        Ok(i as f64)
    } else {
        Err(script_error(format!(
            "expected a number, got {}",
            value.type_name()
        )))
    }
}

fn as_vertices(value: &Dynamic) -> RhaiResult<Vec<Vertex>> {
    let points = value
        .clone()
        .try_cast::<Array>()
        .ok_or_else(|| script_error("vertices must be an array of #{x, y} maps"))?;
    points_to_vertices(&points)
}

/// Reads an array of `#{x, y}` maps as polygon vertices.
pub fn points_to_vertices(points: &Array) -> RhaiResult<Vec<Vertex>> {
    points
        .iter()
        .map(|point| {
            let map = point
                .clone()
                .try_cast::<Map>()
                .ok_or_else(|| script_error("vertex must be a #{x, y} map"))?;
            let coord = |key: &str| -> RhaiResult<f64> {
                map.get(key)
                    .map(as_number)
                    .unwrap_or_else(|| Err(script_error(format!("vertex is missing '{}'", key))))
            };
            Ok(Vertex {
                x: coord("x")?,
                y: coord("y")?,
            })
        })
        .collect()
}

/// Builds a sparse patch from a Rhai map such as `#{ x: 10, fill: "#ff0000" }`.
///
/// Keys may be camelCase or snake_case. Unknown keys and ill-typed values are errors.
pub fn patch_from_map(map: &Map) -> RhaiResult<PropertyPatch> {
    let mut patch = PropertyPatch::new();
    for (key, value) in map.iter() {
        let key = key.as_str();
        if key == "id" {
            continue;
        }
        let category = PropertyPatch::category(key)
            .ok_or_else(|| script_error(format!("unknown property '{}'", key)))?;
        let parsed = match category {
            PropertyCategory::Numeric => PropertyValue::Number(as_number(value)?),
            PropertyCategory::Color | PropertyCategory::Text => {
                PropertyValue::Text(value.clone().into_string().map_err(|t| {
                    script_error(format!("property '{}' expects a string, got {}", key, t))
                })?)
            }
            PropertyCategory::Boolean => PropertyValue::Bool(value.as_bool().map_err(|t| {
                script_error(format!("property '{}' expects a bool, got {}", key, t))
            })?),
            PropertyCategory::Held if key == "vertices" => {
                PropertyValue::Vertices(as_vertices(value)?)
            }
            PropertyCategory::Held => PropertyValue::Number(as_number(value)?),
        };
        if !patch.set(key, parsed) {
            return Err(script_error(format!("cannot assign property '{}'", key)));
        }
    }
    Ok(patch)
}

/// Converts a patch into a Rhai map keyed by camelCase property names.
pub fn patch_to_map(patch: &PropertyPatch) -> Map {
    let mut map = Map::new();
    for (name, value) in patch.entries() {
        let dynamic = match value {
            PropertyValue::Number(n) => Dynamic::from(n),
            PropertyValue::Text(s) => Dynamic::from(s),
            PropertyValue::Bool(b) => Dynamic::from(b),
            PropertyValue::Vertices(vertices) => {
                let points: Array = vertices
                    .into_iter()
                    .map(|v| {
                        let mut point = Map::new();
                        point.insert("x".into(), Dynamic::from(v.x));
                        point.insert("y".into(), Dynamic::from(v.y));
                        Dynamic::from(point)
                    })
                    .collect();
                Dynamic::from(points)
            }
        };
        map.insert(name.into(), dynamic);
    }
    map
}

/// Optional string entry of a map.
pub fn map_string(map: &Map, key: &str) -> Option<String> {
    map.get(key).and_then(|v| v.clone().into_string().ok())
}
