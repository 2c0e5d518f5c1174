//! # Animation API
//!
//! Keyframe authoring and sampling for Rhai scripts.
//!
//! ## Responsibilities
//! - **Keyframes**: `key`, `capture`, `remove_keyframe`
//! - **Canned Animations**: `bounce`, `rotate`, `pulse`, `fade`
//! - **Sampling**: `sample` returns the interpolated patch as a map

use crate::easing::Easing;
use crate::presets::CannedAnimation;
use crate::session::DEFAULT_KEYFRAME_EASING;
use rhai::{Array, Dynamic, Engine, Map};

use super::super::types::{ProjectHandle, ShapeHandle};
use super::super::utils::{as_number, patch_from_map, patch_to_map, script_error, RhaiResult};

fn apply(
    shape: &ShapeHandle,
    animation: CannedAnimation,
    start: &Dynamic,
    duration: &Dynamic,
) -> RhaiResult<Array> {
    let start = as_number(start)?;
    let duration = as_number(duration)?;
    let ids = shape
        .with(|s| s.apply_animation(&shape.id, &animation, start, duration))
        .map_err(script_error)?;
    Ok(ids.into_iter().map(Dynamic::from).collect())
}

fn key(shape: &ShapeHandle, time: &Dynamic, props: &Map, easing: Easing) -> RhaiResult<String> {
    let time = as_number(time)?;
    let patch = patch_from_map(props)?;
    shape
        .with(|s| s.add_keyframe(&shape.id, time, patch, easing))
        .map_err(script_error)
}

/// Register animation-related Rhai functions.
pub fn register(engine: &mut Engine) {
    // ========== KEYFRAMES ==========
    engine.register_fn(
        "key",
        |shape: &mut ShapeHandle, time: Dynamic, props: Map| -> RhaiResult<String> {
            key(shape, &time, &props, DEFAULT_KEYFRAME_EASING)
        },
    );

    engine.register_fn(
        "key",
        |shape: &mut ShapeHandle, time: Dynamic, props: Map, easing: &str| -> RhaiResult<String> {
            key(shape, &time, &props, Easing::from_name(easing))
        },
    );

    engine.register_fn(
        "capture",
        |shape: &mut ShapeHandle, time: Dynamic| -> RhaiResult<String> {
            let time = as_number(&time)?;
            shape
                .with(|s| s.capture_keyframe(&shape.id, time))
                .map_err(script_error)
        },
    );

    engine.register_fn(
        "remove_keyframe",
        |project: &mut ProjectHandle, id: &str| -> RhaiResult<()> {
            project
                .with(|s| s.remove_keyframe(id))
                .map(|_| ())
                .map_err(script_error)
        },
    );

    engine.register_fn("keyframe_count", |project: &mut ProjectHandle| {
        project.with(|s| s.project().keyframes.len() as i64)
    });

    engine.register_fn("keyframe_count", |shape: &mut ShapeHandle| {
        shape.with(|s| s.project().keyframes_for(&shape.id).count() as i64)
    });

    engine.register_fn("easings", || -> Array {
        Easing::ALL
            .iter()
            .map(|e| Dynamic::from(e.name().to_string()))
            .collect()
    });

    // ========== CANNED ANIMATIONS ==========
    engine.register_fn(
        "bounce",
        |shape: &mut ShapeHandle, start: Dynamic, duration: Dynamic| -> RhaiResult<Array> {
            apply(shape, CannedAnimation::bounce(), &start, &duration)
        },
    );

    engine.register_fn(
        "bounce",
        |shape: &mut ShapeHandle,
         start: Dynamic,
         duration: Dynamic,
         amplitude: Dynamic|
         -> RhaiResult<Array> {
            let animation = CannedAnimation::Bounce {
                amplitude: as_number(&amplitude)?,
                origin_y: None,
            };
            apply(shape, animation, &start, &duration)
        },
    );

    engine.register_fn(
        "rotate",
        |shape: &mut ShapeHandle, start: Dynamic, duration: Dynamic| -> RhaiResult<Array> {
            apply(shape, CannedAnimation::rotate(), &start, &duration)
        },
    );

    engine.register_fn(
        "rotate",
        |shape: &mut ShapeHandle,
         start: Dynamic,
         duration: Dynamic,
         rotations: Dynamic|
         -> RhaiResult<Array> {
            let animation = CannedAnimation::Rotate {
                rotations: as_number(&rotations)?,
            };
            apply(shape, animation, &start, &duration)
        },
    );

    engine.register_fn(
        "pulse",
        |shape: &mut ShapeHandle, start: Dynamic, duration: Dynamic| -> RhaiResult<Array> {
            apply(shape, CannedAnimation::scale_pulse(), &start, &duration)
        },
    );

    engine.register_fn(
        "pulse",
        |shape: &mut ShapeHandle,
         start: Dynamic,
         duration: Dynamic,
         from: Dynamic,
         to: Dynamic|
         -> RhaiResult<Array> {
            let animation = CannedAnimation::ScalePulse {
                from_scale: as_number(&from)?,
                to_scale: as_number(&to)?,
            };
            apply(shape, animation, &start, &duration)
        },
    );

    engine.register_fn(
        "fade",
        |shape: &mut ShapeHandle, start: Dynamic, duration: Dynamic| -> RhaiResult<Array> {
            apply(shape, CannedAnimation::fade_out(), &start, &duration)
        },
    );

    engine.register_fn(
        "fade",
        |shape: &mut ShapeHandle,
         start: Dynamic,
         duration: Dynamic,
         from: Dynamic,
         to: Dynamic|
         -> RhaiResult<Array> {
            let animation = CannedAnimation::Fade {
                from_opacity: as_number(&from)?,
                to_opacity: as_number(&to)?,
            };
            apply(shape, animation, &start, &duration)
        },
    );

    // ========== SAMPLING ==========
    // Unanimated shapes sample as an empty map.
    engine.register_fn(
        "sample",
        |shape: &mut ShapeHandle, time: Dynamic| -> RhaiResult<Map> {
            let time = as_number(&time)?;
            Ok(shape
                .with(|s| s.evaluate(&shape.id, time))
                .map(|patch| patch_to_map(&patch))
                .unwrap_or_default())
        },
    );
}
