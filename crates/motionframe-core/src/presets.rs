//! Canned animations expressed as generators of concrete keyframes.
//!
//! Generators are pure: they return keyframes for the caller to insert one by
//! one through the normal add-keyframe path.

use crate::easing::Easing;
use crate::keyframe::Keyframe;
use crate::patch::PropertyPatch;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Number of segments sampled by [`bounce`].
pub const BOUNCE_STEPS: usize = 8;

/// Damped sine bounce on the Y property.
///
/// Emits `BOUNCE_STEPS + 1` keyframes, each eased out, with
/// `y = origin_y + amplitude * sin(2πp) * (1 - 0.8p)`.
pub fn bounce(
    shape_id: &str,
    start_time: f64,
    duration: f64,
    amplitude: f64,
    origin_y: f64,
) -> Vec<Keyframe> {
    (0..=BOUNCE_STEPS)
        .map(|i| {
            let time = start_time + (duration * i as f64) / BOUNCE_STEPS as f64;
            let progress = i as f64 / BOUNCE_STEPS as f64;
            let offset = amplitude * (progress * PI * 2.0).sin() * (1.0 - progress * 0.8);
            Keyframe::new(
                format!("bounce-{}-{}", shape_id, i),
                shape_id,
                time,
                PropertyPatch::new().with_y(origin_y + offset),
                Easing::EaseOut,
            )
        })
        .collect()
}

/// Full turns from rotation 0, linear.
pub fn rotate(shape_id: &str, start_time: f64, duration: f64, rotations: f64) -> Vec<Keyframe> {
    vec![
        Keyframe::new(
            format!("rotation-{}-start", shape_id),
            shape_id,
            start_time,
            PropertyPatch::rotation(0.0),
            Easing::Linear,
        ),
        Keyframe::new(
            format!("rotation-{}-end", shape_id),
            shape_id,
            start_time + duration,
            PropertyPatch::rotation(360.0 * rotations),
            Easing::Linear,
        ),
    ]
}

/// Uniform scale from `from_scale` up to `to_scale` at the midpoint and back.
pub fn scale_pulse(
    shape_id: &str,
    start_time: f64,
    duration: f64,
    from_scale: f64,
    to_scale: f64,
) -> Vec<Keyframe> {
    vec![
        Keyframe::new(
            format!("scale-{}-start", shape_id),
            shape_id,
            start_time,
            PropertyPatch::scale(from_scale),
            Easing::EaseOut,
        ),
        Keyframe::new(
            format!("scale-{}-mid", shape_id),
            shape_id,
            start_time + duration / 2.0,
            PropertyPatch::scale(to_scale),
            Easing::EaseIn,
        ),
        Keyframe::new(
            format!("scale-{}-end", shape_id),
            shape_id,
            start_time + duration,
            PropertyPatch::scale(from_scale),
            Easing::EaseOut,
        ),
    ]
}

/// Opacity ramp, eased in-out on both ends.
pub fn fade(
    shape_id: &str,
    start_time: f64,
    duration: f64,
    from_opacity: f64,
    to_opacity: f64,
) -> Vec<Keyframe> {
    vec![
        Keyframe::new(
            format!("fade-{}-start", shape_id),
            shape_id,
            start_time,
            PropertyPatch::opacity(from_opacity),
            Easing::EaseInOut,
        ),
        Keyframe::new(
            format!("fade-{}-end", shape_id),
            shape_id,
            start_time + duration,
            PropertyPatch::opacity(to_opacity),
            Easing::EaseInOut,
        ),
    ]
}

/// A canned animation and its parameters, as chosen in the authoring UI or
/// stored in a request file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CannedAnimation {
    Bounce {
        #[serde(default = "default_amplitude")]
        amplitude: f64,
        /// Baseline the offsets are added to; `None` lets the caller pick
        /// the shape's own y.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        origin_y: Option<f64>,
    },
    Rotate {
        #[serde(default = "default_rotations")]
        rotations: f64,
    },
    ScalePulse {
        #[serde(default = "default_from_scale")]
        from_scale: f64,
        #[serde(default = "default_to_scale")]
        to_scale: f64,
    },
    Fade {
        #[serde(default = "default_from_opacity")]
        from_opacity: f64,
        #[serde(default)]
        to_opacity: f64,
    },
}

fn default_amplitude() -> f64 {
    50.0
}

fn default_rotations() -> f64 {
    1.0
}

fn default_from_scale() -> f64 {
    1.0
}

fn default_to_scale() -> f64 {
    1.5
}

fn default_from_opacity() -> f64 {
    1.0
}

impl CannedAnimation {
    pub fn bounce() -> Self {
        CannedAnimation::Bounce {
            amplitude: default_amplitude(),
            origin_y: None,
        }
    }

    pub fn rotate() -> Self {
        CannedAnimation::Rotate {
            rotations: default_rotations(),
        }
    }

    pub fn scale_pulse() -> Self {
        CannedAnimation::ScalePulse {
            from_scale: default_from_scale(),
            to_scale: default_to_scale(),
        }
    }

    pub fn fade_out() -> Self {
        CannedAnimation::Fade {
            from_opacity: default_from_opacity(),
            to_opacity: 0.0,
        }
    }

    /// Expands the preset into keyframes for `shape_id`. An unset bounce
    /// origin is absolute y 0.
    pub fn generate(&self, shape_id: &str, start_time: f64, duration: f64) -> Vec<Keyframe> {
        match *self {
            CannedAnimation::Bounce {
                amplitude,
                origin_y,
            } => bounce(
                shape_id,
                start_time,
                duration,
                amplitude,
                origin_y.unwrap_or(0.0),
            ),
            CannedAnimation::Rotate { rotations } => {
                rotate(shape_id, start_time, duration, rotations)
            }
            CannedAnimation::ScalePulse {
                from_scale,
                to_scale,
            } => scale_pulse(shape_id, start_time, duration, from_scale, to_scale),
            CannedAnimation::Fade {
                from_opacity,
                to_opacity,
            } => fade(shape_id, start_time, duration, from_opacity, to_opacity),
        }
    }
}
