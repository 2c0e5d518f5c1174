//! # Easing Module
//!
//! Named progress-remapping curves used when approaching a keyframe.
//!
//! ## Responsibilities
//! - **Curves**: Polynomial in/out/in-out family plus bounce, elastic and back.
//! - **Names**: Parsing of the editor's kebab-case names (snake_case accepted).
//! - **Fallback**: Unknown names resolve to `Linear` instead of failing.
//!
//! The polynomial family maps 0 to 0 and 1 to 1 exactly. Bounce, elastic and
//! back curves are allowed to leave `[0, 1]`.

use keyframe::{functions, EasingFunction};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use tracing::debug;

/// Supported easing functions for keyframe transitions.
///
/// Serialized by name. Deserializing an unknown name yields [`Easing::Linear`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Easing {
    #[default]
    Linear,
    /// Quadratic ease in.
    EaseIn,
    /// Quadratic ease out.
    EaseOut,
    /// Quadratic ease in-out.
    EaseInOut,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInQuart,
    EaseOutQuart,
    EaseInOutQuart,
    BounceIn,
    BounceOut,
    BounceInOut,
    ElasticIn,
    ElasticOut,
    ElasticInOut,
    BackIn,
    BackOut,
    BackInOut,
}

impl Easing {
    /// Every supported easing, in menu order.
    pub const ALL: [Easing; 19] = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::EaseInCubic,
        Easing::EaseOutCubic,
        Easing::EaseInOutCubic,
        Easing::EaseInQuart,
        Easing::EaseOutQuart,
        Easing::EaseInOutQuart,
        Easing::BounceIn,
        Easing::BounceOut,
        Easing::BounceInOut,
        Easing::ElasticIn,
        Easing::ElasticOut,
        Easing::ElasticInOut,
        Easing::BackIn,
        Easing::BackOut,
        Easing::BackInOut,
    ];

    /// Resolves an easing by name, falling back to `Linear` for unknown names.
    ///
    /// Both `ease-in-out` and `ease_in_out` spellings are accepted.
    pub fn from_name(name: &str) -> Easing {
        match Self::parse(name) {
            Some(easing) => easing,
            None => {
                debug!(name, "unknown easing, using linear");
                Easing::Linear
            }
        }
    }

    /// Strict lookup; returns `None` for unknown names.
    pub fn parse(name: &str) -> Option<Easing> {
        let normalized = name.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .iter()
            .copied()
            .find(|easing| easing.name() == normalized)
    }

    /// The canonical (kebab-case) name.
    pub fn name(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::EaseIn => "ease-in",
            Easing::EaseOut => "ease-out",
            Easing::EaseInOut => "ease-in-out",
            Easing::EaseInCubic => "ease-in-cubic",
            Easing::EaseOutCubic => "ease-out-cubic",
            Easing::EaseInOutCubic => "ease-in-out-cubic",
            Easing::EaseInQuart => "ease-in-quart",
            Easing::EaseOutQuart => "ease-out-quart",
            Easing::EaseInOutQuart => "ease-in-out-quart",
            Easing::BounceIn => "bounce-in",
            Easing::BounceOut => "bounce-out",
            Easing::BounceInOut => "bounce-in-out",
            Easing::ElasticIn => "elastic-in",
            Easing::ElasticOut => "elastic-out",
            Easing::ElasticInOut => "elastic-in-out",
            Easing::BackIn => "back-in",
            Easing::BackOut => "back-out",
            Easing::BackInOut => "back-in-out",
        }
    }

    /// True for curves that may overshoot `[0, 1]` or skip the exact endpoints.
    pub fn overshoots(&self) -> bool {
        matches!(
            self,
            Easing::BounceIn
                | Easing::BounceOut
                | Easing::BounceInOut
                | Easing::ElasticIn
                | Easing::ElasticOut
                | Easing::ElasticInOut
                | Easing::BackIn
                | Easing::BackOut
                | Easing::BackInOut
        )
    }

    /// Evaluates the curve at normalized progress `t`.
    pub fn apply(&self, t: f64) -> f64 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => functions::EaseInQuad.y(t),
            Easing::EaseOut => functions::EaseOutQuad.y(t),
            Easing::EaseInOut => functions::EaseInOutQuad.y(t),
            Easing::EaseInCubic => functions::EaseInCubic.y(t),
            Easing::EaseOutCubic => functions::EaseOutCubic.y(t),
            Easing::EaseInOutCubic => functions::EaseInOutCubic.y(t),
            Easing::EaseInQuart => functions::EaseInQuart.y(t),
            Easing::EaseOutQuart => functions::EaseOutQuart.y(t),
            Easing::EaseInOutQuart => functions::EaseInOutQuart.y(t),
            Easing::BounceIn => 1.0 - bounce_out(1.0 - t),
            Easing::BounceOut => bounce_out(t),
            Easing::BounceInOut => {
                if t < 0.5 {
                    (1.0 - bounce_out(1.0 - 2.0 * t)) / 2.0
                } else {
                    (1.0 + bounce_out(2.0 * t - 1.0)) / 2.0
                }
            }
            Easing::ElasticIn => elastic_in(t),
            Easing::ElasticOut => elastic_out(t),
            Easing::ElasticInOut => elastic_in_out(t),
            Easing::BackIn => {
                let c1 = 1.70158;
                let c3 = c1 + 1.0;
                c3 * t * t * t - c1 * t * t
            }
            Easing::BackOut => {
                let c1 = 1.70158;
                let c3 = c1 + 1.0;
                1.0 + c3 * (t - 1.0).powi(3) + c1 * (t - 1.0).powi(2)
            }
            Easing::BackInOut => {
                let c2 = 1.70158 * 1.525;
                if t < 0.5 {
                    ((2.0 * t).powi(2) * ((c2 + 1.0) * 2.0 * t - c2)) / 2.0
                } else {
                    ((2.0 * t - 2.0).powi(2) * ((c2 + 1.0) * (t * 2.0 - 2.0) + c2) + 2.0) / 2.0
                }
            }
        }
    }
}

fn bounce_out(t: f64) -> f64 {
    let n1 = 7.5625;
    let d1 = 2.75;
    if t < 1.0 / d1 {
        n1 * t * t
    } else if t < 2.0 / d1 {
        let t = t - 1.5 / d1;
        n1 * t * t + 0.75
    } else if t < 2.5 / d1 {
        let t = t - 2.25 / d1;
        n1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / d1;
        n1 * t * t + 0.984375
    }
}

fn elastic_out(t: f64) -> f64 {
    let c4 = (2.0 * PI) / 3.0;
    if t == 0.0 {
        0.0
    } else if t == 1.0 {
        1.0
    } else {
        2f64.powf(-10.0 * t) * ((t * 10.0 - 0.75) * c4).sin() + 1.0
    }
}

fn elastic_in(t: f64) -> f64 {
    let c4 = (2.0 * PI) / 3.0;
    if t == 0.0 {
        0.0
    } else if t == 1.0 {
        1.0
    } else {
        -(2f64.powf(10.0 * t - 10.0)) * ((t * 10.0 - 10.75) * c4).sin()
    }
}

fn elastic_in_out(t: f64) -> f64 {
    let c5 = (2.0 * PI) / 4.5;
    if t == 0.0 {
        0.0
    } else if t == 1.0 {
        1.0
    } else if t < 0.5 {
        -(2f64.powf(20.0 * t - 10.0) * ((20.0 * t - 11.125) * c5).sin()) / 2.0
    } else {
        (2f64.powf(-20.0 * t + 10.0) * ((20.0 * t - 11.125) * c5).sin()) / 2.0 + 1.0
    }
}

impl EasingFunction for Easing {
    fn y(&self, x: f64) -> f64 {
        self.apply(x)
    }
}

impl From<String> for Easing {
    fn from(name: String) -> Self {
        Easing::from_name(&name)
    }
}

impl From<&str> for Easing {
    fn from(name: &str) -> Self {
        Easing::from_name(name)
    }
}

impl From<Easing> for String {
    fn from(easing: Easing) -> Self {
        easing.name().to_string()
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
