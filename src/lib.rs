//! # Motionframe
//!
//! `motionframe` is a keyframe animation engine for a vector motion-graphics editor.
//!
//! This crate re-exports [`motionframe_core`]; the command line lives in
//! `motionframe-cli`.

pub use motionframe_core::*;
