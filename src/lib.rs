//! Sprite Motion - block primitives for moving sprites around a stage
//!
//! Core modules:
//! - `sim`: Per-tick motion (resumable glide, edge bounce, target resolution)
//! - `blocks`: The motion block set the interpreter dispatches to
//! - `settings`: Stage configuration loaded from JSON

pub mod blocks;
pub mod settings;
pub mod sim;

pub use blocks::MotionBlocks;
pub use settings::{Settings, SettingsError};

use glam::DVec2;

/// Stage configuration constants
pub mod consts {
    /// Default stage dimensions
    pub const STAGE_WIDTH: f64 = 480.0;
    pub const STAGE_HEIGHT: f64 = 360.0;

    /// Smallest per-axis component of a bounce direction away from an edge
    pub const MIN_BOUNCE_COMPONENT: f64 = 0.2;

    /// Default scheduler rate for the native driver
    pub const TICK_HZ: f64 = 30.0;

    /// Coordinates closer than this to an integer are reported as that integer
    pub const PRECISION_SNAP: f64 = 1e-9;
}

/// Wrap `n` into the inclusive range [min, max], treating the range as
/// `max - min + 1` wide (so [-179, 180] wraps on a 360 cycle).
#[inline]
pub fn wrap_clamp(n: f64, min: f64, max: f64) -> f64 {
    let range = max - min + 1.0;
    n - ((n - min) / range).floor() * range
}

/// Normalize a heading in degrees to (-180, 180]
#[inline]
pub fn normalize_heading(degrees: f64) -> f64 {
    wrap_clamp(degrees, -179.0, 180.0)
}

/// Unit vector for a heading (0 = up, 90 = right, clockwise)
#[inline]
pub fn heading_to_vector(degrees: f64) -> DVec2 {
    let radians = (90.0 - degrees).to_radians();
    DVec2::new(radians.cos(), radians.sin())
}

/// Heading pointing from `from` toward `to`
#[inline]
pub fn heading_towards(from: DVec2, to: DVec2) -> f64 {
    let d = to - from;
    90.0 - d.y.atan2(d.x).to_degrees()
}

/// Snap a coordinate to the nearest integer when float error is all that
/// separates them.
#[inline]
pub fn limit_precision(coordinate: f64) -> f64 {
    let rounded = coordinate.round();
    if (coordinate - rounded).abs() < consts::PRECISION_SNAP {
        rounded
    } else {
        coordinate
    }
}
