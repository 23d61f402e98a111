//! Sprite and stage types
//!
//! The motion blocks only touch sprites through [`MotionTarget`]; [`Sprite`]
//! is the concrete implementation the driver and tests use.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::{STAGE_HEIGHT, STAGE_WIDTH};
use crate::normalize_heading;

/// Axis-aligned bounds in stage coordinates (y grows upward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Bounds {
    /// Bounds of a `size` box centered on `center`
    pub fn centered(center: DVec2, size: DVec2) -> Self {
        let half = size / 2.0;
        Self {
            left: center.x - half.x,
            right: center.x + half.x,
            top: center.y + half.y,
            bottom: center.y - half.y,
        }
    }

    /// Same bounds moved by `delta`
    pub fn translated(&self, delta: DVec2) -> Self {
        Self {
            left: self.left + delta.x,
            right: self.right + delta.x,
            top: self.top + delta.y,
            bottom: self.bottom + delta.y,
        }
    }
}

/// The fixed stage rectangle, centered on the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f64,
    pub height: f64,
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new(STAGE_WIDTH, STAGE_HEIGHT)
    }
}

impl Playfield {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn half_extents(&self) -> DVec2 {
        DVec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// The playfield as a bounds rectangle
    pub fn bounds(&self) -> Bounds {
        Bounds::centered(DVec2::ZERO, DVec2::new(self.width, self.height))
    }

    /// Position that keeps `bounds`, moved so its owner sits at `pos`
    /// instead of `current`, inside the playfield.
    pub fn fence(&self, bounds: Bounds, current: DVec2, pos: DVec2) -> DVec2 {
        let fence = self.bounds();
        let moved = bounds.translated(pos - current);

        let mut delta = DVec2::ZERO;
        if moved.left < fence.left {
            delta.x += fence.left - moved.left;
        }
        if moved.right > fence.right {
            delta.x += fence.right - moved.right;
        }
        if moved.top > fence.top {
            delta.y += fence.top - moved.top;
        }
        if moved.bottom < fence.bottom {
            delta.y += fence.bottom - moved.bottom;
        }
        pos + delta
    }
}

/// How a sprite's costume follows its heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RotationStyle {
    #[default]
    AllAround,
    LeftRight,
    DontRotate,
}

impl RotationStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            RotationStyle::AllAround => "all around",
            RotationStyle::LeftRight => "left-right",
            RotationStyle::DontRotate => "don't rotate",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "all around" => Some(RotationStyle::AllAround),
            "left-right" => Some(RotationStyle::LeftRight),
            "don't rotate" => Some(RotationStyle::DontRotate),
            _ => None,
        }
    }
}

/// Anything the motion blocks can move
pub trait MotionTarget {
    fn position(&self) -> DVec2;
    fn set_position(&mut self, pos: DVec2);
    /// Heading in degrees (0 = up, 90 = right)
    fn heading(&self) -> f64;
    fn set_heading(&mut self, degrees: f64);
    /// Current bounds, or None when the target has no visible geometry
    fn bounds(&self) -> Option<Bounds>;
    /// Nearest position to `pos` that keeps the target inside the playfield
    fn keep_in_fence(&self, pos: DVec2) -> DVec2;

    fn rotation_style(&self) -> RotationStyle {
        RotationStyle::AllAround
    }

    fn set_rotation_style(&mut self, _style: RotationStyle) {}
}

/// A sprite on the stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sprite {
    pub name: String,
    pos: DVec2,
    heading: f64,
    pub rotation_style: RotationStyle,
    /// Costume size (None = no costume loaded)
    pub costume_size: Option<DVec2>,
    pub visible: bool,
    /// Stage the sprite is fenced into
    pub playfield: Playfield,
}

impl Sprite {
    /// A visible sprite at the origin facing right
    pub fn new(name: impl Into<String>, costume_size: DVec2, playfield: Playfield) -> Self {
        Self {
            name: name.into(),
            pos: DVec2::ZERO,
            heading: 90.0,
            rotation_style: RotationStyle::AllAround,
            costume_size: Some(costume_size),
            visible: true,
            playfield,
        }
    }

    pub fn with_position(mut self, pos: DVec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_heading(mut self, degrees: f64) -> Self {
        self.set_heading(degrees);
        self
    }
}

impl MotionTarget for Sprite {
    fn position(&self) -> DVec2 {
        self.pos
    }

    fn set_position(&mut self, pos: DVec2) {
        self.pos = pos;
    }

    fn heading(&self) -> f64 {
        self.heading
    }

    fn set_heading(&mut self, degrees: f64) {
        if degrees.is_finite() {
            self.heading = normalize_heading(degrees);
        }
    }

    fn bounds(&self) -> Option<Bounds> {
        if !self.visible {
            return None;
        }
        self.costume_size.map(|size| Bounds::centered(self.pos, size))
    }

    fn keep_in_fence(&self, pos: DVec2) -> DVec2 {
        match self.bounds() {
            Some(bounds) => self.playfield.fence(bounds, self.pos, pos),
            None => pos,
        }
    }

    fn rotation_style(&self) -> RotationStyle {
        self.rotation_style
    }

    fn set_rotation_style(&mut self, style: RotationStyle) {
        self.rotation_style = style;
    }
}
