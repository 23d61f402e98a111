//! Edge detection and bounce response
//!
//! A sprite touching the stage edge is turned to face away from the nearest
//! edge and pushed back inside the stage.

use glam::DVec2;

use super::state::{Bounds, MotionTarget, Playfield};
use crate::consts::MIN_BOUNCE_COMPONENT;

/// Stage edge, in tie-break priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Left,
    Top,
    Right,
    Bottom,
}

impl Edge {
    /// All edges in priority order (earlier wins ties)
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Top, Edge::Right, Edge::Bottom];

    pub fn as_str(&self) -> &'static str {
        match self {
            Edge::Left => "left",
            Edge::Top => "top",
            Edge::Right => "right",
            Edge::Bottom => "bottom",
        }
    }
}

/// Distance from `bounds` to each edge, zero once the edge is crossed
pub fn edge_clearances(bounds: &Bounds, playfield: &Playfield) -> [(Edge, f64); 4] {
    let half = playfield.half_extents();
    [
        (Edge::Left, (half.x + bounds.left).max(0.0)),
        (Edge::Top, (half.y - bounds.top).max(0.0)),
        (Edge::Right, (half.x - bounds.right).max(0.0)),
        (Edge::Bottom, (half.y + bounds.bottom).max(0.0)),
    ]
}

/// Nearest edge and its clearance; ties go to the earlier edge in [`Edge::ALL`]
pub fn nearest_edge(bounds: &Bounds, playfield: &Playfield) -> (Edge, f64) {
    let mut nearest = (Edge::Left, f64::INFINITY);
    for (edge, dist) in edge_clearances(bounds, playfield) {
        if dist < nearest.1 {
            nearest = (edge, dist);
        }
    }
    nearest
}

/// Direction for `heading` turned away from `edge`.
///
/// The y component uses the flipped (screen-down) convention, and the
/// component pointing away from the edge is at least [`MIN_BOUNCE_COMPONENT`]
/// so a sprite moving along a wall still leaves it.
pub fn bounce_direction(heading: f64, edge: Edge) -> DVec2 {
    let radians = (90.0 - heading).to_radians();
    let mut dir = DVec2::new(radians.cos(), -radians.sin());
    match edge {
        Edge::Left => dir.x = dir.x.abs().max(MIN_BOUNCE_COMPONENT),
        Edge::Top => dir.y = dir.y.abs().max(MIN_BOUNCE_COMPONENT),
        Edge::Right => dir.x = -dir.x.abs().max(MIN_BOUNCE_COMPONENT),
        Edge::Bottom => dir.y = -dir.y.abs().max(MIN_BOUNCE_COMPONENT),
    }
    dir
}

/// Heading for a direction produced by [`bounce_direction`]
#[inline]
pub fn direction_to_heading(dir: DVec2) -> f64 {
    dir.y.atan2(dir.x).to_degrees() + 90.0
}

/// Result of a bounce, committed by the caller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounce {
    pub edge: Edge,
    /// Direction away from the edge, before conversion to a heading
    pub direction: DVec2,
    pub heading: f64,
    /// Position pushed back inside the stage
    pub position: DVec2,
}

/// Compute the bounce for a target touching an edge.
///
/// Returns None when the target has no bounds or is clear of every edge.
pub fn reflect<T: MotionTarget + ?Sized>(target: &T, playfield: &Playfield) -> Option<Bounce> {
    let bounds = target.bounds()?;
    let (edge, dist) = nearest_edge(&bounds, playfield);
    if dist > 0.0 {
        return None;
    }

    let direction = bounce_direction(target.heading(), edge);
    Some(Bounce {
        edge,
        direction,
        heading: direction_to_heading(direction),
        position: target.keep_in_fence(target.position()),
    })
}
