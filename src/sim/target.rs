//! Target resolution for "go to" / "glide to" / "point towards"

use std::collections::HashMap;

use glam::DVec2;
use rand::Rng;

use super::state::Playfield;

/// Menu token for the mouse pointer
pub const POINTER_TOKEN: &str = "_mouse_";
/// Menu token for a random stage position
pub const RANDOM_TOKEN: &str = "_random_";

/// A symbolic destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSpec {
    Pointer,
    Random,
    Named(String),
}

impl TargetSpec {
    /// Parse a target menu value
    pub fn parse(value: &str) -> Self {
        match value {
            POINTER_TOKEN => TargetSpec::Pointer,
            RANDOM_TOKEN => TargetSpec::Random,
            name => TargetSpec::Named(name.to_string()),
        }
    }
}

/// Read-only view of the world a target is resolved against
pub trait TargetLookup {
    /// Pointer position in stage coordinates
    fn pointer_position(&self) -> DVec2;
    /// Position of the live sprite called `name`
    fn sprite_position(&self, name: &str) -> Option<DVec2>;
}

/// Resolve `spec` to a stage position.
///
/// Returns None for a name that doesn't match a live sprite.
pub fn resolve<R: Rng>(
    spec: &TargetSpec,
    lookup: &dyn TargetLookup,
    playfield: &Playfield,
    rng: &mut R,
) -> Option<DVec2> {
    match spec {
        TargetSpec::Pointer => Some(lookup.pointer_position()),
        TargetSpec::Random => Some(random_point(playfield, rng)),
        TargetSpec::Named(name) => {
            let pos = lookup.sprite_position(name);
            if pos.is_none() {
                log::debug!("no sprite named {:?}", name);
            }
            pos
        }
    }
}

/// Uniform point on the stage, rounded to whole units
pub fn random_point<R: Rng>(playfield: &Playfield, rng: &mut R) -> DVec2 {
    let x = (playfield.width * (rng.random::<f64>() - 0.5)).round();
    let y = (playfield.height * (rng.random::<f64>() - 0.5)).round();
    DVec2::new(x, y)
}

/// Simple lookup over named positions and a pointer
#[derive(Debug, Clone, Default)]
pub struct Stage {
    pub pointer: DVec2,
    sprites: HashMap<String, DVec2>,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or move a named sprite
    pub fn place(&mut self, name: impl Into<String>, pos: DVec2) {
        self.sprites.insert(name.into(), pos);
    }

    pub fn remove(&mut self, name: &str) -> Option<DVec2> {
        self.sprites.remove(name)
    }
}

impl TargetLookup for Stage {
    fn pointer_position(&self) -> DVec2 {
        self.pointer
    }

    fn sprite_position(&self, name: &str) -> Option<DVec2> {
        self.sprites.get(name).copied()
    }
}
