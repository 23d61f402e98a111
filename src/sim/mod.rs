//! Per-tick sprite motion
//!
//! Everything here runs inside a single scheduler tick and never blocks:
//! - Glides keep their progress in a per-call-site slot and read elapsed time
//! - Edge bounce is a pure function of the sprite's bounds and heading
//! - Randomness comes from a caller-supplied RNG

pub mod bounce;
pub mod glide;
pub mod state;
pub mod target;
pub mod timer;

pub use bounce::{Bounce, Edge, nearest_edge, reflect};
pub use glide::{CallSiteId, GlideSlots, GlideState, Step, advance};
pub use state::{Bounds, MotionTarget, Playfield, RotationStyle, Sprite};
pub use target::{Stage, TargetLookup, TargetSpec, resolve};
pub use timer::{Clock, ManualClock, SystemClock, Timer};
