//! Motion blocks
//!
//! One method per block. Everything except the two glides finishes within a
//! single tick; the glides return [`Step`] and keep their progress in the
//! caller's slot.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::settings::Settings;
use crate::sim::bounce;
use crate::sim::glide::{self, GlideState, Step};
use crate::sim::state::{MotionTarget, Playfield, RotationStyle};
use crate::sim::target::{self, TargetLookup, TargetSpec};
use crate::sim::timer::Clock;
use crate::{heading_to_vector, heading_towards, limit_precision};

/// The motion block set for one stage
#[derive(Debug, Clone)]
pub struct MotionBlocks {
    playfield: Playfield,
    rng: Pcg32,
}

impl MotionBlocks {
    pub fn new(playfield: Playfield, seed: u64) -> Self {
        Self {
            playfield,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Build from settings; an unset seed draws one from the thread RNG
    pub fn from_settings(settings: &Settings) -> Self {
        let seed = settings.rng_seed.unwrap_or_else(|| rand::rng().random());
        log::info!(
            "Motion blocks on {}x{} stage, seed {}",
            settings.stage_width,
            settings.stage_height,
            seed
        );
        Self::new(settings.playfield(), seed)
    }

    pub fn playfield(&self) -> &Playfield {
        &self.playfield
    }

    /// Resolve a target menu value against the stage
    pub fn resolve_target(&mut self, spec: &TargetSpec, lookup: &dyn TargetLookup) -> Option<DVec2> {
        target::resolve(spec, lookup, &self.playfield, &mut self.rng)
    }

    pub fn move_steps<T: MotionTarget + ?Sized>(&self, target: &mut T, steps: f64) {
        let delta = heading_to_vector(target.heading()) * steps;
        target.set_position(target.position() + delta);
        log::debug!("move {} steps", steps);
    }

    pub fn go_to_xy<T: MotionTarget + ?Sized>(&self, target: &mut T, x: f64, y: f64) {
        target.set_position(DVec2::new(x, y));
        log::debug!("go to x: {} y: {}", x, y);
    }

    /// Jump to a resolved target; an unknown sprite leaves the target alone
    pub fn go_to<T: MotionTarget + ?Sized>(
        &mut self,
        target: &mut T,
        to: &TargetSpec,
        lookup: &dyn TargetLookup,
    ) {
        if let Some(pos) = self.resolve_target(to, lookup) {
            target.set_position(pos);
            log::debug!("go to {:?} at ({}, {})", to, pos.x, pos.y);
        }
    }

    pub fn turn_right<T: MotionTarget + ?Sized>(&self, target: &mut T, degrees: f64) {
        target.set_heading(target.heading() + degrees);
        log::debug!("turn right {} degrees", degrees);
    }

    pub fn turn_left<T: MotionTarget + ?Sized>(&self, target: &mut T, degrees: f64) {
        target.set_heading(target.heading() - degrees);
        log::debug!("turn left {} degrees", degrees);
    }

    pub fn point_in_direction<T: MotionTarget + ?Sized>(&self, target: &mut T, degrees: f64) {
        target.set_heading(degrees);
        log::debug!("point in direction {}", degrees);
    }

    /// Face a resolved target. Random picks a random heading instead of a
    /// random point.
    pub fn point_towards<T: MotionTarget + ?Sized>(
        &mut self,
        target: &mut T,
        towards: &TargetSpec,
        lookup: &dyn TargetLookup,
    ) {
        if *towards == TargetSpec::Random {
            let heading = (self.rng.random::<f64>() * 360.0).round() - 180.0;
            target.set_heading(heading);
            log::debug!("point towards random direction {}", heading);
            return;
        }
        let Some(pos) = self.resolve_target(towards, lookup) else {
            return;
        };
        target.set_heading(heading_towards(target.position(), pos));
        log::debug!("point towards {:?}", towards);
    }

    /// One tick of "glide `secs` secs to x: y:"
    pub fn glide_secs_to_xy<T: MotionTarget + ?Sized>(
        &self,
        slot: &mut Option<GlideState>,
        clock: &dyn Clock,
        target: &mut T,
        secs: f64,
        x: f64,
        y: f64,
    ) -> Step {
        glide::advance(slot, clock, secs, DVec2::new(x, y), target)
    }

    /// One tick of "glide `secs` secs to <target>".
    ///
    /// The target is resolved on every tick. Once the gesture exists its end
    /// point stays fixed, but a sprite that can no longer be found finishes
    /// the block at once: the slot is cleared and the target is not moved.
    pub fn glide_to<T: MotionTarget + ?Sized>(
        &mut self,
        slot: &mut Option<GlideState>,
        clock: &dyn Clock,
        target: &mut T,
        secs: f64,
        to: &TargetSpec,
        lookup: &dyn TargetLookup,
    ) -> Step {
        let Some(end) = self.resolve_target(to, lookup) else {
            if slot.take().is_some() {
                log::debug!("glide target {:?} vanished, stopping", to);
            }
            return Step::Done;
        };
        glide::advance(slot, clock, secs, end, target)
    }

    /// Turn away from and step back inside the edge the target is touching
    pub fn if_on_edge_bounce<T: MotionTarget + ?Sized>(&self, target: &mut T) -> Option<bounce::Edge> {
        let hit = bounce::reflect(&*target, &self.playfield)?;
        target.set_heading(hit.heading);
        target.set_position(hit.position);
        log::debug!(
            "bounced off {} edge, heading {:.1}",
            hit.edge.as_str(),
            target.heading()
        );
        Some(hit.edge)
    }

    /// Unknown style names are ignored
    pub fn set_rotation_style<T: MotionTarget + ?Sized>(&self, target: &mut T, style: &str) {
        match RotationStyle::parse(style) {
            Some(style) => {
                target.set_rotation_style(style);
                log::debug!("set rotation style {}", style.as_str());
            }
            None => log::debug!("unknown rotation style {:?}", style),
        }
    }

    pub fn change_x_by<T: MotionTarget + ?Sized>(&self, target: &mut T, dx: f64) {
        target.set_position(target.position() + DVec2::new(dx, 0.0));
        log::debug!("change x by {}", dx);
    }

    pub fn set_x<T: MotionTarget + ?Sized>(&self, target: &mut T, x: f64) {
        let pos = target.position();
        target.set_position(DVec2::new(x, pos.y));
        log::debug!("set x to {}", x);
    }

    pub fn change_y_by<T: MotionTarget + ?Sized>(&self, target: &mut T, dy: f64) {
        target.set_position(target.position() + DVec2::new(0.0, dy));
        log::debug!("change y by {}", dy);
    }

    pub fn set_y<T: MotionTarget + ?Sized>(&self, target: &mut T, y: f64) {
        let pos = target.position();
        target.set_position(DVec2::new(pos.x, y));
        log::debug!("set y to {}", y);
    }

    pub fn x_position<T: MotionTarget + ?Sized>(&self, target: &T) -> f64 {
        limit_precision(target.position().x)
    }

    pub fn y_position<T: MotionTarget + ?Sized>(&self, target: &T) -> f64 {
        limit_precision(target.position().y)
    }

    pub fn direction<T: MotionTarget + ?Sized>(&self, target: &T) -> f64 {
        target.heading()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::bounce::Edge;
    use crate::sim::state::Sprite;
    use crate::sim::target::Stage;
    use crate::sim::timer::ManualClock;

    fn blocks() -> MotionBlocks {
        MotionBlocks::new(Playfield::default(), 1234)
    }

    fn cat() -> Sprite {
        Sprite::new("Cat", DVec2::new(40.0, 40.0), Playfield::default())
    }

    fn stage() -> Stage {
        let mut stage = Stage::new();
        stage.pointer = DVec2::new(-60.0, 80.0);
        stage.place("Dog", DVec2::new(100.0, -20.0));
        stage
    }

    #[test]
    fn test_move_steps_follows_heading() {
        let b = blocks();
        let mut s = cat().with_heading(90.0);
        b.move_steps(&mut s, 10.0);
        assert!((s.position() - DVec2::new(10.0, 0.0)).length() < 1e-9);

        b.point_in_direction(&mut s, 0.0);
        b.move_steps(&mut s, 5.0);
        assert!((s.position() - DVec2::new(10.0, 5.0)).length() < 1e-9);
        assert_eq!(b.x_position(&s), 10.0);
        assert_eq!(b.y_position(&s), 5.0);
    }

    #[test]
    fn test_turns_wrap() {
        let b = blocks();
        let mut s = cat().with_heading(170.0);
        b.turn_right(&mut s, 20.0);
        assert_eq!(b.direction(&s), -170.0);
        b.turn_left(&mut s, 30.0);
        assert_eq!(b.direction(&s), 160.0);
    }

    #[test]
    fn test_axis_setters() {
        let b = blocks();
        let mut s = cat();
        b.go_to_xy(&mut s, 3.0, 4.0);
        b.change_x_by(&mut s, 2.0);
        b.change_y_by(&mut s, -6.0);
        assert_eq!(s.position(), DVec2::new(5.0, -2.0));
        b.set_x(&mut s, 0.0);
        b.set_y(&mut s, 9.0);
        assert_eq!(s.position(), DVec2::new(0.0, 9.0));
    }

    #[test]
    fn test_go_to_targets() {
        let mut b = blocks();
        let stage = stage();
        let mut s = cat();

        b.go_to(&mut s, &TargetSpec::Pointer, &stage);
        assert_eq!(s.position(), DVec2::new(-60.0, 80.0));

        b.go_to(&mut s, &TargetSpec::parse("Dog"), &stage);
        assert_eq!(s.position(), DVec2::new(100.0, -20.0));

        b.go_to(&mut s, &TargetSpec::parse("Ghost"), &stage);
        assert_eq!(s.position(), DVec2::new(100.0, -20.0));

        b.go_to(&mut s, &TargetSpec::Random, &stage);
        let p = s.position();
        assert!(p.x.abs() <= 240.0 && p.y.abs() <= 180.0);
    }

    #[test]
    fn test_point_towards() {
        let mut b = blocks();
        let mut stage = stage();
        stage.pointer = DVec2::new(0.0, 50.0);
        let mut s = cat().with_heading(90.0);

        b.point_towards(&mut s, &TargetSpec::Pointer, &stage);
        assert!(b.direction(&s).abs() < 1e-9);

        b.point_towards(&mut s, &TargetSpec::parse("Ghost"), &stage);
        assert!(b.direction(&s).abs() < 1e-9);

        b.point_towards(&mut s, &TargetSpec::Random, &stage);
        let h = b.direction(&s);
        assert_eq!(h, h.round());
        assert!(h > -180.0 && h <= 180.0);
    }

    #[test]
    fn test_glide_secs_to_xy() {
        let b = blocks();
        let clock = ManualClock::new();
        let mut s = cat();
        let mut slot = None;

        assert_eq!(
            b.glide_secs_to_xy(&mut slot, &clock, &mut s, 1.0, 100.0, 0.0),
            Step::Continuing
        );
        clock.advance_ms(250.0);
        b.glide_secs_to_xy(&mut slot, &clock, &mut s, 1.0, 100.0, 0.0);
        assert!((s.position() - DVec2::new(25.0, 0.0)).length() < 1e-9);
        clock.advance_ms(750.0);
        assert!(b.glide_secs_to_xy(&mut slot, &clock, &mut s, 1.0, 100.0, 0.0).is_done());
        assert_eq!(s.position(), DVec2::new(100.0, 0.0));
    }

    #[test]
    fn test_glide_to_unknown_sprite_is_noop() {
        let mut b = blocks();
        let clock = ManualClock::new();
        let stage = stage();
        let mut s = cat().with_position(DVec2::new(7.0, 7.0));
        let mut slot = None;

        let step = b.glide_to(&mut slot, &clock, &mut s, 1.0, &TargetSpec::parse("Ghost"), &stage);
        assert_eq!(step, Step::Done);
        assert!(slot.is_none());
        assert_eq!(s.position(), DVec2::new(7.0, 7.0));
    }

    #[test]
    fn test_glide_to_keeps_first_end_point() {
        let mut b = blocks();
        let clock = ManualClock::new();
        let mut stage = stage();
        let mut s = cat();
        let mut slot = None;
        let dog = TargetSpec::parse("Dog");

        b.glide_to(&mut slot, &clock, &mut s, 2.0, &dog, &stage);
        // The other sprite moves away mid-glide
        stage.place("Dog", DVec2::new(-200.0, -200.0));
        clock.advance_ms(1000.0);
        b.glide_to(&mut slot, &clock, &mut s, 2.0, &dog, &stage);
        assert!((s.position() - DVec2::new(50.0, -10.0)).length() < 1e-9);

        clock.advance_ms(1000.0);
        assert_eq!(b.glide_to(&mut slot, &clock, &mut s, 2.0, &dog, &stage), Step::Done);
        assert_eq!(s.position(), DVec2::new(100.0, -20.0));
    }

    #[test]
    fn test_glide_to_stops_when_sprite_vanishes() {
        let mut b = blocks();
        let clock = ManualClock::new();
        let mut stage = stage();
        let mut s = cat();
        let mut slot = None;
        let dog = TargetSpec::parse("Dog");

        assert_eq!(
            b.glide_to(&mut slot, &clock, &mut s, 2.0, &dog, &stage),
            Step::Continuing
        );
        clock.advance_ms(500.0);
        b.glide_to(&mut slot, &clock, &mut s, 2.0, &dog, &stage);
        let before = s.position();
        assert!((before - DVec2::new(25.0, -5.0)).length() < 1e-9);

        stage.remove("Dog");
        clock.advance_ms(500.0);
        assert_eq!(b.glide_to(&mut slot, &clock, &mut s, 2.0, &dog, &stage), Step::Done);
        assert!(slot.is_none());
        assert_eq!(s.position(), before);

        // A later run starts a fresh gesture from where the sprite stopped
        stage.place("Dog", DVec2::new(25.0, 95.0));
        b.glide_to(&mut slot, &clock, &mut s, 1.0, &dog, &stage);
        assert_eq!(slot.unwrap().start, before);
    }

    #[test]
    fn test_glide_to_random_with_zero_duration() {
        let mut b = blocks();
        let clock = ManualClock::new();
        let stage = stage();
        let mut s = cat();
        let mut slot = None;

        let step = b.glide_to(&mut slot, &clock, &mut s, 0.0, &TargetSpec::Random, &stage);
        assert_eq!(step, Step::Done);
        assert!(slot.is_none());
        let p = s.position();
        assert_eq!(p, p.round());
    }

    #[test]
    fn test_if_on_edge_bounce_commits() {
        let b = blocks();
        let mut s = cat().with_position(DVec2::new(250.0, 0.0)).with_heading(90.0);
        assert_eq!(b.if_on_edge_bounce(&mut s), Some(Edge::Right));
        assert!((b.direction(&s) + 90.0).abs() < 1e-9);
        assert_eq!(s.position(), DVec2::new(220.0, 0.0));

        // Fenced sprites still touch the edge and bounce again
        assert_eq!(b.if_on_edge_bounce(&mut s), Some(Edge::Right));

        b.set_x(&mut s, 100.0);
        assert_eq!(b.if_on_edge_bounce(&mut s), None);
        assert!((b.direction(&s) + 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_set_rotation_style() {
        let b = blocks();
        let mut s = cat();
        b.set_rotation_style(&mut s, "left-right");
        assert_eq!(s.rotation_style(), RotationStyle::LeftRight);
        b.set_rotation_style(&mut s, "upside down");
        assert_eq!(s.rotation_style(), RotationStyle::LeftRight);
    }

    #[test]
    fn test_seeded_blocks_are_deterministic() {
        let stage = stage();
        let mut a = blocks();
        let mut b = blocks();
        for _ in 0..5 {
            assert_eq!(
                a.resolve_target(&TargetSpec::Random, &stage),
                b.resolve_target(&TargetSpec::Random, &stage)
            );
        }
    }
}
