//! Sprite Motion native driver
//!
//! Runs a short script against a single sprite at the configured tick rate:
//! glide to the pointer, then keep moving and bouncing off the stage edges.
//! Usage: `sprite-motion [settings.json]`

use std::thread;
use std::time::Duration;

use glam::DVec2;

use sprite_motion::MotionBlocks;
use sprite_motion::Settings;
use sprite_motion::sim::{
    CallSiteId, GlideSlots, MotionTarget, Sprite, Stage, Step, SystemClock, TargetSpec,
};

/// Call site of the script's glide block
const GLIDE_SITE: CallSiteId = CallSiteId(1);

/// Ticks of move-and-bounce after the glide finishes
const BOUNCE_TICKS: u32 = 90;

fn main() {
    env_logger::init();
    log::info!("Sprite Motion (native) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    let interval = Duration::from_secs_f64(settings.tick_interval_secs());

    let mut blocks = MotionBlocks::from_settings(&settings);
    let clock = SystemClock::new();
    let mut slots = GlideSlots::new();

    let mut stage = Stage::new();
    stage.pointer = DVec2::new(150.0, 100.0);

    let mut sprite = Sprite::new("Sprite1", DVec2::new(48.0, 48.0), settings.playfield());
    blocks.point_in_direction(&mut sprite, 45.0);

    // glide 1.5 secs to (mouse-pointer)
    let target = TargetSpec::parse("_mouse_");
    let mut ticks = 0u32;
    loop {
        let mut slot = slots.take(GLIDE_SITE);
        let step = blocks.glide_to(&mut slot, &clock, &mut sprite, 1.5, &target, &stage);
        slots.put(GLIDE_SITE, slot);
        ticks += 1;

        let pos = sprite.position();
        log::info!("tick {:3} glide ({:7.2}, {:7.2})", ticks, pos.x, pos.y);
        if step == Step::Done {
            break;
        }
        thread::sleep(interval);
    }
    log::info!("glide finished after {} ticks", ticks);

    // forever { move 10 steps; if on edge, bounce }
    for tick in 0..BOUNCE_TICKS {
        blocks.move_steps(&mut sprite, 10.0);
        if let Some(edge) = blocks.if_on_edge_bounce(&mut sprite) {
            log::info!(
                "tick {:3} bounce off {} -> direction {:.1}",
                tick,
                edge.as_str(),
                blocks.direction(&sprite)
            );
        }
        thread::sleep(interval);
    }

    log::info!(
        "final position ({}, {}) direction {}",
        blocks.x_position(&sprite),
        blocks.y_position(&sprite),
        blocks.direction(&sprite)
    );
}
