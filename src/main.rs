//! Wander Sway headless demo
//!
//! Spawns a few wandering bots and a joystick-driven player, plays a
//! scripted drag gesture and logs agent state once per simulated second.
//!
//! Usage: `wander-sway [tuning.json] [seconds]` (set `RUST_LOG=info` or
//! `RUST_LOG=trace` to see retargets).

use glam::{Vec2, Vec3};

use wander_sway::Tuning;
use wander_sway::sim::{InputSource, Stage, VirtualJoystick};

/// Render frame length used by the demo (~144 Hz display)
const FRAME_DT: f32 = 1.0 / 144.0;
const DEFAULT_SECONDS: f32 = 10.0;

fn main() {
    env_logger::init();
    log::info!("Wander Sway (headless) starting...");

    let mut args = std::env::args().skip(1);
    let tuning_json = args.next().and_then(|path| match std::fs::read_to_string(&path) {
        Ok(json) => Some(json),
        Err(e) => {
            log::warn!("Could not read tuning file {}: {}", path, e);
            None
        }
    });
    let tuning = Tuning::load_or_default(tuning_json.as_deref());
    let seconds = args
        .next()
        .and_then(|s| s.parse::<f32>().ok())
        .filter(|s| s.is_finite() && *s > 0.0)
        .unwrap_or(DEFAULT_SECONDS);

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let mut stage = Stage::new(seed, tuning);
    for spawn in [Vec2::ZERO, Vec2::new(400.0, 0.0), Vec2::new(-250.0, 300.0)] {
        stage.spawn_bot(spawn);
    }
    stage.spawn_player(Vec2::ZERO, Some(Vec3::new(0.0, 0.5, 0.0)));

    let mut stick = VirtualJoystick::new(stage.tuning.joystick.move_radius);
    let frames = (seconds / FRAME_DT).ceil() as u32;
    let mut next_report = 1.0_f32;

    for frame in 0..frames {
        let t = frame as f32 * FRAME_DT;
        drive_gesture(&mut stick, t, seconds);

        stage.advance(FRAME_DT, Some(&stick));

        if stage.render_time >= next_report {
            report(&stage, &stick);
            next_report += 1.0;
        }
    }

    log::info!(
        "Done: {} fixed ticks, {:.2}s simulated",
        stage.clock.ticks,
        stage.clock.seconds()
    );
}

/// Drag the stick in a slow circle, releasing for the last quarter of the run
fn drive_gesture(stick: &mut VirtualJoystick, t: f32, seconds: f32) {
    if t >= seconds * 0.75 {
        if stick.is_held() {
            stick.release();
            log::info!("Joystick released at {:.2}s", t);
        }
        return;
    }

    // Overshoot the radius so the handle clamps at the rim
    let reach = stick.move_radius * 1.5;
    let pointer = Vec2::new((t * 0.8).cos(), (t * 0.8).sin()) * reach;
    if stick.is_held() {
        stick.drag(pointer);
    } else {
        stick.press(pointer);
        log::info!("Joystick pressed at {:.2}s", t);
    }
}

fn report(stage: &Stage, stick: &VirtualJoystick) {
    log::info!("t={:.1}s", stage.clock.seconds());
    for slot in &stage.bots {
        let wander = &slot.bot.wander;
        log::info!(
            "  bot {}: pos=({:.1}, {:.1}) target=({:.1}, {:.1}) retargets={} last={:?}",
            slot.bot.id,
            slot.body.position.x,
            slot.body.position.y,
            wander.target().x,
            wander.target().y,
            wander.retarget_count,
            wander.last_cause
        );
    }
    if let Some(player) = &stage.player {
        let dir = stick.direction();
        log::info!(
            "  player: pos=({:.2}, {:.2}) input=({:.2}, {:.2})",
            player.body.position.x,
            player.body.position.y,
            dir.x,
            dir.y
        );
        if let Some(sprite) = &player.sprite {
            log::info!(
                "  sprite: tilt={:.2}deg offset_y={:.3}",
                sprite.rotation_degrees,
                sprite.local_position.y
            );
        }
    }
}
