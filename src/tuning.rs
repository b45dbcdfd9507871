//! Movement and animation tuning
//!
//! Every knob is a plain number so designers can tweak feel from a JSON
//! file. Missing fields fall back to defaults, and out-of-range values are
//! corrected (with a warning) instead of rejected.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_AREA_EXTENT;
use crate::sim::motion::MotionConfig;

/// Wandering bot parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WanderTuning {
    /// Units per second toward the target
    pub speed: f32,
    /// Offset from the spawn position to the wander area center
    pub area_center: Vec2,
    /// Half-size of the wander area
    pub area_extents: Vec2,
    /// Distance from the target before picking a new one
    pub retarget_distance: f32,
    /// Seconds between automatic retargets
    pub retarget_interval: f32,
}

impl Default for WanderTuning {
    fn default() -> Self {
        Self {
            speed: 120.0,
            area_center: Vec2::ZERO,
            area_extents: Vec2::new(300.0, 300.0),
            retarget_distance: 10.0,
            retarget_interval: 1.5,
        }
    }
}

/// Player movement parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Units per second at full stick deflection
    pub speed: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self { speed: 5.0 }
    }
}

/// Virtual joystick parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JoystickTuning {
    /// Max handle travel in UI units
    pub move_radius: f32,
}

impl Default for JoystickTuning {
    fn default() -> Self {
        Self { move_radius: 100.0 }
    }
}

/// All tunable parameters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub wander: WanderTuning,
    pub player: PlayerTuning,
    pub motion: MotionConfig,
    pub joystick: JoystickTuning,
}

impl Tuning {
    /// Parse tuning JSON (partial documents are filled with defaults)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Pretty JSON for writing a tuning file
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse and sanitize `json`, or use defaults if absent or malformed
    pub fn load_or_default(json: Option<&str>) -> Self {
        match json.map(Self::from_json) {
            Some(Ok(tuning)) => {
                log::info!("Loaded tuning");
                tuning.sanitized()
            }
            Some(Err(e)) => {
                log::warn!("Invalid tuning ({e}), using defaults");
                Self::default()
            }
            None => {
                log::info!("Using default tuning");
                Self::default()
            }
        }
    }

    /// Copy with out-of-range values corrected
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let mut t = *self;

        let w = &mut t.wander;
        w.speed = non_negative("wander.speed", w.speed, defaults.wander.speed);
        w.retarget_distance = non_negative(
            "wander.retarget_distance",
            w.retarget_distance,
            defaults.wander.retarget_distance,
        );
        if !(w.retarget_interval.is_finite() && w.retarget_interval > 0.0) {
            log::warn!(
                "wander.retarget_interval must be > 0 (got {}), using {}",
                w.retarget_interval,
                defaults.wander.retarget_interval
            );
            w.retarget_interval = defaults.wander.retarget_interval;
        }
        if !w.area_center.is_finite() {
            log::warn!("wander.area_center is not finite, using {}", defaults.wander.area_center);
            w.area_center = defaults.wander.area_center;
        }
        if !w.area_extents.is_finite() {
            log::warn!("wander.area_extents is not finite, using {}", defaults.wander.area_extents);
            w.area_extents = defaults.wander.area_extents;
        } else if w.area_extents.cmplt(Vec2::ZERO).any() {
            log::warn!(
                "wander.area_extents {} has negative components, using magnitudes",
                w.area_extents
            );
            w.area_extents = w.area_extents.abs();
        }
        if w.area_extents.cmpgt(Vec2::splat(MAX_AREA_EXTENT)).any() {
            log::warn!(
                "wander.area_extents {} too large, clamping to {}",
                w.area_extents,
                MAX_AREA_EXTENT
            );
            w.area_extents = w.area_extents.min(Vec2::splat(MAX_AREA_EXTENT));
        }

        t.player.speed = non_negative("player.speed", t.player.speed, defaults.player.speed);

        let m = &mut t.motion;
        let dm = defaults.motion;
        m.sway_amplitude =
            non_negative("motion.sway_amplitude", m.sway_amplitude, dm.sway_amplitude);
        m.sway_frequency =
            non_negative("motion.sway_frequency", m.sway_frequency, dm.sway_frequency);
        m.sway_smooth = non_negative("motion.sway_smooth", m.sway_smooth, dm.sway_smooth);
        m.bob_amplitude = non_negative("motion.bob_amplitude", m.bob_amplitude, dm.bob_amplitude);
        m.bob_frequency = non_negative("motion.bob_frequency", m.bob_frequency, dm.bob_frequency);
        m.bob_smooth = non_negative("motion.bob_smooth", m.bob_smooth, dm.bob_smooth);
        if !m.sway_deadzone.is_finite() {
            log::warn!("motion.sway_deadzone is not finite, using {}", dm.sway_deadzone);
            m.sway_deadzone = dm.sway_deadzone;
        } else if !(0.0..=1.0).contains(&m.sway_deadzone) {
            log::warn!("motion.sway_deadzone {} outside 0..1, clamping", m.sway_deadzone);
            m.sway_deadzone = m.sway_deadzone.clamp(0.0, 1.0);
        }

        if !(t.joystick.move_radius.is_finite() && t.joystick.move_radius > 0.0) {
            log::warn!(
                "joystick.move_radius must be > 0 (got {}), using {}",
                t.joystick.move_radius,
                defaults.joystick.move_radius
            );
            t.joystick.move_radius = defaults.joystick.move_radius;
        }

        t
    }
}

/// Clamp negatives to 0; non-finite values fall back to `default`
fn non_negative(name: &str, value: f32, default: f32) -> f32 {
    if !value.is_finite() {
        log::warn!("{name} is not finite, using {default}");
        default
    } else if value < 0.0 {
        log::warn!("{name} is negative ({value}), clamping to 0");
        0.0
    } else {
        value
    }
}
