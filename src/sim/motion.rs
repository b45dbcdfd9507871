//! Procedural sway and bob for a moving sprite
//!
//! The sprite tilts back and forth (sway) and rises and falls (bob) while
//! its owner moves, scaled by how hard the stick is pushed. Both channels
//! chase a sinusoidal target through a first-order low-pass filter so they
//! ease in when movement starts and settle back to rest when it stops.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::SWAY_SIGN_EPSILON;
use crate::{clamp01, sign_or_positive};

/// How the current value is blended toward its target each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Smoothing {
    /// `lerp(current, target, min(dt * rate, 1))`; depends on frame rate
    #[default]
    FrameLerp,
    /// `current += (target - current) * (1 - exp(-rate * dt))`
    Exponential,
}

impl Smoothing {
    /// Fraction of the remaining distance covered this frame, in [0, 1]
    #[inline]
    pub fn blend_factor(self, dt: f32, rate: f32) -> f32 {
        let dt = dt.max(0.0);
        let rate = rate.max(0.0);
        match self {
            Smoothing::FrameLerp => clamp01(dt * rate),
            Smoothing::Exponential => clamp01(1.0 - (-rate * dt).exp()),
        }
    }
}

/// Sway/bob animation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Max degrees of tilt
    pub sway_amplitude: f32,
    /// Sway oscillation speed (radians per second of elapsed time)
    pub sway_frequency: f32,
    /// How quickly the tilt follows its target
    pub sway_smooth: f32,
    /// Movement magnitude at or below which the sprite idles (0..1)
    pub sway_deadzone: f32,
    /// Max vertical offset
    pub bob_amplitude: f32,
    /// Bob oscillation speed
    pub bob_frequency: f32,
    /// How quickly the offset follows its target
    pub bob_smooth: f32,
    pub smoothing: Smoothing,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            sway_amplitude: 8.0,
            sway_frequency: 6.0,
            sway_smooth: 8.0,
            sway_deadzone: 0.05,
            bob_amplitude: 0.05,
            bob_frequency: 12.0,
            bob_smooth: 10.0,
            smoothing: Smoothing::FrameLerp,
        }
    }
}

/// Direction the sway leans: horizontal movement wins, vertical is the
/// fallback, and no movement at all leans positive
pub fn sway_sign(movement: Vec2) -> f32 {
    if movement.x.abs() > SWAY_SIGN_EPSILON {
        sign_or_positive(movement.x)
    } else if movement.y != 0.0 {
        sign_or_positive(movement.y)
    } else {
        1.0
    }
}

/// Target (sway degrees, bob offset) for the given movement and time
pub fn targets(movement: Vec2, elapsed: f32, config: &MotionConfig) -> (f32, f32) {
    let intensity = clamp01(movement.length());
    if !intensity.is_finite() || intensity <= config.sway_deadzone {
        return (0.0, 0.0);
    }

    let sway = (elapsed * config.sway_frequency).sin()
        * config.sway_amplitude
        * intensity
        * sway_sign(movement);
    let bob = (elapsed * config.bob_frequency).sin() * config.bob_amplitude * intensity;
    (sway, bob)
}

/// Animation state owned by an agent's visual node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionState {
    /// Current tilt in degrees
    pub current_sway: f32,
    /// Current vertical offset
    pub current_bob: f32,
    /// Resting local position of the sprite
    pub base_position: Vec3,
}

impl MotionState {
    /// Start at rest on the sprite's resting local position
    pub fn new(base_position: Vec3) -> Self {
        Self {
            current_sway: 0.0,
            current_bob: 0.0,
            base_position,
        }
    }

    /// Advance one render frame and return (rotation degrees, vertical offset)
    pub fn tick(
        &mut self,
        movement: Vec2,
        elapsed: f32,
        dt: f32,
        config: &MotionConfig,
    ) -> (f32, f32) {
        let (target_sway, target_bob) = targets(movement, elapsed, config);

        let sway_t = config.smoothing.blend_factor(dt, config.sway_smooth);
        let bob_t = config.smoothing.blend_factor(dt, config.bob_smooth);
        self.current_sway += (target_sway - self.current_sway) * sway_t;
        self.current_bob += (target_bob - self.current_bob) * bob_t;

        (self.current_sway, self.current_bob)
    }

    /// Rotation about the view axis, in degrees
    #[inline]
    pub fn rotation_degrees(&self) -> f32 {
        self.current_sway
    }

    /// Resting position with the bob applied to the vertical axis
    #[inline]
    pub fn local_position(&self) -> Vec3 {
        self.base_position + Vec3::Y * self.current_bob
    }

    /// Snap back to rest, dropping any sway or bob in progress
    pub fn reset(&mut self) {
        self.current_sway = 0.0;
        self.current_bob = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_deadzone_idles() {
        let config = MotionConfig::default();
        let mut state = MotionState::new(Vec3::ZERO);
        state.current_sway = 5.0;
        state.current_bob = 0.04;

        let movement = Vec2::new(0.03, 0.0);
        let mut prev = state.current_sway.abs();
        for frame in 0..120 {
            let (sway, bob) = state.tick(movement, frame as f32 * 0.016, 0.016, &config);
            assert!(sway.abs() < prev, "sway did not decay at frame {frame}");
            assert!(bob.abs() <= 0.04);
            prev = sway.abs();
        }
        assert!(prev < 0.01);
    }

    #[test]
    fn test_deadzone_single_step_value() {
        let config = MotionConfig::default();
        let mut state = MotionState::new(Vec3::ZERO);
        state.current_sway = 5.0;

        let (sway, _) = state.tick(Vec2::new(0.03, 0.0), 0.3, 0.016, &config);
        // lerp(5, 0, 0.128)
        assert!((sway - 4.36).abs() < 1e-4);
    }

    #[test]
    fn test_sway_sign_fallback() {
        assert_eq!(sway_sign(Vec2::new(0.0, 0.5)), 1.0);
        assert_eq!(sway_sign(Vec2::new(0.0, -0.5)), -1.0);
        assert_eq!(sway_sign(Vec2::new(0.005, -0.5)), -1.0);
        assert_eq!(sway_sign(Vec2::new(-0.3, 0.5)), -1.0);
        assert_eq!(sway_sign(Vec2::ZERO), 1.0);
    }

    #[test]
    fn test_vertical_movement_sways_positive() {
        let config = MotionConfig::default();
        // Quarter period: sin(elapsed * freq) == 1
        let elapsed = FRAC_PI_2 / config.sway_frequency;

        let (sway, _) = targets(Vec2::new(0.0, 0.5), elapsed, &config);
        assert!((sway - 8.0 * 0.5).abs() < 1e-4);

        let (sway_at_zero, bob_at_zero) = targets(Vec2::new(0.0, 0.5), 0.0, &config);
        assert_eq!(sway_at_zero, 0.0);
        assert_eq!(bob_at_zero, 0.0);
    }

    #[test]
    fn test_leftward_movement_mirrors_sway() {
        let config = MotionConfig::default();
        let elapsed = FRAC_PI_2 / config.sway_frequency;

        let (right, _) = targets(Vec2::new(1.0, 0.0), elapsed, &config);
        let (left, _) = targets(Vec2::new(-1.0, 0.0), elapsed, &config);
        assert!(right > 0.0);
        assert!((right + left).abs() < 1e-5);
    }

    #[test]
    fn test_intensity_clamped() {
        let config = MotionConfig::default();
        let elapsed = FRAC_PI_2 / config.sway_frequency;

        let (sway, _) = targets(Vec2::new(3.0, 0.0), elapsed, &config);
        assert!((sway - config.sway_amplitude).abs() < 1e-4);
    }

    #[test]
    fn test_long_frame_does_not_overshoot() {
        let config = MotionConfig::default();
        let mut state = MotionState::new(Vec3::ZERO);
        state.current_sway = -6.0;

        // dt * rate = 4.0 would overshoot without clamping
        let (sway, bob) = state.tick(Vec2::ZERO, 0.0, 0.5, &config);
        assert_eq!(sway, 0.0);
        assert_eq!(bob, 0.0);
    }

    #[test]
    fn test_exponential_smoothing_factor() {
        let f = Smoothing::Exponential.blend_factor(0.016, 8.0);
        assert!((f - (1.0 - (-0.128f32).exp())).abs() < 1e-6);
        assert!(f < Smoothing::FrameLerp.blend_factor(0.016, 8.0));

        // Two half frames land where one full frame does
        let whole = Smoothing::Exponential.blend_factor(0.032, 8.0);
        let half = Smoothing::Exponential.blend_factor(0.016, 8.0);
        let two_halves = 1.0 - (1.0 - half) * (1.0 - half);
        assert!((whole - two_halves).abs() < 1e-5);
    }

    #[test]
    fn test_exponential_smoothing_settles_without_overshoot() {
        let config = MotionConfig {
            smoothing: Smoothing::Exponential,
            ..Default::default()
        };
        let mut state = MotionState::new(Vec3::ZERO);
        state.current_sway = -6.0;
        state.current_bob = 0.05;

        // Uneven frame times, including one long hitch
        let frames = [0.016, 0.033, 0.008, 0.25, 0.016, 0.1];
        let mut prev = (state.current_sway, state.current_bob);
        for (i, dt) in frames.iter().cycle().take(120).enumerate() {
            let (sway, bob) = state.tick(Vec2::ZERO, i as f32 * 0.016, *dt, &config);
            assert!(sway <= 0.0 && sway >= prev.0, "sway overshot at frame {i}: {sway}");
            assert!(bob >= 0.0 && bob <= prev.1, "bob overshot at frame {i}: {bob}");
            prev = (sway, bob);
        }
        assert!(prev.0.abs() < 1e-3);
        assert!(prev.1.abs() < 1e-5);
    }

    #[test]
    fn test_exponential_smoothing_tracks_moving_target() {
        let config = MotionConfig {
            smoothing: Smoothing::Exponential,
            ..Default::default()
        };
        let mut state = MotionState::new(Vec3::ZERO);
        let movement = Vec2::new(0.0, 1.0);

        let mut elapsed = 0.0;
        for _ in 0..600 {
            elapsed += 0.016;
            let (sway, bob) = state.tick(movement, elapsed, 0.016, &config);
            assert!(sway.abs() <= config.sway_amplitude + 1e-4);
            assert!(bob.abs() <= config.bob_amplitude + 1e-6);
        }
    }

    #[test]
    fn test_local_position_applies_bob() {
        let mut state = MotionState::new(Vec3::new(0.5, 1.0, -2.0));
        state.current_bob = 0.25;
        assert_eq!(state.local_position(), Vec3::new(0.5, 1.25, -2.0));

        state.reset();
        assert_eq!(state.local_position(), Vec3::new(0.5, 1.0, -2.0));
        assert_eq!(state.rotation_degrees(), 0.0);
    }

    proptest! {
        #[test]
        fn prop_sway_changes_smoothly(
            start in -8.0f32..8.0,
            mx in -1.0f32..1.0,
            my in -1.0f32..1.0,
            elapsed in 0.0f32..100.0,
            dt in 0.0f32..0.05,
        ) {
            let config = MotionConfig::default();
            let mut state = MotionState::new(Vec3::ZERO);
            state.current_sway = start;

            let (sway, _) = state.tick(Vec2::new(mx, my), elapsed, dt, &config);
            let bound = dt * config.sway_smooth * (start.abs() + config.sway_amplitude) + 1e-4;
            prop_assert!((sway - start).abs() <= bound);
            prop_assert!(sway.abs() <= config.sway_amplitude + 1e-4 || sway.abs() <= start.abs());
        }
    }
}
