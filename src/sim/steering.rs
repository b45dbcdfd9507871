//! Joystick-driven steering for the player agent
//!
//! Input maps straight to velocity: no acceleration curve, no smoothing.
//! Releasing the stick stops the agent on the next fixed tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A movement request for one tick, magnitude at most 1
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SteeringInput(Vec2);

impl SteeringInput {
    pub const ZERO: Self = Self(Vec2::ZERO);

    /// Clamp `raw` to the unit disc (non-finite input becomes zero)
    pub fn new(raw: Vec2) -> Self {
        if !raw.is_finite() {
            return Self::ZERO;
        }
        Self(raw.clamp_length_max(1.0))
    }

    #[inline]
    pub fn vector(&self) -> Vec2 {
        self.0
    }

    /// Input strength in [0, 1]
    #[inline]
    pub fn magnitude(&self) -> f32 {
        self.0.length()
    }
}

impl From<Vec2> for SteeringInput {
    fn from(raw: Vec2) -> Self {
        Self::new(raw)
    }
}

/// Converts steering input into a body velocity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteeringController {
    /// Units per second at full stick deflection
    pub speed: f32,
}

impl SteeringController {
    pub fn new(speed: f32) -> Self {
        Self { speed }
    }

    /// Velocity for this tick at the configured speed
    #[inline]
    pub fn velocity(&self, input: SteeringInput) -> Vec2 {
        tick(input, self.speed)
    }
}

/// Velocity for `input` at `speed` (direct passthrough)
#[inline]
pub fn tick(input: SteeringInput, speed: f32) -> Vec2 {
    input.vector() * speed
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_steering_passthrough() {
        let v = tick(SteeringInput::new(Vec2::new(0.6, -0.8)), 5.0);
        assert!((v.x - 3.0).abs() < 1e-5);
        assert!((v.y - (-4.0)).abs() < 1e-5);
    }

    #[test]
    fn test_zero_input_stops() {
        let controller = SteeringController::new(5.0);
        assert_eq!(controller.velocity(SteeringInput::ZERO), Vec2::ZERO);
    }

    #[test]
    fn test_input_clamped_to_unit() {
        let input = SteeringInput::new(Vec2::new(3.0, 4.0));
        assert!((input.magnitude() - 1.0).abs() < 1e-5);
        assert!((input.vector() - Vec2::new(0.6, 0.8)).length() < 1e-5);
    }

    #[test]
    fn test_non_finite_input_is_zero() {
        assert_eq!(SteeringInput::new(Vec2::new(f32::NAN, 0.5)), SteeringInput::ZERO);
        assert_eq!(
            SteeringInput::new(Vec2::new(f32::INFINITY, 0.0)),
            SteeringInput::ZERO
        );
    }

    proptest! {
        #[test]
        fn prop_speed_never_exceeded(x in -5.0f32..5.0, y in -5.0f32..5.0, speed in 0.0f32..50.0) {
            let v = tick(SteeringInput::new(Vec2::new(x, y)), speed);
            prop_assert!(v.length() <= speed + 1e-3);
        }
    }
}
