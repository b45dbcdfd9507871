//! Wander Sway - steering and procedural motion for 2D game agents
//!
//! Core modules:
//! - `sim`: Tick-driven steering (wander, joystick) and sway/bob animation
//! - `tuning`: Data-driven movement and animation parameters

pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the scheduler will account for (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Largest accepted wander half-extent; keeps the full area width finite
    pub const MAX_AREA_EXTENT: f32 = f32::MAX / 4.0;

    /// Squared length below which a direction is treated as zero
    pub const MIN_DIRECTION_SQ: f32 = 0.001;
    /// Horizontal input below this magnitude defers sway sign to the vertical axis
    pub const SWAY_SIGN_EPSILON: f32 = 0.01;
}

/// Normalize `v` or return zero when it is too short to have a direction
#[inline]
pub fn direction_or_zero(v: Vec2) -> Vec2 {
    let len_sq = v.length_squared();
    if len_sq.is_infinite() && v.is_finite() {
        // Squared length overflowed; rescale so the largest component is 1
        (v / v.abs().max_element()).normalize()
    } else if len_sq > consts::MIN_DIRECTION_SQ {
        v.normalize()
    } else {
        Vec2::ZERO
    }
}

/// Clamp to [0, 1]
#[inline]
pub fn clamp01(v: f32) -> f32 {
    v.clamp(0.0, 1.0)
}

/// Sign that treats zero as positive (matches a mirrored-sprite convention)
#[inline]
pub fn sign_or_positive(v: f32) -> f32 {
    if v < 0.0 { -1.0 } else { 1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_or_zero_guards_tiny_vectors() {
        assert_eq!(direction_or_zero(Vec2::ZERO), Vec2::ZERO);
        assert_eq!(direction_or_zero(Vec2::new(0.01, 0.01)), Vec2::ZERO);

        let d = direction_or_zero(Vec2::new(3.0, 4.0));
        assert!((d - Vec2::new(0.6, 0.8)).length() < 1e-6);
    }

    #[test]
    #[allow(overflowing_literals)]
    fn test_direction_or_zero_survives_huge_vectors() {
        let d = direction_or_zero(Vec2::new(3.0e38, -4.0e38));
        assert!((d - Vec2::new(0.6, -0.8)).length() < 1e-6);
    }

    #[test]
    fn test_sign_or_positive() {
        assert_eq!(sign_or_positive(0.0), 1.0);
        assert_eq!(sign_or_positive(-0.0), 1.0);
        assert_eq!(sign_or_positive(-2.0), -1.0);
        assert_eq!(sign_or_positive(0.3), 1.0);
    }
}
