//! Output capabilities for steering and animation
//!
//! The simulation never talks to a physics or rendering engine directly.
//! It writes a velocity into a [`VelocitySink`] and a local transform into
//! a [`TransformSink`]; engine glue implements those two traits.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Receives the linear velocity for a physical body
pub trait VelocitySink {
    /// Replace the body's velocity for this tick (assignment, not impulse)
    fn set_velocity(&mut self, velocity: Vec2);
}

/// Receives the local transform of a visual node
pub trait TransformSink {
    /// Rotation about the view axis (degrees) and local position
    fn set_local_transform(&mut self, rotation_degrees: f32, position: Vec3);
}

/// Minimal kinematic body: position integrated from an assigned velocity
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct KinematicBody {
    pub position: Vec2,
    pub velocity: Vec2,
}

impl KinematicBody {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
        }
    }

    /// Move by the current velocity over `dt`
    pub fn integrate(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }
}

impl VelocitySink for KinematicBody {
    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }
}

/// Local transform of a sprite relative to its agent
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpriteNode {
    pub rotation_degrees: f32,
    pub local_position: Vec3,
}

impl SpriteNode {
    pub fn at(local_position: Vec3) -> Self {
        Self {
            rotation_degrees: 0.0,
            local_position,
        }
    }
}

impl TransformSink for SpriteNode {
    fn set_local_transform(&mut self, rotation_degrees: f32, position: Vec3) {
        self.rotation_degrees = rotation_degrees;
        self.local_position = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_velocity_is_assigned_not_added() {
        let mut body = KinematicBody::at(Vec2::new(1.0, 1.0));
        body.set_velocity(Vec2::new(10.0, 0.0));
        body.set_velocity(Vec2::new(0.0, -2.0));
        assert_eq!(body.velocity, Vec2::new(0.0, -2.0));

        body.integrate(0.5);
        assert_eq!(body.position, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_sprite_transform() {
        let mut sprite = SpriteNode::at(Vec3::new(0.0, 0.2, 0.0));
        sprite.set_local_transform(4.5, Vec3::new(0.0, 0.3, 0.0));
        assert_eq!(sprite.rotation_degrees, 4.5);
        assert_eq!(sprite.local_position, Vec3::new(0.0, 0.3, 0.0));
    }
}
