//! Virtual joystick input
//!
//! Pointer positions arrive in the joystick's local space (origin at the
//! stick's rest position). The handle follows the pointer but never leaves
//! the move radius, and the reported direction is the handle offset
//! divided by that radius, so it always lies in the unit disc.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::steering::SteeringInput;

/// Anything that can report a movement direction each frame
pub trait InputSource {
    /// Direction with magnitude at most 1
    fn direction(&self) -> Vec2;

    /// Direction as steering input (clamped to the unit disc)
    fn steering(&self) -> SteeringInput {
        SteeringInput::new(self.direction())
    }
}

/// Fixed direction (scripted input, tests)
impl InputSource for Vec2 {
    fn direction(&self) -> Vec2 {
        *self
    }
}

/// On-screen drag stick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VirtualJoystick {
    /// Max handle travel from the rest position
    pub move_radius: f32,
    /// Handle offset for drawing (clamped to `move_radius`)
    handle: Vec2,
    /// Normalized direction
    direction: Vec2,
    /// Whether a pointer is currently held on the stick
    held: bool,
}

impl VirtualJoystick {
    pub fn new(move_radius: f32) -> Self {
        Self {
            move_radius,
            handle: Vec2::ZERO,
            direction: Vec2::ZERO,
            held: false,
        }
    }

    /// Pointer went down on the stick
    pub fn press(&mut self, local: Vec2) {
        self.held = true;
        self.drag(local);
    }

    /// Pointer moved while held
    pub fn drag(&mut self, local: Vec2) {
        if self.move_radius <= 0.0 || !local.is_finite() {
            self.handle = Vec2::ZERO;
            self.direction = Vec2::ZERO;
            return;
        }

        self.handle = local.clamp_length_max(self.move_radius);
        self.direction = self.handle / self.move_radius;
    }

    /// Pointer released: stick springs back to center
    pub fn release(&mut self) {
        self.held = false;
        self.handle = Vec2::ZERO;
        self.direction = Vec2::ZERO;
    }

    /// Handle offset from the rest position
    #[inline]
    pub fn handle(&self) -> Vec2 {
        self.handle
    }

    #[inline]
    pub fn is_held(&self) -> bool {
        self.held
    }
}

impl Default for VirtualJoystick {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl InputSource for VirtualJoystick {
    fn direction(&self) -> Vec2 {
        self.direction
    }
}
