//! Agents: wiring controllers to their inputs and sinks
//!
//! A missing collaborator (no body, no sprite, no input) never stops the
//! agent; only the update that needed it is skipped.

use glam::{Vec2, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::input::InputSource;
use super::motion::{MotionConfig, MotionState};
use super::sink::{TransformSink, VelocitySink};
use super::steering::{SteeringController, SteeringInput};
use super::wander::WanderController;
use crate::tuning::{PlayerTuning, WanderTuning};

/// Non-player agent roaming around its spawn point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WanderBot {
    pub id: u32,
    pub wander: WanderController,
}

impl WanderBot {
    pub fn new(id: u32, tuning: &WanderTuning, spawn: Vec2, now: f32) -> Self {
        Self {
            id,
            wander: WanderController::new(tuning, spawn, now),
        }
    }

    /// Fixed step: steer and write the velocity to `body` if present
    pub fn fixed_tick<R: Rng>(
        &mut self,
        position: Vec2,
        now: f32,
        rng: &mut R,
        body: Option<&mut dyn VelocitySink>,
    ) -> Vec2 {
        let velocity = self.wander.tick(position, now, rng);
        if let Some(body) = body {
            body.set_velocity(velocity);
        }
        velocity
    }
}

/// Player-controlled agent with an animated sprite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerAgent {
    pub steering: SteeringController,
    /// Input sampled on the last fixed tick
    pub input: SteeringInput,
    pub motion: MotionState,
    pub motion_config: MotionConfig,
}

impl PlayerAgent {
    pub fn new(tuning: &PlayerTuning, motion_config: MotionConfig, sprite_rest: Vec3) -> Self {
        Self {
            steering: SteeringController::new(tuning.speed),
            input: SteeringInput::ZERO,
            motion: MotionState::new(sprite_rest),
            motion_config,
        }
    }

    /// Fixed step: sample input (zero when there is no source) and drive the body
    pub fn fixed_tick(
        &mut self,
        source: Option<&dyn InputSource>,
        body: Option<&mut dyn VelocitySink>,
    ) -> Vec2 {
        self.input = source.map_or(SteeringInput::ZERO, |s| s.steering());

        let velocity = self.steering.velocity(self.input);
        if let Some(body) = body {
            body.set_velocity(velocity);
        }
        velocity
    }

    /// Render step: animate the sprite from the last sampled input
    ///
    /// Returns None (and leaves the animation untouched) without a sprite.
    pub fn render_tick(
        &mut self,
        elapsed: f32,
        dt: f32,
        sprite: Option<&mut dyn TransformSink>,
    ) -> Option<(f32, f32)> {
        let sprite = sprite?;
        let output = self.motion.tick(self.input.vector(), elapsed, dt, &self.motion_config);
        sprite.set_local_transform(self.motion.rotation_degrees(), self.motion.local_position());
        Some(output)
    }
}
