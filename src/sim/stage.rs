//! Headless tick scheduler
//!
//! Runs the fixed simulation step (steering, wander, body integration) from
//! an accumulator, then one variable render step (sprite animation) per
//! frame. Everything happens on the caller's thread, so both tick kinds
//! read body positions without locking.

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::agent::{PlayerAgent, WanderBot};
use super::input::InputSource;
use super::sink::{KinematicBody, SpriteNode, TransformSink};
use crate::consts::*;
use crate::tuning::Tuning;

/// Simulation clock counted in fixed steps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimClock {
    pub ticks: u64,
}

impl SimClock {
    /// Seconds of simulated time elapsed
    #[inline]
    pub fn seconds(&self) -> f32 {
        self.ticks as f32 * SIM_DT
    }

    #[inline]
    pub fn advance(&mut self) {
        self.ticks += 1;
    }
}

/// A wandering bot and the body it drives
#[derive(Debug, Clone)]
pub struct BotSlot {
    pub bot: WanderBot,
    pub body: KinematicBody,
}

/// The player, its body and (optionally) its sprite
#[derive(Debug, Clone)]
pub struct PlayerSlot {
    pub agent: PlayerAgent,
    pub body: KinematicBody,
    pub sprite: Option<SpriteNode>,
}

/// Per-frame scheduler statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Fixed steps run this frame
    pub substeps: u32,
    /// Whether the render step reached a sprite
    pub rendered: bool,
}

/// All agents plus the clocks that drive them
#[derive(Debug, Clone)]
pub struct Stage {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub clock: SimClock,
    /// Seconds of rendered time (drives sway/bob phase)
    pub render_time: f32,
    /// Bots (sorted by id for determinism)
    pub bots: Vec<BotSlot>,
    pub player: Option<PlayerSlot>,
    rng: Pcg32,
    accumulator: f32,
    next_id: u32,
}

impl Stage {
    /// Create an empty stage with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        log::info!("Stage created with seed: {}", seed);
        Self {
            seed,
            tuning: tuning.sanitized(),
            clock: SimClock::default(),
            render_time: 0.0,
            bots: Vec::new(),
            player: None,
            rng: Pcg32::seed_from_u64(seed),
            accumulator: 0.0,
            next_id: 1,
        }
    }

    /// Spawn a wandering bot at `position`, returning its id
    pub fn spawn_bot(&mut self, position: Vec2) -> u32 {
        let id = self.next_id;
        self.next_id += 1;

        let bot = WanderBot::new(id, &self.tuning.wander, position, self.clock.seconds());
        self.bots.push(BotSlot {
            bot,
            body: KinematicBody::at(position),
        });
        log::debug!("Spawned bot {} at ({:.1}, {:.1})", id, position.x, position.y);
        id
    }

    /// Spawn (or replace) the player at `position`
    ///
    /// `sprite_rest` is the sprite's resting local position; None spawns a
    /// player with no visual node.
    pub fn spawn_player(&mut self, position: Vec2, sprite_rest: Option<Vec3>) {
        let rest = sprite_rest.unwrap_or(Vec3::ZERO);
        let agent = PlayerAgent::new(&self.tuning.player, self.tuning.motion, rest);
        self.player = Some(PlayerSlot {
            agent,
            body: KinematicBody::at(position),
            sprite: sprite_rest.map(SpriteNode::at),
        });
        log::debug!("Spawned player at ({:.1}, {:.1})", position.x, position.y);
    }

    pub fn bot(&self, id: u32) -> Option<&BotSlot> {
        self.bots.iter().find(|slot| slot.bot.id == id)
    }

    /// Run one fixed step: set velocities, then integrate bodies
    pub fn fixed_tick(&mut self, input: Option<&dyn InputSource>) {
        let now = self.clock.seconds();

        for slot in &mut self.bots {
            let position = slot.body.position;
            slot.bot.fixed_tick(position, now, &mut self.rng, Some(&mut slot.body));
            slot.body.integrate(SIM_DT);
        }

        if let Some(player) = &mut self.player {
            player.agent.fixed_tick(input, Some(&mut player.body));
            player.body.integrate(SIM_DT);
        }

        self.clock.advance();
    }

    /// Run one render step of `dt` seconds; returns whether a sprite was updated
    pub fn render_tick(&mut self, dt: f32) -> bool {
        self.render_time += dt;

        let Some(player) = &mut self.player else {
            return false;
        };
        let sprite = player.sprite.as_mut().map(|s| s as &mut dyn TransformSink);
        player.agent.render_tick(self.render_time, dt, sprite).is_some()
    }

    /// Advance by one rendered frame of `frame_dt` seconds
    pub fn advance(&mut self, frame_dt: f32, input: Option<&dyn InputSource>) -> FrameStats {
        let frame_dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += frame_dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.fixed_tick(input);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        let rendered = self.render_tick(frame_dt);
        FrameStats { substeps, rendered }
    }
}
