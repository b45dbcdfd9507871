//! Wander steering for non-player agents
//!
//! An agent remembers where it spawned and roams a rectangle around that
//! point. It picks a fresh random target when it gets close to the current
//! one or when the retarget timer runs out, whichever comes first.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::direction_or_zero;
use crate::tuning::WanderTuning;

/// Why the last target was replaced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetargetCause {
    /// Retarget timer expired
    Timer,
    /// Agent came within retarget distance of the target
    Arrived,
}

/// Per-agent wander state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WanderState {
    /// Position captured at spawn; the wander area follows it
    pub start_position: Vec2,
    /// Point currently steered toward
    pub target: Vec2,
    /// Simulation time (seconds) at which the timer forces a retarget
    pub next_retarget_time: f32,
    /// Offset from the start position to the wander area center
    pub area_center_offset: Vec2,
    /// Half-width and half-height of the wander area
    pub area_extents: Vec2,
    /// Distance from the target that counts as arrived
    pub retarget_distance: f32,
    /// Seconds between timer-driven retargets
    pub retarget_interval: f32,
}

impl WanderState {
    /// Lower and upper corners of the area targets are drawn from
    pub fn area_bounds(&self) -> (Vec2, Vec2) {
        let center = self.start_position + self.area_center_offset;
        let extents = self.area_extents.abs();
        (center - extents, center + extents)
    }

    /// Whether `point` lies inside the wander area (inclusive)
    pub fn contains(&self, point: Vec2) -> bool {
        let (min, max) = self.area_bounds();
        point.cmpge(min).all() && point.cmple(max).all()
    }
}

/// Drives a wandering agent, one call per fixed simulation step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WanderController {
    pub state: WanderState,
    /// Units per second toward the target
    pub speed: f32,
    /// Cause of the most recent retarget (None until the first one)
    #[serde(default)]
    pub last_cause: Option<RetargetCause>,
    /// Retargets since the last initialize
    #[serde(default)]
    pub retarget_count: u64,
}

impl WanderController {
    /// Create a controller for an agent spawned at `spawn` at time `now`
    pub fn new(tuning: &WanderTuning, spawn: Vec2, now: f32) -> Self {
        let mut controller = Self {
            state: WanderState {
                start_position: spawn,
                target: spawn,
                next_retarget_time: now,
                area_center_offset: tuning.area_center,
                area_extents: tuning.area_extents.abs(),
                retarget_distance: tuning.retarget_distance.max(0.0),
                retarget_interval: tuning.retarget_interval,
            },
            speed: tuning.speed,
            last_cause: None,
            retarget_count: 0,
        };
        controller.initialize(spawn, now);
        controller
    }

    /// (Re)anchor the agent at `spawn` and schedule the first retarget
    ///
    /// Prior wander history is discarded; the target starts on the spawn
    /// point so the first tick counts as arrived and draws a fresh target.
    pub fn initialize(&mut self, spawn: Vec2, now: f32) {
        self.state.start_position = spawn;
        self.state.target = spawn;
        self.last_cause = None;
        self.retarget_count = 0;
        self.schedule_next(now);
    }

    /// Advance one fixed step and return the velocity to assign to the body
    pub fn tick<R: Rng>(&mut self, position: Vec2, now: f32, rng: &mut R) -> Vec2 {
        if let Some(cause) = self.retarget_cause(position, now) {
            self.pick_new_target(now, rng);
            self.last_cause = Some(cause);
            log::trace!(
                "Retarget #{} ({:?}) -> ({:.1}, {:.1})",
                self.retarget_count,
                cause,
                self.state.target.x,
                self.state.target.y
            );
        }

        self.velocity_toward_target(position)
    }

    /// Current target point
    #[inline]
    pub fn target(&self) -> Vec2 {
        self.state.target
    }

    /// Whether `position` is within retarget distance of the target
    pub fn target_reached(&self, position: Vec2) -> bool {
        let r = self.state.retarget_distance;
        position.distance_squared(self.state.target) <= r * r
    }

    /// Velocity toward the target at full speed (zero when on top of it)
    pub fn velocity_toward_target(&self, position: Vec2) -> Vec2 {
        direction_or_zero(self.state.target - position) * self.speed
    }

    fn retarget_cause(&self, position: Vec2, now: f32) -> Option<RetargetCause> {
        if now >= self.state.next_retarget_time {
            Some(RetargetCause::Timer)
        } else if self.target_reached(position) {
            Some(RetargetCause::Arrived)
        } else {
            None
        }
    }

    fn pick_new_target<R: Rng>(&mut self, now: f32, rng: &mut R) {
        let center = self.state.start_position + self.state.area_center_offset;
        let extents = self.state.area_extents.abs();
        // Unit draws in [-1, 1) per axis; scaling cannot overflow for finite extents
        let unit = Vec2::new(rng.random::<f32>(), rng.random::<f32>()) * 2.0 - Vec2::ONE;

        self.state.target = center + extents * unit;
        self.retarget_count += 1;
        self.schedule_next(now);
    }

    fn schedule_next(&mut self, now: f32) {
        self.state.next_retarget_time = now + self.state.retarget_interval;
    }
}
