//! Steering and procedural motion
//!
//! All agent logic lives here. This module must stay engine-free:
//! - Time is passed in explicitly, never read from a clock
//! - Randomness comes from an injected, seedable RNG
//! - Output goes through the sink traits only

pub mod agent;
pub mod input;
pub mod motion;
pub mod sink;
pub mod stage;
pub mod steering;
pub mod wander;

pub use agent::{PlayerAgent, WanderBot};
pub use input::{InputSource, VirtualJoystick};
pub use motion::{MotionConfig, MotionState, Smoothing};
pub use sink::{KinematicBody, SpriteNode, TransformSink, VelocitySink};
pub use stage::{FrameStats, SimClock, Stage};
pub use steering::{SteeringController, SteeringInput};
pub use wander::{RetargetCause, WanderController, WanderState};
