//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collide;
pub mod combo;
pub mod difficulty;
pub mod joystick;
pub mod jump;
pub mod spawn;
pub mod state;
pub mod tick;

pub use combo::ComboMeter;
pub use difficulty::{Difficulty, DifficultyProfile, SpawnKind};
pub use joystick::{ControlZone, Touch, TouchId, clamped_offset};
pub use jump::{Runner, height_at};
pub use state::{
    CameraRig, DualSticks, EndReason, Entity, EntityKind, EntityStatus, GameKind, ObstacleClass,
    PlayField, Player, Round, RoundOutcome, StickSide,
};
pub use tick::advance;
