//! Thumb Trainer - simulation core for three touch-control mini-games
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ticking, spawning, collision, scoring)
//! - `progress`: Monotonic per-exercise progress store
//! - `session`: Session-scoped high scores and round finalization
//!
//! The crate is headless: screens forward pointer events and layout
//! measurements in, call [`sim::advance`] with wall-clock deltas, and read the
//! round state back for rendering.

pub mod progress;
pub mod session;
pub mod sim;

pub use progress::{MemoryStorage, ProgressStore, Storage};
pub use session::Session;
pub use sim::{Difficulty, GameKind, PlayField, Round, RoundOutcome, advance};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const TICK_DT: f32 = 1.0 / 60.0;
    /// Fixed timestep in milliseconds
    pub const TICK_MS: f32 = TICK_DT * 1000.0;
    /// Maximum substeps per advance to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Round length in seconds
    pub const ROUND_SECONDS: u32 = 60;
    /// Spawn-check cadence in milliseconds
    pub const SPAWN_CHECK_MS: f32 = 500.0;
    /// Cap on the elapsed-time speed ramp for obstacles
    pub const SPEED_RAMP_CAP: f32 = 3.0;

    /// Maximum stick deflection from its base, in pixels
    pub const JOYSTICK_MAX_RADIUS: f32 = 40.0;

    /// Left edge of the runner's fixed span in the side-scrolling game
    pub const RUNNER_LEFT: f32 = 70.0;
    /// Runner width in pixels
    pub const RUNNER_WIDTH: f32 = 40.0;
    /// Right edge of the runner's span
    pub const RUNNER_RIGHT: f32 = RUNNER_LEFT + RUNNER_WIDTH;

    /// Jump flight time in milliseconds (rise + fall)
    pub const JUMP_DURATION_MS: f32 = 1000.0;
    /// Peak jump height in pixels
    pub const JUMP_PEAK: f32 = 250.0;

    /// Half-extent of the camera look box around the view point
    pub const LOOK_BOX_HALF_EXTENT: f32 = 50.0;
    /// A target is acquired within `radius * TARGET_ACQUIRE_FACTOR`
    pub const TARGET_ACQUIRE_FACTOR: f32 = 1.5;
    /// Targets spawn this far from the play-field edges
    pub const TARGET_EDGE_MARGIN: f32 = 30.0;

    /// The camera character keeps this distance from the field edges
    pub const CHARACTER_EDGE_MARGIN: f32 = 20.0;
    /// Character drift per tick is stick offset times this factor
    pub const CHARACTER_DRIVE_FACTOR: f32 = 0.5;
    /// View point sits at character plus aim offset times this factor
    pub const CAMERA_AIM_FACTOR: f32 = 2.0;

    /// Consecutive scores needed before combo feedback fires
    pub const COMBO_THRESHOLD: u32 = 3;
    /// How long the combo celebration flag stays raised, in milliseconds
    pub const COMBO_CELEBRATION_MS: f32 = 1200.0;
}
