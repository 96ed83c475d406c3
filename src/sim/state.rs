//! Round state and core simulation types
//!
//! Everything the render layer reads each tick lives here. Fields are public
//! and read-only by convention: screens mutate the round only through the
//! event methods (`press`, `touch_*`, layout setters) and [`crate::advance`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::combo::ComboMeter;
use crate::sim::difficulty::Difficulty;
use crate::sim::joystick::{ControlZone, Touch};
use crate::sim::jump::Runner;
use crate::sim::spawn::Spawner;

/// The three training mini-games
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameKind {
    /// Move a character with one stick, aim the camera with the other
    CameraControl,
    /// Side-scrolling obstacles cleared by well-timed jumps
    JumpTiming,
    /// Point both sticks at the same target to acquire it
    DualControl,
}

impl GameKind {
    /// Identifier used in the progress store
    pub fn exercise_id(self) -> &'static str {
        match self {
            GameKind::CameraControl => "camera",
            GameKind::JumpTiming => "jump",
            GameKind::DualControl => "dual",
        }
    }

    /// Score treated as 100% when converting to progress
    pub fn perfect_score(self) -> u32 {
        match self {
            GameKind::CameraControl => 50,
            GameKind::JumpTiming => 30,
            GameKind::DualControl => 25,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            GameKind::CameraControl => 0,
            GameKind::JumpTiming => 1,
            GameKind::DualControl => 2,
        }
    }
}

/// Obstacle height classes for the side-scroller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleClass {
    Normal,
    Tall,
}

impl ObstacleClass {
    /// Rendered width in pixels
    pub fn width(self) -> f32 {
        match self {
            ObstacleClass::Normal => 40.0,
            ObstacleClass::Tall => 30.0,
        }
    }

    /// Rendered height in pixels
    pub fn height(self) -> f32 {
        match self {
            ObstacleClass::Normal => 30.0,
            ObstacleClass::Tall => 60.0,
        }
    }

    /// Minimum jump height that clears this obstacle
    pub fn clearance(self) -> f32 {
        match self {
            ObstacleClass::Normal => 20.0,
            ObstacleClass::Tall => 40.0,
        }
    }
}

/// What a spawned entity is
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    Obstacle {
        class: ObstacleClass,
    },
    Target {
        radius: f32,
        /// Render hint only
        color: [u8; 3],
    },
}

/// One-way status of an entity. Terminal states are never re-evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityStatus {
    Pending,
    Scored,
    Collided,
}

/// A moving game object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    pub pos: Vec2,
    /// Displacement applied once per fixed tick, constant for the lifetime
    pub vel: Vec2,
    pub status: EntityStatus,
}

/// Measured play-field bounds in pixels. Zero until the layout pass reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayField {
    pub width: f32,
    pub height: f32,
}

impl PlayField {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// False while the screen has not measured itself yet; all
    /// position-dependent computation short-circuits in that state.
    pub fn is_measured(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Which joystick zone a touch event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StickSide {
    Left,
    Right,
}

/// Character start position for the camera game
const CHARACTER_START: Vec2 = Vec2::new(150.0, 150.0);

/// Player state for the camera game: move stick drives the character, aim
/// stick offsets the view point around it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraRig {
    pub move_stick: ControlZone,
    pub aim_stick: ControlZone,
    pub character: Vec2,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            move_stick: ControlZone::default(),
            aim_stick: ControlZone::default(),
            character: CHARACTER_START,
        }
    }
}

impl CameraRig {
    /// Where the camera is looking.
    pub fn view_point(&self) -> Vec2 {
        self.character + self.aim_stick.offset * CAMERA_AIM_FACTOR
    }

    /// Integrate the move stick into the character position, one tick's worth.
    pub fn drive(&mut self, bounds: PlayField) {
        if !bounds.is_measured() {
            return;
        }
        let next = self.character + self.move_stick.offset * CHARACTER_DRIVE_FACTOR;
        self.character = Vec2::new(
            next.x
                .clamp(CHARACTER_EDGE_MARGIN, bounds.width - CHARACTER_EDGE_MARGIN),
            next.y
                .clamp(CHARACTER_EDGE_MARGIN, bounds.height - CHARACTER_EDGE_MARGIN),
        );
    }
}

/// Player state for the dual-stick game: both sticks project an indicator
/// point onto the play field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DualSticks {
    pub left: ControlZone,
    pub right: ControlZone,
}

impl DualSticks {
    /// Both indicator points, or `None` while the field is unmeasured.
    pub fn indicators(&self, bounds: PlayField) -> Option<(Vec2, Vec2)> {
        if !bounds.is_measured() {
            return None;
        }
        Some((
            map_stick_to_field(self.left.offset, bounds),
            map_stick_to_field(self.right.offset, bounds),
        ))
    }
}

/// Project a stick offset linearly onto the play field around its center.
/// Full deflection reaches the field edge; y keeps a 10 px margin.
pub fn map_stick_to_field(offset: Vec2, bounds: PlayField) -> Vec2 {
    let center = bounds.center();
    let normalized = offset / JOYSTICK_MAX_RADIUS;
    Vec2::new(
        (center.x + normalized.x * (bounds.width / 2.0)).clamp(0.0, bounds.width),
        (center.y + normalized.y * (bounds.height / 2.0 - 10.0)).clamp(10.0, bounds.height - 10.0),
    )
}

/// Per-game player state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Player {
    Runner(Runner),
    CameraRig(CameraRig),
    DualSticks(DualSticks),
}

impl Player {
    fn for_game(game: GameKind) -> Self {
        match game {
            GameKind::CameraControl => Player::CameraRig(CameraRig::default()),
            GameKind::JumpTiming => Player::Runner(Runner::default()),
            GameKind::DualControl => Player::DualSticks(DualSticks::default()),
        }
    }

    /// Back to neutral, keeping measured stick bases.
    fn reset(&mut self) {
        match self {
            Player::Runner(runner) => *runner = Runner::default(),
            Player::CameraRig(rig) => {
                rig.character = CHARACTER_START;
                rig.move_stick.reset();
                rig.aim_stick.reset();
            }
            Player::DualSticks(sticks) => {
                sticks.left.reset();
                sticks.right.reset();
            }
        }
    }

    fn zone_mut(&mut self, side: StickSide) -> Option<&mut ControlZone> {
        match self {
            Player::Runner(_) => None,
            Player::CameraRig(rig) => Some(match side {
                StickSide::Left => &mut rig.move_stick,
                StickSide::Right => &mut rig.aim_stick,
            }),
            Player::DualSticks(sticks) => Some(match side {
                StickSide::Left => &mut sticks.left,
                StickSide::Right => &mut sticks.right,
            }),
        }
    }
}

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    TimeUp,
    Collision,
    /// The screen tore the round down early
    Stopped,
}

/// Final result of a played round, consumed once by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub game: GameKind,
    pub score: u32,
    /// `min(100, round(100 * score / perfect))`
    pub progress_percent: u8,
    pub reason: EndReason,
}

/// One live round of one mini-game
#[derive(Debug, Clone)]
pub struct Round {
    pub game: GameKind,
    pub difficulty: Difficulty,
    pub bounds: PlayField,
    pub score: u32,
    pub combo: ComboMeter,
    /// Whole seconds left on the countdown
    pub time_remaining: u32,
    pub is_active: bool,
    /// Live entities in spawn order
    pub entities: Vec<Entity>,
    pub player: Player,
    /// Simulated time since `start`, in milliseconds
    pub elapsed_ms: f64,

    pub(crate) rng: Pcg32,
    pub(crate) spawner: Spawner,
    pub(crate) tick_acc: f32,
    pub(crate) countdown_acc: f32,
    pub(crate) pending_end: Option<EndReason>,
    pub(crate) outcome: Option<RoundOutcome>,
    next_id: u32,
}

impl Round {
    /// Create an idle round. Call [`Round::start`] to begin play.
    pub fn new(game: GameKind, difficulty: Difficulty, seed: u64) -> Self {
        Self {
            game,
            difficulty,
            bounds: PlayField::default(),
            score: 0,
            combo: ComboMeter::default(),
            time_remaining: ROUND_SECONDS,
            is_active: false,
            entities: Vec::new(),
            player: Player::for_game(game),
            elapsed_ms: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            spawner: Spawner::default(),
            tick_acc: 0.0,
            countdown_acc: 0.0,
            pending_end: None,
            outcome: None,
            next_id: 1,
        }
    }

    /// Reset everything and activate the clocks. A second call while the
    /// round is already running is a no-op, so timers cannot double up.
    pub fn start(&mut self) {
        if self.is_active {
            return;
        }
        log::info!("starting {} round", self.game.exercise_id());
        self.score = 0;
        self.combo.reset();
        self.time_remaining = ROUND_SECONDS;
        self.entities.clear();
        self.player.reset();
        self.elapsed_ms = 0.0;
        self.spawner.reset();
        self.tick_acc = 0.0;
        self.countdown_acc = 0.0;
        self.pending_end = None;
        self.outcome = None;
        self.next_id = 1;
        self.is_active = true;
    }

    /// Stop the round from the outside (screen teardown). Idempotent.
    pub fn end(&mut self) {
        self.finish(EndReason::Stopped);
    }

    /// Deactivate the clocks and record the outcome. Only the first call for
    /// a given round has any effect.
    pub(crate) fn finish(&mut self, reason: EndReason) {
        if !self.is_active {
            return;
        }
        self.is_active = false;
        self.pending_end = None;
        let perfect = self.game.perfect_score();
        let percent = ((100.0 * self.score as f32 / perfect as f32).round() as u32).min(100) as u8;
        log::info!(
            "{} round over ({reason:?}): score {}, progress {percent}%",
            self.game.exercise_id(),
            self.score
        );
        self.outcome = Some(RoundOutcome {
            game: self.game,
            score: self.score,
            progress_percent: percent,
            reason,
        });
    }

    /// Take the recorded outcome, once.
    pub fn take_outcome(&mut self) -> Option<RoundOutcome> {
        self.outcome.take()
    }

    /// Layout measurement callback: play-field bounds.
    pub fn set_bounds(&mut self, bounds: PlayField) {
        self.bounds = bounds;
    }

    /// Layout measurement callback: joystick base centers in pointer space.
    pub fn set_stick_bases(&mut self, left: Vec2, right: Vec2) {
        if let Some(zone) = self.player.zone_mut(StickSide::Left) {
            zone.set_base(left);
        }
        if let Some(zone) = self.player.zone_mut(StickSide::Right) {
            zone.set_base(right);
        }
    }

    /// Tap input for the jump game. Ignored elsewhere and while inactive.
    pub fn press(&mut self) {
        if !self.is_active {
            return;
        }
        if let Player::Runner(runner) = &mut self.player {
            runner.jump();
        }
    }

    /// Pointer-down events for one stick zone.
    pub fn touch_start(&mut self, side: StickSide, touches: &[Touch]) {
        if let Some(zone) = self.player.zone_mut(side) {
            zone.touch_start(touches);
        }
    }

    /// Pointer-move events for one stick zone.
    pub fn touch_move(&mut self, side: StickSide, touches: &[Touch]) {
        if let Some(zone) = self.player.zone_mut(side) {
            zone.touch_move(touches);
        }
    }

    /// Pointer-up events for one stick zone. `touches` is the full list of
    /// still-active contacts.
    pub fn touch_end(&mut self, side: StickSide, touches: &[Touch]) {
        if let Some(zone) = self.player.zone_mut(side) {
            zone.touch_end(touches);
        }
    }

    /// Allocate a new entity ID.
    pub(crate) fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Pending entities currently alive (used for spawn caps).
    pub(crate) fn live_pending(&self) -> usize {
        self.entities
            .iter()
            .filter(|e| e.status == EntityStatus::Pending)
            .count()
    }
}
