//! Tuned spawn parameters per game and difficulty tier
//!
//! Pure lookup tables; nothing here is computed at runtime and nothing is
//! mutated during a round. Kind weights are expressed as repeated list
//! entries, so the uniform draw over the list is the weighting.

use serde::{Deserialize, Serialize};

use crate::sim::state::{GameKind, ObstacleClass};

/// Difficulty tier selected before a round starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// What the spawner may emit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnKind {
    Obstacle(ObstacleClass),
    Target,
}

/// Immutable spawn configuration for one (game, tier) pair
#[derive(Debug, Clone, Copy)]
pub struct DifficultyProfile {
    /// Draw pool; duplicates bias the uniform pick
    pub kind_weights: &'static [SpawnKind],
    /// Minimum time between spacing-satisfied spawn checks
    pub min_spacing_ms: u64,
    /// Obstacle speed in px/tick before the ramp
    pub base_speed: f32,
    /// Speed added per ten elapsed seconds (capped by the ramp cap)
    pub speed_ramp: f32,
    /// Bernoulli probability applied after the spacing gate
    pub spawn_probability: f64,
    /// Cap on concurrently live pending entities
    pub max_live: usize,
}

const NORMAL: SpawnKind = SpawnKind::Obstacle(ObstacleClass::Normal);
const TALL: SpawnKind = SpawnKind::Obstacle(ObstacleClass::Tall);

const JUMP_EASY: DifficultyProfile = DifficultyProfile {
    kind_weights: &[NORMAL],
    min_spacing_ms: 3500,
    base_speed: 2.0,
    speed_ramp: 0.0,
    spawn_probability: 0.3,
    max_live: usize::MAX,
};

const JUMP_MEDIUM: DifficultyProfile = DifficultyProfile {
    kind_weights: &[NORMAL, NORMAL, NORMAL, TALL],
    min_spacing_ms: 3000,
    base_speed: 2.5,
    speed_ramp: 0.1,
    spawn_probability: 0.4,
    max_live: usize::MAX,
};

const JUMP_HARD: DifficultyProfile = DifficultyProfile {
    kind_weights: &[NORMAL, NORMAL, TALL, TALL],
    min_spacing_ms: 2500,
    base_speed: 3.0,
    speed_ramp: 0.15,
    spawn_probability: 0.5,
    max_live: usize::MAX,
};

const fn roaming_target(min_spacing_ms: u64) -> DifficultyProfile {
    DifficultyProfile {
        kind_weights: &[SpawnKind::Target],
        min_spacing_ms,
        base_speed: 0.0,
        speed_ramp: 0.0,
        spawn_probability: 1.0,
        max_live: 1,
    }
}

const fn acquisition_target(min_spacing_ms: u64) -> DifficultyProfile {
    DifficultyProfile {
        kind_weights: &[SpawnKind::Target],
        min_spacing_ms,
        base_speed: 0.0,
        speed_ramp: 0.0,
        spawn_probability: 1.0,
        max_live: 3,
    }
}

const CAMERA_EASY: DifficultyProfile = roaming_target(3500);
const CAMERA_MEDIUM: DifficultyProfile = roaming_target(3000);
const CAMERA_HARD: DifficultyProfile = roaming_target(2500);

const DUAL_EASY: DifficultyProfile = acquisition_target(2500);
const DUAL_MEDIUM: DifficultyProfile = acquisition_target(2000);
const DUAL_HARD: DifficultyProfile = acquisition_target(1500);

impl Difficulty {
    /// The spawn profile driving `game` at this tier.
    pub fn profile_for(self, game: GameKind) -> &'static DifficultyProfile {
        match (game, self) {
            (GameKind::JumpTiming, Difficulty::Easy) => &JUMP_EASY,
            (GameKind::JumpTiming, Difficulty::Medium) => &JUMP_MEDIUM,
            (GameKind::JumpTiming, Difficulty::Hard) => &JUMP_HARD,
            (GameKind::CameraControl, Difficulty::Easy) => &CAMERA_EASY,
            (GameKind::CameraControl, Difficulty::Medium) => &CAMERA_MEDIUM,
            (GameKind::CameraControl, Difficulty::Hard) => &CAMERA_HARD,
            (GameKind::DualControl, Difficulty::Easy) => &DUAL_EASY,
            (GameKind::DualControl, Difficulty::Medium) => &DUAL_MEDIUM,
            (GameKind::DualControl, Difficulty::Hard) => &DUAL_HARD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_profile_is_well_formed() {
        for game in [
            GameKind::CameraControl,
            GameKind::JumpTiming,
            GameKind::DualControl,
        ] {
            for tier in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
                let p = tier.profile_for(game);
                assert!(!p.kind_weights.is_empty());
                assert!(p.min_spacing_ms > 0);
                assert!((0.0..=1.0).contains(&p.spawn_probability));
                assert!(p.max_live >= 1);
            }
        }
    }

    #[test]
    fn jump_medium_biases_toward_normal_obstacles() {
        let p = Difficulty::Medium.profile_for(GameKind::JumpTiming);
        let normals = p.kind_weights.iter().filter(|k| **k == NORMAL).count();
        let talls = p.kind_weights.iter().filter(|k| **k == TALL).count();
        assert_eq!((normals, talls), (3, 1));
        assert_eq!(p.min_spacing_ms, 3000);
        assert_eq!(p.base_speed, 2.5);
    }

    #[test]
    fn spacing_tightens_with_tier() {
        for game in [
            GameKind::CameraControl,
            GameKind::JumpTiming,
            GameKind::DualControl,
        ] {
            let easy = Difficulty::Easy.profile_for(game).min_spacing_ms;
            let hard = Difficulty::Hard.profile_for(game).min_spacing_ms;
            assert!(hard < easy);
        }
    }
}
