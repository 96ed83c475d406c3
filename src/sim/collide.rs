//! Collision detection and scoring classification
//!
//! The evaluator visits live entities in spawn order, classifies the pending
//! ones against the player's settled position for this tick, and applies
//! score/combo side effects as it goes. A fatal collision posts a deferred
//! round end rather than terminating mid-pass.

use crate::consts::{LOOK_BOX_HALF_EXTENT, RUNNER_LEFT, RUNNER_RIGHT, TARGET_ACQUIRE_FACTOR};
use crate::sim::state::{EndReason, EntityKind, EntityStatus, Player, Round};

/// Classify every pending entity against the current player state.
pub(crate) fn evaluate(round: &mut Round) {
    match round.player {
        Player::Runner(_) => evaluate_runner(round),
        Player::CameraRig(_) => evaluate_camera(round),
        Player::DualSticks(_) => evaluate_dual(round),
    }

    // scored targets leave the field immediately; scored obstacles keep
    // scrolling until they exit the bounds
    round.entities.retain(|e| {
        !(matches!(e.kind, EntityKind::Target { .. }) && e.status == EntityStatus::Scored)
    });
}

/// Side-scroller rules: scoring is pure horizontal clearance, collision is
/// checked only inside the critical zone where the spans overlap, against the
/// time-parameterized jump height.
fn evaluate_runner(round: &mut Round) {
    let Player::Runner(runner) = &round.player else {
        return;
    };
    let height = runner.height();

    for entity in &mut round.entities {
        if entity.status != EntityStatus::Pending {
            continue;
        }
        let EntityKind::Obstacle { class } = entity.kind else {
            continue;
        };
        let left = entity.pos.x;
        let right = left + class.width();

        // cleared: trailing edge fully past the runner
        if right < RUNNER_LEFT {
            entity.status = EntityStatus::Scored;
            round.score += 1;
            round.combo.on_score();
            continue;
        }

        let in_critical_zone = left <= RUNNER_RIGHT && right >= RUNNER_LEFT;
        if in_critical_zone && height < class.clearance() {
            entity.status = EntityStatus::Collided;
            round.combo.on_collision();
            round.pending_end = Some(EndReason::Collision);
        }
    }
}

/// Camera rules: the view point must sit within the look box around the
/// target on both axes.
fn evaluate_camera(round: &mut Round) {
    let Player::CameraRig(rig) = &round.player else {
        return;
    };
    let view = rig.view_point();

    for entity in &mut round.entities {
        if entity.status != EntityStatus::Pending {
            continue;
        }
        if !matches!(entity.kind, EntityKind::Target { .. }) {
            continue;
        }
        let on_target = (view.x - entity.pos.x).abs() < LOOK_BOX_HALF_EXTENT
            && (view.y - entity.pos.y).abs() < LOOK_BOX_HALF_EXTENT;
        if on_target {
            entity.status = EntityStatus::Scored;
            round.score += 1;
            round.combo.on_score();
        }
    }
}

/// Dual-stick rules: both indicators must be inside the acquisition radius
/// of the same target simultaneously.
fn evaluate_dual(round: &mut Round) {
    let Player::DualSticks(sticks) = &round.player else {
        return;
    };
    let Some((left, right)) = sticks.indicators(round.bounds) else {
        return; // field not measured yet
    };

    for entity in &mut round.entities {
        if entity.status != EntityStatus::Pending {
            continue;
        }
        let EntityKind::Target { radius, .. } = entity.kind else {
            continue;
        };
        let threshold = radius * TARGET_ACQUIRE_FACTOR;
        if left.distance(entity.pos) < threshold && right.distance(entity.pos) < threshold {
            entity.status = EntityStatus::Scored;
            round.score += 1;
            round.combo.on_score();
        }
    }
}
