//! Fixed timestep simulation tick
//!
//! Screens call [`advance`] with whatever wall-clock delta they have; the
//! round consumes it in fixed 60 Hz steps. Within one step the order is
//! strict: deferred end, countdown, player motion, entity motion, retirement,
//! spawning, evaluation. The evaluator always sees this tick's settled
//! positions, never stale ones.

use crate::consts::{MAX_SUBSTEPS, TICK_DT, TICK_MS};
use crate::sim::state::{EndReason, EntityKind, Player, Round};
use crate::sim::{collide, spawn};

/// Advance the round by `dt_secs` of wall-clock time.
///
/// Inactive rounds ignore time entirely, so a leaked caller after the round
/// ended cannot produce phantom updates.
pub fn advance(round: &mut Round, dt_secs: f32) {
    if !round.is_active {
        return;
    }

    round.tick_acc += dt_secs;
    let mut substeps = 0;
    while round.tick_acc >= TICK_DT && round.is_active {
        round.tick_acc -= TICK_DT;
        step(round);
        substeps += 1;
        if substeps >= MAX_SUBSTEPS {
            // drop the backlog rather than spiral after a long stall
            round.tick_acc = 0.0;
            break;
        }
    }
}

fn step(round: &mut Round) {
    // round-ending transitions posted by the previous pass apply here, at
    // the top of the turn, never mid-iteration
    if let Some(reason) = round.pending_end.take() {
        round.finish(reason);
        return;
    }

    round.elapsed_ms += f64::from(TICK_MS);

    // independent 1 Hz countdown
    round.countdown_acc += TICK_DT;
    while round.countdown_acc >= 1.0 {
        round.countdown_acc -= 1.0;
        round.time_remaining = round.time_remaining.saturating_sub(1);
        if round.time_remaining == 0 {
            round.pending_end = Some(EndReason::TimeUp);
        }
    }

    // player motion
    match &mut round.player {
        Player::Runner(runner) => runner.advance(TICK_MS),
        Player::CameraRig(rig) => rig.drive(round.bounds),
        Player::DualSticks(_) => {}
    }

    // every entity moves before anything is classified
    for entity in &mut round.entities {
        entity.pos += entity.vel;
    }

    // retire obstacles once fully past the trailing edge
    round.entities.retain(|e| match e.kind {
        EntityKind::Obstacle { class } => e.pos.x > -class.width(),
        EntityKind::Target { .. } => true,
    });

    spawn::run(round);
    collide::evaluate(round);
    round.combo.advance(TICK_MS);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::difficulty::Difficulty;
    use crate::sim::state::{Entity, EntityStatus, GameKind, ObstacleClass, PlayField};
    use glam::Vec2;

    fn ticks(round: &mut Round, n: u32) {
        for _ in 0..n {
            advance(round, TICK_DT);
        }
    }

    fn jump_round() -> Round {
        let mut round = Round::new(GameKind::JumpTiming, Difficulty::Easy, 11);
        round.set_bounds(PlayField::new(400.0, 600.0));
        round.start();
        round
    }

    #[test]
    fn obstacle_crosses_the_field_at_two_px_per_tick() {
        let mut round = jump_round();
        let id = round.next_entity_id();
        round.entities.push(Entity {
            id,
            kind: EntityKind::Obstacle {
                class: ObstacleClass::Normal,
            },
            pos: Vec2::new(400.0, 0.0),
            vel: Vec2::new(-2.0, 0.0),
            status: EntityStatus::Pending,
        });

        // 144 ticks: left edge at 112, one short of the runner's right edge
        ticks(&mut round, 144);
        assert_eq!(round.entities[0].pos.x, 400.0 - 288.0);
        assert_eq!(round.entities[0].status, EntityStatus::Pending);
        assert!(round.is_active);

        // tick 145 puts it at 110 and the grounded runner collides
        ticks(&mut round, 1);
        assert_eq!(round.entities[0].pos.x, 110.0);
        assert_eq!(round.entities[0].status, EntityStatus::Collided);
        assert!(round.is_active, "end applies on the next turn, not mid-pass");

        ticks(&mut round, 1);
        assert!(!round.is_active);
        assert_eq!(round.take_outcome().unwrap().reason, EndReason::Collision);
    }

    #[test]
    fn countdown_runs_at_one_hz_and_times_out() {
        let mut round = Round::new(GameKind::DualControl, Difficulty::Medium, 11);
        round.set_bounds(PlayField::new(280.0, 280.0));
        round.start();

        ticks(&mut round, 60);
        assert_eq!(round.time_remaining, 59);

        ticks(&mut round, 59 * 60);
        assert_eq!(round.time_remaining, 0);
        // the timeout is posted, the round closes one turn later
        ticks(&mut round, 1);
        assert!(!round.is_active);
        assert_eq!(round.take_outcome().unwrap().reason, EndReason::TimeUp);
    }

    #[test]
    fn ended_rounds_ignore_further_time() {
        let mut round = jump_round();
        round.entities.push(Entity {
            id: 1,
            kind: EntityKind::Obstacle {
                class: ObstacleClass::Normal,
            },
            pos: Vec2::new(300.0, 0.0),
            vel: Vec2::new(-2.0, 0.0),
            status: EntityStatus::Pending,
        });
        round.end();

        let before = round.entities[0].pos;
        let time_before = round.time_remaining;
        ticks(&mut round, 120);
        assert_eq!(round.entities[0].pos, before);
        assert_eq!(round.time_remaining, time_before);
    }

    #[test]
    fn scored_obstacles_scroll_out_and_retire() {
        let mut round = jump_round();
        round.entities.push(Entity {
            id: 1,
            kind: EntityKind::Obstacle {
                class: ObstacleClass::Normal,
            },
            pos: Vec2::new(20.0, 0.0),
            vel: Vec2::new(-2.0, 0.0),
            status: EntityStatus::Pending,
        });

        // already past the runner: first evaluation scores it
        ticks(&mut round, 1);
        assert_eq!(round.score, 1);

        // keeps scrolling; once past -width it is gone
        ticks(&mut round, 30);
        assert!(round.entities.is_empty());
        assert!(round.is_active);
    }

    #[test]
    fn spawner_is_driven_by_the_tick_loop() {
        let mut round = Round::new(GameKind::CameraControl, Difficulty::Hard, 11);
        round.set_bounds(PlayField::new(300.0, 300.0));
        round.start();

        // hard camera spacing is 2500ms; after 3 sim-seconds exactly one
        // roaming target has spawned (it may already have been consumed if
        // it landed inside the look box)
        ticks(&mut round, 3 * 60);
        assert_eq!(round.score + round.entities.len() as u32, 1);
        if let Some(entity) = round.entities.first() {
            assert!(matches!(entity.kind, EntityKind::Target { .. }));
        }
    }
}
