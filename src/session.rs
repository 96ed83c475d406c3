//! Session-scoped state spanning rounds
//!
//! Holds the progress store and one high score per game for the lifetime of
//! the process. High scores are deliberately not persisted; only progress
//! percentages survive a restart.

use crate::progress::{ProgressStore, Storage};
use crate::sim::{Difficulty, GameKind, Round, RoundOutcome};

/// A running app session: progress store plus per-game session bests.
#[derive(Debug)]
pub struct Session<S: Storage> {
    progress: ProgressStore<S>,
    high_scores: [u32; 3],
}

impl<S: Storage> Session<S> {
    pub fn new(storage: S) -> Self {
        Self {
            progress: ProgressStore::load(storage),
            high_scores: [0; 3],
        }
    }

    /// Read access for the progress screen.
    pub fn progress(&self) -> &ProgressStore<S> {
        &self.progress
    }

    /// Best score for `game` this session.
    pub fn high_score(&self, game: GameKind) -> u32 {
        self.high_scores[game.index()]
    }

    /// Build and start a fresh round of `game`.
    pub fn start_round(&self, game: GameKind, difficulty: Difficulty, seed: u64) -> Round {
        let mut round = Round::new(game, difficulty, seed);
        round.start();
        round
    }

    /// Finalize a round: stop it if still running, fold its score into the
    /// session high score, and report progress. Idempotent — a round yields
    /// its outcome exactly once, so calling this twice performs one store
    /// update and one high-score comparison in total.
    pub fn end_round(&mut self, round: &mut Round) -> Option<RoundOutcome> {
        round.end();
        let outcome = round.take_outcome()?;

        let best = &mut self.high_scores[outcome.game.index()];
        if outcome.score > *best {
            log::info!(
                "new session best for {}: {}",
                outcome.game.exercise_id(),
                outcome.score
            );
            *best = outcome.score;
        }

        self.progress
            .update(outcome.game.exercise_id(), outcome.progress_percent);
        Some(outcome)
    }
}

impl<S: Storage + Default> Default for Session<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}
