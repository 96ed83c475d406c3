//! Consecutive-score bookkeeping and the transient combo celebration flag

use serde::{Deserialize, Serialize};

use crate::consts::{COMBO_CELEBRATION_MS, COMBO_THRESHOLD};

/// Counts scores uninterrupted by a collision and raises a short-lived
/// celebration flag for the render layer once the streak is long enough.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComboMeter {
    /// Current streak length
    pub count: u32,
    celebration_ms: f32,
}

impl ComboMeter {
    /// Back to a fresh meter (round start).
    pub fn reset(&mut self) {
        self.count = 0;
        self.celebration_ms = 0.0;
    }

    /// A scoring event landed.
    pub fn on_score(&mut self) {
        self.count += 1;
        if self.count >= COMBO_THRESHOLD {
            self.celebration_ms = COMBO_CELEBRATION_MS;
        }
    }

    /// A collision breaks the streak.
    pub fn on_collision(&mut self) {
        self.count = 0;
    }

    /// Tick down the celebration display timer.
    pub fn advance(&mut self, dt_ms: f32) {
        self.celebration_ms = (self.celebration_ms - dt_ms).max(0.0);
    }

    /// Whether the celebration flag is currently raised.
    pub fn celebrating(&self) -> bool {
        self.celebration_ms > 0.0
    }
}
