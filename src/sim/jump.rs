//! Jump height as an explicit function of time
//!
//! Collision checks read `height_at(elapsed)` instead of sampling a live
//! animation value, so the jump arc is deterministic and testable without a
//! renderer. The curve matches the presentation animation: quadratic ease-out
//! up for the first half, quadratic ease-in back down for the second.

use serde::{Deserialize, Serialize};

use crate::consts::{JUMP_DURATION_MS, JUMP_PEAK};

/// Vertical offset above the ground `elapsed_ms` after a jump started.
///
/// 0 before the jump and from [`JUMP_DURATION_MS`] onward; peaks at
/// [`JUMP_PEAK`] exactly at the halfway point.
pub fn height_at(elapsed_ms: f32) -> f32 {
    let half = JUMP_DURATION_MS / 2.0;
    if elapsed_ms <= 0.0 {
        0.0
    } else if elapsed_ms < half {
        let u = elapsed_ms / half;
        JUMP_PEAK * (1.0 - (1.0 - u) * (1.0 - u))
    } else if elapsed_ms < JUMP_DURATION_MS {
        let u = (elapsed_ms - half) / half;
        JUMP_PEAK * (1.0 - u * u)
    } else {
        0.0
    }
}

/// The side-scroller's player: grounded or mid-flight.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Runner {
    flight_ms: Option<f32>,
}

impl Runner {
    /// Whether a new jump may be triggered (no re-trigger mid-flight).
    pub fn can_jump(&self) -> bool {
        self.flight_ms.is_none()
    }

    /// Start a jump. Ignored while already airborne.
    pub fn jump(&mut self) {
        if self.flight_ms.is_none() {
            self.flight_ms = Some(0.0);
        }
    }

    /// Advance flight time; landing re-arms the jump gate.
    pub fn advance(&mut self, dt_ms: f32) {
        if let Some(elapsed) = &mut self.flight_ms {
            *elapsed += dt_ms;
            if *elapsed >= JUMP_DURATION_MS {
                self.flight_ms = None;
            }
        }
    }

    /// Current height above the ground.
    pub fn height(&self) -> f32 {
        self.flight_ms.map(height_at).unwrap_or(0.0)
    }
}
