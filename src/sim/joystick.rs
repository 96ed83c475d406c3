//! Virtual joystick input mapping
//!
//! Converts raw pointer coordinates into a clamped 2D offset from a measured
//! base point, and tracks which contact owns each control zone. The tricky
//! contract is multi-touch: a zone adopts the first contact only while it has
//! none, and releases exactly when its tracked identifier disappears from the
//! active-contacts list (end events for individual contacts can be missed on
//! some devices).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::JOYSTICK_MAX_RADIUS;

/// Platform contact identifier
pub type TouchId = u64;

/// One active contact as reported by the screen layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Touch {
    pub id: TouchId,
    pub pos: Vec2,
}

/// Clamp the delta from `base` to `point` inside a circle of `max_radius`.
///
/// Deltas already inside the circle pass through untouched; longer ones are
/// rescaled along their own direction, so the angle is preserved exactly.
/// The zero delta never reaches the angle math.
pub fn clamped_offset(base: Vec2, point: Vec2, max_radius: f32) -> Vec2 {
    let delta = point - base;
    let distance = delta.length();
    if distance <= max_radius {
        return delta;
    }
    let angle = delta.y.atan2(delta.x);
    Vec2::new(angle.cos(), angle.sin()) * max_radius
}

/// One joystick zone: a base point, at most one tracked contact, and the
/// current clamped offset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ControlZone {
    base: Option<Vec2>,
    tracked: Option<TouchId>,
    /// Current deflection from the base, magnitude <= [`JOYSTICK_MAX_RADIUS`]
    pub offset: Vec2,
}

impl ControlZone {
    /// Record the zone's measured center. Pointer input is ignored until the
    /// layout pass has provided this.
    pub fn set_base(&mut self, center: Vec2) {
        self.base = Some(center);
    }

    /// Drop the tracked contact and recenter, keeping the measured base.
    pub fn reset(&mut self) {
        self.tracked = None;
        self.offset = Vec2::ZERO;
    }

    /// Whether a contact currently owns this zone.
    pub fn is_engaged(&self) -> bool {
        self.tracked.is_some()
    }

    /// A contact landed in the zone. Adopted only if the zone is free.
    pub fn touch_start(&mut self, touches: &[Touch]) {
        if self.tracked.is_some() {
            return;
        }
        let Some(first) = touches.first() else {
            return;
        };
        self.tracked = Some(first.id);
        self.apply(first.pos);
    }

    /// Contacts moved; follow the one we track, ignore the rest.
    pub fn touch_move(&mut self, touches: &[Touch]) {
        let Some(id) = self.tracked else {
            return;
        };
        if let Some(touch) = touches.iter().find(|t| t.id == id) {
            self.apply(touch.pos);
        }
    }

    /// An end event fired. The zone releases only when its tracked id is
    /// absent from the remaining active contacts, not on any particular
    /// contact lifting.
    pub fn touch_end(&mut self, touches: &[Touch]) {
        let Some(id) = self.tracked else {
            return;
        };
        if !touches.iter().any(|t| t.id == id) {
            self.reset();
        }
    }

    fn apply(&mut self, point: Vec2) {
        let Some(base) = self.base else {
            return; // base not measured yet
        };
        self.offset = clamped_offset(base, point, JOYSTICK_MAX_RADIUS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn touch(id: TouchId, x: f32, y: f32) -> Touch {
        Touch {
            id,
            pos: Vec2::new(x, y),
        }
    }

    #[test]
    fn short_delta_passes_through() {
        let base = Vec2::new(100.0, 100.0);
        let offset = clamped_offset(base, Vec2::new(110.0, 95.0), 40.0);
        assert_eq!(offset, Vec2::new(10.0, -5.0));
    }

    #[test]
    fn zero_delta_is_zero() {
        let base = Vec2::new(100.0, 100.0);
        assert_eq!(clamped_offset(base, base, 40.0), Vec2::ZERO);
    }

    #[test]
    fn zone_ignores_input_before_base_is_measured() {
        let mut zone = ControlZone::default();
        zone.touch_start(&[touch(1, 500.0, 500.0)]);
        assert_eq!(zone.offset, Vec2::ZERO);
        // the contact is still adopted so a later layout pass picks it up
        assert!(zone.is_engaged());
    }

    #[test]
    fn zone_adopts_only_while_free() {
        let mut zone = ControlZone::default();
        zone.set_base(Vec2::new(100.0, 100.0));
        zone.touch_start(&[touch(1, 110.0, 100.0)]);
        zone.touch_start(&[touch(2, 50.0, 100.0)]);
        // second contact must not steal the zone
        zone.touch_move(&[touch(1, 120.0, 100.0), touch(2, 50.0, 100.0)]);
        assert_eq!(zone.offset, Vec2::new(20.0, 0.0));
    }

    #[test]
    fn zone_releases_only_when_tracked_contact_vanishes() {
        let mut zone = ControlZone::default();
        zone.set_base(Vec2::new(100.0, 100.0));
        zone.touch_start(&[touch(7, 110.0, 100.0)]);

        // another contact lifted; ours is still listed
        zone.touch_end(&[touch(7, 110.0, 100.0)]);
        assert!(zone.is_engaged());
        assert_ne!(zone.offset, Vec2::ZERO);

        // tracked contact gone from the list, even without its own end event
        zone.touch_end(&[touch(9, 10.0, 10.0)]);
        assert!(!zone.is_engaged());
        assert_eq!(zone.offset, Vec2::ZERO);
    }

    proptest! {
        #[test]
        fn long_deltas_clamp_to_radius_preserving_angle(
            dx in -2000.0f32..2000.0,
            dy in -2000.0f32..2000.0,
        ) {
            let base = Vec2::new(300.0, 300.0);
            let point = base + Vec2::new(dx, dy);
            let raw = Vec2::new(dx, dy);
            prop_assume!(raw.length() > JOYSTICK_MAX_RADIUS);

            let offset = clamped_offset(base, point, JOYSTICK_MAX_RADIUS);
            prop_assert!((offset.length() - JOYSTICK_MAX_RADIUS).abs() < 1e-3);

            // compare unit directions; comparing raw angles would trip over
            // the wrap at +/-pi
            let raw_dir = raw / raw.length();
            let clamped_dir = offset / offset.length();
            prop_assert!((raw_dir - clamped_dir).length() < 1e-4);
        }

        #[test]
        fn offset_never_exceeds_radius(
            dx in -2000.0f32..2000.0,
            dy in -2000.0f32..2000.0,
        ) {
            let base = Vec2::new(300.0, 300.0);
            let offset = clamped_offset(base, base + Vec2::new(dx, dy), JOYSTICK_MAX_RADIUS);
            prop_assert!(offset.length() <= JOYSTICK_MAX_RADIUS + 1e-3);
        }
    }
}
