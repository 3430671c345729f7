//! Axis-aligned rectangle collision
//!
//! Two tests drive the whole game: a strict AABB overlap for hazards and
//! pickups, and a deliberately forgiving landing test for platforms.

use glam::Vec2;

use crate::consts::{LANDING_TOLERANCE_ABOVE, LANDING_TOLERANCE_BELOW};

/// Axis-aligned rectangle, origin at the top-left corner (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// True if the horizontal extents overlap
    #[inline]
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.x < other.right() && self.right() > other.x
    }
}

/// Standard AABB overlap test. Touching edges do not count.
#[inline]
pub fn rectangles_overlap(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// Permissive platform landing test
///
/// The player's bottom edge may sit anywhere from 15px above the platform top
/// down to 20px below the platform body, so late or early jumps still land.
/// Only counts while falling (`velocity_y > 0`), which lets the player jump
/// up through a platform from below.
#[inline]
pub fn landing_contact(player: &Rect, velocity_y: f32, platform: &Rect) -> bool {
    let feet = player.bottom();
    let above = feet > platform.y - LANDING_TOLERANCE_ABOVE;
    let below = feet < platform.bottom() + LANDING_TOLERANCE_BELOW;
    above && below && player.overlaps_x(platform) && velocity_y > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_basic() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rectangles_overlap(&a, &Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!rectangles_overlap(&a, &Rect::new(20.0, 0.0, 10.0, 10.0)));
        // Shared edge is not an overlap
        assert!(!rectangles_overlap(&a, &Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!rectangles_overlap(&a, &Rect::new(0.0, 10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_overlap_containment() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 5.0, 5.0);
        assert!(rectangles_overlap(&outer, &inner));
        assert!(rectangles_overlap(&inner, &outer));
    }

    #[test]
    fn test_landing_band_above() {
        let platform = Rect::new(0.0, 500.0, 200.0, 30.0);
        // Feet 14px above the top: lands
        let player = Rect::new(50.0, 446.0, 40.0, 40.0);
        assert!(landing_contact(&player, 1.0, &platform));
        // Feet exactly 15px above: does not
        let player = Rect::new(50.0, 445.0, 40.0, 40.0);
        assert!(!landing_contact(&player, 1.0, &platform));
    }

    #[test]
    fn test_landing_band_below() {
        let platform = Rect::new(0.0, 500.0, 200.0, 30.0);
        // Feet 19px below the platform body: still lands
        let player = Rect::new(50.0, 509.0, 40.0, 40.0);
        assert!(landing_contact(&player, 1.0, &platform));
        // Feet 20px below: falls through
        let player = Rect::new(50.0, 510.0, 40.0, 40.0);
        assert!(!landing_contact(&player, 1.0, &platform));
    }

    #[test]
    fn test_landing_requires_falling() {
        let platform = Rect::new(0.0, 500.0, 200.0, 30.0);
        let player = Rect::new(50.0, 461.0, 40.0, 40.0);
        assert!(landing_contact(&player, 0.3, &platform));
        assert!(!landing_contact(&player, 0.0, &platform));
        assert!(!landing_contact(&player, -4.0, &platform));
    }

    #[test]
    fn test_landing_requires_horizontal_overlap() {
        let platform = Rect::new(100.0, 500.0, 200.0, 30.0);
        let left_of = Rect::new(60.0, 461.0, 40.0, 40.0);
        assert!(!landing_contact(&left_of, 1.0, &platform));
        let clipping_edge = Rect::new(61.0, 461.0, 40.0, 40.0);
        assert!(landing_contact(&clipping_edge, 1.0, &platform));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn overlap_is_symmetric(
                ax in -500.0f32..500.0, ay in -500.0f32..500.0,
                aw in 1.0f32..200.0, ah in 1.0f32..200.0,
                bx in -500.0f32..500.0, by in -500.0f32..500.0,
                bw in 1.0f32..200.0, bh in 1.0f32..200.0,
            ) {
                let a = Rect::new(ax, ay, aw, ah);
                let b = Rect::new(bx, by, bw, bh);
                prop_assert_eq!(rectangles_overlap(&a, &b), rectangles_overlap(&b, &a));
            }
        }
    }
}
