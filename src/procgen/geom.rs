//! Axis-aligned rectangle geometry for placement checks
//!
//! Every placement decision in the generator runs through these predicates.
//! Spacing rules are expressed as "buffered" overlap tests: one rectangle is
//! inflated by a margin before the intersection test, so a passing candidate
//! is guaranteed a minimum clearance rather than mere non-intersection.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in world space (y grows downward, as on canvas)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (x + width)
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge (y + height)
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Center point
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// The rectangle grown by `buffer` on all four sides.
    ///
    /// A negative buffer shrinks instead, which the goal placer uses to
    /// tolerate slight visual overlap.
    pub fn inflated(&self, buffer: f32) -> Rect {
        Rect {
            x: self.x - buffer,
            y: self.y - buffer,
            width: self.width + buffer * 2.0,
            height: self.height + buffer * 2.0,
        }
    }

    /// Standard AABB intersection test (strict, touching edges don't count)
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}

/// True if `candidate` intersects any rectangle in `existing` after each is
/// inflated by `buffer`. Returns false for an empty slice.
pub fn overlaps_any_buffered<'a, I>(candidate: &Rect, existing: I, buffer: f32) -> bool
where
    I: IntoIterator<Item = &'a Rect>,
{
    existing
        .into_iter()
        .any(|r| candidate.overlaps(&r.inflated(buffer)))
}

/// Squared distance between two points (placement checks never need the root)
#[inline]
pub fn dist_sq(a: Vec2, b: Vec2) -> f32 {
    a.distance_squared(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap_basic() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        let c = Rect::new(20.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        // But inflating by any positive buffer makes them overlap
        assert!(a.overlaps(&b.inflated(1.0)));
    }

    #[test]
    fn test_buffered_scan_empty_is_false() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let empty: &[Rect] = &[];
        assert!(!overlaps_any_buffered(&a, empty, 30.0));
    }

    #[test]
    fn test_buffered_scan_respects_spacing() {
        let candidate = Rect::new(120.0, 0.0, 50.0, 20.0);
        let existing = vec![Rect::new(0.0, 0.0, 100.0, 20.0)];
        // 20px gap, 30px buffer: too close
        assert!(overlaps_any_buffered(&candidate, &existing, 30.0));
        // 20px gap, 10px buffer: fine
        assert!(!overlaps_any_buffered(&candidate, &existing, 10.0));
    }

    #[test]
    fn test_negative_buffer_shrinks() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(9.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&b.inflated(-2.0)));
    }

    fn arb_rect() -> impl Strategy<Value = Rect> {
        (
            -1000.0f32..1000.0,
            -1000.0f32..1000.0,
            1.0f32..500.0,
            1.0f32..500.0,
        )
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn prop_overlap_symmetric(a in arb_rect(), b in arb_rect()) {
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn prop_rect_overlaps_itself(a in arb_rect()) {
            prop_assert!(a.overlaps(&a));
        }

        // Inflating either side of the pair by the same margin is equivalent,
        // so buffered checks don't depend on which rect carries the buffer.
        #[test]
        fn prop_buffer_side_independent(a in arb_rect(), b in arb_rect(), buf in 0.0f32..100.0) {
            prop_assert_eq!(
                a.overlaps(&b.inflated(buf)),
                a.inflated(buf).overlaps(&b)
            );
        }
    }
}
