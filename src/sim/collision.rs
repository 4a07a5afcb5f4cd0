//! Collision geometry for axis-aligned hitboxes
//!
//! Fast bullets can move further than an enemy is wide in a single frame, so
//! static overlap is backed by a swept test: the segment between a bullet's
//! previous and current position is checked against the enemy hitbox.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle, `pos` is the top-left corner (screen y points down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict overlap: rectangles that only share an edge do not collide
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Inclusive containment on all four edges
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    /// Corners in winding order: top-left, top-right, bottom-right, bottom-left
    pub fn corners(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.left(), self.top()),
            Vec2::new(self.right(), self.top()),
            Vec2::new(self.right(), self.bottom()),
            Vec2::new(self.left(), self.bottom()),
        ]
    }

    /// True when the rectangle lies entirely past an edge of a `width` x `height` area
    /// anchored at the origin. Touching the edge still counts as inside.
    pub fn is_outside_area(&self, width: f32, height: f32) -> bool {
        self.right() < 0.0 || self.left() > width || self.bottom() < 0.0 || self.top() > height
    }
}

/// Signed orientation of `c` relative to the directed line `a -> b`
#[inline]
fn orientation(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (b.y - a.y) * (c.x - a.x) - (b.x - a.x) * (c.y - a.y)
}

/// Proper crossing of segments `p1-p2` and `q1-q2`
///
/// Both endpoint pairs must lie strictly on opposite sides of the other
/// segment. Collinear and endpoint-touching configurations are not crossings.
pub fn segments_cross(p1: Vec2, p2: Vec2, q1: Vec2, q2: Vec2) -> bool {
    let o1 = orientation(p1, p2, q1);
    let o2 = orientation(p1, p2, q2);
    let o3 = orientation(q1, q2, p1);
    let o4 = orientation(q1, q2, p2);

    o1 * o2 < 0.0 && o3 * o4 < 0.0
}

/// Does the segment `from -> to` touch the rectangle?
///
/// Either endpoint inside (inclusive) or a proper crossing of any edge.
pub fn segment_intersects_rect(from: Vec2, to: Vec2, rect: &Rect) -> bool {
    if rect.contains_point(from) || rect.contains_point(to) {
        return true;
    }

    let [tl, tr, br, bl] = rect.corners();
    segments_cross(from, to, tl, tr)
        || segments_cross(from, to, tr, br)
        || segments_cross(from, to, br, bl)
        || segments_cross(from, to, bl, tl)
}

/// Bullet vs enemy: static overlap, or the bullet's path this frame crossed the hitbox
pub fn bullet_hits(bullet_box: &Rect, bullet_prev: Vec2, enemy_box: &Rect) -> bool {
    bullet_box.overlaps(enemy_box) || segment_intersects_rect(bullet_prev, bullet_box.pos, enemy_box)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap_strict_edges() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let touching = Rect::new(10.0, 0.0, 10.0, 10.0);
        let inside = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&inside));
        assert!(inside.overlaps(&a));
    }

    #[test]
    fn test_contains_point_inclusive() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains_point(Vec2::new(0.0, 0.0)));
        assert!(r.contains_point(Vec2::new(10.0, 10.0)));
        assert!(!r.contains_point(Vec2::new(10.01, 5.0)));
    }

    #[test]
    fn test_segments_cross_proper() {
        let hit = segments_cross(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
            Vec2::new(10.0, 0.0),
        );
        assert!(hit);
    }

    #[test]
    fn test_segments_collinear_is_not_crossing() {
        let hit = segments_cross(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(5.0, 0.0),
            Vec2::new(15.0, 0.0),
        );
        assert!(!hit);
    }

    #[test]
    fn test_segments_touching_endpoint_is_not_crossing() {
        let hit = segments_cross(
            Vec2::new(0.0, 0.0),
            Vec2::new(5.0, 5.0),
            Vec2::new(5.0, 5.0),
            Vec2::new(10.0, 0.0),
        );
        assert!(!hit);
    }

    #[test]
    fn test_swept_catches_tunneling() {
        // Thin enemy, bullet jumps clean over it in one frame
        let enemy = Rect::new(100.0, 0.0, 4.0, 100.0);
        let prev = Vec2::new(50.0, 50.0);
        let cur = Rect::new(150.0, 50.0, 10.0, 10.0);

        assert!(!enemy.contains_point(prev));
        assert!(!enemy.contains_point(cur.pos));
        assert!(!cur.overlaps(&enemy));
        assert!(bullet_hits(&cur, prev, &enemy));
    }

    #[test]
    fn test_swept_miss_passes_beside() {
        let enemy = Rect::new(100.0, 0.0, 4.0, 100.0);
        let prev = Vec2::new(50.0, 150.0);
        let cur = Rect::new(150.0, 150.0, 10.0, 10.0);
        assert!(!bullet_hits(&cur, prev, &enemy));
    }

    #[test]
    fn test_outside_area() {
        let (w, h) = (800.0, 600.0);
        assert!(Rect::new(-31.0, 10.0, 30.0, 30.0).is_outside_area(w, h));
        assert!(Rect::new(801.0, 10.0, 30.0, 30.0).is_outside_area(w, h));
        assert!(Rect::new(10.0, 601.0, 30.0, 30.0).is_outside_area(w, h));
        // Partially over the border is still inside
        assert!(!Rect::new(-15.0, 10.0, 30.0, 30.0).is_outside_area(w, h));
        assert!(!Rect::new(790.0, 590.0, 30.0, 30.0).is_outside_area(w, h));
    }

    proptest! {
        #[test]
        fn prop_unit_toward_is_finite(
            ax in -1.0e6f32..1.0e6, ay in -1.0e6f32..1.0e6,
            bx in -1.0e6f32..1.0e6, by in -1.0e6f32..1.0e6,
        ) {
            let u = crate::unit_toward(Vec2::new(ax, ay), Vec2::new(bx, by));
            prop_assert!(u.is_finite());
            let len = u.length();
            prop_assert!(len == 0.0 || (len - 1.0).abs() < 1e-3);
        }

        #[test]
        fn prop_segment_with_endpoint_inside_hits(
            x in 0.0f32..100.0, y in 0.0f32..100.0,
            fx in -500.0f32..500.0, fy in -500.0f32..500.0,
        ) {
            let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
            prop_assert!(segment_intersects_rect(Vec2::new(fx, fy), Vec2::new(x, y), &rect));
        }

        #[test]
        fn prop_horizontal_sweep_through_rect_hits(
            y in 1.0f32..99.0, start in -400.0f32..-1.0, end in 101.0f32..500.0,
        ) {
            let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
            prop_assert!(segment_intersects_rect(Vec2::new(start, y), Vec2::new(end, y), &rect));
        }
    }
}
