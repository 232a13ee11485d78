//! Collision tests for axis-aligned rectangles and circles
//!
//! All coordinates are world pixels with y growing downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Bounding square of a circle
    pub fn around_circle(center: Vec2, radius: f32) -> Self {
        Self {
            pos: center - Vec2::splat(radius),
            size: Vec2::splat(radius * 2.0),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }
}

/// Which velocity component a collision should reflect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Strict overlap test; rectangles that only share an edge do not collide
pub fn aabb_overlap(a: Rect, b: Rect) -> bool {
    let (a_max, b_max) = (a.max(), b.max());
    a.pos.x < b_max.x && a_max.x > b.pos.x && a.pos.y < b_max.y && a_max.y > b.pos.y
}

/// Circle vs rectangle using the closest point on the rectangle
///
/// Touching counts as overlap.
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect: Rect) -> bool {
    let nearest = center.clamp(rect.pos, rect.max());
    center.distance_squared(nearest) <= radius * radius
}

/// Axis along which the centers are farther apart
///
/// `offset` runs from the ball center to the brick center. Ties resolve to `Y`.
#[inline]
pub fn dominant_axis(offset: Vec2) -> Axis {
    if offset.x.abs() > offset.y.abs() {
        Axis::X
    } else {
        Axis::Y
    }
}

/// Point the velocity component on the dominant axis away from the obstacle
pub fn reflect_away(velocity: Vec2, offset: Vec2) -> Vec2 {
    match dominant_axis(offset) {
        Axis::X => {
            let vx = if offset.x > 0.0 { -velocity.x.abs() } else { velocity.x.abs() };
            Vec2::new(vx, velocity.y)
        }
        Axis::Y => {
            let vy = if offset.y > 0.0 { -velocity.y.abs() } else { velocity.y.abs() };
            Vec2::new(velocity.x, vy)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(aabb_overlap(a, Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!aabb_overlap(a, Rect::new(20.0, 0.0, 10.0, 10.0)));
        // Shared edge is not an overlap
        assert!(!aabb_overlap(a, Rect::new(10.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn test_circle_rect_overlap() {
        let paddle = Rect::new(100.0, 500.0, 120.0, 16.0);

        // Resting just above the paddle
        assert!(!circle_rect_overlap(Vec2::new(160.0, 490.0), 8.0, paddle));
        // Dipping into the top edge
        assert!(circle_rect_overlap(Vec2::new(160.0, 495.0), 8.0, paddle));
        // Exactly touching counts
        assert!(circle_rect_overlap(Vec2::new(160.0, 492.0), 8.0, paddle));
        // Near a corner but outside the radius
        assert!(!circle_rect_overlap(Vec2::new(94.0, 494.0), 8.0, paddle));
    }

    #[test]
    fn test_reflect_away_vertical() {
        // Brick above a ball moving up: vy must turn downward
        let v = reflect_away(Vec2::new(50.0, -200.0), Vec2::new(2.0, -15.0));
        assert_eq!(v, Vec2::new(50.0, 200.0));
    }

    #[test]
    fn test_reflect_away_horizontal() {
        // Brick to the right: vx must point left regardless of incoming sign
        let v = reflect_away(Vec2::new(120.0, 80.0), Vec2::new(30.0, 4.0));
        assert_eq!(v, Vec2::new(-120.0, 80.0));
        let v = reflect_away(Vec2::new(-120.0, 80.0), Vec2::new(30.0, 4.0));
        assert_eq!(v, Vec2::new(-120.0, 80.0));
    }

    #[test]
    fn test_dominant_axis_tie_prefers_y() {
        assert_eq!(dominant_axis(Vec2::new(5.0, -5.0)), Axis::Y);
    }
}
