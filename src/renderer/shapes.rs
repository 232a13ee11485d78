//! Shape generation for 2D primitives
//!
//! Everything on screen is a colored, optionally rotated rectangle in world
//! pixels. The pipeline maps pixels to clip space.

use glam::Vec2;

use super::vertex::{Vertex, colors};
use crate::sim::RenderSnapshot;
use crate::sim::collision::Rect;
use crate::{Rgba, with_alpha};

/// Strip drawn along the top of each brick
const BRICK_HIGHLIGHT_HEIGHT: f32 = 3.0;
/// Vignette bar thickness outside the left/right/top edges
const VIGNETTE_SIDE: f32 = 40.0;
const VIGNETTE_BOTTOM: f32 = 60.0;

/// Two triangles covering `rect`, rotated by `rotation` radians about its center
pub fn rect(rect: Rect, color: Rgba, rotation: f32) -> [Vertex; 6] {
    let center = rect.center();
    let half = rect.size / 2.0;
    let rot = Vec2::from_angle(rotation);

    let corner = |dx: f32, dy: f32| {
        let p = center + rot.rotate(Vec2::new(dx * half.x, dy * half.y));
        Vertex::new(p.x, p.y, color)
    };

    let bl = corner(-1.0, -1.0);
    let br = corner(1.0, -1.0);
    let tl = corner(-1.0, 1.0);
    let tr = corner(1.0, 1.0);

    [bl, br, tl, tl, br, tr]
}

/// Append a quad to `out`
#[inline]
fn push_rect(out: &mut Vec<Vertex>, r: Rect, color: Rgba, rotation: f32) {
    out.extend_from_slice(&rect(r, color, rotation));
}

/// Background band plus the vignette bars just outside the playfield
///
/// The base color is the pass clear color ([`colors::BACKGROUND_BOTTOM`]).
pub fn background(width: f32, height: f32) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(5 * 6);
    push_rect(
        &mut out,
        Rect::new(0.0, 0.0, width, height * 0.5),
        with_alpha(colors::BACKGROUND_TOP, colors::BACKGROUND_BAND_ALPHA),
        0.0,
    );

    let v = colors::VIGNETTE;
    push_rect(&mut out, Rect::new(-VIGNETTE_SIDE, 0.0, VIGNETTE_SIDE, height), v, 0.0);
    push_rect(&mut out, Rect::new(width, 0.0, VIGNETTE_SIDE, height), v, 0.0);
    push_rect(&mut out, Rect::new(0.0, -VIGNETTE_SIDE, width, VIGNETTE_SIDE), v, 0.0);
    push_rect(&mut out, Rect::new(0.0, height, width, VIGNETTE_BOTTOM), v, 0.0);
    out
}

/// Full frame in draw order: background, paddle, bricks, balls, particles
pub fn scene(snapshot: &RenderSnapshot<'_>) -> Vec<Vertex> {
    let quads = 6 + snapshot.bricks.len() * 2 + snapshot.balls.len() + snapshot.particles.len();
    let mut out = Vec::with_capacity(quads * 6);

    out.extend(background(snapshot.world.width, snapshot.world.height));

    push_rect(&mut out, snapshot.paddle.rect(), colors::PADDLE, 0.0);

    for brick in snapshot.bricks {
        push_rect(&mut out, brick.rect, brick.tint.rgba(), 0.0);
        let strip = Rect {
            pos: brick.rect.pos,
            size: Vec2::new(brick.rect.size.x, BRICK_HIGHLIGHT_HEIGHT),
        };
        push_rect(&mut out, strip, colors::BRICK_HIGHLIGHT, 0.0);
    }

    for ball in snapshot.balls {
        push_rect(&mut out, ball.bounds(), colors::BALL, 0.0);
    }

    for p in snapshot.particles {
        let bounds = Rect {
            pos: p.pos - Vec2::splat(p.size / 2.0),
            size: Vec2::splat(p.size),
        };
        push_rect(&mut out, bounds, with_alpha(p.color, p.fade()), p.rotation);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GameState, Particle};

    #[test]
    fn test_unrotated_rect_corners() {
        let verts = rect(Rect::new(10.0, 20.0, 30.0, 40.0), [1.0; 4], 0.0);
        let xs: Vec<f32> = verts.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = verts.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 40.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 60.0);
    }

    #[test]
    fn test_rotated_rect_keeps_center() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        let verts = rect(r, [1.0; 4], 0.7);
        let sum = verts[..3]
            .iter()
            .chain(&verts[5..])
            .fold(Vec2::ZERO, |acc, v| acc + Vec2::from(v.position));
        let center = sum / 4.0;
        assert!((center - Vec2::new(5.0, 5.0)).length() < 1e-4);
    }

    #[test]
    fn test_scene_quad_count() {
        let mut state = GameState::with_seed(5);
        state.particles.clear();
        let verts = scene(&state.snapshot());

        // background (5) + paddle + 2 per brick + 1 per ball
        let quads = 5 + 1 + state.bricks.len() * 2 + state.balls.len();
        assert_eq!(verts.len(), quads * 6);
    }

    #[test]
    fn test_particle_alpha_follows_life() {
        let mut state = GameState::with_seed(5);
        state.particles = vec![Particle {
            pos: Vec2::new(50.0, 50.0),
            vel: Vec2::ZERO,
            life: 0.5,
            max_life: 1.0,
            size: 4.0,
            color: [1.0, 0.0, 0.0, 1.0],
            rotation: 0.0,
        }];
        let verts = scene(&state.snapshot());
        let last = verts[verts.len() - 1];
        assert_eq!(last.color, [1.0, 0.0, 0.0, 0.5]);
    }

    #[test]
    fn test_brick_gets_highlight_strip() {
        let mut state = GameState::with_seed(5);
        state.particles.clear();
        state.bricks.truncate(1);
        let verts = scene(&state.snapshot());

        // background (30) + paddle (6) + brick (6), then the strip
        let strip = &verts[42..48];
        assert!(strip.iter().all(|v| v.color == colors::BRICK_HIGHLIGHT));
        let top = state.bricks[0].rect.pos.y;
        assert!(strip.iter().all(|v| v.position[1] <= top + BRICK_HIGHLIGHT_HEIGHT));
    }
}
