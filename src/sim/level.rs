//! Level generation
//!
//! Bricks grow by a fixed step per level up to a cap, laid out as a nearly
//! square grid. Ball speed ramps linearly with the level number.

use glam::Vec2;
use rand::Rng;

use super::collision::Rect;
use super::particles::spawn_level_shimmer;
use super::state::{Ball, Brick, BrickTint, GameEvent, GamePhase, GameState, World};
use crate::tuning::Tuning;

/// Multiplier applied to every ball velocity on a level (1.0, 1.2, 1.4, ...)
pub fn speed_factor_for_level(tuning: &Tuning, level: u32) -> f32 {
    1.0 + level.saturating_sub(1) as f32 * tuning.speed_ramp_per_level
}

/// Number of bricks a level starts with
pub fn brick_count_for_level(tuning: &Tuning, level: u32) -> u32 {
    level
        .saturating_sub(1)
        .saturating_mul(tuning.brick_count_step)
        .saturating_add(tuning.brick_base_count)
        .min(tuning.max_bricks)
}

/// Grid dimensions for a level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub count: u32,
    pub cols: u32,
    pub rows: u32,
    pub brick_width: f32,
}

pub fn grid_layout(tuning: &Tuning, world: World, level: u32) -> GridLayout {
    let count = brick_count_for_level(tuning, level);
    let cols = ((count as f32).sqrt().ceil() as u32).max(1);
    let rows = count.div_ceil(cols);

    let grid_width = world.width - tuning.brick_margin * 2.0;
    let brick_width =
        ((grid_width / cols as f32).floor() - tuning.brick_gap).max(tuning.min_brick_width);

    GridLayout {
        count,
        cols,
        rows,
        brick_width,
    }
}

/// Place a level's bricks row-major, stopping once the count is reached
pub fn layout_bricks(tuning: &Tuning, world: World, level: u32) -> Vec<Brick> {
    let grid = grid_layout(tuning, world, level);

    // Cosmetic only
    let col_nudge = if level % 2 == 0 { tuning.brick_jitter } else { 0.0 };
    let row_nudge = if level % 3 == 0 { tuning.brick_jitter } else { 0.0 };

    let pitch_x = grid.brick_width + tuning.brick_gap;
    let pitch_y = tuning.brick_height + tuning.brick_gap;

    let mut bricks = Vec::with_capacity(grid.count as usize);
    'rows: for row in 0..grid.rows as usize {
        for col in 0..grid.cols as usize {
            if bricks.len() >= grid.count as usize {
                break 'rows;
            }
            let x = tuning.brick_margin
                + col as f32 * pitch_x
                + if col % 2 == 1 { col_nudge } else { 0.0 };
            let y = tuning.brick_margin
                + row as f32 * pitch_y
                + if row % 2 == 1 { row_nudge } else { 0.0 };

            bricks.push(Brick {
                rect: Rect::new(x, y, grid.brick_width, tuning.brick_height),
                hp: 1,
                tint: BrickTint::from_grid(row, col),
            });
        }
    }

    bricks
}

/// Fresh ball resting on the paddle with the level's serve velocity
pub fn make_ball(state: &mut GameState, level: u32) -> Ball {
    let k = speed_factor_for_level(&state.tuning, level);
    let [base_vx, base_vy] = state.tuning.ball_base_velocity;
    let sign = if state.rng.random_bool(0.5) { -1.0 } else { 1.0 };

    Ball {
        pos: state.paddle.rest_point(state.tuning.ball_rest_offset),
        vel: Vec2::new(base_vx * sign * k, base_vy * k),
        radius: state.tuning.ball_radius,
        launched: false,
    }
}

/// Build level `n`: bricks, balls, and a zeroed level score
pub fn generate_level(state: &mut GameState, n: u32) {
    let n = n.max(1);

    state.level = n;
    state.level_score = 0;
    state.phase = GamePhase::Playing;
    state.notice_remaining = None;
    state.bricks = layout_bricks(&state.tuning, state.world, n);

    let k = speed_factor_for_level(&state.tuning, n);
    let extras = state.tuning.extra_balls_for(n).to_vec();

    let mut balls = Vec::with_capacity(1 + extras.len());
    balls.push(make_ball(state, n));
    for extra in &extras {
        let mut ball = make_ball(state, n);
        ball.pos = Vec2::new(
            state.world.width / 2.0 + extra.offset_x,
            state.paddle.pos.y - extra.rise,
        );
        ball.vel = Vec2::from(extra.velocity) * k;
        ball.launched = extra.launched;
        balls.push(ball);
    }
    state.balls = balls;

    log::info!(
        "Level {}: {} bricks, {} balls, speed x{:.2}",
        n,
        state.bricks.len(),
        state.balls.len(),
        k
    );

    state.emit(GameEvent::LevelStarted { level: n });
    spawn_level_shimmer(state);
}
