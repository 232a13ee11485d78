//! Per-frame simulation step
//!
//! Core game loop that advances the simulation by one variable `dt`.

use super::collision::{aabb_overlap, circle_rect_overlap, reflect_away};
use super::flow::{lose_ball_set, next_level, reset_game, tick_notice};
use super::level::speed_factor_for_level;
use super::particles::{integrate_particles, spawn_burst};
use super::state::{Ball, GameEvent, GameState, Paddle, World};
use crate::consts::MAX_FRAME_DT;
use crate::tuning::Tuning;

/// Input snapshot for a single update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Held
    pub move_left: bool,
    /// Held
    pub move_right: bool,
    /// One-shot: release every resting ball
    pub launch: bool,
    /// One-shot: hard reset to level 1
    pub restart: bool,
}

impl TickInput {
    /// -1, 0 or +1; both held cancels out
    pub fn intent(&self) -> f32 {
        let mut dir = 0.0;
        if self.move_left {
            dir -= 1.0;
        }
        if self.move_right {
            dir += 1.0;
        }
        dir
    }
}

/// What happened to the frame while stepping one ball
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BallStep {
    Continue,
    /// The whole set was replaced; the rest of the old set is orphaned
    SetLost,
    /// The grid was cleared and the next level generated
    LevelCleared,
}

/// Advance the game by `dt` seconds
pub fn update(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = if dt.is_finite() {
        dt.clamp(0.0, MAX_FRAME_DT)
    } else {
        0.0
    };

    if input.restart {
        reset_game(state, true);
    }
    if input.launch {
        state.launch_all();
    }

    move_paddle(&mut state.paddle, input, state.world, dt);

    for index in 0..state.balls.len() {
        match step_ball(state, index, dt) {
            BallStep::Continue => {}
            BallStep::SetLost => break,
            // The bricks, balls and particles now belong to the new level;
            // nothing else runs against them this frame.
            BallStep::LevelCleared => return,
        }
    }

    integrate_particles(&mut state.particles, dt);
    tick_notice(state, dt);

    state.status = state.hud_status();
    state.emit(GameEvent::Status(state.status));
}

fn move_paddle(paddle: &mut Paddle, input: &TickInput, world: World, dt: f32) {
    paddle.pos.x += input.intent() * paddle.speed * dt;
    paddle.clamp_to(world);
}

fn step_ball(state: &mut GameState, index: usize, dt: f32) -> BallStep {
    let world = state.world;
    let paddle = state.paddle;

    {
        let ball = &mut state.balls[index];
        if !ball.launched {
            ball.rest_on(&paddle, state.tuning.ball_rest_offset);
            return BallStep::Continue;
        }
        ball.pos += ball.vel * dt;
        bounce_off_walls(ball, world);
    }

    // A ball past the bottom is only retired together with the rest of the set
    if state.balls[index].fully_below(world.height)
        && state.balls.iter().all(|b| b.fully_below(world.height))
    {
        lose_ball_set(state);
        return BallStep::SetLost;
    }

    let k = speed_factor_for_level(&state.tuning, state.level);
    {
        let ball = &mut state.balls[index];
        if circle_rect_overlap(ball.pos, ball.radius, paddle.rect()) {
            bounce_off_paddle(ball, &paddle, &state.tuning, k);
        }
    }

    // Reverse order so removal keeps the remaining indices valid
    for i in (0..state.bricks.len()).rev() {
        let ball = state.balls[index];
        let brick = state.bricks[i];
        if !aabb_overlap(ball.bounds(), brick.rect) {
            continue;
        }

        state.balls[index].vel = reflect_away(ball.vel, brick.rect.center() - ball.pos);
        state.bricks.remove(i);

        let points = state.tuning.points_per_brick;
        state.total_score += points;
        state.level_score += points;
        spawn_burst(state, ball.pos, brick.tint.rgba());

        if state.bricks.is_empty() {
            next_level(state);
            return BallStep::LevelCleared;
        }
    }

    BallStep::Continue
}

/// Reflect off the left, right and top walls; the bottom is open
fn bounce_off_walls(ball: &mut Ball, world: World) {
    let r = ball.radius;
    if ball.pos.x - r < 0.0 {
        ball.pos.x = r;
        ball.vel.x = -ball.vel.x;
    }
    if ball.pos.x + r > world.width {
        ball.pos.x = world.width - r;
        ball.vel.x = -ball.vel.x;
    }
    if ball.pos.y - r < 0.0 {
        ball.pos.y = r;
        ball.vel.y = -ball.vel.y;
    }
}

/// Send the ball back up, steering by where it struck the paddle
fn bounce_off_paddle(ball: &mut Ball, paddle: &Paddle, tuning: &Tuning, k: f32) {
    ball.pos.y = paddle.pos.y - ball.radius - 0.1;

    // -1 at the left edge, +1 at the right edge
    let hit = ((ball.pos.x - paddle.center_x()) / (paddle.size.x / 2.0)).clamp(-1.0, 1.0);
    ball.vel.x = hit * tuning.paddle_deflect_speed * k;
    ball.vel.y = -(tuning.paddle_min_rebound * k).max(ball.vel.y.abs());
}
