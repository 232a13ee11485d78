//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - Seeded RNG only
//! - Stable iteration order (by index)
//! - UI notifications go out as queued events

pub mod collision;
pub mod flow;
pub mod level;
pub mod particles;
pub mod state;
pub mod tick;

pub use collision::{Axis, Rect, aabb_overlap, circle_rect_overlap, dominant_axis, reflect_away};
pub use flow::{advance_or_reset, lose_ball_set, next_level, reset_game, retry_same_level};
pub use level::{
    brick_count_for_level, generate_level, grid_layout, layout_bricks, make_ball,
    speed_factor_for_level,
};
pub use particles::{PARTICLE_DAMPING_PER_UPDATE, spawn_burst, spawn_level_shimmer};
pub use state::{
    Ball, Brick, BrickTint, GameEvent, GamePhase, GameState, HudStatus, Paddle, Particle,
    RenderSnapshot, World,
};
pub use tick::{TickInput, update};
