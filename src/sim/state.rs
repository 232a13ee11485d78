//! Game state and core simulation types
//!
//! Everything the frame loop mutates lives in [`GameState`]; the drivers only
//! ever see it through [`RenderSnapshot`] and the drained [`GameEvent`]s.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::settings::Settings;
use crate::tuning::Tuning;
use crate::Rgba;

/// Playfield bounds in pixels; origin is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub width: f32,
    pub height: f32,
}

impl World {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for World {
    fn default() -> Self {
        use crate::consts::{DEFAULT_WORLD_HEIGHT, DEFAULT_WORLD_WIDTH};
        Self::new(DEFAULT_WORLD_WIDTH, DEFAULT_WORLD_HEIGHT)
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Normal play (including a ball resting on the paddle)
    Playing,
    /// Every ball fell out; the lose overlay is waiting for advance/retry.
    /// The sim keeps running underneath it.
    BallsLost,
}

/// The player's paddle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal speed in px/s
    pub speed: f32,
}

impl Paddle {
    /// Centered horizontally, anchored above the bottom edge
    pub fn new(world: World, tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(
                world.width / 2.0 - tuning.paddle_width / 2.0,
                world.height - tuning.paddle_bottom_offset,
            ),
            size: Vec2::new(tuning.paddle_width, tuning.paddle_height),
            speed: tuning.paddle_speed,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    /// Where a resting ball's center sits
    #[inline]
    pub fn rest_point(&self, rest_offset: f32) -> Vec2 {
        Vec2::new(self.center_x(), self.pos.y - rest_offset)
    }

    /// Keep the paddle fully inside `[0, world.width]`
    pub fn clamp_to(&mut self, world: World) {
        let max_x = (world.width - self.size.x).max(0.0);
        self.pos.x = self.pos.x.clamp(0.0, max_x);
    }
}

/// A ball entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// false = resting on the paddle, ignoring velocity
    pub launched: bool,
}

impl Ball {
    /// Bounding square used for brick tests and drawing
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::around_circle(self.pos, self.radius)
    }

    /// True once the whole ball has left through the bottom
    #[inline]
    pub fn fully_below(&self, height: f32) -> bool {
        self.pos.y - self.radius > height
    }

    /// Snap onto the paddle
    pub fn rest_on(&mut self, paddle: &Paddle, rest_offset: f32) {
        self.pos = paddle.rest_point(rest_offset);
    }
}

/// Brick palette, picked by `(row + col) % 4`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickTint {
    Coral,
    Amber,
    Gold,
    Sky,
}

impl BrickTint {
    pub const ALL: [BrickTint; 4] = [
        BrickTint::Coral,
        BrickTint::Amber,
        BrickTint::Gold,
        BrickTint::Sky,
    ];

    pub fn from_grid(row: usize, col: usize) -> Self {
        Self::ALL[(row + col) % Self::ALL.len()]
    }

    pub fn rgba(&self) -> Rgba {
        match self {
            BrickTint::Coral => [0.99, 0.36, 0.30, 1.0],
            BrickTint::Amber => [0.98, 0.59, 0.25, 1.0],
            BrickTint::Gold => [0.95, 0.81, 0.31, 1.0],
            BrickTint::Sky => [0.33, 0.70, 0.97, 1.0],
        }
    }
}

/// A brick entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub rect: Rect,
    /// Always 1 today; a hit removes the brick outright
    pub hp: u8,
    pub tint: BrickTint,
}

/// A particle for visual effects (never touches gameplay)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Center of the particle
    pub pos: Vec2,
    /// Pixels per update call, not per second
    pub vel: Vec2,
    /// Seconds remaining
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
    pub color: Rgba,
    /// Radians
    pub rotation: f32,
}

impl Particle {
    /// 1.0 when fresh, 0.0 when expired
    #[inline]
    pub fn fade(&self) -> f32 {
        if self.max_life <= 0.0 {
            0.0
        } else {
            (self.life / self.max_life).max(0.0)
        }
    }
}

/// Values pushed to the HUD after every completed update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HudStatus {
    pub total_score: u64,
    pub level_score: u64,
    pub lives: u32,
    pub level: u32,
}

/// One-way notifications from the sim to the UI collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A level was (re)generated: hide overlays, retitle
    LevelStarted { level: u32 },
    /// The brick grid was cleared: show the transient notice
    LevelCleared { completed: u32, next: u32 },
    /// The transient notice's time is up
    NoticeExpired,
    /// Every ball fell out: show the lose overlay
    BallsLost {
        level: u32,
        level_score: u64,
        total_score: u64,
        lives: u32,
    },
    /// HUD refresh
    Status(HudStatus),
}

/// Read-only view handed to the renderer
#[derive(Debug, Clone, Copy)]
pub struct RenderSnapshot<'a> {
    pub world: World,
    pub paddle: &'a Paddle,
    pub balls: &'a [Ball],
    pub bricks: &'a [Brick],
    pub particles: &'a [Particle],
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub settings: Settings,
    pub world: World,
    pub phase: GamePhase,
    /// 1-based, wraps after `tuning.max_level`
    pub level: u32,
    pub lives: u32,
    pub total_score: u64,
    pub level_score: u64,
    pub paddle: Paddle,
    pub balls: Vec<Ball>,
    pub bricks: Vec<Brick>,
    pub particles: Vec<Particle>,
    /// Seconds left on the "level complete" notice
    pub notice_remaining: Option<f32>,
    /// Last values published to the HUD
    pub status: HudStatus,
    pub(crate) rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session and generate level 1
    pub fn new(seed: u64, tuning: Tuning, settings: Settings, world: World) -> Self {
        let paddle = Paddle::new(world, &tuning);
        let mut state = Self {
            world,
            phase: GamePhase::Playing,
            level: 1,
            lives: tuning.starting_lives,
            total_score: 0,
            level_score: 0,
            paddle,
            balls: Vec::new(),
            bricks: Vec::new(),
            particles: Vec::new(),
            notice_remaining: None,
            status: HudStatus::default(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            tuning,
            settings,
        };

        super::level::generate_level(&mut state, 1);
        state.status = state.hud_status();

        state
    }

    /// Session with shipped tuning and settings
    pub fn with_seed(seed: u64) -> Self {
        Self::new(seed, Tuning::default(), Settings::default(), World::default())
    }

    /// Apply new viewport bounds
    ///
    /// The paddle is re-anchored to the new bottom and resting balls follow
    /// it; flying balls are left alone and the walls catch them next update.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.world = World::new(width.max(0.0), height.max(0.0));
        self.paddle.pos.y = self.world.height - self.tuning.paddle_bottom_offset;
        self.paddle.clamp_to(self.world);

        let rest = self.tuning.ball_rest_offset;
        for ball in self.balls.iter_mut().filter(|b| !b.launched) {
            ball.rest_on(&self.paddle, rest);
        }
        log::debug!("World resized to {}x{}", width, height);
    }

    /// Release every resting ball
    pub fn launch_all(&mut self) {
        for ball in &mut self.balls {
            ball.launched = true;
        }
    }

    pub fn hud_status(&self) -> HudStatus {
        HudStatus {
            total_score: self.total_score,
            level_score: self.level_score,
            lives: self.lives,
            level: self.level,
        }
    }

    pub fn snapshot(&self) -> RenderSnapshot<'_> {
        RenderSnapshot {
            world: self.world,
            paddle: &self.paddle,
            balls: &self.balls,
            bricks: &self.bricks,
            particles: &self.particles,
        }
    }

    /// Events not yet handed to the UI
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take every pending event, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        log::trace!("event: {:?}", event);
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_starts_on_level_one() {
        let state = GameState::with_seed(7);
        assert_eq!(state.level, 1);
        assert_eq!(state.lives, 3);
        assert_eq!(state.total_score, 0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.balls.len(), 1);
        assert!(matches!(
            state.pending_events().first(),
            Some(GameEvent::LevelStarted { level: 1 })
        ));
    }

    #[test]
    fn test_paddle_starts_centered() {
        let state = GameState::with_seed(7);
        assert_eq!(state.paddle.pos, Vec2::new(340.0, 540.0));
        assert_eq!(state.paddle.center_x(), 400.0);
    }

    #[test]
    fn test_resize_reanchors_paddle_and_resting_ball() {
        let mut state = GameState::with_seed(7);
        state.paddle.pos.x = 700.0;

        state.resize(400.0, 300.0);

        assert_eq!(state.paddle.pos.y, 240.0);
        assert_eq!(state.paddle.pos.x, 280.0);
        let ball = state.balls[0];
        assert!(!ball.launched);
        assert_eq!(ball.pos, Vec2::new(340.0, 222.0));
    }

    #[test]
    fn test_resize_narrower_than_paddle() {
        let mut state = GameState::with_seed(7);
        state.resize(60.0, 300.0);
        assert_eq!(state.paddle.pos.x, 0.0);
    }

    #[test]
    fn test_drain_events_empties_queue() {
        let mut state = GameState::with_seed(7);
        assert!(!state.drain_events().is_empty());
        assert!(state.pending_events().is_empty());
    }

    #[test]
    fn test_particle_fade() {
        let p = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            life: 0.25,
            max_life: 1.0,
            size: 4.0,
            color: [1.0; 4],
            rotation: 0.0,
        };
        assert_eq!(p.fade(), 0.25);
        assert_eq!(Particle { life: -0.1, ..p }.fade(), 0.0);
    }
}
