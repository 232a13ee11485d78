//! Brickfall - A level-based Breakout arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, levels, scoring)
//! - `game`: Frame controller that owns the simulation and talks to the UI
//! - `renderer`: WebGPU rendering of colored rectangles
//! - `platform`: Input and frame-clock helpers shared by the drivers
//! - `tuning`: Data-driven game balance
//! - `settings`: Presentation preferences

pub mod config;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use config::ConfigError;
pub use game::Game;
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Longest step a single update will integrate (slow frames are clamped)
    pub const MAX_FRAME_DT: f32 = 0.032;
    /// Step used when no previous frame timestamp exists
    pub const FALLBACK_DT: f32 = 0.016;

    /// World size used until the first resize arrives
    pub const DEFAULT_WORLD_WIDTH: f32 = 800.0;
    pub const DEFAULT_WORLD_HEIGHT: f32 = 600.0;
}

/// RGBA color in 0..1 floats, laid out the way the vertex buffer expects
pub type Rgba = [f32; 4];

/// Average the RGB channels of two colors, forcing full opacity
#[inline]
pub fn mix_rgb(a: Rgba, b: Rgba) -> Rgba {
    [
        (a[0] + b[0]) * 0.5,
        (a[1] + b[1]) * 0.5,
        (a[2] + b[2]) * 0.5,
        1.0,
    ]
}

/// Replace the alpha channel of a color
#[inline]
pub fn with_alpha(color: Rgba, alpha: f32) -> Rgba {
    [color[0], color[1], color[2], alpha]
}
