//! Data-driven game balance
//!
//! Every gameplay number the simulation uses lives here so a driver can swap
//! in a JSON override without touching the sim. `Default` is the shipped game.

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// An extra ball spawned on top of the primary one when a level starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraBall {
    /// Horizontal offset from the world center
    pub offset_x: f32,
    /// Height above the paddle's top edge
    pub rise: f32,
    /// Base velocity, scaled by the level's speed factor
    pub velocity: [f32; 2],
    /// Spawn already in flight instead of resting on the paddle
    pub launched: bool,
}

/// Per-level special rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelOverride {
    pub level: u32,
    #[serde(default)]
    pub extra_balls: Vec<ExtraBall>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Horizontal speed in px/s
    pub paddle_speed: f32,
    /// Distance from the world bottom to the paddle's top edge
    pub paddle_bottom_offset: f32,

    // === Ball ===
    pub ball_radius: f32,
    /// Height of a resting ball's center above the paddle's top edge
    pub ball_rest_offset: f32,
    /// Serve velocity before the speed factor (x sign is randomized)
    pub ball_base_velocity: [f32; 2],
    /// Speed factor added per level above 1
    pub speed_ramp_per_level: f32,
    /// Horizontal speed at the paddle's edge after a bounce
    pub paddle_deflect_speed: f32,
    /// Minimum upward speed after a paddle bounce
    pub paddle_min_rebound: f32,

    // === Bricks ===
    pub brick_base_count: u32,
    pub brick_count_step: u32,
    pub max_bricks: u32,
    pub brick_margin: f32,
    pub brick_gap: f32,
    pub brick_height: f32,
    pub min_brick_width: f32,
    /// Cosmetic nudge applied to alternating columns/rows on some levels
    pub brick_jitter: f32,

    // === Rules ===
    pub points_per_brick: u64,
    pub starting_lives: u32,
    /// Levels past this wrap back to 1
    pub max_level: u32,
    /// How long the "level complete" notice stays up
    pub level_notice_secs: f32,
    pub level_overrides: Vec<LevelOverride>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            paddle_width: 120.0,
            paddle_height: 16.0,
            paddle_speed: 560.0,
            paddle_bottom_offset: 60.0,

            ball_radius: 8.0,
            ball_rest_offset: 18.0,
            ball_base_velocity: [240.0, -280.0],
            speed_ramp_per_level: 0.20,
            paddle_deflect_speed: 330.0,
            paddle_min_rebound: 230.0,

            brick_base_count: 10,
            brick_count_step: 5,
            max_bricks: 30,
            brick_margin: 40.0,
            brick_gap: 10.0,
            brick_height: 22.0,
            min_brick_width: 50.0,
            brick_jitter: 6.0,

            points_per_brick: 10,
            starting_lives: 3,
            max_level: 5,
            level_notice_secs: 0.9,
            level_overrides: vec![LevelOverride {
                level: 5,
                extra_balls: vec![
                    ExtraBall {
                        offset_x: -30.0,
                        rise: 18.0,
                        velocity: [-260.0, -300.0],
                        launched: true,
                    },
                    ExtraBall {
                        offset_x: 30.0,
                        rise: 18.0,
                        velocity: [260.0, -300.0],
                        launched: true,
                    },
                ],
            }],
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning document; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load a tuning document from disk
    pub fn from_path(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Reject values the simulation cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_level == 0 {
            return Err(ConfigError::invalid("max_level", "must be at least 1"));
        }
        if self.max_bricks == 0 {
            return Err(ConfigError::invalid("max_bricks", "must be at least 1"));
        }
        if self.paddle_width <= 0.0 || self.paddle_height <= 0.0 {
            return Err(ConfigError::invalid("paddle_width", "paddle size must be positive"));
        }
        if self.ball_radius <= 0.0 {
            return Err(ConfigError::invalid("ball_radius", "must be positive"));
        }
        if self.brick_height <= 0.0 || self.min_brick_width <= 0.0 {
            return Err(ConfigError::invalid("brick_height", "brick size must be positive"));
        }
        if let Some(bad) = self.level_overrides.iter().find(|o| o.level == 0) {
            return Err(ConfigError::invalid(
                "level_overrides",
                format!("level numbers start at 1 (got {})", bad.level),
            ));
        }
        Ok(())
    }

    /// Extra balls declared for a level (empty for ordinary levels)
    pub fn extra_balls_for(&self, level: u32) -> &[ExtraBall] {
        self.level_overrides
            .iter()
            .find(|o| o.level == level)
            .map(|o| o.extra_balls.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_level_five_override() {
        let tuning = Tuning::default();
        assert_eq!(tuning.extra_balls_for(5).len(), 2);
        assert!(tuning.extra_balls_for(1).is_empty());
        assert!(tuning.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "paddle_speed": 700.0, "max_level": 8 }"#).unwrap();
        assert_eq!(tuning.paddle_speed, 700.0);
        assert_eq!(tuning.max_level, 8);
        assert_eq!(tuning.paddle_width, 120.0);
        assert_eq!(tuning.extra_balls_for(5).len(), 2);
    }

    #[test]
    fn test_override_table_from_json() {
        let json = r#"{
            "level_overrides": [
                { "level": 2, "extra_balls": [
                    { "offset_x": 0.0, "rise": 40.0, "velocity": [0.0, -300.0], "launched": true }
                ] }
            ]
        }"#;
        let tuning = Tuning::from_json(json).unwrap();
        assert_eq!(tuning.extra_balls_for(2).len(), 1);
        assert!(tuning.extra_balls_for(5).is_empty());
    }

    #[test]
    fn test_rejects_zero_max_level() {
        let err = Tuning::from_json(r#"{ "max_level": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "max_level", .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
