//! Cosmetic particle effects
//!
//! Particles are never read by collision or scoring code.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::state::{Brick, GameState, Particle};
use crate::{Rgba, mix_rgb, with_alpha};

/// Velocity multiplier applied once per update call.
///
/// Not scaled by dt, so decay depends on frame rate.
pub const PARTICLE_DAMPING_PER_UPDATE: f32 = 0.99;

/// Shards per brick burst (plus one flash)
pub const BURST_SHARDS: usize = 26;

/// Accent colors blended into burst shards
const ACCENT_WARM: Rgba = [1.0, 0.83, 0.42, 1.0];
const ACCENT_VIOLET: Rgba = [0.9, 0.4, 1.0, 1.0];
const FLASH: Rgba = [1.0, 1.0, 1.0, 0.25];

/// Push a particle unless the quality cap is reached
fn push_capped(state: &mut GameState, particle: Particle) -> bool {
    if state.particles.len() >= state.settings.max_particles() {
        return false;
    }
    state.particles.push(particle);
    true
}

/// Brick destruction burst at `pos`, tinted toward the brick color
pub fn spawn_burst(state: &mut GameState, pos: Vec2, base_color: Rgba) {
    for _ in 0..BURST_SHARDS {
        let angle = state.rng.random::<f32>() * TAU;
        let speed = (100.0 + state.rng.random::<f32>() * 240.0) * 0.01;
        let size = 2.0 + state.rng.random::<f32>() * 4.0;
        let life = 0.55 + state.rng.random::<f32>() * 0.6;
        let accent = if state.rng.random_bool(0.5) {
            ACCENT_WARM
        } else {
            ACCENT_VIOLET
        };
        let rotation = state.rng.random::<f32>() * TAU;

        let shard = Particle {
            pos,
            vel: Vec2::from_angle(angle) * speed,
            life,
            max_life: life,
            size,
            color: mix_rgb(accent, base_color),
            rotation,
        };
        if !push_capped(state, shard) {
            return;
        }
    }

    if state.settings.flashes() {
        push_capped(
            state,
            Particle {
                pos,
                vel: Vec2::ZERO,
                life: 0.15,
                max_life: 0.15,
                size: 46.0,
                color: FLASH,
                rotation: 0.0,
            },
        );
    }
}

/// Brief flash over every brick of a freshly generated level
pub fn spawn_level_shimmer(state: &mut GameState) {
    if !state.settings.flashes() {
        return;
    }
    let flashes: Vec<Particle> = state.bricks.iter().map(shimmer_for).collect();
    for flash in flashes {
        if !push_capped(state, flash) {
            break;
        }
    }
}

fn shimmer_for(brick: &Brick) -> Particle {
    Particle {
        pos: brick.rect.center(),
        vel: Vec2::ZERO,
        life: 0.25,
        max_life: 0.25,
        size: brick.rect.size.y * 1.5,
        color: with_alpha(brick.tint.rgba(), 0.35),
        rotation: 0.0,
    }
}

/// Move, damp and age every particle; drop the expired ones
pub fn integrate_particles(particles: &mut Vec<Particle>, dt: f32) {
    for p in particles.iter_mut() {
        p.pos += p.vel;
        p.vel *= PARTICLE_DAMPING_PER_UPDATE;
        p.life -= dt;
    }
    particles.retain(|p| p.life > 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{QualityPreset, Settings};
    use crate::sim::state::World;
    use crate::tuning::Tuning;

    fn state_with(settings: Settings) -> GameState {
        let mut state = GameState::new(3, Tuning::default(), settings, World::default());
        state.particles.clear();
        state
    }

    #[test]
    fn test_burst_spawns_shards_and_flash() {
        let mut state = state_with(Settings::default());
        spawn_burst(&mut state, Vec2::new(100.0, 100.0), [1.0, 0.0, 0.0, 1.0]);

        assert_eq!(state.particles.len(), BURST_SHARDS + 1);
        for shard in &state.particles[..BURST_SHARDS] {
            assert_eq!(shard.pos, Vec2::new(100.0, 100.0));
            assert!(shard.life >= 0.55 && shard.life <= 1.15);
            assert!(shard.size >= 2.0 && shard.size <= 6.0);
            let speed = shard.vel.length();
            assert!(speed >= 0.99 && speed <= 3.41, "speed {speed}");
            assert_eq!(shard.color[3], 1.0);
        }
        let flash = state.particles[BURST_SHARDS];
        assert_eq!(flash.size, 46.0);
        assert_eq!(flash.vel, Vec2::ZERO);
    }

    #[test]
    fn test_burst_respects_cap() {
        let mut state = state_with(Settings::from_preset(QualityPreset::Low));
        for _ in 0..10 {
            spawn_burst(&mut state, Vec2::ZERO, [1.0; 4]);
        }
        assert_eq!(state.particles.len(), 100);
    }

    #[test]
    fn test_reduced_motion_skips_flashes() {
        let mut state = state_with(Settings {
            reduced_motion: true,
            ..Settings::default()
        });
        spawn_burst(&mut state, Vec2::ZERO, [1.0; 4]);
        assert_eq!(state.particles.len(), BURST_SHARDS);

        spawn_level_shimmer(&mut state);
        assert_eq!(state.particles.len(), BURST_SHARDS);
    }

    #[test]
    fn test_shimmer_covers_each_brick() {
        let mut state = state_with(Settings::default());
        spawn_level_shimmer(&mut state);
        assert_eq!(state.particles.len(), state.bricks.len());
        assert_eq!(state.particles[0].pos, state.bricks[0].rect.center());
    }

    #[test]
    fn test_integrate_damps_per_call() {
        let mut particles = vec![Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(2.0, 0.0),
            life: 1.0,
            max_life: 1.0,
            size: 3.0,
            color: [1.0; 4],
            rotation: 0.0,
        }];

        integrate_particles(&mut particles, 0.016);
        assert_eq!(particles[0].pos, Vec2::new(2.0, 0.0));
        assert!((particles[0].vel.x - 1.98).abs() < 1e-6);

        // Same damping regardless of dt
        integrate_particles(&mut particles, 0.0);
        assert!((particles[0].vel.x - 1.98 * 0.99).abs() < 1e-6);
    }

    #[test]
    fn test_integrate_drops_expired() {
        let base = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            life: 0.1,
            max_life: 0.1,
            size: 3.0,
            color: [1.0; 4],
            rotation: 0.0,
        };
        let mut particles = vec![base, Particle { life: 0.5, ..base }];
        integrate_particles(&mut particles, 0.1);
        assert_eq!(particles.len(), 1);
        assert!((particles[0].life - 0.4).abs() < 1e-6);
    }
}
