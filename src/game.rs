//! Frame controller
//!
//! Owns the simulation plus the input and clock state the drivers feed it.
//! Drivers call [`Game::frame`] once per animation frame, render from
//! [`Game::snapshot`], and forward [`Game::drain_events`] to the UI.

use crate::platform::{FrameClock, InputAction, InputState};
use crate::settings::Settings;
use crate::sim::{self, GameEvent, GameState, HudStatus, RenderSnapshot, World};
use crate::tuning::Tuning;

pub struct Game {
    state: GameState,
    input: InputState,
    clock: FrameClock,
}

impl Game {
    pub fn new(seed: u64, tuning: Tuning, settings: Settings, world: World) -> Self {
        log::info!("New game (seed {}, world {}x{})", seed, world.width, world.height);
        Self {
            state: GameState::new(seed, tuning, settings, world),
            input: InputState::default(),
            clock: FrameClock::new(),
        }
    }

    /// Run one update with the step measured from the frame timestamp
    pub fn frame(&mut self, now_secs: f64) {
        let dt = self.clock.tick(now_secs);
        self.update(dt);
    }

    /// Run one update of `dt` seconds with the pending input
    pub fn update(&mut self, dt: f32) {
        let input = self.input.take_tick_input();
        sim::update(&mut self.state, &input, dt);
    }

    pub fn snapshot(&self) -> RenderSnapshot<'_> {
        self.state.snapshot()
    }

    pub fn on_resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
    }

    pub fn on_input(&mut self, action: InputAction) {
        self.input.apply(action);
    }

    /// Window lost focus: stop treating keys as held
    pub fn on_blur(&mut self) {
        self.input.release_all();
        self.clock.reset();
    }

    /// Lose overlay "advance" choice
    pub fn advance_or_reset(&mut self) {
        sim::advance_or_reset(&mut self.state);
    }

    /// Lose overlay "retry" choice
    pub fn retry_same_level(&mut self) {
        sim::retry_same_level(&mut self.state);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    /// Last values published to the HUD
    pub fn status(&self) -> HudStatus {
        self.state.status
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
