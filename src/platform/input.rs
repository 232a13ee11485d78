//! Keyboard/pointer events folded into per-update input snapshots

use crate::sim::TickInput;

/// A discrete input event from the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Left key pressed (true) or released (false)
    MoveLeft(bool),
    /// Right key pressed (true) or released (false)
    MoveRight(bool),
    /// Release every resting ball
    Launch,
    /// Start over from level 1
    Restart,
}

/// Map a `KeyboardEvent.code` to an action
///
/// Launch and restart only fire on key down.
pub fn action_for_key(code: &str, pressed: bool) -> Option<InputAction> {
    match code {
        "ArrowLeft" => Some(InputAction::MoveLeft(pressed)),
        "ArrowRight" => Some(InputAction::MoveRight(pressed)),
        "Space" if pressed => Some(InputAction::Launch),
        "KeyR" if pressed => Some(InputAction::Restart),
        _ => None,
    }
}

/// Held keys plus one-shots waiting for the next update
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    left_held: bool,
    right_held: bool,
    launch_pending: bool,
    restart_pending: bool,
}

impl InputState {
    pub fn apply(&mut self, action: InputAction) {
        match action {
            InputAction::MoveLeft(held) => self.left_held = held,
            InputAction::MoveRight(held) => self.right_held = held,
            InputAction::Launch => self.launch_pending = true,
            InputAction::Restart => self.restart_pending = true,
        }
    }

    /// Input for the next update; one-shots are consumed
    pub fn take_tick_input(&mut self) -> TickInput {
        let input = TickInput {
            move_left: self.left_held,
            move_right: self.right_held,
            launch: self.launch_pending,
            restart: self.restart_pending,
        };
        self.launch_pending = false;
        self.restart_pending = false;
        input
    }

    /// Drop held keys (e.g. when the window loses focus)
    pub fn release_all(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(
            action_for_key("ArrowLeft", true),
            Some(InputAction::MoveLeft(true))
        );
        assert_eq!(
            action_for_key("ArrowRight", false),
            Some(InputAction::MoveRight(false))
        );
        assert_eq!(action_for_key("Space", true), Some(InputAction::Launch));
        assert_eq!(action_for_key("Space", false), None);
        assert_eq!(action_for_key("KeyR", true), Some(InputAction::Restart));
        assert_eq!(action_for_key("KeyQ", true), None);
    }

    #[test]
    fn test_held_keys_persist_across_updates() {
        let mut input = InputState::default();
        input.apply(InputAction::MoveLeft(true));

        assert!(input.take_tick_input().move_left);
        assert!(input.take_tick_input().move_left);

        input.apply(InputAction::MoveLeft(false));
        assert!(!input.take_tick_input().move_left);
    }

    #[test]
    fn test_one_shots_fire_once() {
        let mut input = InputState::default();
        input.apply(InputAction::Launch);
        input.apply(InputAction::Restart);

        let first = input.take_tick_input();
        assert!(first.launch);
        assert!(first.restart);

        let second = input.take_tick_input();
        assert!(!second.launch);
        assert!(!second.restart);
    }

    #[test]
    fn test_release_all() {
        let mut input = InputState::default();
        input.apply(InputAction::MoveRight(true));
        input.apply(InputAction::Launch);
        input.release_all();
        assert_eq!(input.take_tick_input(), TickInput::default());
    }
}
