//! Game flow: level advance, ball loss, resets
//!
//! ```text
//! Playing(n) --grid cleared--> Playing(n+1, wrapping to 1)
//! Playing(n) --all balls out--> BallsLost
//! BallsLost --retry--> Playing(n)
//! BallsLost --advance--> Playing(n+1) if lives remain, else hard reset
//! ```

use super::level::{generate_level, make_ball};
use super::state::{GameEvent, GamePhase, GameState};

/// Level after `level`, wrapping past the last defined one
pub fn following_level(level: u32, max_level: u32) -> u32 {
    if level >= max_level { 1 } else { level + 1 }
}

/// Advance after a cleared grid (or an "advance" choice)
pub fn next_level(state: &mut GameState) {
    let completed = state.level;
    let next = following_level(completed, state.tuning.max_level);
    log::info!("Level {} complete, moving to level {}", completed, next);

    generate_level(state, next);

    // Generation clears any notice still showing, so start the new one after it
    state.notice_remaining = Some(state.tuning.level_notice_secs);
    state.emit(GameEvent::LevelCleared { completed, next });
}

/// Back to level 1 with full lives; `hard` also wipes the total score
pub fn reset_game(state: &mut GameState, hard: bool) {
    log::info!("Resetting game (hard: {})", hard);
    state.lives = state.tuning.starting_lives;
    if hard {
        state.total_score = 0;
    }
    generate_level(state, 1);
}

/// Every ball is out: take a life and put a fresh ball on the paddle
pub fn lose_ball_set(state: &mut GameState) {
    state.lives = state.lives.saturating_sub(1);
    let level = state.level;
    let ball = make_ball(state, level);
    state.balls = vec![ball];
    state.phase = GamePhase::BallsLost;

    log::info!("All balls lost on level {}, {} lives left", state.level, state.lives);
    state.emit(GameEvent::BallsLost {
        level: state.level,
        level_score: state.level_score,
        total_score: state.total_score,
        lives: state.lives,
    });
}

/// Lose overlay "advance": next level while lives remain, otherwise start over
pub fn advance_or_reset(state: &mut GameState) {
    if state.lives > 0 {
        next_level(state);
    } else {
        reset_game(state, true);
    }
}

/// Lose overlay "retry": regenerate the current level, keeping lives and score
pub fn retry_same_level(state: &mut GameState) {
    let level = state.level;
    generate_level(state, level);
}

/// Count down the "level complete" notice
pub fn tick_notice(state: &mut GameState, dt: f32) {
    if let Some(remaining) = state.notice_remaining {
        let remaining = remaining - dt;
        if remaining <= 0.0 {
            state.notice_remaining = None;
            state.emit(GameEvent::NoticeExpired);
        } else {
            state.notice_remaining = Some(remaining);
        }
    }
}
