//! Frame timing

use crate::consts::{FALLBACK_DT, MAX_FRAME_DT};

/// Turns frame timestamps into clamped update steps
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Step for a frame stamped `now` (seconds)
    ///
    /// The first frame, a zero delta, or a clock going backwards yields
    /// `FALLBACK_DT`; long gaps are capped at `MAX_FRAME_DT`.
    pub fn tick(&mut self, now: f64) -> f32 {
        let dt = match self.last {
            Some(last) if now > last => ((now - last) as f32).min(MAX_FRAME_DT),
            _ => FALLBACK_DT,
        };
        self.last = Some(now);
        dt
    }

    /// Forget the last timestamp (after the tab was hidden, say)
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_uses_fallback() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(10.0), FALLBACK_DT);
    }

    #[test]
    fn test_regular_frames() {
        let mut clock = FrameClock::new();
        clock.tick(1.0);
        let dt = clock.tick(1.02);
        assert!((dt - 0.02).abs() < 1e-5);
    }

    #[test]
    fn test_long_gap_is_capped() {
        let mut clock = FrameClock::new();
        clock.tick(1.0);
        assert_eq!(clock.tick(3.0), MAX_FRAME_DT);
    }

    #[test]
    fn test_zero_delta_and_reset() {
        let mut clock = FrameClock::new();
        clock.tick(2.0);
        assert_eq!(clock.tick(2.0), FALLBACK_DT);

        clock.reset();
        assert_eq!(clock.tick(5.0), FALLBACK_DT);
    }
}
