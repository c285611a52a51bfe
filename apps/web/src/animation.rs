use std::time::Duration;

const MAX_FRAME_DELTA: f64 = 0.25;

/// Turns wall-clock readings into frame deltas for the dashboard animations.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FrameClock {
    last_tick: Option<f64>,
}

impl FrameClock {
    /// Time since the previous call, clamped so a backgrounded tab does not
    /// skip whole animations.
    pub fn tick(&mut self, now_seconds: f64) -> Duration {
        let delta = self
            .last_tick
            .map_or(0.0, |last| (now_seconds - last).clamp(0.0, MAX_FRAME_DELTA));
        self.last_tick = Some(now_seconds);
        Duration::from_secs_f64(delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Duration, expected: f64) {
        let diff = (actual.as_secs_f64() - expected).abs();
        assert!(diff < 1e-9, "expected {expected}, got {actual:?}, diff {diff}");
    }

    #[test]
    fn first_tick_initializes_time_without_advancing() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.tick(10.0), Duration::ZERO);
        assert_eq!(clock.last_tick, Some(10.0));
    }

    #[test]
    fn consecutive_ticks_report_elapsed_time() {
        let mut clock = FrameClock::default();
        clock.tick(4.0);
        assert_close(clock.tick(4.2), 0.2);
    }

    #[test]
    fn large_frame_gap_is_clamped() {
        let mut clock = FrameClock::default();
        clock.tick(3.0);
        assert_close(clock.tick(30.0), MAX_FRAME_DELTA);
    }

    #[test]
    fn backwards_time_does_not_go_negative() {
        let mut clock = FrameClock::default();
        clock.tick(10.0);
        assert_eq!(clock.tick(9.0), Duration::ZERO);
        assert_eq!(clock.last_tick, Some(9.0));
    }
}
