use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds (clamped).
    pub dt: f32,

    /// Sum of all clamped deltas so far, in seconds.
    ///
    /// Unlike wall time this does not advance while no frames are delivered,
    /// so animation resumes where it stopped after a pause.
    pub elapsed: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Delta time is clamped to avoid pathological values when the rendering
/// thread is suspended by the host, the app is backgrounded, or a debugger
/// stops the process.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    elapsed: f32,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Creates a new clock with default clamps (100 µs .. 250 ms).
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: Instant::now(),
            elapsed: 0.0,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Resets the delta baseline without touching `elapsed` or the counter.
    pub fn reset(&mut self) {
        self.reset_at(Instant::now());
    }

    pub(crate) fn reset_at(&mut self, now: Instant) {
        self.last = now;
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    pub(crate) fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max)
            .as_secs_f32();

        self.last = now;
        self.elapsed += dt;

        let ft = FrameTime {
            dt,
            elapsed: self.elapsed,
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }

    /// Number of ticks taken so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_index
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn regular_tick_reports_real_delta() {
        let start = Instant::now();
        let mut clock = FrameClock::new();
        clock.reset_at(start);

        let ft = clock.tick_at(start + Duration::from_millis(16));
        assert!(approx(ft.dt, 0.016));
        assert!(approx(ft.elapsed, 0.016));
        assert_eq!(ft.frame_index, 0);
    }

    #[test]
    fn long_gap_is_clamped() {
        let start = Instant::now();
        let mut clock = FrameClock::new();
        clock.reset_at(start);

        let ft = clock.tick_at(start + Duration::from_secs(30));
        assert!(approx(ft.dt, 0.25));
    }

    #[test]
    fn zero_gap_is_raised_to_minimum() {
        let start = Instant::now();
        let mut clock = FrameClock::new();
        clock.reset_at(start);

        let ft = clock.tick_at(start);
        assert!(approx(ft.dt, 0.0001));
    }

    #[test]
    fn reset_hides_pause_gap_from_elapsed() {
        let start = Instant::now();
        let mut clock = FrameClock::new();
        clock.reset_at(start);
        clock.tick_at(start + Duration::from_millis(100));

        // Ten seconds paused, then resumed.
        let resumed = start + Duration::from_secs(10);
        clock.reset_at(resumed);
        let ft = clock.tick_at(resumed + Duration::from_millis(20));

        assert!(approx(ft.elapsed, 0.12));
        assert_eq!(ft.frame_index, 1);
        assert_eq!(clock.frame_count(), 2);
    }
}
