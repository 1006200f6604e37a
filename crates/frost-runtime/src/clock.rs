//! Frame clock with a variable, clamped delta

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Where the clock reads "now" from
pub trait TimeSource {
    /// Seconds since an arbitrary fixed origin
    fn now_seconds(&self) -> f64;
}

/// Monotonic wall-clock time
pub struct MonotonicTime {
    origin: Instant,
}

impl MonotonicTime {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicTime {
    fn now_seconds(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Time that only moves when told to. Clones share one timeline, so a test
/// or headless host keeps a handle while the clock owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualTime {
    now: Rc<Cell<f64>>,
}

impl ManualTime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, seconds: f64) {
        self.now.set(self.now.get() + seconds);
    }

    pub fn set(&self, seconds: f64) {
        self.now.set(seconds);
    }
}

impl TimeSource for ManualTime {
    fn now_seconds(&self) -> f64 {
        self.now.get()
    }
}

/// Produces one delta per frame.
///
/// `previous` is `None` while stopped; no delta is trusted until `start`
/// captures a fresh timestamp. Deltas are clamped to `[0, max_delta]` so a
/// long stall (tab in background, debugger) cannot produce a huge jump.
pub struct FrameClock {
    source: Box<dyn TimeSource>,
    previous: Option<f64>,
    /// Delta produced by the most recent tick, in seconds
    delta: f64,
    /// Sum of all deltas, in seconds
    total: f64,
    max_delta: f64,
}

impl FrameClock {
    pub const DEFAULT_MAX_DELTA: f64 = 1.0;

    pub fn new(source: impl TimeSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            previous: None,
            delta: 0.0,
            total: 0.0,
            max_delta: Self::DEFAULT_MAX_DELTA,
        }
    }

    pub fn with_max_delta(mut self, max_delta: f64) -> Self {
        self.max_delta = max_delta.max(0.0);
        self
    }

    /// Capture "now" as the reference for the next delta
    pub fn start(&mut self) {
        self.previous = Some(self.source.now_seconds());
    }

    /// Forget the reference timestamp
    pub fn stop(&mut self) {
        self.previous = None;
    }

    pub fn is_running(&self) -> bool {
        self.previous.is_some()
    }

    pub fn previous_timestamp(&self) -> Option<f64> {
        self.previous
    }

    /// Advance the clock. Call once per frame. A stopped clock yields 0.
    pub fn tick(&mut self) -> f64 {
        let Some(previous) = self.previous else {
            self.delta = 0.0;
            return 0.0;
        };

        let now = self.source.now_seconds();
        self.delta = (now - previous).clamp(0.0, self.max_delta);
        self.total += self.delta;
        self.previous = Some(now);
        self.delta
    }

    pub fn delta(&self) -> f64 {
        self.delta
    }

    pub fn total(&self) -> f64 {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manual_clock() -> (FrameClock, ManualTime) {
        let time = ManualTime::new();
        (FrameClock::new(time.clone()), time)
    }

    #[test]
    fn delta_is_time_between_ticks() {
        let (mut clock, time) = manual_clock();
        clock.start();
        time.advance(0.016);
        assert!((clock.tick() - 0.016).abs() < 1e-12);
        time.advance(0.033);
        assert!((clock.tick() - 0.033).abs() < 1e-12);
        assert!((clock.total() - 0.049).abs() < 1e-12);
    }

    #[test]
    fn stopped_clock_yields_zero() {
        let (mut clock, time) = manual_clock();
        time.advance(5.0);
        assert_eq!(clock.tick(), 0.0);
        assert_eq!(clock.previous_timestamp(), None);
    }

    #[test]
    fn long_stalls_are_clamped() {
        let (mut clock, time) = manual_clock();
        let mut clock_limited = FrameClock::new(time.clone()).with_max_delta(0.25);
        clock.start();
        clock_limited.start();
        time.advance(30.0);
        assert_eq!(clock.tick(), FrameClock::DEFAULT_MAX_DELTA);
        assert_eq!(clock_limited.tick(), 0.25);
    }

    #[test]
    fn backwards_time_never_goes_negative() {
        let (mut clock, time) = manual_clock();
        time.set(10.0);
        clock.start();
        time.set(9.0);
        assert_eq!(clock.tick(), 0.0);
    }

    #[test]
    fn restart_discards_paused_interval() {
        let (mut clock, time) = manual_clock();
        clock.start();
        time.advance(0.1);
        clock.tick();
        clock.stop();
        assert!(!clock.is_running());

        time.advance(100.0);
        clock.start();
        assert_eq!(clock.previous_timestamp(), Some(time.now_seconds()));
        time.advance(0.1);
        assert!((clock.tick() - 0.1).abs() < 1e-9);
    }

    #[test]
    fn monotonic_time_moves_forward() {
        let time = MonotonicTime::new();
        let a = time.now_seconds();
        let b = time.now_seconds();
        assert!(b >= a);
    }
}
