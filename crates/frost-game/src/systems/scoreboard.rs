//! Score, level index and countdown. Survives restarts and level changes.

use tracing::info;

#[derive(Debug, Clone)]
pub struct Scoreboard {
    score: u64,
    level: usize,
    /// Seconds left; `None` when the countdown is disabled
    remaining: Option<f64>,
    time_up_reported: bool,
    play_time: f64,
}

impl Scoreboard {
    /// `initial_time` of zero or less disables the countdown
    pub fn new(initial_time: f64) -> Self {
        Self {
            score: 0,
            level: 0,
            remaining: (initial_time > 0.0).then_some(initial_time),
            time_up_reported: false,
            play_time: 0.0,
        }
    }

    /// Back to a fresh game
    pub fn reset(&mut self, initial_time: f64) {
        *self = Self::new(initial_time);
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn set_level(&mut self, level: usize) {
        self.level = level;
    }

    pub fn remaining(&self) -> Option<f64> {
        self.remaining
    }

    /// Seconds of running time seen by the scoreboard
    pub fn play_time(&self) -> f64 {
        self.play_time
    }

    /// Returns the new score
    pub fn add_score(&mut self, points: u64) -> u64 {
        self.score = self.score.saturating_add(points);
        self.score
    }

    /// Extend the countdown, e.g. when a new level starts
    pub fn add_time(&mut self, seconds: f64) {
        if let Some(remaining) = &mut self.remaining {
            *remaining += seconds;
            if *remaining > 0.0 {
                self.time_up_reported = false;
            }
        }
    }

    /// Give an expired countdown `seconds` more, e.g. when the level is
    /// replayed after time ran out. A countdown still running keeps its time.
    pub fn rearm(&mut self, seconds: f64) {
        if self.time_up_reported {
            self.add_time(seconds);
        }
    }

    /// Count down by `dt`. Returns true exactly once, on the frame the
    /// countdown runs out.
    pub fn on_frame(&mut self, dt: f64) -> bool {
        self.play_time += dt;
        let Some(remaining) = &mut self.remaining else {
            return false;
        };
        *remaining = (*remaining - dt).max(0.0);
        if *remaining <= 0.0 && !self.time_up_reported {
            self.time_up_reported = true;
            info!(score = self.score, level = self.level, "time is up");
            return true;
        }
        false
    }
}
