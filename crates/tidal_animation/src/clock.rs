//! Update channels and the scheduler clock
//!
//! The host advances a [`TweenClock`] and then ticks the scheduler once per
//! update pass. Each tween reads the clock that belongs to its channel.

use serde::{Deserialize, Serialize};

/// The update pass a tween is driven on
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateChannel {
    /// Regular per-frame update, scaled time
    #[default]
    Frame,
    /// After all regular frame updates, scaled time
    PostFrame,
    /// Fixed simulation step
    FixedStep,
    /// Per-frame update on real time; keeps running while time is scaled or paused
    FrameRealTime,
}

/// Time source shared by all tweens of a scheduler, in seconds
#[derive(Clone, Debug, PartialEq)]
pub struct TweenClock {
    /// Scaled simulation time
    time: f64,
    /// Wall time since the clock was created
    real_time: f64,
    /// Sum of all fixed steps
    fixed_time: f64,
    /// Multiplier applied to `time` (0.0 pauses it)
    time_scale: f64,
}

impl TweenClock {
    pub fn new() -> Self {
        Self {
            time: 0.0,
            real_time: 0.0,
            fixed_time: 0.0,
            time_scale: 1.0,
        }
    }

    /// Advance by `dt` seconds of wall time
    pub fn advance(&mut self, dt: f64) {
        let dt = dt.max(0.0);
        self.real_time += dt;
        self.time += dt * self.time_scale;
    }

    /// Advance the fixed-step clock by one step
    pub fn advance_fixed(&mut self, step: f64) {
        self.fixed_time += step.max(0.0);
    }

    /// Set the time scale; negative values are clamped to 0
    pub fn set_time_scale(&mut self, scale: f64) {
        self.time_scale = scale.max(0.0);
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn real_time(&self) -> f64 {
        self.real_time
    }

    pub fn fixed_time(&self) -> f64 {
        self.fixed_time
    }

    /// Current time as seen by tweens on `channel`
    pub fn now(&self, channel: UpdateChannel) -> f64 {
        match channel {
            UpdateChannel::Frame | UpdateChannel::PostFrame => self.time,
            UpdateChannel::FixedStep => self.fixed_time,
            UpdateChannel::FrameRealTime => self.real_time,
        }
    }
}

impl Default for TweenClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_creation() {
        let clock = TweenClock::new();
        assert_eq!(clock.time(), 0.0);
        assert_eq!(clock.real_time(), 0.0);
        assert_eq!(clock.fixed_time(), 0.0);
        assert_eq!(clock.time_scale(), 1.0);
    }

    #[test]
    fn test_time_scale() {
        let mut clock = TweenClock::new();
        clock.set_time_scale(0.5);
        clock.advance(2.0);
        assert_eq!(clock.time(), 1.0);
        assert_eq!(clock.real_time(), 2.0);

        clock.set_time_scale(-4.0);
        assert_eq!(clock.time_scale(), 0.0);
        clock.advance(1.0);
        assert_eq!(clock.time(), 1.0);
        assert_eq!(clock.real_time(), 3.0);
    }

    #[test]
    fn test_channels_read_their_own_clock() {
        let mut clock = TweenClock::new();
        clock.set_time_scale(2.0);
        clock.advance(1.0);
        clock.advance_fixed(0.02);

        assert_eq!(clock.now(UpdateChannel::Frame), 2.0);
        assert_eq!(clock.now(UpdateChannel::PostFrame), 2.0);
        assert_eq!(clock.now(UpdateChannel::FrameRealTime), 1.0);
        assert_eq!(clock.now(UpdateChannel::FixedStep), 0.02);
    }

    #[test]
    fn test_negative_steps_are_ignored() {
        let mut clock = TweenClock::new();
        clock.advance(-1.0);
        clock.advance_fixed(-1.0);
        assert_eq!(clock, TweenClock::new());
    }
}
