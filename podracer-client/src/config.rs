//! Client configuration types
//!
//! This module defines the minimal configuration the library needs: the
//! timing of the countdown and of the polling loop. Everything here has a
//! default, so an empty configuration runs with the stock timing.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timing configuration for the race lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Delay before the visible countdown begins, in milliseconds
    #[serde(default = "default_pre_countdown_delay")]
    pub pre_countdown_delay_ms: u64,

    /// Countdown start value; the countdown emits this many ticks
    #[serde(default = "default_countdown_from")]
    pub countdown_from: u32,

    /// Interval between countdown ticks, in milliseconds
    #[serde(default = "default_countdown_step")]
    pub countdown_step_ms: u64,

    /// Interval between race status polls, in milliseconds
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,

    /// Whether to wait for the start request to complete before polling
    /// begins. When `false` (the default), a slow start request can overlap
    /// the first poll tick.
    #[serde(default)]
    pub await_start: bool,
}

fn default_pre_countdown_delay() -> u64 {
    1000
}

fn default_countdown_from() -> u32 {
    3
}

fn default_countdown_step() -> u64 {
    1000
}

fn default_poll_interval() -> u64 {
    500
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            pre_countdown_delay_ms: default_pre_countdown_delay(),
            countdown_from: default_countdown_from(),
            countdown_step_ms: default_countdown_step(),
            poll_interval_ms: default_poll_interval(),
            await_start: false,
        }
    }
}

impl TimingConfig {
    /// Create a timing configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the pre-countdown delay
    pub fn with_pre_countdown_delay(mut self, delay: Duration) -> Self {
        self.pre_countdown_delay_ms = delay.as_millis() as u64;
        self
    }

    /// Builder method: set the countdown start value
    pub fn with_countdown_from(mut self, from: u32) -> Self {
        self.countdown_from = from;
        self
    }

    /// Builder method: set the countdown tick interval
    pub fn with_countdown_step(mut self, step: Duration) -> Self {
        self.countdown_step_ms = step.as_millis() as u64;
        self
    }

    /// Builder method: set the poll interval
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval_ms = interval.as_millis() as u64;
        self
    }

    /// Builder method: wait for the start request before polling
    pub fn with_await_start(mut self, enabled: bool) -> Self {
        self.await_start = enabled;
        self
    }

    /// Pre-countdown delay as a `Duration`
    pub fn pre_countdown_delay(&self) -> Duration {
        Duration::from_millis(self.pre_countdown_delay_ms)
    }

    /// Countdown tick interval as a `Duration`
    pub fn countdown_step(&self) -> Duration {
        Duration::from_millis(self.countdown_step_ms)
    }

    /// Poll interval as a `Duration`
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_timing_defaults() {
        let timing = TimingConfig::new();
        assert_eq!(timing.pre_countdown_delay_ms, 1000);
        assert_eq!(timing.countdown_from, 3);
        assert_eq!(timing.countdown_step_ms, 1000);
        assert_eq!(timing.poll_interval_ms, 500);
        assert!(!timing.await_start);
    }

    #[test]
    fn test_builder_methods() {
        let timing = TimingConfig::new()
            .with_pre_countdown_delay(Duration::from_millis(10))
            .with_countdown_from(5)
            .with_countdown_step(Duration::from_millis(20))
            .with_poll_interval(Duration::from_millis(30))
            .with_await_start(true);

        assert_eq!(timing.pre_countdown_delay(), Duration::from_millis(10));
        assert_eq!(timing.countdown_from, 5);
        assert_eq!(timing.countdown_step(), Duration::from_millis(20));
        assert_eq!(timing.poll_interval(), Duration::from_millis(30));
        assert!(timing.await_start);
    }

    #[test]
    fn test_omitted_fields_use_defaults() {
        let timing: TimingConfig = serde_json::from_str(r#"{"poll_interval_ms": 250}"#).unwrap();
        assert_eq!(timing.poll_interval_ms, 250);
        assert_eq!(timing.countdown_from, 3);
        assert!(!timing.await_start);
    }
}
