use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Host game ticks per real second
pub const TICKS_PER_SECOND: u32 = 20;

/// Reconciliation cadence and grant durations, all in host ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineTiming {
    /// Ticks between reconciliation passes (10 = every 0.5s)
    pub tick_interval: u32,
    /// Duration granted in infinite mode (10 minutes)
    pub infinite_duration: u32,
    /// Duration granted in finite mode (30 seconds)
    pub normal_duration: u32,
    /// Finite effects with less than this left are renewed (2 seconds)
    pub refresh_threshold: u32,
}

impl Default for EngineTiming {
    fn default() -> Self {
        Self {
            tick_interval: 10,
            infinite_duration: TICKS_PER_SECOND * 60 * 10,
            normal_duration: TICKS_PER_SECOND * 30,
            refresh_threshold: 40,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimingError {
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
    #[error("refresh threshold ({threshold}) must be below the normal duration ({normal})")]
    ThresholdNotBelowDuration { threshold: u32, normal: u32 },
    #[error("{name} ({value}) must exceed the tick interval ({interval})")]
    NotAboveInterval {
        name: &'static str,
        value: u32,
        interval: u32,
    },
    #[error("infinite duration ({infinite}) must not be shorter than the normal duration ({normal})")]
    InfiniteShorterThanNormal { infinite: u32, normal: u32 },
}

impl EngineTiming {
    /// Check that a finite effect is always renewed at least one full pass before it lapses
    pub fn validate(&self) -> Result<(), TimingError> {
        for (name, value) in [
            ("tick_interval", self.tick_interval),
            ("infinite_duration", self.infinite_duration),
            ("normal_duration", self.normal_duration),
            ("refresh_threshold", self.refresh_threshold),
        ] {
            if value == 0 {
                return Err(TimingError::Zero(name));
            }
        }
        if self.refresh_threshold >= self.normal_duration {
            return Err(TimingError::ThresholdNotBelowDuration {
                threshold: self.refresh_threshold,
                normal: self.normal_duration,
            });
        }
        for (name, value) in [
            ("refresh_threshold", self.refresh_threshold),
            ("normal_duration", self.normal_duration),
        ] {
            if value <= self.tick_interval {
                return Err(TimingError::NotAboveInterval {
                    name,
                    value,
                    interval: self.tick_interval,
                });
            }
        }
        if self.infinite_duration < self.normal_duration {
            return Err(TimingError::InfiniteShorterThanNormal {
                infinite: self.infinite_duration,
                normal: self.normal_duration,
            });
        }
        Ok(())
    }

    /// Grant duration for an effect in the given mode
    pub fn grant_duration(&self, infinite: bool) -> u32 {
        if infinite {
            self.infinite_duration
        } else {
            self.normal_duration
        }
    }

    /// Real-time period between passes
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(u64::from(self.tick_interval) * 1000 / u64::from(TICKS_PER_SECOND))
    }
}
