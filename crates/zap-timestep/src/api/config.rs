use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::error::{ConfigError, RangeError};
use crate::api::types::{TickSpan, TICKS_PER_SECOND};
use crate::core::time::{check_step, FixedTimestep};

/// Configuration for a [`FixedTimestep`].
/// Loaded from JSON or built in code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimestepConfig {
    /// Step length in 100ns ticks (default: 1/60 s, rounded to 166_667).
    #[serde(default = "default_step")]
    pub step_ticks: i64,
    /// Fixed start time (RFC 3339). When absent, the accumulator starts "now".
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
}

fn default_step() -> i64 {
    (TICKS_PER_SECOND as f64 / 60.0).round() as i64
}

impl Default for TimestepConfig {
    fn default() -> Self {
        Self {
            step_ticks: default_step(),
            start_time: None,
        }
    }
}

impl TimestepConfig {
    /// Parse a config from a JSON string. The step length is validated here too.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        check_step(config.step())?;
        Ok(config)
    }

    /// A config targeting `rate` steps per second, e.g. 60.0.
    pub fn from_steps_per_second(rate: f64) -> Result<Self, RangeError> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(RangeError::StepRate { rate });
        }
        let config = Self {
            step_ticks: (TICKS_PER_SECOND as f64 / rate).round() as i64,
            start_time: None,
        };
        check_step(config.step())?;
        Ok(config)
    }

    pub fn step(&self) -> TickSpan {
        TickSpan::from_ticks(self.step_ticks)
    }

    /// Build an accumulator from this config.
    pub fn build(&self) -> Result<FixedTimestep, RangeError> {
        match self.start_time {
            Some(start) => FixedTimestep::with_start_time(self.step(), start),
            None => FixedTimestep::new(self.step()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn default_is_sixty_hertz() {
        let config = TimestepConfig::default();
        assert_eq!(config.step_ticks, 166_667);
        assert_eq!(config.start_time, None);
        assert_eq!(config.build().unwrap().step_length(), TickSpan::from_ticks(166_667));
    }

    #[test]
    fn parse_full_config() {
        let json = r#"{
            "step_ticks": 10000000,
            "start_time": "1989-03-14T00:00:00Z"
        }"#;
        let config = TimestepConfig::from_json(json).unwrap();
        assert_eq!(config.step(), TickSpan::from_secs(1));

        let start = Utc.with_ymd_and_hms(1989, 3, 14, 0, 0, 0).unwrap();
        assert_eq!(config.start_time, Some(start));
        assert_eq!(config.build().unwrap().last_update_time(), start);
    }

    #[test]
    fn parse_minimal_config() {
        let config = TimestepConfig::from_json("{}").unwrap();
        assert_eq!(config, TimestepConfig::default());
    }

    #[test]
    fn rejects_out_of_range_step() {
        let err = TimestepConfig::from_json(r#"{ "step_ticks": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Range(RangeError::StepLength { .. })));

        let err = TimestepConfig::from_json(r#"{ "step_ticks": "fast" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn steps_per_second() {
        let config = TimestepConfig::from_steps_per_second(50.0).unwrap();
        assert_eq!(config.step(), TickSpan::from_millis(20));

        assert!(TimestepConfig::from_steps_per_second(0.0).is_err());
        assert!(TimestepConfig::from_steps_per_second(f64::NAN).is_err());
        // One step per hour is longer than the maximum step.
        assert!(TimestepConfig::from_steps_per_second(1.0 / 3600.0).is_err());
    }

    #[test]
    fn round_trips_through_json() {
        let config = TimestepConfig {
            step_ticks: 250_000,
            start_time: Some(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()),
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(TimestepConfig::from_json(&json).unwrap(), config);
    }
}
