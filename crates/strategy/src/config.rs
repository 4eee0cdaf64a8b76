//! Strategy configuration
//!
//! JSON-loadable parameters of one VWAP execution:
//!
//! ```json
//! {
//!     "symbol": "DCE.jd2405",
//!     "bucket_secs": 300,
//!     "target_volume": 300,
//!     "history_day_length": 20,
//!     "time_span_secs": 3600
//! }
//! ```
//!
//! Everything but `symbol` has a default.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use vwap_core::{Quantity, SessionCalendar, Symbol, Timestamp, TradingWindow};
use vwap_ports::SeriesRequest;

const SECONDS_PER_DAY: u32 = 86_400;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VwapConfig {
    /// Instrument to trade
    pub symbol: Symbol,

    /// Bucket (bar) duration in seconds
    #[serde(default = "default_bucket_secs")]
    pub bucket_secs: u32,

    /// Net position to reach; negative for a sell program
    #[serde(default = "default_target_volume")]
    pub target_volume: Quantity,

    /// Number of complete trading days averaged into the profile
    #[serde(default = "default_history_day_length")]
    pub history_day_length: usize,

    /// Length of the trading window, starting now
    #[serde(default = "default_time_span_secs")]
    pub time_span_secs: u32,

    /// Exchange-local offset east of UTC
    #[serde(default = "default_utc_offset_secs")]
    pub utc_offset_secs: i32,

    /// Local hour from which bars belong to the next trading day
    #[serde(default = "default_rollover_hour")]
    pub rollover_hour: u32,
}

fn default_bucket_secs() -> u32 {
    300
}

fn default_target_volume() -> Quantity {
    300
}

fn default_history_day_length() -> usize {
    20
}

fn default_time_span_secs() -> u32 {
    3600
}

fn default_utc_offset_secs() -> i32 {
    8 * 3600
}

fn default_rollover_hour() -> u32 {
    SessionCalendar::DEFAULT_ROLLOVER_HOUR
}

impl VwapConfig {
    /// Config with defaults for everything but the symbol
    pub fn new(symbol: impl Into<Symbol>) -> Self {
        Self {
            symbol: symbol.into(),
            bucket_secs: default_bucket_secs(),
            target_volume: default_target_volume(),
            history_day_length: default_history_day_length(),
            time_span_secs: default_time_span_secs(),
            utc_offset_secs: default_utc_offset_secs(),
            rollover_hour: default_rollover_hour(),
        }
    }

    /// Load and validate configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse and validate configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.symbol.is_empty() {
            return Err(ConfigError::Invalid("symbol must not be empty".into()));
        }
        if self.bucket_secs == 0 {
            return Err(ConfigError::Invalid("bucket_secs must be positive".into()));
        }
        if self.time_span_secs == 0 || self.time_span_secs >= SECONDS_PER_DAY {
            return Err(ConfigError::Invalid(format!(
                "time_span_secs must be in 1..{SECONDS_PER_DAY}, got {}",
                self.time_span_secs
            )));
        }
        if self.history_day_length == 0 {
            return Err(ConfigError::Invalid("history_day_length must be positive".into()));
        }
        if self.rollover_hour >= 24 {
            return Err(ConfigError::Invalid(format!(
                "rollover_hour must be below 24, got {}",
                self.rollover_hour
            )));
        }
        self.calendar()?;
        Ok(())
    }

    /// Session calendar of the exchange
    pub fn calendar(&self) -> Result<SessionCalendar, ConfigError> {
        SessionCalendar::from_offset_secs(self.utc_offset_secs, self.rollover_hour).ok_or_else(
            || {
                ConfigError::Invalid(format!(
                    "utc_offset_secs out of range: {}",
                    self.utc_offset_secs
                ))
            },
        )
    }

    /// Bar series subscription covering the configured history
    pub fn series_request(&self) -> SeriesRequest {
        SeriesRequest::for_history(
            self.symbol.clone(),
            self.bucket_secs,
            self.history_day_length,
        )
    }

    /// Trading window starting at the local wall time of `now`
    pub fn window_at(&self, calendar: &SessionCalendar, now: Timestamp) -> TradingWindow {
        let start: NaiveTime = calendar.to_local(now).time();
        TradingWindow::from_span(start, self.time_span_secs)
    }

    /// One-line human summary
    pub fn description(&self) -> String {
        format!(
            "symbol {}, bucket {}s, target {} lots, {} history days, span {}s",
            self.symbol,
            self.bucket_secs,
            self.target_volume,
            self.history_day_length,
            self.time_span_secs
        )
    }
}
