use async_trait::async_trait;
use vwap_core::{Bar, Symbol};

/// Subscription parameters of a bar series
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesRequest {
    pub symbol: Symbol,
    /// Bar width in seconds (the bucket duration)
    pub bucket_secs: u32,
    /// Number of bars requested
    pub length: usize,
}

impl SeriesRequest {
    /// Trading hours assumed per session when sizing a history subscription
    pub const TRADING_HOURS_PER_DAY: u32 = 10;

    pub fn new(symbol: impl Into<Symbol>, bucket_secs: u32, length: usize) -> Self {
        Self {
            symbol: symbol.into(),
            bucket_secs,
            length,
        }
    }

    /// Request long enough to cover `history_days` sessions
    ///
    /// Sized as `10h / bucket_secs * history_days` bars; keep the ratio in
    /// mind since data providers cap the subscription length.
    pub fn for_history(symbol: impl Into<Symbol>, bucket_secs: u32, history_days: usize) -> Self {
        let per_day = f64::from(Self::TRADING_HOURS_PER_DAY * 3600) / f64::from(bucket_secs.max(1));
        let length = (per_day * history_days as f64) as usize;
        Self::new(symbol, bucket_secs, length)
    }
}

/// Port for a time-bucketed bar series (history plus the live tail)
///
/// Implementations keep appending bars as they arrive; the scheduler takes
/// a full snapshot once the series is ready and afterwards only reacts to
/// the bars carried by update notifications.
#[async_trait]
pub trait BarSeries: Send + Sync {
    /// Subscription this series was created with
    fn request(&self) -> &SeriesRequest;

    /// Whether the requested history has been fully loaded
    async fn is_ready(&self) -> bool;

    /// All bars currently held, oldest first
    async fn snapshot(&self) -> Vec<Bar>;
}
