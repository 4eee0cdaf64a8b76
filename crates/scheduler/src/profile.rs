//! Volume Profile Estimation
//!
//! Predicts the intraday volume distribution over the trading window as the
//! arithmetic mean of historical per-day volume shares.
//!
//! ```text
//! share(d, b) = V(d, b) / Σ_b' V(d, b')      per complete day d
//! curve(b)    = Σ_d share(d, b) / N          over the last N days
//! ```
//!
//! Only complete days count: a day must cover as many in-window buckets as
//! the fullest day in the history. Holidays and shortened sessions are
//! dropped entirely rather than weighted.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use vwap_core::{Bar, NANOS_PER_SEC, SessionCalendar, TimeBucket, TradingDay, TradingWindow, Volume};

use crate::error::{Result, SchedulerError};

/// Predicted fraction of a session's in-window volume per bucket
///
/// Buckets are held in chronological order within the trading window, so a
/// window wrapping midnight lists its evening buckets first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeShareCurve {
    shares: Vec<(TimeBucket, f64)>,
    /// Trading days the average was taken over, oldest first
    days: Vec<TradingDay>,
}

impl VolumeShareCurve {
    /// Curve from shares already in chronological order
    pub fn from_shares(shares: Vec<(TimeBucket, f64)>) -> Self {
        Self {
            shares,
            days: Vec::new(),
        }
    }

    /// Curve from unordered shares, ordered by offset from the window start
    pub fn in_window(
        window: &TradingWindow,
        shares: impl IntoIterator<Item = (TimeBucket, f64)>,
    ) -> Self {
        let mut shares: Vec<_> = shares.into_iter().collect();
        shares.sort_by_key(|(bucket, _)| window.offset_of(*bucket));
        Self::from_shares(shares)
    }

    pub fn with_days(mut self, days: Vec<TradingDay>) -> Self {
        self.days = days;
        self
    }

    /// (bucket, share) pairs in chronological order
    pub fn iter(&self) -> impl Iterator<Item = (TimeBucket, f64)> + '_ {
        self.shares.iter().copied()
    }

    pub fn share(&self, bucket: TimeBucket) -> Option<f64> {
        self.shares
            .iter()
            .find(|(b, _)| *b == bucket)
            .map(|(_, share)| *share)
    }

    pub fn buckets(&self) -> impl Iterator<Item = TimeBucket> + '_ {
        self.shares.iter().map(|(bucket, _)| *bucket)
    }

    pub fn days(&self) -> &[TradingDay] {
        &self.days
    }

    /// Sum of all shares (1.0 up to rounding for a well-formed curve)
    pub fn total(&self) -> f64 {
        self.shares.iter().map(|(_, share)| share).sum()
    }

    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }
}

impl fmt::Display for VolumeShareCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (bucket, share) in &self.shares {
            writeln!(f, "{bucket}  {share:.6}")?;
        }
        Ok(())
    }
}

/// Estimates a [`VolumeShareCurve`] from a historical bar series
#[derive(Debug, Clone)]
pub struct ProfileEstimator {
    calendar: SessionCalendar,
    window: TradingWindow,
    history_day_length: usize,
    /// Expected bar width, checked against the in-window bar spacing
    bucket_secs: Option<u32>,
}

impl ProfileEstimator {
    pub fn new(
        calendar: SessionCalendar,
        window: TradingWindow,
        history_day_length: usize,
    ) -> Self {
        Self {
            calendar,
            window,
            history_day_length,
            bucket_secs: None,
        }
    }

    pub fn with_bucket_secs(mut self, bucket_secs: u32) -> Self {
        self.bucket_secs = Some(bucket_secs);
        self
    }

    pub fn window(&self) -> &TradingWindow {
        &self.window
    }

    /// Estimate the curve from `bars`, using complete days strictly before `today`
    ///
    /// Pure function of its inputs: the same bars, window and day yield the
    /// same curve.
    pub fn estimate(&self, bars: &[Bar], today: TradingDay) -> Result<VolumeShareCurve> {
        if self.history_day_length == 0 {
            return Err(SchedulerError::InvalidHistoryLength);
        }

        let volumes = self.aggregate(bars);
        if volumes.is_empty() {
            return Err(SchedulerError::EmptyWindow);
        }

        let days = self.select_days(&volumes, today)?;
        let n = days.len() as f64;

        // Days missing a bucket contribute a zero share to it
        let mut share_sums: BTreeMap<TimeBucket, f64> = BTreeMap::new();
        for day in &days {
            let buckets = &volumes[day];
            let total: Volume = buckets.values().sum();
            for (bucket, volume) in buckets {
                let share = if total > 0 {
                    *volume as f64 / total as f64
                } else {
                    0.0
                };
                *share_sums.entry(*bucket).or_insert(0.0) += share;
            }
        }

        let curve = VolumeShareCurve::in_window(
            &self.window,
            share_sums.into_iter().map(|(bucket, sum)| (bucket, sum / n)),
        )
        .with_days(days);

        info!(
            "Estimated volume profile: {} buckets over {} days ({} .. {})",
            curve.len(),
            curve.days().len(),
            curve.days().first().map(ToString::to_string).unwrap_or_default(),
            curve.days().last().map(ToString::to_string).unwrap_or_default(),
        );
        Ok(curve)
    }

    /// Sum in-window volume per (trading day, bucket)
    fn aggregate(&self, bars: &[Bar]) -> BTreeMap<TradingDay, BTreeMap<TimeBucket, Volume>> {
        let mut volumes: BTreeMap<TradingDay, BTreeMap<TimeBucket, Volume>> = BTreeMap::new();
        for bar in bars {
            let (day, bucket) = self.calendar.tag(bar);
            if !self.window.contains(bucket) {
                continue;
            }
            *volumes.entry(day).or_default().entry(bucket).or_insert(0) += bar.volume;
        }

        let narrow = self.narrow_gaps(bars);
        if narrow > 0 {
            warn!(
                "{} in-window bars are closer than the {}s bucket width; \
                 the series does not match the configured bucket",
                narrow,
                self.bucket_secs.unwrap_or_default()
            );
        }
        volumes
    }

    /// Count consecutive in-window bars spaced less than the bucket width
    ///
    /// Always zero when no bucket width was set.
    pub fn narrow_gaps(&self, bars: &[Bar]) -> usize {
        let Some(bucket_secs) = self.bucket_secs else {
            return 0;
        };
        let width_ns = i64::from(bucket_secs) * NANOS_PER_SEC;

        let mut previous: Option<i64> = None;
        let mut narrow = 0;
        for bar in bars {
            if !self.window.contains(self.calendar.time_bucket(bar.timestamp_ns)) {
                continue;
            }
            if previous.is_some_and(|ts| bar.timestamp_ns - ts < width_ns) {
                narrow += 1;
            }
            previous = Some(bar.timestamp_ns);
        }
        narrow
    }

    /// The most recent `history_day_length` complete days before `today`
    fn select_days(
        &self,
        volumes: &BTreeMap<TradingDay, BTreeMap<TimeBucket, Volume>>,
        today: TradingDay,
    ) -> Result<Vec<TradingDay>> {
        let max_coverage = volumes.values().map(BTreeMap::len).max().unwrap_or(0);

        let complete: Vec<TradingDay> = volumes
            .iter()
            .filter(|(day, buckets)| {
                let keep = buckets.len() == max_coverage;
                if !keep {
                    debug!(
                        "Dropping incomplete day {}: {}/{} buckets",
                        day,
                        buckets.len(),
                        max_coverage
                    );
                }
                keep
            })
            .map(|(day, _)| *day)
            .filter(|day| *day < today)
            .collect();

        if complete.len() < self.history_day_length {
            return Err(SchedulerError::InsufficientHistory {
                required: self.history_day_length,
                available: complete.len(),
            });
        }

        Ok(complete[complete.len() - self.history_day_length..].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use vwap_core::NANOS_PER_SEC;

    fn day(d: u32) -> TradingDay {
        TradingDay::from_ymd(2024, 1, d).unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn bucket(h: u32, m: u32) -> TimeBucket {
        TimeBucket::new(t(h, m))
    }

    /// Bar on 2024-01-`d` at h:m UTC
    fn bar(d: u32, h: u32, m: u32, volume: Volume) -> Bar {
        let ts = NaiveDate::from_ymd_opt(2024, 1, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
            .and_utc()
            .timestamp();
        Bar::new(ts * NANOS_PER_SEC, volume)
    }

    fn estimator(start: NaiveTime, end: NaiveTime, days: usize) -> ProfileEstimator {
        ProfileEstimator::new(SessionCalendar::utc(), TradingWindow::new(start, end), days)
    }

    /// Three 5-minute bars per day 09:00..09:10 with the given volumes
    fn session(d: u32, volumes: [Volume; 3]) -> Vec<Bar> {
        vec![
            bar(d, 9, 0, volumes[0]),
            bar(d, 9, 5, volumes[1]),
            bar(d, 9, 10, volumes[2]),
        ]
    }

    #[test]
    fn test_narrow_gaps_against_bucket_width() {
        let mut bars = session(8, [50, 30, 20]);
        bars.extend(session(9, [50, 30, 20]));
        let five_min = estimator(t(9, 0), t(9, 10), 1).with_bucket_secs(300);
        assert_eq!(five_min.narrow_gaps(&bars), 0);

        // 5-minute bars read as 10-minute buckets: two short gaps per day
        let ten_min = estimator(t(9, 0), t(9, 10), 1).with_bucket_secs(600);
        assert_eq!(ten_min.narrow_gaps(&bars), 4);

        // Out-of-window bars are not counted
        bars.insert(3, bar(8, 9, 11, 1));
        assert_eq!(five_min.narrow_gaps(&bars), 0);

        assert_eq!(estimator(t(9, 0), t(9, 10), 1).narrow_gaps(&bars), 0);
    }

    #[test]
    fn test_single_day_shares() {
        // Monday 2024-01-08, today Tuesday
        let bars = session(8, [50, 30, 20]);
        let curve = estimator(t(9, 0), t(9, 10), 1)
            .estimate(&bars, day(9))
            .unwrap();

        assert_eq!(curve.len(), 3);
        assert!((curve.share(bucket(9, 0)).unwrap() - 0.5).abs() < 1e-12);
        assert!((curve.share(bucket(9, 5)).unwrap() - 0.3).abs() < 1e-12);
        assert!((curve.share(bucket(9, 10)).unwrap() - 0.2).abs() < 1e-12);
        assert_eq!(curve.days(), &[day(8)]);
    }

    #[test]
    fn test_average_across_days() {
        let mut bars = session(8, [50, 30, 20]);
        bars.extend(session(9, [10, 10, 80]));
        let curve = estimator(t(9, 0), t(9, 10), 2)
            .estimate(&bars, day(10))
            .unwrap();

        assert!((curve.share(bucket(9, 0)).unwrap() - 0.3).abs() < 1e-12);
        assert!((curve.share(bucket(9, 5)).unwrap() - 0.2).abs() < 1e-12);
        assert!((curve.share(bucket(9, 10)).unwrap() - 0.5).abs() < 1e-12);
        assert!((curve.total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_bars_outside_window_ignored() {
        let mut bars = session(8, [50, 30, 20]);
        bars.push(bar(8, 8, 55, 1_000));
        bars.push(bar(8, 9, 15, 1_000));
        let curve = estimator(t(9, 0), t(9, 10), 1)
            .estimate(&bars, day(9))
            .unwrap();

        assert_eq!(curve.len(), 3);
        assert!((curve.share(bucket(9, 0)).unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_incomplete_day_dropped_entirely() {
        // 09:00..14:55 in 5-minute buckets = 72 buckets
        let full = |d: u32| -> Vec<Bar> {
            (0..72)
                .map(|i| bar(d, 9 + i / 12, (i % 12) * 5, 10 + i as Volume))
                .collect()
        };
        let mut bars = full(8);
        // Tuesday is missing its last bucket (71 buckets)
        let mut partial = full(9);
        partial.pop();
        bars.extend(partial);

        let estimator = estimator(t(9, 0), t(14, 55), 1);
        let curve = estimator.estimate(&bars, day(10)).unwrap();
        assert_eq!(curve.days(), &[day(8)]);
        assert_eq!(curve.len(), 72);

        // Only the partial day would be "most recent": asking for 2 fails
        let estimator = ProfileEstimator::new(
            SessionCalendar::utc(),
            TradingWindow::new(t(9, 0), t(14, 55)),
            2,
        );
        assert_eq!(
            estimator.estimate(&bars, day(10)).unwrap_err(),
            SchedulerError::InsufficientHistory {
                required: 2,
                available: 1
            }
        );
    }

    #[test]
    fn test_selects_most_recent_days_before_today() {
        let mut bars = Vec::new();
        bars.extend(session(8, [100, 0, 0]));
        bars.extend(session(9, [0, 100, 0]));
        bars.extend(session(10, [0, 0, 100]));
        // Today (11th) is complete too but must not be used
        bars.extend(session(11, [100, 0, 0]));

        let curve = estimator(t(9, 0), t(9, 10), 2)
            .estimate(&bars, day(11))
            .unwrap();
        assert_eq!(curve.days(), &[day(9), day(10)]);
        assert!((curve.share(bucket(9, 0)).unwrap() - 0.0).abs() < 1e-12);
        assert!((curve.share(bucket(9, 5)).unwrap() - 0.5).abs() < 1e-12);
        assert!((curve.share(bucket(9, 10)).unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_today_without_data_keeps_latest_prior_day() {
        // No bars for today yet: the latest complete day is still usable
        let mut bars = session(8, [1, 1, 1]);
        bars.extend(session(9, [1, 1, 1]));
        let curve = estimator(t(9, 0), t(9, 10), 2)
            .estimate(&bars, day(10))
            .unwrap();
        assert_eq!(curve.days(), &[day(8), day(9)]);
    }

    #[test]
    fn test_partial_today_does_not_cost_a_prior_day() {
        let mut bars = session(8, [1, 1, 1]);
        bars.extend(session(9, [1, 1, 1]));
        // Today has only its first bucket so far
        bars.push(bar(10, 9, 0, 5));
        let curve = estimator(t(9, 0), t(9, 10), 2)
            .estimate(&bars, day(10))
            .unwrap();
        assert_eq!(curve.days(), &[day(8), day(9)]);
    }

    #[test]
    fn test_insufficient_history() {
        let bars = session(8, [1, 2, 3]);
        let err = estimator(t(9, 0), t(9, 10), 3)
            .estimate(&bars, day(9))
            .unwrap_err();
        assert_eq!(
            err,
            SchedulerError::InsufficientHistory {
                required: 3,
                available: 1
            }
        );
    }

    #[test]
    fn test_empty_window() {
        let bars = session(8, [1, 2, 3]);
        let err = estimator(t(13, 0), t(14, 0), 1)
            .estimate(&bars, day(9))
            .unwrap_err();
        assert_eq!(err, SchedulerError::EmptyWindow);
    }

    #[test]
    fn test_zero_history_length_rejected() {
        let bars = session(8, [1, 2, 3]);
        let err = estimator(t(9, 0), t(9, 10), 0)
            .estimate(&bars, day(9))
            .unwrap_err();
        assert_eq!(err, SchedulerError::InvalidHistoryLength);
    }

    #[test]
    fn test_zero_volume_bucket_contributes_zero_share() {
        let bars = session(8, [0, 40, 60]);
        let curve = estimator(t(9, 0), t(9, 10), 1)
            .estimate(&bars, day(9))
            .unwrap();
        assert_eq!(curve.len(), 3);
        assert_eq!(curve.share(bucket(9, 0)), Some(0.0));
    }

    #[test]
    fn test_single_bucket_day() {
        let bars = vec![bar(8, 9, 0, 17)];
        let curve = estimator(t(9, 0), t(9, 0), 1)
            .estimate(&bars, day(9))
            .unwrap();
        assert_eq!(curve.len(), 1);
        assert_eq!(curve.share(bucket(9, 0)), Some(1.0));
    }

    #[test]
    fn test_wrap_around_window_order() {
        // Night session 23:00 -> 01:00; Tuesday 23:xx and Wednesday 00:xx are
        // both trading day Wednesday 2024-01-10
        let bars = vec![
            bar(9, 23, 0, 10),
            bar(9, 23, 30, 20),
            bar(10, 0, 30, 30),
            bar(10, 12, 0, 1_000),
        ];
        let curve = estimator(t(23, 0), t(1, 0), 1)
            .estimate(&bars, day(11))
            .unwrap();

        let buckets: Vec<_> = curve.buckets().collect();
        assert_eq!(buckets, vec![bucket(23, 0), bucket(23, 30), bucket(0, 30)]);
        assert!(curve.share(bucket(12, 0)).is_none());
        assert_eq!(curve.days(), &[day(10)]);
        assert!((curve.share(bucket(0, 30)).unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_idempotent() {
        let mut bars = session(8, [3, 5, 7]);
        bars.extend(session(9, [11, 13, 17]));
        let estimator = estimator(t(9, 0), t(9, 10), 2);
        let a = estimator.estimate(&bars, day(10)).unwrap();
        let b = estimator.estimate(&bars, day(10)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_display_lists_buckets() {
        let curve = VolumeShareCurve::from_shares(vec![(bucket(9, 0), 0.25), (bucket(9, 5), 0.75)]);
        let text = curve.to_string();
        assert!(text.contains("09:00:00  0.250000"));
        assert!(text.contains("09:05:00  0.750000"));
    }
}
