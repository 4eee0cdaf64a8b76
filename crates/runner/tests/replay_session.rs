//! Replay Session Integration Test
//!
//! Replays a small CSV history through the simulators:
//! - two complete history sessions, then a live session
//! - fills fast enough to reach the target, or too slow and cancelled

use chrono::NaiveDate;
use std::fmt::Write as _;
use vwap_runner::{ReplaySession, RunnerConfig, RunnerError, read_bars};
use vwap_strategy::{DriverError, DriverOutcome, VwapConfig};

fn vwap_config() -> VwapConfig {
    VwapConfig {
        bucket_secs: 300,
        target_volume: 300,
        history_day_length: 2,
        time_span_secs: 600,
        utc_offset_secs: 0,
        ..VwapConfig::new("DCE.jd2405")
    }
}

/// Epoch nanoseconds of 2024-01-`d` h:m UTC
fn ns(d: u32, h: u32, m: u32) -> i64 {
    NaiveDate::from_ymd_opt(2024, 1, d)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
        .and_utc()
        .timestamp_nanos_opt()
        .unwrap()
}

/// Monday and Tuesday as history, Wednesday as the live session
fn csv() -> String {
    let mut csv = String::from("datetime,open,high,low,close,volume\n");
    for d in [8, 9, 10] {
        for (m, volume) in [(0, 50), (5, 30), (10, 20)] {
            writeln!(csv, "{},4000.0,4001.0,3999.0,4000.5,{}", ns(d, 9, m), volume).unwrap();
        }
    }
    csv
}

#[tokio::test(start_paused = true)]
async fn test_replay_reaches_target() {
    let _ = env_logger::try_init();

    let bars = read_bars(csv().as_bytes()).unwrap();
    let config = RunnerConfig::new(vwap_config(), "unused.csv")
        .with_lot_step(50)
        .with_pace_ms(10)
        .with_grace_ms(1_000);

    let report = ReplaySession::new(config).run(bars).await.unwrap();
    assert_eq!(report.outcome, DriverOutcome::Done);
    assert_eq!(report.committed, 300);
    assert_eq!(report.position.net(), 300);
    assert_eq!(report.fired.len(), 3);

    let quantities: Vec<_> = report
        .schedule
        .unwrap()
        .iter()
        .map(|slice| slice.quantity)
        .collect();
    assert_eq!(quantities, vec![150, 90, 60]);
}

#[tokio::test(start_paused = true)]
async fn test_slow_fills_cancelled_after_grace() {
    let _ = env_logger::try_init();

    let bars = read_bars(csv().as_bytes()).unwrap();
    // One lot per 10ms: at most ~13 lots before the grace period ends
    let config = RunnerConfig::new(vwap_config(), "unused.csv")
        .with_lot_step(1)
        .with_pace_ms(10)
        .with_grace_ms(100);

    let report = ReplaySession::new(config).run(bars).await.unwrap();
    assert_eq!(report.outcome, DriverOutcome::Cancelled);
    assert_eq!(report.committed, 300);
    assert!(report.position.net() < 300);
}

#[tokio::test(start_paused = true)]
async fn test_short_history_reports_scheduler_error() {
    let _ = env_logger::try_init();

    let bars = read_bars(csv().as_bytes()).unwrap();
    let config = RunnerConfig::new(
        VwapConfig {
            history_day_length: 5,
            ..vwap_config()
        },
        "unused.csv",
    );

    let err = ReplaySession::new(config).run(bars).await.unwrap_err();
    assert!(matches!(
        err,
        RunnerError::Driver(DriverError::Scheduler(_))
    ));
}

#[tokio::test(start_paused = true)]
async fn test_run_from_file() {
    let _ = env_logger::try_init();

    let path = std::env::temp_dir().join(format!("vwap-runner-{}.csv", std::process::id()));
    std::fs::write(&path, csv()).unwrap();

    let config = RunnerConfig::new(vwap_config(), &path).with_lot_step(300);
    let report = ReplaySession::new(config).run_from_file().await;
    std::fs::remove_file(&path).unwrap();

    assert_eq!(report.unwrap().outcome, DriverOutcome::Done);
}

#[tokio::test]
async fn test_empty_history() {
    let config = RunnerConfig::new(vwap_config(), "unused.csv");
    let err = ReplaySession::new(config).run(Vec::new()).await.unwrap_err();
    assert!(matches!(err, RunnerError::EmptyHistory));
}
