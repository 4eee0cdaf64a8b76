//! Integration test: simulators -> update stream
//!
//! Both simulators publish into one ordered channel, the way the driver
//! consumes them:
//! Bar series (wake-up, live bars) + target position (fills) -> Subscriber

use std::sync::Arc;
use std::time::Duration;
use vwap_core::{Bar, PositionSnapshot};
use vwap_gateway::{
    ChannelPublisher, Subscriber, TransportError, Update,
    adapters::{SimulatedBarSeries, SimulatedTargetPosition, TargetPositionConfig},
};
use vwap_ports::{BarSeries, SeriesRequest, TargetPosition, TargetPositionGuard};

/// Test that series notifications and fills share one ordered stream
#[tokio::test(start_paused = true)]
async fn test_series_and_fills_share_stream() {
    let _ = env_logger::try_init();

    let (publisher, mut updates) = ChannelPublisher::<Update>::pair(100);
    let series = SimulatedBarSeries::new(
        SeriesRequest::new("DCE.jd2405", 300, 100),
        Box::new(publisher.clone()),
    );
    let target = SimulatedTargetPosition::spawn(
        TargetPositionConfig {
            lot_step: 5,
            tick: Duration::from_millis(10),
            ..TargetPositionConfig::new("DCE.jd2405")
        },
        Box::new(publisher),
    );

    series.load_history(vec![Bar::new(1, 10), Bar::new(2, 20)]).await.unwrap();
    assert!(!series.is_ready().await);

    series.mark_ready().await.unwrap();
    assert!(updates.next().await.unwrap().is_empty());

    series.push_live(Bar::new(3, 30)).await.unwrap();
    assert_eq!(updates.next().await.unwrap().bar.unwrap().volume, 30);

    target.set_target_volume(10).unwrap();
    let mut positions = Vec::new();
    while positions.last() != Some(&PositionSnapshot::new(10, 0)) {
        positions.push(updates.next().await.unwrap().position.unwrap());
    }
    assert_eq!(positions, vec![PositionSnapshot::new(5, 0), PositionSnapshot::new(10, 0)]);
    assert_eq!(series.snapshot().await.len(), 3);
}

/// Test that releasing the guard halts fills and, with every publisher gone,
/// closes the stream
#[tokio::test(start_paused = true)]
async fn test_guard_release_stops_fills() {
    let _ = env_logger::try_init();

    let (publisher, mut updates) = ChannelPublisher::<Update>::pair(100);
    let target = Arc::new(SimulatedTargetPosition::spawn(
        TargetPositionConfig {
            lot_step: 1,
            tick: Duration::from_millis(10),
            ..TargetPositionConfig::new("DCE.jd2405")
        },
        Box::new(publisher),
    ));

    let guard = TargetPositionGuard::acquire(target.clone());
    guard.set_target_volume(100).unwrap();
    assert_eq!(updates.next().await.unwrap().position.unwrap().net(), 1);

    guard.release();
    assert!(target.is_cancelled());
    assert!(target.set_target_volume(50).is_err());

    // Whatever was in flight drains, then the stream reports closed
    loop {
        match updates.next().await {
            Ok(update) => assert!(update.position.is_some()),
            Err(e) => {
                assert_eq!(e, TransportError::ChannelClosed);
                break;
            }
        }
    }
    assert!(target.position().net() < 100);
}
