//! Simulated bar series
//!
//! Holds bars in memory and publishes a notification for every live bar.
//! The series reports ready once it holds the requested number of bars or
//! is explicitly marked ready (short histories). Becoming ready always
//! reaches the update stream, so a consumer parked on it wakes up.

use crate::error::GatewayError;
use crate::messages::update::Update;
use crate::transport::Publisher;
use async_trait::async_trait;
use log::debug;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use vwap_core::Bar;
use vwap_ports::{BarSeries, SeriesRequest};

pub struct SimulatedBarSeries {
    request: SeriesRequest,
    bars: RwLock<Vec<Bar>>,
    ready: AtomicBool,
    /// Publisher for update notifications
    publisher: Box<dyn Publisher<Update> + Send + Sync>,
}

impl SimulatedBarSeries {
    pub fn new(request: SeriesRequest, publisher: Box<dyn Publisher<Update> + Send + Sync>) -> Self {
        Self {
            request,
            bars: RwLock::new(Vec::new()),
            ready: AtomicBool::new(false),
            publisher,
        }
    }

    /// Load history bars
    ///
    /// Bars must be in ascending timestamp order and newer than what is held.
    /// Publishes a wake-up only if this load completes the subscription.
    pub async fn load_history(&self, history: Vec<Bar>) -> Result<(), GatewayError> {
        let became_ready = {
            let mut bars = self.bars.write().await;
            Self::append(&mut bars, history)?;
            bars.len() >= self.request.length && !self.ready.swap(true, Ordering::SeqCst)
        };
        if became_ready {
            debug!("[{}] History complete, series ready", self.request.symbol);
            self.publisher.publish(&Update::notify()).await?;
        }
        Ok(())
    }

    fn append(bars: &mut Vec<Bar>, history: Vec<Bar>) -> Result<(), GatewayError> {
        let mut last_ts = bars.last().map(|b| b.timestamp_ns);
        for bar in &history {
            if last_ts.is_some_and(|ts| bar.timestamp_ns <= ts) {
                return Err(GatewayError::InvalidSeries(format!(
                    "bar at {} is not after {}",
                    bar.timestamp_ns,
                    last_ts.unwrap_or_default()
                )));
            }
            last_ts = Some(bar.timestamp_ns);
        }
        bars.extend(history);
        Ok(())
    }

    /// Mark the series ready and wake the consumer
    pub async fn mark_ready(&self) -> Result<(), GatewayError> {
        self.ready.store(true, Ordering::SeqCst);
        self.publisher.publish(&Update::notify()).await?;
        Ok(())
    }

    /// Append a live bar and publish it
    ///
    /// The bar update doubles as the wake-up when it completes the
    /// subscription.
    pub async fn push_live(&self, bar: Bar) -> Result<(), GatewayError> {
        {
            let mut bars = self.bars.write().await;
            if let Some(last) = bars.last() {
                if bar.timestamp_ns <= last.timestamp_ns {
                    return Err(GatewayError::InvalidSeries(format!(
                        "live bar at {} is not after {}",
                        bar.timestamp_ns, last.timestamp_ns
                    )));
                }
            }
            bars.push(bar.clone());
            if bars.len() >= self.request.length && !self.ready.swap(true, Ordering::SeqCst) {
                debug!("[{}] Live bar completed the series", self.request.symbol);
            }
        }
        debug!("[{}] Live bar at {}", self.request.symbol, bar.timestamp_ns);
        self.publisher.publish(&Update::bar(bar)).await?;
        Ok(())
    }
}

#[async_trait]
impl BarSeries for SimulatedBarSeries {
    fn request(&self) -> &SeriesRequest {
        &self.request
    }

    async fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    async fn snapshot(&self) -> Vec<Bar> {
        self.bars.read().await.clone()
    }
}
