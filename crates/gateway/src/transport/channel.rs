//! Tokio channel-based transport for single-process mode
//!
//! Uses an mpsc channel: many publishers (market data feed, account feed,
//! simulators) fan into the single consumer that drives the schedule.
//! No serialization overhead - messages are passed directly.

use crate::error::TransportError;
use crate::transport::{Publisher, Subscriber};
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Channel-based publisher using an mpsc sender
#[derive(Debug)]
pub struct ChannelPublisher<M> {
    tx: mpsc::Sender<M>,
}

impl<M> Clone for ChannelPublisher<M> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<M> ChannelPublisher<M> {
    /// Create a publisher/subscriber pair with given capacity
    pub fn pair(capacity: usize) -> (Self, ChannelSubscriber<M>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, ChannelSubscriber { rx })
    }
}

#[async_trait]
impl<M> Publisher<M> for ChannelPublisher<M>
where
    M: Clone + Send + Sync + 'static,
{
    async fn publish(&self, msg: &M) -> Result<(), TransportError> {
        self.tx
            .send(msg.clone())
            .await
            .map_err(|_| TransportError::ChannelClosed)
    }
}

/// Channel-based subscriber using an mpsc receiver
///
/// The stream closes once every publisher has been dropped.
#[derive(Debug)]
pub struct ChannelSubscriber<M> {
    rx: mpsc::Receiver<M>,
}

#[async_trait]
impl<M> Subscriber<M> for ChannelSubscriber<M>
where
    M: Send + 'static,
{
    async fn next(&mut self) -> Result<M, TransportError> {
        self.rx.recv().await.ok_or(TransportError::ChannelClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pubsub() {
        let (publisher, mut subscriber) = ChannelPublisher::<String>::pair(10);

        publisher.publish(&"hello".to_string()).await.unwrap();

        let msg = subscriber.next().await.unwrap();
        assert_eq!(msg, "hello");
    }

    #[tokio::test]
    async fn test_order_preserved_across_publishers() {
        let (pub1, mut subscriber) = ChannelPublisher::<i32>::pair(10);
        let pub2 = pub1.clone();

        pub1.publish(&1).await.unwrap();
        pub2.publish(&2).await.unwrap();
        pub1.publish(&3).await.unwrap();

        assert_eq!(subscriber.next().await.unwrap(), 1);
        assert_eq!(subscriber.next().await.unwrap(), 2);
        assert_eq!(subscriber.next().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_closed_when_publishers_dropped() {
        let (publisher, mut subscriber) = ChannelPublisher::<i32>::pair(10);
        publisher.publish(&7).await.unwrap();
        drop(publisher);

        assert_eq!(subscriber.next().await.unwrap(), 7);
        assert_eq!(
            subscriber.next().await.unwrap_err(),
            TransportError::ChannelClosed
        );
    }

    #[tokio::test]
    async fn test_publish_after_subscriber_dropped() {
        let (publisher, subscriber) = ChannelPublisher::<i32>::pair(10);
        drop(subscriber);
        assert_eq!(
            publisher.publish(&1).await.unwrap_err(),
            TransportError::ChannelClosed
        );
    }
}
