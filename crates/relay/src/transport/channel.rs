//! Tokio channel-based transport
//!
//! Broadcast channels give pub/sub semantics within a single process.
//! Messages are cloned to each subscriber, nothing is serialized.

use crate::error::TransportError;
use crate::transport::{Publisher, Subscriber};
use async_trait::async_trait;
use log::warn;
use tokio::sync::broadcast;

/// Default channel capacity when none is configured
pub const DEFAULT_CAPACITY: usize = 1024;

/// Channel-based publisher using broadcast
#[derive(Debug)]
pub struct ChannelPublisher<M> {
    tx: broadcast::Sender<M>,
}

impl<M: Clone> ChannelPublisher<M> {
    /// Create a publisher with no subscribers yet
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Create a publisher/subscriber pair with given capacity
    pub fn pair(capacity: usize) -> (Self, ChannelSubscriber<M>) {
        let publisher = Self::new(capacity);
        let subscriber = publisher.subscribe();
        (publisher, subscriber)
    }

    /// Get another subscriber for this publisher
    ///
    /// The subscriber only sees messages published after this call.
    pub fn subscribe(&self) -> ChannelSubscriber<M> {
        ChannelSubscriber {
            rx: self.tx.subscribe(),
            _tx: self.tx.clone(),
        }
    }
}

impl<M: Clone> Default for ChannelPublisher<M> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
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
            .map_err(|_| TransportError::ChannelClosed)?;
        Ok(())
    }

    fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// Channel-based subscriber using broadcast receiver
#[derive(Debug)]
pub struct ChannelSubscriber<M> {
    rx: broadcast::Receiver<M>,
    // Keep sender alive to prevent channel from closing
    _tx: broadcast::Sender<M>,
}

#[async_trait]
impl<M> Subscriber<M> for ChannelSubscriber<M>
where
    M: Clone + Send + 'static,
{
    async fn next(&mut self) -> Result<M, TransportError> {
        loop {
            match self.rx.recv().await {
                Ok(msg) => return Ok(msg),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("Subscriber lagged, skipped {} messages", skipped);
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => {
                    return Err(TransportError::ChannelClosed);
                }
            }
        }
    }

    fn try_next(&mut self) -> Result<Option<M>, TransportError> {
        loop {
            match self.rx.try_recv() {
                Ok(msg) => return Ok(Some(msg)),
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                // Receiver is repositioned at the oldest retained message
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
                Err(broadcast::error::TryRecvError::Closed) => {
                    return Err(TransportError::ChannelClosed);
                }
            }
        }
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
    async fn test_multiple_subscribers() {
        let (publisher, mut sub1) = ChannelPublisher::<i32>::pair(10);
        let mut sub2 = publisher.subscribe();
        assert_eq!(publisher.subscriber_count(), 2);

        publisher.publish(&42).await.unwrap();

        assert_eq!(sub1.next().await.unwrap(), 42);
        assert_eq!(sub2.next().await.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_fails() {
        let publisher = ChannelPublisher::<i32>::new(4);
        assert_eq!(publisher.subscriber_count(), 0);
        assert!(matches!(
            publisher.publish(&1).await,
            Err(TransportError::ChannelClosed)
        ));
    }

    #[tokio::test]
    async fn test_lagged_subscriber_keeps_newest() {
        let (publisher, mut subscriber) = ChannelPublisher::<i32>::pair(2);
        for i in 0..5 {
            publisher.publish(&i).await.unwrap();
        }

        assert_eq!(subscriber.try_next().unwrap(), Some(3));
        assert_eq!(subscriber.try_next().unwrap(), Some(4));
        assert_eq!(subscriber.try_next().unwrap(), None);
    }
}
