//! Event relay
//!
//! Implements [`EventBroadcaster`] on top of two broadcast channels: one
//! carrying typed [`Event`]s and one carrying their JSON wire frames.
//! Frames are only serialized while someone is listening for them.

use argus_core::Event;
use argus_ports::{BroadcastError, EventBroadcaster};
use async_trait::async_trait;
use log::{debug, trace};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::TransportError;
use crate::transport::Publisher;
use crate::transport::channel::{ChannelPublisher, ChannelSubscriber, DEFAULT_CAPACITY};

/// In-process broadcaster for market data events
#[derive(Debug)]
pub struct EventRelay {
    events: ChannelPublisher<Event>,
    frames: ChannelPublisher<String>,
    published: AtomicU64,
    dropped: AtomicU64,
}

impl EventRelay {
    pub fn new(capacity: usize) -> Self {
        Self {
            events: ChannelPublisher::new(capacity),
            frames: ChannelPublisher::new(capacity),
            published: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
        }
    }

    /// Subscribe to typed events
    pub fn subscribe(&self) -> ChannelSubscriber<Event> {
        self.events.subscribe()
    }

    /// Subscribe to JSON wire frames
    pub fn subscribe_frames(&self) -> ChannelSubscriber<String> {
        self.frames.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.events.subscriber_count() + self.frames.subscriber_count()
    }

    /// Events delivered to at least one subscriber
    pub fn published(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }

    /// Events published while nobody was listening
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Serialize an event to its wire frame
    pub fn encode(event: &Event) -> Result<String, TransportError> {
        Ok(serde_json::to_string(event)?)
    }

    async fn relay(&self, event: &Event) -> Result<bool, TransportError> {
        let mut delivered = false;

        if self.frames.subscriber_count() > 0 {
            let frame = Self::encode(event)?;
            self.frames.publish(&frame).await?;
            delivered = true;
        }

        if self.events.subscriber_count() > 0 {
            self.events.publish(event).await?;
            delivered = true;
        }

        Ok(delivered)
    }
}

impl Default for EventRelay {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[async_trait]
impl EventBroadcaster for EventRelay {
    async fn publish(&self, event: &Event) -> Result<(), BroadcastError> {
        match self.relay(event).await {
            Ok(true) => {
                self.published.fetch_add(1, Ordering::Relaxed);
                trace!("Relayed {} from {}", event.kind, event.exchange);
                Ok(())
            }
            Ok(false) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                trace!("No subscribers for {} from {}", event.kind, event.exchange);
                Ok(())
            }
            // A subscriber can detach between the count check and the send
            Err(TransportError::ChannelClosed) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                debug!("Subscribers went away while relaying {}", event.kind);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}
