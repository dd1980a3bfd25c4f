//! Server-sent-events fan-out for `designUpdated`.
//!
//! The engine's design-updated hook forwards every event into a process-wide [`tokio::sync::broadcast`] channel.
//! Each `GET /api/events` subscriber drains its own receiver into a `text/event-stream` response. Delivery is
//! at-most-once and best-effort: a subscriber that lags simply skips the missed events and carries on, and there
//! is no replay buffer. Clients are expected to reconnect silently.

use actix_web::web::Bytes;
use futures::Stream;
use log::*;
use timber_market_engine::events::DesignUpdatedEvent;
use tokio::sync::broadcast;

#[derive(Clone)]
pub struct DesignBroadcaster {
    sender: broadcast::Sender<DesignUpdatedEvent>,
}

impl DesignBroadcaster {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publishes to every live subscriber. No subscribers is not an error; the event is simply dropped.
    pub fn publish(&self, event: DesignUpdatedEvent) {
        match self.sender.send(event) {
            Ok(n) => trace!("📬️ designUpdated delivered to {n} subscribers"),
            Err(_) => trace!("📬️ designUpdated dropped: no subscribers"),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DesignUpdatedEvent> {
        self.sender.subscribe()
    }

    /// One subscriber's view of the broadcast as SSE frames (`data: {json}\n\n`).
    pub fn event_stream(&self) -> impl Stream<Item = Result<Bytes, actix_web::Error>> {
        let rx = self.subscribe();
        futures::stream::unfold(rx, |mut rx| async move {
            loop {
                match rx.recv().await {
                    Ok(event) => {
                        let json = match serde_json::to_string(&event) {
                            Ok(json) => json,
                            Err(e) => {
                                error!("📬️ Could not serialize designUpdated event: {e}");
                                continue;
                            },
                        };
                        let frame = Bytes::from(format!("data: {json}\n\n"));
                        return Some((Ok(frame), rx));
                    },
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        warn!("📬️ SSE subscriber lagged, skipping {n} events");
                        continue;
                    },
                    Err(broadcast::error::RecvError::Closed) => return None,
                }
            }
        })
    }
}
