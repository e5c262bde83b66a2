//! Fan-out of call results to every connected event-stream listener

use pplx_mcp::jsonrpc::JsonRpcResponse;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc;
use tracing::{debug, error, warn};
use uuid::Uuid;

/// Events a listener may have queued before it is dropped
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

type SubscriberMap = HashMap<Uuid, mpsc::Sender<String>>;

/// Concurrency-safe subscriber set.
///
/// Sends happen while the set is locked, so every listener sees events in the
/// order they were broadcast. A send never waits: a listener whose queue is
/// full is removed, and its stream ends once the queued events are drained.
#[derive(Clone)]
pub struct Broadcaster {
    subscribers: Arc<Mutex<SubscriberMap>>,
    capacity: usize,
}

impl Default for Broadcaster {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_QUEUE_CAPACITY)
    }
}

impl Broadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { subscribers: Arc::default(), capacity: capacity.max(1) }
    }

    fn lock(&self) -> MutexGuard<'_, SubscriberMap> {
        // A panic while holding the lock cannot leave the map half-updated
        self.subscribers.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Register a listener. It stays registered until the returned guard is dropped.
    pub fn subscribe(&self) -> Subscription {
        let (sender, receiver) = mpsc::channel(self.capacity);
        let id = Uuid::new_v4();
        let count = {
            let mut subscribers = self.lock();
            subscribers.insert(id, sender);
            subscribers.len()
        };
        debug!("Event subscriber {} connected ({} total)", id, count);
        Subscription { id, receiver, subscribers: self.subscribers.clone() }
    }

    /// Push one message to every current subscriber. Returns how many received it.
    pub fn broadcast(&self, message: &JsonRpcResponse) -> usize {
        let payload = match serde_json::to_string(message) {
            Ok(payload) => payload,
            Err(e) => {
                error!("Failed to serialize broadcast event: {}", e);
                return 0;
            }
        };
        let mut subscribers = self.lock();
        // Receivers already gone, or too far behind, are pruned in the same pass
        subscribers.retain(|id, sender| match sender.try_send(payload.clone()) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!("Event subscriber {} is not reading; dropping it", id);
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => false,
        });
        subscribers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().len()
    }
}

/// Live registration in a [`Broadcaster`]; removed from the set on drop.
pub struct Subscription {
    id: Uuid,
    receiver: mpsc::Receiver<String>,
    subscribers: Arc<Mutex<SubscriberMap>>,
}

impl Subscription {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Next serialized event, in broadcast order
    pub async fn recv(&mut self) -> Option<String> {
        self.receiver.recv().await
    }

    pub fn try_recv(&mut self) -> Option<String> {
        self.receiver.try_recv().ok()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let mut subscribers =
            self.subscribers.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        subscribers.remove(&self.id);
        debug!("Event subscriber {} disconnected ({} remaining)", self.id, subscribers.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pplx_mcp::jsonrpc::{success_response, RequestId};
    use serde_json::json;

    fn event(n: i64) -> JsonRpcResponse {
        success_response(Some(RequestId::Number(n.into())), json!({"n": n}))
    }

    #[tokio::test]
    async fn every_subscriber_receives_each_event() {
        let hub = Broadcaster::new();
        let mut a = hub.subscribe();
        let mut b = hub.subscribe();

        assert_eq!(hub.broadcast(&event(1)), 2);

        for sub in [&mut a, &mut b] {
            let payload: serde_json::Value =
                serde_json::from_str(&sub.recv().await.unwrap()).unwrap();
            assert_eq!(payload["id"], json!(1));
        }
    }

    #[tokio::test]
    async fn per_subscriber_order_matches_broadcast_order() {
        let hub = Broadcaster::new();
        let mut sub = hub.subscribe();

        for n in 0..10 {
            hub.broadcast(&event(n));
        }

        for n in 0..10 {
            let payload: serde_json::Value =
                serde_json::from_str(&sub.recv().await.unwrap()).unwrap();
            assert_eq!(payload["id"], json!(n));
        }
        assert!(sub.try_recv().is_none());
    }

    #[test]
    fn dropping_subscription_unregisters_it() {
        let hub = Broadcaster::new();
        let a = hub.subscribe();
        let b = hub.subscribe();
        assert_eq!(hub.subscriber_count(), 2);

        drop(a);
        assert_eq!(hub.subscriber_count(), 1);
        drop(b);
        assert_eq!(hub.subscriber_count(), 0);
        assert_eq!(hub.broadcast(&event(1)), 0);
    }

    #[tokio::test]
    async fn stalled_subscriber_is_dropped_after_its_queue_fills() {
        let hub = Broadcaster::with_capacity(2);
        let mut stalled = hub.subscribe();
        let mut reader = hub.subscribe();

        assert_eq!(hub.broadcast(&event(0)), 2);
        reader.recv().await.unwrap();
        assert_eq!(hub.broadcast(&event(1)), 2);
        reader.recv().await.unwrap();
        // `stalled` holds two unread events; the third does not fit
        assert_eq!(hub.broadcast(&event(2)), 1);
        assert_eq!(hub.subscriber_count(), 1);

        // Queued events are still delivered, then the stream ends
        assert!(stalled.recv().await.is_some());
        assert!(stalled.recv().await.is_some());
        assert!(stalled.recv().await.is_none());

        let payload: serde_json::Value =
            serde_json::from_str(&reader.recv().await.unwrap()).unwrap();
        assert_eq!(payload["id"], json!(2));
    }

    #[tokio::test]
    async fn broadcast_races_with_disconnects() {
        let hub = Broadcaster::new();
        let mut tasks = Vec::new();
        for i in 0..32 {
            let hub = hub.clone();
            tasks.push(tokio::spawn(async move {
                let sub = hub.subscribe();
                hub.broadcast(&event(i));
                drop(sub);
                hub.broadcast(&event(i));
            }));
        }
        for t in tasks {
            t.await.unwrap();
        }
        assert_eq!(hub.subscriber_count(), 0);
    }
}
