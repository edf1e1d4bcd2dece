//! Chat room aggregate.
//!
//! The room owns the client registry and the message queue. Producers
//! (joins, leaves, chat lines) append fragments to the queue; a single
//! broadcast loop periodically drains it, merges the fragments into one
//! block and fans that block out to every registered client.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use futures_util::future::join_all;
use tokio::{
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};

use super::{
    config::RoomConfig,
    entity::Client,
    error::{JoinRejected, RoomError, TransportError},
    message,
    queue::MessageQueue,
    registry::ClientRegistry,
    transport::MessageSink,
    value_object::{DisplayName, Timestamp},
};

/// Outcome of one drain-and-fan-out cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Fragments merged into the block
    pub fragments: usize,
    /// Clients the block was sent to
    pub recipients: usize,
    /// Sends that failed
    pub failed: usize,
}

/// Represents the chat room shared by every connection
pub struct ChatRoom {
    registry: ClientRegistry,
    queue: MessageQueue,
    config: RoomConfig,
    created_at: Timestamp,
    loop_started: AtomicBool,
}

impl ChatRoom {
    /// Create a room without starting its broadcast loop.
    pub fn new(config: RoomConfig) -> Arc<Self> {
        Arc::new(Self {
            registry: ClientRegistry::new(),
            queue: MessageQueue::new(config.queue_capacity()),
            config,
            created_at: Timestamp::now(),
            loop_started: AtomicBool::new(false),
        })
    }

    /// Create a room and start its broadcast loop.
    ///
    /// Must be called from within a tokio runtime.
    pub fn init(config: RoomConfig) -> Arc<Self> {
        let room = Self::new(config);
        room.spawn_broadcast_loop();
        room
    }

    /// Start the periodic broadcast loop.
    ///
    /// Returns `None` if the loop is already running. The loop only holds a
    /// weak reference and stops once the room is dropped.
    pub fn spawn_broadcast_loop(self: &Arc<Self>) -> Option<JoinHandle<()>> {
        if self.loop_started.swap(true, Ordering::SeqCst) {
            tracing::warn!("Broadcast loop already running; ignoring second start");
            return None;
        }

        let weak = Arc::downgrade(self);
        let period = self.config.broadcast_interval();
        tracing::info!(?period, "Starting broadcast loop");

        Some(tokio::spawn(async move {
            let mut ticker = time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let Some(room) = weak.upgrade() else {
                    tracing::debug!("Chat room dropped; stopping broadcast loop");
                    break;
                };
                room.broadcast().await;
            }
        }))
    }

    /// Register a client under `name`.
    ///
    /// The name check and the insert are one atomic step. On success a join
    /// notice is queued after the registry lock is released.
    ///
    /// # Errors
    ///
    /// Returns `JoinRejected` (carrying the unused sink) if the name is taken.
    /// Nothing is queued in that case.
    pub async fn join(
        self: &Arc<Self>,
        name: DisplayName,
        sink: Box<dyn MessageSink>,
    ) -> Result<Arc<Client>, JoinRejected> {
        let client = Client::new(name, sink, Arc::downgrade(self));
        let client = match self.registry.register(client).await {
            Ok(client) => client,
            Err(rejected) => {
                let (name, sink) = rejected.into_parts();
                tracing::warn!(%name, "Display name already taken; rejecting join");
                return Err(JoinRejected { name, sink });
            }
        };

        tracing::info!(name = %client.name(), "Client joined");
        if let Err(e) = self.post(message::join_notice(client.name())).await {
            tracing::warn!(name = %client.name(), "Failed to queue join notice: {}", e);
        }
        Ok(client)
    }

    /// Remove the client registered under `name`.
    ///
    /// Returns `false` and queues nothing when no such client is registered,
    /// so a duplicate leave is a no-op.
    pub async fn leave(&self, name: &str) -> bool {
        let Some(client) = self.registry.remove(name).await else {
            tracing::debug!(name, "Leave for unregistered name ignored");
            return false;
        };

        tracing::info!(name = %client.name(), "Client left");
        if let Err(e) = self.post(message::leave_notice(client.name())).await {
            tracing::warn!(name = %client.name(), "Failed to queue leave notice: {}", e);
        }
        true
    }

    /// Append one fragment to the queue, waiting while it is full.
    pub async fn post(&self, text: String) -> Result<(), RoomError> {
        tracing::trace!(fragment = %text, "Queueing fragment");
        self.queue.push(text).await
    }

    /// Drain the queue and send the merged block to every registered client.
    ///
    /// Sends run concurrently on a snapshot of the registry, each bounded by
    /// the configured send timeout. A failed or timed-out send is logged and
    /// otherwise ignored: the failing client's own read loop notices the
    /// broken connection and leaves.
    pub async fn broadcast(&self) -> BroadcastReport {
        let fragments = self.queue.drain().await;
        let Some(block) = message::merge_block(&fragments) else {
            return BroadcastReport::default();
        };

        let clients = self.registry.snapshot().await;
        let send_timeout = self.config.send_timeout();
        let block = block.as_str();
        let results = join_all(clients.iter().map(|client| async move {
            match time::timeout(send_timeout, client.send(block)).await {
                Ok(result) => result,
                Err(_) => Err(TransportError::TimedOut(send_timeout)),
            }
        }))
        .await;

        let mut failed = 0;
        for (client, result) in clients.iter().zip(results) {
            if let Err(e) = result {
                failed += 1;
                tracing::warn!(name = %client.name(), "Failed to deliver block: {}", e);
            }
        }

        let report = BroadcastReport {
            fragments: fragments.len(),
            recipients: clients.len(),
            failed,
        };
        tracing::debug!(?report, "Broadcast block");
        report
    }

    /// Names of the registered clients, sorted
    pub async fn participant_names(&self) -> Vec<String> {
        self.registry.names().await
    }

    pub async fn participant_count(&self) -> usize {
        self.registry.len().await
    }

    /// Fragments waiting for the next broadcast
    pub fn pending_fragments(&self) -> usize {
        self.queue.len()
    }

    pub fn config(&self) -> &RoomConfig {
        &self.config
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub(crate) fn queue(&self) -> &MessageQueue {
        &self.queue
    }
}
