//! Bounded FIFO of pending outbound fragments.
//!
//! Many producers post, the broadcast loop is the only consumer. A full
//! queue suspends the posting task until the next drain frees a slot.

use tokio::sync::{
    Mutex,
    mpsc::{self, error::TryRecvError},
};

use super::error::RoomError;

/// Message queue shared by every producer of a room.
pub struct MessageQueue {
    sender: mpsc::Sender<String>,
    receiver: Mutex<mpsc::Receiver<String>>,
}

impl MessageQueue {
    /// Create an empty queue holding at most `capacity` fragments.
    ///
    /// `capacity` must be positive; `RoomConfig` guarantees it.
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = mpsc::channel(capacity);
        Self {
            sender,
            receiver: Mutex::new(receiver),
        }
    }

    /// Append a fragment, waiting while the queue is full.
    ///
    /// # Errors
    ///
    /// Returns `RoomError::QueueClosed` if the consumer side is gone.
    pub async fn push(&self, fragment: String) -> Result<(), RoomError> {
        self.sender
            .send(fragment)
            .await
            .map_err(|_| RoomError::QueueClosed)
    }

    /// Take every fragment available right now, in FIFO order.
    ///
    /// Never waits for new fragments. The number taken is fixed when the
    /// drain starts, so a producer woken by the freed slots lands in the
    /// next drain.
    pub async fn drain(&self) -> Vec<String> {
        let mut receiver = self.receiver.lock().await;
        let available = receiver.len();
        let mut drained = Vec::with_capacity(available);
        for _ in 0..available {
            match receiver.try_recv() {
                Ok(fragment) => drained.push(fragment),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        drained
    }

    /// Number of fragments waiting for the next drain.
    pub fn len(&self) -> usize {
        self.sender.max_capacity() - self.sender.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of pending fragments.
    pub fn capacity(&self) -> usize {
        self.sender.max_capacity()
    }
}
