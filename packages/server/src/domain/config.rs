//! Room tuning knobs.

use std::time::Duration;

use super::error::ConfigError;

/// Default number of fragments the queue holds before producers block
pub const DEFAULT_QUEUE_CAPACITY: usize = 5;

/// Default period of the broadcast loop
pub const DEFAULT_BROADCAST_INTERVAL: Duration = Duration::from_millis(100);

/// Shortest accepted broadcast period
pub const MIN_BROADCAST_INTERVAL: Duration = Duration::from_millis(1);

/// Longest accepted broadcast period
pub const MAX_BROADCAST_INTERVAL: Duration = Duration::from_secs(60);

/// Default upper bound on a single send during fan-out
pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(1);

/// Shortest accepted send timeout
pub const MIN_SEND_TIMEOUT: Duration = Duration::from_millis(1);

/// Longest accepted send timeout
pub const MAX_SEND_TIMEOUT: Duration = Duration::from_secs(60);

/// Validated configuration of a chat room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomConfig {
    queue_capacity: usize,
    broadcast_interval: Duration,
    send_timeout: Duration,
}

impl RoomConfig {
    /// Create a new RoomConfig.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the capacity is zero or the interval is
    /// outside `MIN_BROADCAST_INTERVAL..=MAX_BROADCAST_INTERVAL`.
    pub fn new(queue_capacity: usize, broadcast_interval: Duration) -> Result<Self, ConfigError> {
        if queue_capacity == 0 {
            return Err(ConfigError::ZeroQueueCapacity);
        }
        if !(MIN_BROADCAST_INTERVAL..=MAX_BROADCAST_INTERVAL).contains(&broadcast_interval) {
            return Err(ConfigError::BroadcastIntervalOutOfRange {
                min: MIN_BROADCAST_INTERVAL,
                max: MAX_BROADCAST_INTERVAL,
                actual: broadcast_interval,
            });
        }
        Ok(Self {
            queue_capacity,
            broadcast_interval,
            send_timeout: DEFAULT_SEND_TIMEOUT,
        })
    }

    /// Replace the per-client send timeout used by the broadcast fan-out.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the timeout is outside
    /// `MIN_SEND_TIMEOUT..=MAX_SEND_TIMEOUT`.
    pub fn with_send_timeout(self, send_timeout: Duration) -> Result<Self, ConfigError> {
        if !(MIN_SEND_TIMEOUT..=MAX_SEND_TIMEOUT).contains(&send_timeout) {
            return Err(ConfigError::SendTimeoutOutOfRange {
                min: MIN_SEND_TIMEOUT,
                max: MAX_SEND_TIMEOUT,
                actual: send_timeout,
            });
        }
        Ok(Self {
            send_timeout,
            ..self
        })
    }

    pub fn queue_capacity(&self) -> usize {
        self.queue_capacity
    }

    pub fn broadcast_interval(&self) -> Duration {
        self.broadcast_interval
    }

    /// How long the fan-out waits on one client before counting the send as failed
    pub fn send_timeout(&self) -> Duration {
        self.send_timeout
    }
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            broadcast_interval: DEFAULT_BROADCAST_INTERVAL,
            send_timeout: DEFAULT_SEND_TIMEOUT,
        }
    }
}
