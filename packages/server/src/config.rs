//! Command-line configuration.

use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
    time::Duration,
};

use clap::Parser;

use crate::domain::{
    ConfigError, RoomConfig,
    config::{DEFAULT_BROADCAST_INTERVAL, DEFAULT_QUEUE_CAPACITY, DEFAULT_SEND_TIMEOUT},
};

/// Command-line arguments of the chat server
#[derive(Debug, Clone, Parser)]
#[command(name = "murmur-server", version, about = "Batched-broadcast WebSocket chat room server")]
pub struct Args {
    /// Address to listen on
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8000)]
    pub port: u16,

    /// Pending fragments held before posting clients are made to wait
    #[arg(long, default_value_t = DEFAULT_QUEUE_CAPACITY)]
    pub queue_capacity: usize,

    /// Broadcast period in milliseconds
    #[arg(long, default_value_t = DEFAULT_BROADCAST_INTERVAL.as_millis() as u64)]
    pub broadcast_interval_ms: u64,

    /// Milliseconds the broadcast waits on one client before giving up on it
    #[arg(long, default_value_t = DEFAULT_SEND_TIMEOUT.as_millis() as u64)]
    pub send_timeout_ms: u64,

    /// Directory served for every non-chat path
    #[arg(long, default_value = "./static")]
    pub static_dir: PathBuf,

    /// Default log level (overridden by RUST_LOG)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Validated server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub room: RoomConfig,
    pub static_dir: PathBuf,
}

impl ServerConfig {
    /// Validate command-line arguments.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the room settings are out of range.
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let room = RoomConfig::new(
            args.queue_capacity,
            Duration::from_millis(args.broadcast_interval_ms),
        )?
        .with_send_timeout(Duration::from_millis(args.send_timeout_ms))?;
        Ok(Self {
            addr: SocketAddr::new(args.host, args.port),
            room,
            static_dir: args.static_dir.clone(),
        })
    }
}
