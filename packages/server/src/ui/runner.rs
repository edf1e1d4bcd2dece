//! Router construction and server startup.

use std::{
    net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr},
    path::Path,
    sync::Arc,
};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    config::ServerConfig,
    domain::ChatRoom,
    error::ServerError,
    ui::{
        handler::{get_room_state, health_check, websocket_handler},
        signal::shutdown_signal,
        state::AppState,
    },
};

/// Build the application router.
///
/// Any path not handled by the chat or API routes is served from
/// `static_dir`.
pub fn build_router(state: Arc<AppState>, static_dir: &Path) -> Router {
    Router::new()
        .route("/ws", get(websocket_handler))
        .route("/api/health", get(health_check))
        .route("/api/room", get(get_room_state))
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Initialize the chat room, bind the listener and build the router.
async fn prepare(config: &ServerConfig) -> Result<(TcpListener, Router), ServerError> {
    // The room (and its broadcast loop) exists before the first request
    let room = ChatRoom::init(config.room);
    let state = Arc::new(AppState::new(room));

    let listener = TcpListener::bind(config.addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: config.addr,
            source,
        })?;
    let local_addr = listener.local_addr().map_err(ServerError::Serve)?;
    log_connect_addresses(local_addr);

    Ok((listener, build_router(state, &config.static_dir)))
}

/// Run the server until a shutdown signal arrives.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let (listener, router) = prepare(&config).await?;

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Run the server in the background and return the bound address.
///
/// Useful for tests binding to port 0.
pub async fn run_with_addr(config: ServerConfig) -> Result<SocketAddr, ServerError> {
    let (listener, router) = prepare(&config).await?;
    let local_addr = listener.local_addr().map_err(ServerError::Serve)?;

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            tracing::error!("Server error: {}", e);
        }
    });

    Ok(local_addr)
}

fn log_connect_addresses(addr: SocketAddr) {
    tracing::info!("Listening on {}", addr);
    for url in connect_urls(addr) {
        tracing::info!("Chat clients can connect at {}", url);
    }
}

/// URLs clients can reach the server at.
///
/// An unspecified bind address expands to every local interface address of
/// the same family.
fn connect_urls(addr: SocketAddr) -> Vec<String> {
    if !addr.ip().is_unspecified() {
        return vec![format!("http://{addr}/")];
    }

    let ips: Vec<IpAddr> = match local_ip_address::list_afinet_netifas() {
        Ok(interfaces) => interfaces
            .into_iter()
            .map(|(_, ip)| ip)
            .filter(|ip| ip.is_ipv4() == addr.is_ipv4())
            .collect(),
        Err(e) => {
            tracing::warn!("Failed to list network interfaces: {}", e);
            Vec::new()
        }
    };
    let ips = if ips.is_empty() {
        vec![loopback_for(addr.ip())]
    } else {
        ips
    };

    ips.into_iter()
        .map(|ip| format!("http://{}/", SocketAddr::new(ip, addr.port())))
        .collect()
}

fn loopback_for(ip: IpAddr) -> IpAddr {
    match ip {
        IpAddr::V4(_) => IpAddr::V4(Ipv4Addr::LOCALHOST),
        IpAddr::V6(_) => IpAddr::V6(Ipv6Addr::LOCALHOST),
    }
}
