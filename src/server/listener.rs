use std::net::SocketAddr;

use tokio::net::{TcpListener, TcpSocket};
use tracing::info;

use crate::config::ServerConfig;
use crate::error::StartupError;

/// Resolves `listen_addr` to the first usable socket address.
pub async fn resolve(listen_addr: &str) -> Result<SocketAddr, StartupError> {
    let mut addrs = tokio::net::lookup_host(listen_addr)
        .await
        .map_err(|e| StartupError::Resolve {
            addr: listen_addr.to_string(),
            reason: e.to_string(),
        })?;

    addrs.next().ok_or_else(|| StartupError::Resolve {
        addr: listen_addr.to_string(),
        reason: "no addresses returned".to_string(),
    })
}

/// Creates, binds and listens on the configured address.
///
/// The socket reuses the address so a restart is not blocked by connections
/// lingering in TIME_WAIT.
pub async fn bind(cfg: &ServerConfig) -> Result<TcpListener, StartupError> {
    let addr = resolve(&cfg.listen_addr).await?;

    let bind_err = |source: std::io::Error| StartupError::Bind {
        addr: addr.to_string(),
        source,
    };

    let socket = if addr.is_ipv6() {
        TcpSocket::new_v6()
    } else {
        TcpSocket::new_v4()
    }
    .map_err(bind_err)?;

    socket.set_reuseaddr(true).map_err(bind_err)?;
    socket.bind(addr).map_err(bind_err)?;

    let listener = socket.listen(cfg.backlog).map_err(|source| StartupError::Listen {
        addr: addr.to_string(),
        source,
    })?;

    info!(addr = %addr, backlog = cfg.backlog, "Listening");
    Ok(listener)
}
