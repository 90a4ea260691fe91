//! Server lifecycle
//!
//! [`Server::bind`] prepares the listening socket; [`Server::run`] starts the
//! acceptor and dispatcher tasks around a shared [`WorkQueue`] and returns
//! once both have seen the shutdown sentinel.

pub mod acceptor;
pub mod dispatcher;
pub mod listener;
pub mod queue;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::error::StartupError;
use crate::handler::RequestHandler;

pub use acceptor::Acceptor;
pub use dispatcher::Dispatcher;
pub use queue::{WorkItem, WorkQueue};

/// Counts gathered over one server run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShutdownReport {
    /// Requests queued by the acceptor
    pub accepted: u64,
    /// Requests taken off the queue by the dispatcher
    pub dispatched: u64,
    /// Requests still queued at shutdown, closed unanswered
    pub drained: u64,
}

pub struct Server {
    listener: Arc<TcpListener>,
    local_addr: SocketAddr,
    max_request_size: usize,
}

impl Server {
    pub async fn bind(cfg: &ServerConfig) -> Result<Self, StartupError> {
        let listener = listener::bind(cfg).await?;
        let local_addr = listener.local_addr().map_err(|source| StartupError::Listen {
            addr: cfg.listen_addr.clone(),
            source,
        })?;

        Ok(Self {
            listener: Arc::new(listener),
            local_addr,
            max_request_size: cfg.max_request_size,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serves until a request containing the shutdown sentinel has been
    /// processed, then releases the listening socket.
    pub async fn run<H: RequestHandler>(self, handler: H) -> anyhow::Result<ShutdownReport> {
        let queue = Arc::new(WorkQueue::new());

        let acceptor = Acceptor::new(
            Arc::clone(&self.listener),
            Arc::clone(&queue),
            self.max_request_size,
        );
        let dispatcher = Dispatcher::new(Arc::clone(&queue), Arc::new(handler));

        let accept_task = tokio::spawn(acceptor.run());
        let dispatch_task = tokio::spawn(dispatcher.run());

        let joined = join_tasks(&queue, accept_task, dispatch_task).await;

        queue.close();
        let remnants = queue.drain();
        let drained = remnants.len() as u64;
        for item in remnants {
            item.connection.close().await;
        }

        drop(self.listener);
        let (accepted, dispatched) = joined?;
        info!(accepted, dispatched, drained, "Server stopped");

        Ok(ShutdownReport {
            accepted,
            dispatched,
            drained,
        })
    }
}

/// Waits for the acceptor, then the dispatcher.
///
/// If the acceptor dies, the queue is closed first so a dispatcher parked on
/// an empty queue wakes up and returns.
async fn join_tasks<T>(
    queue: &WorkQueue<T>,
    accept_task: JoinHandle<u64>,
    dispatch_task: JoinHandle<u64>,
) -> anyhow::Result<(u64, u64)> {
    let accepted = match accept_task.await {
        Ok(accepted) => accepted,
        Err(e) => {
            queue.close();
            if let Err(e) = dispatch_task.await {
                warn!(error = %e, "Dispatcher task failed after acceptor failure");
            }
            return Err(e).context("acceptor task failed");
        }
    };

    let dispatched = dispatch_task.await.context("dispatcher task failed")?;
    Ok((accepted, dispatched))
}
