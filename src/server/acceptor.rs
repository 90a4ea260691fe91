use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::http::connection::{Connection, ReadOutcome};
use crate::server::queue::{WorkItem, WorkQueue};

/// Accepts connections, reads one request from each and queues it.
///
/// Reads carry no timeout: a client that connects and stays silent holds the
/// acceptor until it sends something or disconnects.
pub struct Acceptor {
    listener: Arc<TcpListener>,
    queue: Arc<WorkQueue<WorkItem>>,
    max_request_size: usize,
}

impl Acceptor {
    pub fn new(
        listener: Arc<TcpListener>,
        queue: Arc<WorkQueue<WorkItem>>,
        max_request_size: usize,
    ) -> Self {
        Self {
            listener,
            queue,
            max_request_size,
        }
    }

    /// Runs until a request carrying the shutdown sentinel has been queued.
    /// Returns the number of items queued, the sentinel item included.
    pub async fn run(self) -> u64 {
        let mut enqueued = 0;

        loop {
            let (stream, peer) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    warn!(error = %e, "Could not accept new client");
                    tokio::task::yield_now().await;
                    continue;
                }
            };

            let mut conn = Connection::new(stream, peer);
            debug!(id = conn.id(), peer = %peer, "Accepted connection");

            let payload = match conn.read_request(self.max_request_size).await {
                Ok(ReadOutcome::Request(payload)) => payload,
                Ok(ReadOutcome::Closed) => {
                    debug!(id = conn.id(), peer = %peer, "Peer closed before sending");
                    conn.close().await;
                    continue;
                }
                Err(e) => {
                    warn!(id = conn.id(), peer = %peer, error = %e, "Read failed");
                    conn.close().await;
                    continue;
                }
            };

            let item = WorkItem::new(conn, payload);
            let stop = item.is_shutdown();
            self.queue.push(item);
            enqueued += 1;

            if stop {
                info!(peer = %peer, "Shutdown sentinel received, no longer accepting");
                return enqueued;
            }
        }
    }
}
