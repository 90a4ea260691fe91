use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::handler::RequestHandler;
use crate::http::writer::ResponseWriter;
use crate::server::queue::{WorkItem, WorkQueue};

/// Takes queued requests one at a time, answers them and closes the
/// connection.
pub struct Dispatcher<H> {
    queue: Arc<WorkQueue<WorkItem>>,
    handler: Arc<H>,
}

impl<H: RequestHandler> Dispatcher<H> {
    pub fn new(queue: Arc<WorkQueue<WorkItem>>, handler: Arc<H>) -> Self {
        Self { queue, handler }
    }

    /// Runs until the sentinel item is popped or the queue is closed.
    /// Returns the number of items handled, the sentinel item included.
    pub async fn run(self) -> u64 {
        let mut handled = 0;

        while let Some(item) = self.queue.pop().await {
            handled += 1;
            if !self.dispatch(item).await {
                info!("Shutdown sentinel processed, dispatcher stopping");
                return handled;
            }
        }

        debug!("Queue closed, dispatcher stopping");
        handled
    }

    /// Handles one item. Returns `false` for the sentinel item, which is
    /// closed without a response.
    pub async fn dispatch(&self, item: WorkItem) -> bool {
        let WorkItem {
            mut connection,
            payload,
        } = item;

        debug!(
            id = connection.id(),
            peer = %connection.peer(),
            bytes = payload.len(),
            request = %payload.lossy(),
            "Dispatching request"
        );

        if payload.is_shutdown() {
            connection.close().await;
            return false;
        }

        let reply = self.handler.handle(&payload).await;
        let mut writer = ResponseWriter::new(&reply);

        match connection.send(&mut writer).await {
            Ok(()) => debug!(
                id = connection.id(),
                status = reply.status().map(|s| s.as_u16()),
                segments = writer.total(),
                "Response sent"
            ),
            Err(e) => warn!(
                id = connection.id(),
                peer = %connection.peer(),
                written = writer.written(),
                segments = writer.total(),
                error = %e,
                "Failed to send response"
            ),
        }

        connection.close().await;
        true
    }
}
