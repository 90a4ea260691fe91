use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::http::request::RawRequest;
use crate::http::writer::ResponseWriter;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// One accepted client connection.
///
/// The handle is moved, never shared: from the acceptor into the queue, then
/// to the dispatcher. `close` consumes it, so it can be closed only once.
#[derive(Debug)]
pub struct Connection {
    id: u64,
    peer: SocketAddr,
    stream: TcpStream,
}

/// Result of the single read performed on a fresh connection.
#[derive(Debug)]
pub enum ReadOutcome {
    Request(RawRequest),
    /// Peer closed before sending anything
    Closed,
}

impl Connection {
    pub fn new(stream: TcpStream, peer: SocketAddr) -> Self {
        Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            peer,
            stream,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    /// Performs exactly one read of at most `max_size - 1` bytes.
    ///
    /// There is no re-read loop: whatever does not arrive in that read is
    /// never seen.
    pub async fn read_request(&mut self, max_size: usize) -> std::io::Result<ReadOutcome> {
        let mut buf = vec![0u8; max_size.saturating_sub(1).max(1)];
        let n = self.stream.read(&mut buf).await?;

        if n == 0 {
            return Ok(ReadOutcome::Closed);
        }

        buf.truncate(n);
        Ok(ReadOutcome::Request(RawRequest::new(buf)))
    }

    /// Writes the reply through `writer`, which keeps count of the segments
    /// that made it out.
    pub async fn send(&mut self, writer: &mut ResponseWriter) -> anyhow::Result<()> {
        writer.write_to_stream(&mut self.stream).await
    }

    /// Shuts down the write half and releases the socket.
    pub async fn close(mut self) {
        if let Err(e) = self.stream.shutdown().await {
            tracing::debug!(id = self.id, peer = %self.peer, error = %e, "Shutdown failed while closing");
        }
        tracing::trace!(id = self.id, peer = %self.peer, "Connection closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    async fn pair() -> (Connection, TcpStream) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let client = TcpStream::connect(listener.local_addr().unwrap()).await.unwrap();
        let (stream, peer) = listener.accept().await.unwrap();
        (Connection::new(stream, peer), client)
    }

    #[tokio::test]
    async fn single_read_keeps_one_byte_in_reserve() {
        let (mut conn, mut client) = pair().await;
        client.write_all(b"0123456789").await.unwrap();
        // Give the bytes time to arrive so the one read sees all of them.
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        match conn.read_request(5).await.unwrap() {
            ReadOutcome::Request(req) => assert_eq!(req.as_bytes(), b"0123"),
            ReadOutcome::Closed => panic!("expected a request"),
        }
    }

    #[tokio::test]
    async fn peer_closing_early_is_reported() {
        let (mut conn, client) = pair().await;
        drop(client);

        assert!(matches!(conn.read_request(1024).await.unwrap(), ReadOutcome::Closed));
    }

    #[tokio::test]
    async fn ids_are_unique() {
        let (a, _ca) = pair().await;
        let (b, _cb) = pair().await;
        assert_ne!(a.id(), b.id());
    }
}
