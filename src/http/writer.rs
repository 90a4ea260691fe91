use anyhow::Context;
use bytes::Bytes;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::{Reply, Response};

const HTTP_VERSION: &str = "HTTP/1.1";
const CRLF: &[u8] = b"\r\n";

fn serialize_head(resp: &Response) -> Bytes {
    let mut buf = Vec::new();

    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.extend_from_slice(status_line.as_bytes());

    for (k, v) in &resp.headers {
        buf.extend_from_slice(k.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(v.as_bytes());
        buf.extend_from_slice(CRLF);
    }

    buf.extend_from_slice(CRLF);
    Bytes::from(buf)
}

/// Splits a reply into the separate writes that go out on the socket.
///
/// A response with a body becomes three writes: head, body, trailing CRLF.
pub fn segments(reply: &Reply) -> Vec<Bytes> {
    match reply {
        Reply::Raw(bytes) => vec![bytes.clone()],
        Reply::Http(resp) => {
            let mut out = vec![serialize_head(resp)];
            if let Some(body) = &resp.body {
                out.push(body.clone());
                out.push(Bytes::from_static(CRLF));
            }
            out
        }
    }
}

pub struct ResponseWriter {
    segments: Vec<Bytes>,
    written: usize,
}

impl ResponseWriter {
    pub fn new(reply: &Reply) -> Self {
        Self {
            segments: segments(reply),
            written: 0,
        }
    }

    /// Number of segments fully written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Number of segments the reply was split into.
    pub fn total(&self) -> usize {
        self.segments.len()
    }

    /// Writes each segment in order. The first failing segment aborts the
    /// remaining ones; segments are never resent.
    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.segments.len() {
            let segment = &self.segments[self.written];
            stream
                .write_all(segment)
                .await
                .with_context(|| format!("writing segment {} of {}", self.written + 1, self.segments.len()))?;
            self.written += 1;
        }

        stream.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::response::Response;
    use std::io;
    use std::pin::Pin;
    use std::task::{Context as TaskContext, Poll};

    /// Accepts whole writes until `fail_on`, then reports a broken pipe.
    struct BrokenAfter {
        fail_on: usize,
        calls: usize,
        out: Vec<u8>,
    }

    impl AsyncWrite for BrokenAfter {
        fn poll_write(
            mut self: Pin<&mut Self>,
            _cx: &mut TaskContext<'_>,
            buf: &[u8],
        ) -> Poll<io::Result<usize>> {
            self.calls += 1;
            if self.calls == self.fail_on {
                return Poll::Ready(Err(io::Error::from(io::ErrorKind::BrokenPipe)));
            }
            self.out.extend_from_slice(buf);
            Poll::Ready(Ok(buf.len()))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut TaskContext<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut TaskContext<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    #[test]
    fn bodyless_response_is_a_single_segment() {
        let segs = segments(&Response::not_found().into());
        assert_eq!(segs, vec![Bytes::from_static(b"HTTP/1.1 404 NOT FOUND\r\n\r\n")]);
    }

    #[tokio::test]
    async fn writes_all_segments_in_order() {
        let reply: Reply = Response::ok(&b"<p>hi</p>"[..]).into();
        let mut writer = ResponseWriter::new(&reply);
        let mut out: Vec<u8> = Vec::new();

        writer.write_to_stream(&mut out).await.unwrap();

        assert_eq!(writer.written(), 3);
        assert_eq!(
            out,
            b"HTTP/1.1 200 OK\r\nContent-Type: text/html\r\n\r\n<p>hi</p>\r\n".to_vec()
        );
    }

    #[tokio::test]
    async fn failed_segment_skips_the_rest() {
        let reply: Reply = Response::ok(&b"<p>hi</p>"[..]).into();
        let mut writer = ResponseWriter::new(&reply);
        let mut sink = BrokenAfter {
            fail_on: 2,
            calls: 0,
            out: Vec::new(),
        };

        let result = writer.write_to_stream(&mut sink).await;

        assert!(result.is_err());
        assert_eq!(writer.written(), 1);
        assert_eq!(writer.total(), 3);
        // The body failed, so the trailing CRLF was never attempted.
        assert_eq!(sink.calls, 2);
        assert_eq!(sink.out, b"HTTP/1.1 200 OK\r\nContent-Type: text/html\r\n\r\n".to_vec());
    }
}
