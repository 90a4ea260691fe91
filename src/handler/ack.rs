use crate::handler::RequestHandler;
use crate::http::request::RawRequest;
use crate::http::response::Reply;

/// Answers `ACK\r\n` to anything, parsable or not.
#[derive(Debug, Clone, Copy, Default)]
pub struct AckHandler;

impl RequestHandler for AckHandler {
    async fn handle(&self, _request: &RawRequest) -> Reply {
        Reply::ack()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ignores_method_and_path() {
        let reply = AckHandler.handle(&RawRequest::new(&b"DELETE /x HTTP/9.9"[..])).await;
        assert_eq!(reply, Reply::ack());
    }
}
