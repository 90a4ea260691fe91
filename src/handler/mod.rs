//! Request handlers
//!
//! The dispatcher is generic over a [`RequestHandler`]. Two strategies exist:
//! [`FileHandler`] serves files from a content root and [`AckHandler`]
//! acknowledges every request.

pub mod ack;
pub mod file;

pub use ack::AckHandler;
pub use file::FileHandler;

use std::future::Future;

use crate::http::request::RawRequest;
use crate::http::response::Reply;

/// Produces the reply for one queued request.
///
/// Handlers never fail: client errors become 4xx replies.
pub trait RequestHandler: Send + Sync + 'static {
    fn handle(&self, request: &RawRequest) -> impl Future<Output = Reply> + Send;
}
