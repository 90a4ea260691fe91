//! Handoff - single-worker HTTP file server
//!
//! An acceptor task reads one request per connection and queues it; a
//! dispatcher task answers queued requests in order, either from a content
//! directory or with a fixed acknowledgment.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod server;
