//! Minimal HTTP layer.
//!
//! Only the request line is ever decoded; headers and bodies are ignored.
//!
//! - **`request`**: raw request bytes, the shutdown sentinel, request line types
//! - **`parser`**: splits the request line into method, target and version
//! - **`response`**: status codes, responses and handler replies
//! - **`writer`**: turns a reply into the writes that go out on the socket
//! - **`connection`**: an accepted client connection, read once, closed once
//!
//! # Connection lifecycle
//!
//! ```text
//!   accept ──► read once ──► queued ──► handled ──► written ──► closed
//!                 │                                               ▲
//!                 └──── 0 bytes or read error ────────────────────┘
//! ```

pub mod connection;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
