//! Startup error types

use std::io;
use thiserror::Error;

/// Fatal errors raised while preparing the listening socket.
///
/// Nothing is spawned until setup succeeds, so each of these aborts the
/// process with its own exit code.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("could not resolve listen address {addr}: {reason}")]
    Resolve { addr: String, reason: String },

    #[error("could not bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("could not listen on {addr}: {source}")]
    Listen {
        addr: String,
        #[source]
        source: io::Error,
    },
}

impl StartupError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            StartupError::Resolve { .. } => -1,
            StartupError::Bind { .. } | StartupError::Listen { .. } => -2,
        }
    }
}
