//! Static file handler
//!
//! `GET /` serves the homepage; any other target is appended verbatim to the
//! content root. Targets are not normalized, so `..` segments are not
//! rejected.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use bytes::Bytes;

use crate::config::ContentConfig;
use crate::handler::RequestHandler;
use crate::http::parser::parse_request_line;
use crate::http::request::{Method, RawRequest, RequestLine};
use crate::http::response::{Reply, Response};

#[derive(Debug, Clone)]
pub struct FileHandler {
    root: PathBuf,
    homepage: String,
}

impl FileHandler {
    pub fn new(root: impl Into<PathBuf>, homepage: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            homepage: homepage.into(),
        }
    }

    pub fn from_config(cfg: &ContentConfig) -> Self {
        Self::new(cfg.root.clone(), cfg.homepage.clone())
    }

    /// Filesystem path a request target maps to.
    pub fn resolve(&self, target: &str) -> PathBuf {
        if target == "/" {
            return self.root.join(&self.homepage);
        }

        let mut path = OsString::from(self.root.as_os_str());
        path.push(target);
        PathBuf::from(path)
    }

    async fn serve(&self, line: &RequestLine) -> Response {
        let path = self.resolve(&line.target);

        match read_content(&path).await {
            Some(content) => {
                tracing::debug!(path = %path.display(), bytes = content.len(), "Serving file");
                Response::ok(content)
            }
            None if line.is_root() => Response::not_found(),
            None => Response::bad_request(),
        }
    }
}

/// Reads the whole file in one call, or `None` when it cannot be read.
async fn read_content(path: &Path) -> Option<Bytes> {
    match tokio::fs::read(path).await {
        Ok(content) => Some(Bytes::from(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "File not found");
            None
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to read file");
            None
        }
    }
}

impl RequestHandler for FileHandler {
    async fn handle(&self, request: &RawRequest) -> Reply {
        let line = match parse_request_line(request.as_bytes()) {
            Ok(line) => line,
            Err(e) => {
                tracing::debug!(error = ?e, "Unparsable request line");
                return Response::bad_request().into();
            }
        };

        if line.method() != Some(Method::GET) {
            tracing::debug!(method = %line.method, "Method not served");
            return Response::bad_request().into();
        }

        self.serve(&line).await.into()
    }
}
