use bytes::Bytes;

/// Payload marker that shuts the server down once the request carrying it has
/// been processed. Matched anywhere in the payload.
pub const SHUTDOWN_SENTINEL: &[u8] = b"[STOP]";

/// HTTP request methods.
///
/// Every standard verb is recognized, but only `GET` is ever served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    GET,
    POST,
    PUT,
    DELETE,
    HEAD,
    OPTIONS,
    PATCH,
}

impl Method {
    /// Parses an HTTP method from a string.
    ///
    /// Matching is case-sensitive.
    ///
    /// ```
    /// # use handoff::http::request::Method;
    /// assert_eq!(Method::from_str("GET"), Some(Method::GET));
    /// assert_eq!(Method::from_str("get"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::GET),
            "POST" => Some(Method::POST),
            "PUT" => Some(Method::PUT),
            "DELETE" => Some(Method::DELETE),
            "HEAD" => Some(Method::HEAD),
            "OPTIONS" => Some(Method::OPTIONS),
            "PATCH" => Some(Method::PATCH),
            _ => None,
        }
    }
}

/// Protocol versions accepted on the request line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    Http10,
    Http11,
    Http20,
}

impl Version {
    const MARKERS: [(&'static str, Version); 3] = [
        ("HTTP/1.0\r\n", Version::Http10),
        ("HTTP/1.1\r\n", Version::Http11),
        ("HTTP/2.0\r\n", Version::Http20),
    ];

    /// Finds a supported version marker, including its line terminator,
    /// anywhere inside the version token.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::MARKERS
            .iter()
            .find(|(marker, _)| token.contains(marker))
            .map(|(_, version)| *version)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Version::Http10 => "HTTP/1.0",
            Version::Http11 => "HTTP/1.1",
            Version::Http20 => "HTTP/2.0",
        }
    }
}

/// The bytes captured by the single read on a connection.
///
/// Anything the client sent beyond the read buffer is never seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRequest {
    payload: Bytes,
}

impl RawRequest {
    pub fn new(payload: impl Into<Bytes>) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.payload
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// True when the payload carries the shutdown sentinel.
    pub fn is_shutdown(&self) -> bool {
        self.payload
            .windows(SHUTDOWN_SENTINEL.len())
            .any(|w| w == SHUTDOWN_SENTINEL)
    }

    /// Payload as text for logging; invalid UTF-8 is replaced.
    pub fn lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.payload)
    }
}

/// Method, target and version taken from the first line of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    /// Method token exactly as sent
    pub method: String,
    /// Request target, e.g. `/index.html`
    pub target: String,
    pub version: Version,
}

impl RequestLine {
    pub fn method(&self) -> Option<Method> {
        Method::from_str(&self.method)
    }

    pub fn is_root(&self) -> bool {
        self.target == "/"
    }
}
