use crate::http::request::{RequestLine, Version};

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    Empty,
    MissingTarget,
    MissingVersion,
    UnsupportedVersion,
}

/// Splits a raw payload into method, target and version tokens.
///
/// Tokens are separated by spaces and runs of spaces collapse. The version
/// token is whatever follows the target up to the next space, so on a normal
/// request it still carries the line terminator and the start of the header
/// block. It is accepted when it contains one of the supported
/// `HTTP/x.y\r\n` markers.
///
/// Tokens are taken from the whole payload, not just the first line. A
/// request line without a version can borrow one from a later line:
/// `GET /x\r\nVia: HTTP/1.1\r\n` yields the target `/x\r\nVia:`, which no
/// file matches, so it still ends in a 400.
pub fn parse_request_line(buf: &[u8]) -> Result<RequestLine, ParseError> {
    let text = String::from_utf8_lossy(buf);
    let mut parts = text.split(' ').filter(|t| !t.is_empty());

    let method = parts.next().ok_or(ParseError::Empty)?;
    let target = parts.next().ok_or(ParseError::MissingTarget)?;
    let version_token = parts.next().ok_or(ParseError::MissingVersion)?;

    let version = Version::from_token(version_token).ok_or(ParseError::UnsupportedVersion)?;

    Ok(RequestLine {
        method: method.to_string(),
        target: target.to_string(),
        version,
    })
}
