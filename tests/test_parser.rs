use handoff::http::parser::{ParseError, parse_request_line};
use handoff::http::request::{Method, Version};

#[test]
fn test_parse_simple_get_request() {
    let line = parse_request_line(b"GET / HTTP/1.1\r\n\r\n").unwrap();

    assert_eq!(line.method, "GET");
    assert_eq!(line.method(), Some(Method::GET));
    assert_eq!(line.target, "/");
    assert_eq!(line.version, Version::Http11);
    assert!(line.is_root());
}

#[test]
fn test_parse_supported_versions() {
    let cases = vec![
        ("HTTP/1.0", Version::Http10),
        ("HTTP/1.1", Version::Http11),
        ("HTTP/2.0", Version::Http20),
    ];

    for (token, expected) in cases {
        let req = format!("GET /index.html {}\r\nHost: example.com\r\n\r\n", token);
        let line = parse_request_line(req.as_bytes()).unwrap();
        assert_eq!(line.version, expected);
        assert_eq!(line.version.as_str(), token);
    }
}

#[test]
fn test_parse_unsupported_version() {
    let result = parse_request_line(b"GET / HTTP/3.0\r\n\r\n");
    assert_eq!(result, Err(ParseError::UnsupportedVersion));
}

#[test]
fn test_parse_missing_version() {
    assert_eq!(
        parse_request_line(b"GET /\r\n\r\n"),
        Err(ParseError::MissingVersion)
    );
}

#[test]
fn test_parse_missing_target() {
    assert_eq!(parse_request_line(b"GET"), Err(ParseError::MissingTarget));
}

#[test]
fn test_parse_empty_payload() {
    assert_eq!(parse_request_line(b""), Err(ParseError::Empty));
    assert_eq!(parse_request_line(b"   "), Err(ParseError::Empty));
}

#[test]
fn test_parse_collapses_repeated_spaces() {
    let line = parse_request_line(b"GET   /a.html  HTTP/1.0\r\n\r\n").unwrap();
    assert_eq!(line.target, "/a.html");
    assert_eq!(line.version, Version::Http10);
}

#[test]
fn test_parse_keeps_method_case() {
    let line = parse_request_line(b"get / HTTP/1.1\r\n\r\n").unwrap();
    assert_eq!(line.method, "get");
    assert_eq!(line.method(), None);
}

#[test]
fn test_parse_query_string_is_part_of_target() {
    let line = parse_request_line(b"GET /search?q=rust HTTP/1.1\r\n\r\n").unwrap();
    assert_eq!(line.target, "/search?q=rust");
}

#[test]
fn test_parse_version_borrowed_from_later_line() {
    let line = parse_request_line(b"GET /x\r\nVia: HTTP/1.1\r\n\r\n").unwrap();

    assert_eq!(line.target, "/x\r\nVia:");
    assert_eq!(line.version, Version::Http11);
}
