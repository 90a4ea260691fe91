use handoff::http::request::{Method, RawRequest, Version};

#[test]
fn test_method_from_str() {
    let methods = vec![
        ("GET", Method::GET),
        ("POST", Method::POST),
        ("PUT", Method::PUT),
        ("DELETE", Method::DELETE),
        ("HEAD", Method::HEAD),
        ("OPTIONS", Method::OPTIONS),
        ("PATCH", Method::PATCH),
    ];

    for (s, expected) in methods {
        assert_eq!(Method::from_str(s), Some(expected));
    }
    assert_eq!(Method::from_str("Get"), None);
    assert_eq!(Method::from_str("BREW"), None);
}

#[test]
fn test_version_marker_needs_line_terminator() {
    assert_eq!(Version::from_token("HTTP/1.1\r\n"), Some(Version::Http11));
    assert_eq!(Version::from_token("HTTP/1.0\r\nHost:"), Some(Version::Http10));
    assert_eq!(Version::from_token("HTTP/1.1"), None);
    assert_eq!(Version::from_token("HTTP/1.1\n"), None);
}

#[test]
fn test_shutdown_sentinel_anywhere_in_payload() {
    assert!(RawRequest::new(&b"[STOP]"[..]).is_shutdown());
    assert!(RawRequest::new(&b"GET /[STOP] HTTP/1.1\r\n\r\n"[..]).is_shutdown());
    assert!(RawRequest::new(&b"GET / HTTP/1.1\r\nX-Note: please [STOP] now\r\n\r\n"[..]).is_shutdown());
}

#[test]
fn test_shutdown_sentinel_is_exact() {
    assert!(!RawRequest::new(&b"GET / HTTP/1.1\r\n\r\n"[..]).is_shutdown());
    assert!(!RawRequest::new(&b"[stop]"[..]).is_shutdown());
    assert!(!RawRequest::new(&b"[STOP"[..]).is_shutdown());
    assert!(!RawRequest::new(&b""[..]).is_shutdown());
}

#[test]
fn test_raw_request_accessors() {
    let req = RawRequest::new(b"ping\xff".to_vec());
    assert_eq!(req.len(), 5);
    assert!(!req.is_empty());
    assert_eq!(req.as_bytes(), b"ping\xff");
    assert_eq!(req.lossy(), "ping\u{fffd}");
}
