use std::time::Duration;

use tokio::io::{AsyncWriteExt, BufReader};
use tokio::time::Instant;

use webroot::http::parser::{ParseError, RequestError, read_request};

fn deadline() -> Instant {
    Instant::now() + Duration::from_secs(5)
}

#[tokio::test]
async fn test_parse_simple_get_request() {
    let mut reader = BufReader::new(&b"GET /index.html HTTP/1.1\r\nHost: example.com\r\n\r\n"[..]);
    let parsed = read_request(&mut reader, deadline()).await.unwrap();

    assert_eq!(parsed.method, "GET");
    assert_eq!(parsed.url, "/index.html");
    assert_eq!(parsed.version, "HTTP/1.1");
    assert_eq!(parsed.host, "example.com");
    assert!(!parsed.close);
    assert!(parsed.headers.is_empty());
}

#[tokio::test]
async fn test_parse_canonicalizes_header_keys() {
    let req = b"GET / HTTP/1.1\r\nhOsT: x\r\nuSeR-aGeNt: test\r\n\r\n";
    let mut reader = BufReader::new(&req[..]);
    let parsed = read_request(&mut reader, deadline()).await.unwrap();

    assert_eq!(parsed.host, "x");
    assert_eq!(parsed.headers.get("User-Agent").unwrap(), "test");
}

#[tokio::test]
async fn test_parse_host_and_connection_are_extracted() {
    let req = b"GET / HTTP/1.1\r\nHost: x\r\nConnection: close\r\nAccept: */*\r\n\r\n";
    let mut reader = BufReader::new(&req[..]);
    let parsed = read_request(&mut reader, deadline()).await.unwrap();

    assert!(parsed.close);
    assert!(!parsed.headers.contains_key("Host"));
    assert!(!parsed.headers.contains_key("Connection"));
    assert_eq!(parsed.headers.get("Accept").unwrap(), "*/*");
}

#[tokio::test]
async fn test_parse_connection_close_is_exact_match() {
    let req = b"GET / HTTP/1.1\r\nHost: x\r\nConnection: Close\r\n\r\n";
    let mut reader = BufReader::new(&req[..]);
    let parsed = read_request(&mut reader, deadline()).await.unwrap();

    assert!(!parsed.close);
}

#[tokio::test]
async fn test_parse_trims_leading_spaces_in_value() {
    let req = b"GET / HTTP/1.1\r\nHost:    spaced.example\r\n\r\n";
    let mut reader = BufReader::new(&req[..]);
    let parsed = read_request(&mut reader, deadline()).await.unwrap();

    assert_eq!(parsed.host, "spaced.example");
}

#[tokio::test]
async fn test_parse_missing_host_is_malformed() {
    let mut reader = BufReader::new(&b"GET / HTTP/1.1\r\n\r\n"[..]);
    let err = read_request(&mut reader, deadline()).await.unwrap_err();

    assert!(matches!(
        err,
        RequestError::Malformed(ParseError::MissingHost)
    ));
}

#[tokio::test]
async fn test_parse_unsupported_method_is_malformed() {
    let mut reader = BufReader::new(&b"POST / HTTP/1.1\r\nHost: x\r\n\r\n"[..]);
    let err = read_request(&mut reader, deadline()).await.unwrap_err();

    assert!(matches!(err, RequestError::Malformed(ParseError::BadMethod)));
}

#[tokio::test]
async fn test_parse_unsupported_version_is_malformed() {
    let mut reader = BufReader::new(&b"GET / HTTP/1.0\r\nHost: x\r\n\r\n"[..]);
    let err = read_request(&mut reader, deadline()).await.unwrap_err();

    assert!(matches!(
        err,
        RequestError::Malformed(ParseError::BadVersion)
    ));
}

#[tokio::test]
async fn test_parse_extra_start_line_field_is_malformed() {
    let mut reader = BufReader::new(&b"GET / HTTP/1.1 extra\r\nHost: x\r\n\r\n"[..]);
    let err = read_request(&mut reader, deadline()).await.unwrap_err();

    assert!(matches!(
        err,
        RequestError::Malformed(ParseError::BadVersion)
    ));
}

#[tokio::test]
async fn test_parse_url_without_slash_is_malformed() {
    let mut reader = BufReader::new(&b"GET index.html HTTP/1.1\r\nHost: x\r\n\r\n"[..]);
    let err = read_request(&mut reader, deadline()).await.unwrap_err();

    assert!(matches!(err, RequestError::Malformed(ParseError::BadUrl)));
}

#[tokio::test]
async fn test_parse_short_start_line_is_malformed() {
    let mut reader = BufReader::new(&b"BADREQUEST\r\n\r\n"[..]);
    let err = read_request(&mut reader, deadline()).await.unwrap_err();

    assert!(matches!(
        err,
        RequestError::Malformed(ParseError::BadStartLine)
    ));
}

#[tokio::test]
async fn test_parse_empty_start_line_is_malformed() {
    let mut reader = BufReader::new(&b"\r\n\r\n"[..]);
    let err = read_request(&mut reader, deadline()).await.unwrap_err();

    assert!(matches!(
        err,
        RequestError::Malformed(ParseError::EmptyRequest)
    ));
}

#[tokio::test]
async fn test_parse_header_without_colon_is_malformed() {
    let mut reader = BufReader::new(&b"GET / HTTP/1.1\r\nHost: x\r\nBrokenHeader\r\n\r\n"[..]);
    let err = read_request(&mut reader, deadline()).await.unwrap_err();

    assert!(matches!(err, RequestError::Malformed(ParseError::BadHeader)));
}

#[tokio::test]
async fn test_parse_invalid_header_key_is_malformed() {
    for req in [
        &b"GET / HTTP/1.1\r\nBad Key: v\r\nHost: x\r\n\r\n"[..],
        &b"GET / HTTP/1.1\r\nB@d: v\r\nHost: x\r\n\r\n"[..],
        &b"GET / HTTP/1.1\r\n: v\r\nHost: x\r\n\r\n"[..],
    ] {
        let mut reader = BufReader::new(req);
        let err = read_request(&mut reader, deadline()).await.unwrap_err();
        assert!(matches!(err, RequestError::Malformed(ParseError::BadHeader)));
    }
}

#[tokio::test]
async fn test_parse_two_pipelined_requests_from_one_buffer() {
    let req = b"GET /a HTTP/1.1\r\nHost: x\r\n\r\nGET /b HTTP/1.1\r\nHost: x\r\n\r\n";
    let mut reader = BufReader::new(&req[..]);

    let first = read_request(&mut reader, deadline()).await.unwrap();
    let second = read_request(&mut reader, deadline()).await.unwrap();

    assert_eq!(first.url, "/a");
    assert_eq!(second.url, "/b");
}

#[tokio::test]
async fn test_parse_empty_stream_is_eof_without_bytes() {
    let mut reader = BufReader::new(&b""[..]);
    let err = read_request(&mut reader, deadline()).await.unwrap_err();

    assert!(matches!(
        err,
        RequestError::Eof {
            bytes_received: false
        }
    ));
}

#[tokio::test]
async fn test_parse_truncated_request_is_eof_with_bytes() {
    let mut reader = BufReader::new(&b"GET / HTT"[..]);
    let err = read_request(&mut reader, deadline()).await.unwrap_err();

    assert!(matches!(
        err,
        RequestError::Eof {
            bytes_received: true
        }
    ));
}

#[tokio::test]
async fn test_parse_idle_stream_times_out_without_bytes() {
    let (_client, server) = tokio::io::duplex(1024);
    let mut reader = BufReader::new(server);

    let err = read_request(&mut reader, Instant::now() + Duration::from_millis(100))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RequestError::Timeout {
            bytes_received: false
        }
    ));
}

#[tokio::test]
async fn test_parse_stalled_request_times_out_with_bytes() {
    let (mut client, server) = tokio::io::duplex(1024);
    client.write_all(b"GET /x").await.unwrap();
    let mut reader = BufReader::new(server);

    let err = read_request(&mut reader, Instant::now() + Duration::from_millis(100))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RequestError::Timeout {
            bytes_received: true
        }
    ));
}
