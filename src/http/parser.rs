use std::collections::HashMap;
use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::time::{Instant, timeout_at};

use crate::http::HTTP_VERSION;
use crate::http::line::read_line;
use crate::http::request::{Request, canonical_header_key};

/// A syntactic or required-field violation. Every variant maps to a
/// 400 response at the connection layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// The start line was empty.
    EmptyRequest,
    /// Request bytes were not valid UTF-8.
    InvalidEncoding,
    /// The start line did not split into exactly three fields.
    BadStartLine,
    /// Unsupported method.
    BadMethod,
    /// URL does not start with a slash.
    BadUrl,
    /// Unsupported protocol version.
    BadVersion,
    /// Header line without a colon, or with an empty/invalid key.
    BadHeader,
    /// No Host header present.
    MissingHost,
}

/// Outcome of a failed request read. Whether any byte was already consumed
/// for this attempt is carried alongside the transport variants because it
/// decides the connection's reaction (silent close vs. 400).
#[derive(Debug)]
pub enum RequestError {
    Malformed(ParseError),
    Timeout { bytes_received: bool },
    Eof { bytes_received: bool },
    Io(io::Error),
}

/// Tries to read the next valid request from `reader`, honoring `deadline`
/// for every read. Pipelined bytes already buffered count as received.
pub async fn read_request<R>(reader: &mut R, deadline: Instant) -> Result<Request, RequestError>
where
    R: AsyncBufRead + Unpin,
{
    // Peek at least one byte so that a truly idle connection is
    // distinguishable from one that went quiet mid-request.
    match timeout_at(deadline, reader.fill_buf()).await {
        Err(_) => {
            return Err(RequestError::Timeout {
                bytes_received: false,
            });
        }
        Ok(Err(e)) => return Err(RequestError::Io(e)),
        Ok(Ok(buf)) if buf.is_empty() => {
            return Err(RequestError::Eof {
                bytes_received: false,
            });
        }
        Ok(Ok(_)) => {}
    }

    // Accumulate lines up to the blank header/body separator.
    let mut lines = Vec::new();
    loop {
        let line = match timeout_at(deadline, read_line(reader)).await {
            Err(_) => {
                return Err(RequestError::Timeout {
                    bytes_received: true,
                });
            }
            Ok(Err(e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
                return Err(RequestError::Eof {
                    bytes_received: true,
                });
            }
            Ok(Err(e)) => return Err(RequestError::Io(e)),
            Ok(Ok(line)) => line,
        };

        if line.is_empty() {
            break;
        }
        lines.push(line);
    }

    parse_request(&lines).map_err(RequestError::Malformed)
}

/// Parses one accumulated header section (start line plus header lines,
/// terminators already stripped) into a validated request.
pub fn parse_request(lines: &[Vec<u8>]) -> Result<Request, ParseError> {
    let start_line = lines.first().ok_or(ParseError::EmptyRequest)?;
    let start_line = std::str::from_utf8(start_line).map_err(|_| ParseError::InvalidEncoding)?;

    let fields: Vec<&str> = start_line.splitn(3, ' ').collect();
    if fields.len() != 3 {
        return Err(ParseError::BadStartLine);
    }
    let (method, url, version) = (fields[0], fields[1], fields[2]);

    if method != "GET" {
        return Err(ParseError::BadMethod);
    }
    if !url.starts_with('/') {
        return Err(ParseError::BadUrl);
    }
    if version != HTTP_VERSION {
        return Err(ParseError::BadVersion);
    }

    let mut headers = HashMap::new();
    let mut host = None;
    let mut close = false;

    for line in &lines[1..] {
        let line = std::str::from_utf8(line).map_err(|_| ParseError::InvalidEncoding)?;
        let (key, value) = parse_header(line)?;

        if key == "Host" {
            host = Some(value);
        } else if key == "Connection" {
            // Exact match only; "Close" and "CLOSE" are ignored.
            if value == "close" {
                close = true;
            }
        } else {
            headers.insert(key, value);
        }
    }

    let host = host.ok_or(ParseError::MissingHost)?;

    Ok(Request {
        method: method.to_string(),
        url: url.to_string(),
        version: version.to_string(),
        headers,
        host,
        close,
    })
}

/// Splits one header line into a canonicalized key and a trimmed value.
fn parse_header(line: &str) -> Result<(String, String), ParseError> {
    let (key, value) = line.split_once(':').ok_or(ParseError::BadHeader)?;
    if !valid_header_key(key) {
        return Err(ParseError::BadHeader);
    }

    let value = value
        .trim_start_matches(' ')
        .trim_end_matches(['\r', '\n'])
        .to_string();

    Ok((canonical_header_key(key), value))
}

fn valid_header_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
}
