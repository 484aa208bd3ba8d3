use std::collections::HashMap;
use std::path::PathBuf;
use std::time::SystemTime;

use chrono::{DateTime, Utc};

use crate::http::HTTP_VERSION;
use crate::http::request::Request;

/// HTTP status codes this server can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
}

impl StatusCode {
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
        }
    }

    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
        }
    }
}

/// Metadata of a resolved file, as produced by the router.
#[derive(Debug, Clone)]
pub struct FileInfo {
    pub path: PathBuf,
    pub len: u64,
    pub modified: SystemTime,
    pub content_type: &'static str,
}

/// Represents a complete HTTP response, ready to be serialized once.
///
/// `file_path` names the file to stream as the body; `None` means no body.
/// `request` is the valid request this response answers; it is `None` for
/// responses not tied to one (400s).
#[derive(Debug)]
pub struct Response {
    pub status: StatusCode,
    pub version: String,
    pub headers: HashMap<String, String>,
    pub file_path: Option<PathBuf>,
    pub request: Option<Request>,
}

impl Response {
    /// A 200 response for a resolved file: Date, Last-Modified,
    /// Content-Type and Content-Length, plus Connection: close if the
    /// request asked for it.
    pub fn ok(request: Request, file: FileInfo) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Date".to_string(), http_date(SystemTime::now()));
        headers.insert("Last-Modified".to_string(), http_date(file.modified));
        headers.insert("Content-Type".to_string(), file.content_type.to_string());
        headers.insert("Content-Length".to_string(), file.len.to_string());
        if request.close {
            headers.insert("Connection".to_string(), "close".to_string());
        }

        Self {
            status: StatusCode::Ok,
            version: HTTP_VERSION.to_string(),
            headers,
            file_path: Some(file.path),
            request: Some(request),
        }
    }

    /// A 404 response: Date, plus Connection: close if requested. No body.
    pub fn not_found(request: Request) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Date".to_string(), http_date(SystemTime::now()));
        if request.close {
            headers.insert("Connection".to_string(), "close".to_string());
        }

        Self {
            status: StatusCode::NotFound,
            version: HTTP_VERSION.to_string(),
            headers,
            file_path: None,
            request: Some(request),
        }
    }

    /// A 400 response: Date and an unconditional Connection: close. No body.
    pub fn bad_request() -> Self {
        let mut headers = HashMap::new();
        headers.insert("Date".to_string(), http_date(SystemTime::now()));
        headers.insert("Connection".to_string(), "close".to_string());

        Self {
            status: StatusCode::BadRequest,
            version: HTTP_VERSION.to_string(),
            headers,
            file_path: None,
            request: None,
        }
    }
}

/// Formats a timestamp as an RFC 7231 IMF-fixdate, e.g.
/// "Tue, 15 Nov 1994 08:12:31 GMT".
pub fn http_date(t: SystemTime) -> String {
    let t: DateTime<Utc> = t.into();
    t.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}
