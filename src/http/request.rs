use std::collections::HashMap;

/// Represents a parsed, validated HTTP request from a client.
///
/// `Host` and `Connection` are routed into the dedicated fields below and do
/// not appear in the generic header map. A request is immutable once parsed.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method; only "GET" survives parsing.
    pub method: String,
    /// The request URL, always starting with "/".
    pub url: String,
    /// HTTP version; only "HTTP/1.1" survives parsing.
    pub version: String,
    /// Remaining headers, keys in canonical capitalization.
    pub headers: HashMap<String, String>,
    /// Value of the required Host header.
    pub host: String,
    /// True iff the request carried "Connection: close".
    pub close: bool,
}

impl Request {
    /// Retrieves a header value by its canonical name.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(&canonical_header_key(key)).map(|v| v.as_str())
    }
}

/// Normalizes a header key to its canonical capitalization:
/// the first letter and every letter following a hyphen uppercase,
/// everything else lowercase. `"content-TYPE"` becomes `"Content-Type"`.
///
/// The caller is expected to have validated the key against
/// `[A-Za-z0-9-]+` already; bytes outside that set pass through unchanged.
pub fn canonical_header_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper_next = true;

    for c in key.chars() {
        if upper_next {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c.to_ascii_lowercase());
        }
        upper_next = c == '-';
    }

    out
}
