//! HTTP/1.1 protocol implementation.
//!
//! This module implements the serving side of HTTP/1.1 with keep-alive and
//! pipelining support, restricted to GET requests without bodies.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`connection`**: The main connection handler implementing the request-response state machine
//! - **`line`**: Reads single CRLF-terminated lines from the stream
//! - **`parser`**: Assembles and validates one request from a stream of lines
//! - **`request`**: HTTP request representation and header canonicalization
//! - **`response`**: HTTP response representation with per-outcome constructors
//! - **`writer`**: Serializes and writes HTTP responses to the client
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection State Machine
//!
//! Each client connection goes through a state machine:
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for the next request, fresh idle deadline
//!        └──────┬──────┘
//!               │
//!               ├─ Valid request → route → Writing (200 or 404)
//!               ├─ Malformed, or timeout after partial data → Writing (400, close)
//!               └─ EOF or timeout with nothing received → Closed (silent)
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ├─ Keep-Alive → Reading (same connection, next pipelined request)
//!               └─ Close → Closed
//! ```

pub mod connection;
pub mod line;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;

/// The only protocol version this server speaks.
pub const HTTP_VERSION: &str = "HTTP/1.1";
