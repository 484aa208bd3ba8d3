//! webroot - Minimal HTTP/1.1 static file server
//!
//! Core library for connection handling and static file serving.

pub mod config;
pub mod files;
pub mod http;
pub mod server;
