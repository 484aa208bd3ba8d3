//! Static file resolution
//!
//! Maps request URLs to files under the document root, enforcing that no
//! resolved path ever escapes it.

pub mod router;

pub use router::Router;
