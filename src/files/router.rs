use std::path::{Component, Path, PathBuf};

use anyhow::Context;
use tokio::fs;

use crate::config::StaticFilesConfig;
use crate::http::mime;
use crate::http::request::Request;
use crate::http::response::{FileInfo, Response};

/// Resolves request URLs to files under the document root.
///
/// The root is canonicalized once at startup; every resolved path is
/// lexically canonicalized and prefix-checked against it before any
/// filesystem access, so `../` sequences can never escape the root.
#[derive(Debug, Clone)]
pub struct Router {
    doc_root: PathBuf,
    index_file: String,
}

impl Router {
    pub fn new(cfg: &StaticFilesConfig) -> anyhow::Result<Self> {
        let doc_root = std::fs::canonicalize(&cfg.doc_root)
            .with_context(|| format!("doc root {:?} does not exist", cfg.doc_root))?;

        let meta = std::fs::metadata(&doc_root)?;
        if !meta.is_dir() {
            anyhow::bail!("doc root {:?} is not a directory", cfg.doc_root);
        }

        Ok(Self {
            doc_root,
            index_file: cfg.index_file.clone(),
        })
    }

    /// Routes a validated request to a 200 or 404 response. Any failure to
    /// stat an existing path degrades to 404; nothing else is ever surfaced
    /// to the client.
    pub async fn route(&self, request: Request) -> Response {
        let Some(path) = self.resolve(&request.url) else {
            return Response::not_found(request);
        };

        let meta = match fs::metadata(&path).await {
            Ok(meta) => meta,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Failed to stat resolved path");
                return Response::not_found(request);
            }
        };

        if !meta.is_file() {
            return Response::not_found(request);
        }

        let modified = match meta.modified() {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "File has no modification time");
                return Response::not_found(request);
            }
        };

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let file = FileInfo {
            content_type: mime::by_extension(ext),
            len: meta.len(),
            modified,
            path,
        };

        Response::ok(request, file)
    }

    /// Resolves a request URL to a contained path under the document root,
    /// or `None` if the canonical result escapes it. Purely lexical; no
    /// filesystem access.
    pub fn resolve(&self, url: &str) -> Option<PathBuf> {
        let mut target = url.to_string();
        if target.ends_with('/') {
            target.push_str(&self.index_file);
        }

        let joined = self.doc_root.join(target.trim_start_matches('/'));
        let canonical = lexical_clean(&joined);

        if canonical.starts_with(&self.doc_root) {
            Some(canonical)
        } else {
            None
        }
    }
}

/// Resolves `.` and `..` segments without touching the filesystem.
/// `..` at the root stays at the root.
fn lexical_clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }

    out
}
