use std::path::PathBuf;

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::Response;

/// Serializes a response and writes it in three fully-flushed sections:
/// status line, sorted headers plus blank line, then the optional file body.
/// An error in any section aborts the rest.
pub struct ResponseWriter {
    status_line: Vec<u8>,
    header_block: Vec<u8>,
    body_path: Option<PathBuf>,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        let status_line = format!(
            "{} {} {}\r\n",
            response.version,
            response.status.as_u16(),
            response.status.reason_phrase()
        );

        // Deterministic order: headers sorted ascending by key.
        let mut keys: Vec<&String> = response.headers.keys().collect();
        keys.sort();

        let mut header_block = String::new();
        for key in keys {
            header_block.push_str(key);
            header_block.push_str(": ");
            header_block.push_str(&response.headers[key]);
            header_block.push_str("\r\n");
        }
        header_block.push_str("\r\n");

        Self {
            status_line: status_line.into_bytes(),
            header_block: header_block.into_bytes(),
            body_path: response.file_path.clone(),
        }
    }

    pub async fn write_to_stream<W>(&self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        write_section(stream, &self.status_line).await?;
        stream.flush().await?;

        write_section(stream, &self.header_block).await?;
        stream.flush().await?;

        if let Some(path) = &self.body_path {
            let body = tokio::fs::read(path).await?;
            write_section(stream, &body).await?;
            stream.flush().await?;
        }

        Ok(())
    }
}

/// Writes `buf` completely, retrying partial writes.
async fn write_section<W>(stream: &mut W, buf: &[u8]) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut written = 0;
    while written < buf.len() {
        let n = stream.write(&buf[written..]).await?;

        if n == 0 {
            return Err(anyhow::anyhow!("connection closed while writing"));
        }

        written += n;
    }

    Ok(())
}
