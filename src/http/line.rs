use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Reads the next CRLF-terminated line, returning it with the CRLF stripped.
///
/// Only the two-byte sequence `\r\n` terminates a line; a bare `\n` is kept
/// as line content and reading continues. If the stream ends before a
/// terminator is seen, the error kind is `UnexpectedEof`. All other I/O
/// errors propagate unchanged so the caller can classify them.
pub async fn read_line<R>(reader: &mut R) -> io::Result<Vec<u8>>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = Vec::new();

    loop {
        let n = reader.read_until(b'\n', &mut line).await?;
        if n == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stream ended before line terminator",
            ));
        }
        if line.ends_with(b"\r\n") {
            line.truncate(line.len() - 2);
            return Ok(line);
        }
        // Bare LF: not a terminator, keep reading.
    }
}
