use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::Instant;

use crate::files::Router;
use crate::http::parser::{RequestError, read_request};
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;

/// Owns one accepted connection and drives it until it closes.
pub struct Connection {
    stream: BufReader<TcpStream>,
    router: Arc<Router>,
    read_timeout: Duration,
    state: ConnectionState,
}

pub enum ConnectionState {
    /// Waiting for the next request; every entry re-arms the idle deadline.
    Reading,
    /// A response is ready; the bool says whether to keep the connection open
    /// after writing it.
    Writing(Response, bool),
    Closed,
}

impl Connection {
    pub fn new(stream: TcpStream, router: Arc<Router>, read_timeout: Duration) -> Self {
        Self {
            stream: BufReader::new(stream),
            router,
            read_timeout,
            state: ConnectionState::Reading,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => {
                    // Fresh window per request attempt, so each pipelined
                    // request gets the full idle budget.
                    let deadline = Instant::now() + self.read_timeout;

                    match read_request(&mut self.stream, deadline).await {
                        Ok(req) => {
                            let keep_alive = !req.close;
                            let response = self.router.route(req).await;
                            self.state = ConnectionState::Writing(response, keep_alive);
                        }
                        Err(RequestError::Malformed(e)) => {
                            tracing::debug!("Malformed request: {:?}", e);
                            self.state = ConnectionState::Writing(Response::bad_request(), false);
                        }
                        Err(RequestError::Timeout {
                            bytes_received: true,
                        }) => {
                            // The client started a request and stalled;
                            // tell it why before closing.
                            tracing::debug!("Timed out with partial request");
                            self.state = ConnectionState::Writing(Response::bad_request(), false);
                        }
                        Err(RequestError::Timeout {
                            bytes_received: false,
                        }) => {
                            tracing::debug!("Idle timeout, closing");
                            self.state = ConnectionState::Closed;
                        }
                        Err(RequestError::Eof { .. }) => {
                            tracing::debug!("Connection closed by peer");
                            self.state = ConnectionState::Closed;
                        }
                        Err(RequestError::Io(e)) => {
                            tracing::warn!("Read error: {}", e);
                            self.state = ConnectionState::Closed;
                        }
                    }
                }

                ConnectionState::Writing(response, keep_alive) => {
                    let keep_alive = *keep_alive;

                    if let Some(req) = &response.request {
                        tracing::info!(
                            method = %req.method,
                            url = %req.url,
                            status = response.status.as_u16(),
                            "Request served"
                        );
                    }

                    let writer = ResponseWriter::new(response);
                    writer.write_to_stream(&mut self.stream).await?;

                    if keep_alive {
                        self.state = ConnectionState::Reading; // next pipelined request
                    } else {
                        self.state = ConnectionState::Closed;
                    }
                }

                ConnectionState::Closed => {
                    let _ = self.stream.shutdown().await;
                    break;
                }
            }
        }

        Ok(())
    }
}
