use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::files::FileService;
use crate::http::mime::ContentType;
use crate::http::parser::{parse_request_line, ParseError, MAX_REQUEST_BYTES};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;

/// One accepted client, serviced from first byte to close.
pub struct Connection<S = TcpStream> {
    stream: S,
    files: Arc<FileService>,
    buffer: Vec<u8>,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Result<Request, ParseError>),
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, files: Arc<FileService>) -> Self {
        Self {
            stream,
            files,
            buffer: Vec::with_capacity(MAX_REQUEST_BYTES),
            state: ConnectionState::Reading,
        }
    }

    /// Reads one request, answers it and closes.
    ///
    /// Errors are transport failures on this connection only. The stream is
    /// dropped, and so closed, whichever way this returns.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    if let Some(outcome) = self.read_request().await? {
                        self.state = ConnectionState::Processing(outcome);
                    }
                }

                ConnectionState::Processing(outcome) => {
                    let response = Self::handle_request(&self.files, outcome).await;
                    self.state = ConnectionState::Writing(ResponseWriter::new(&response));
                }

                ConnectionState::Writing(mut writer) => {
                    writer.write_to_stream(&mut self.stream).await?;
                    tracing::trace!(bytes = writer.written(), "Response sent");
                }

                ConnectionState::Closed => {
                    // Peer may already be gone; nothing left to tell it.
                    let _ = self.stream.shutdown().await;
                    break;
                }
            }
        }

        Ok(())
    }

    /// Accumulates bytes until the request target is known.
    ///
    /// Returns `None` if the peer closed without sending anything.
    pub async fn read_request(&mut self) -> anyhow::Result<Option<Result<Request, ParseError>>> {
        let limit = MAX_REQUEST_BYTES - 1;

        loop {
            match parse_request_line(&self.buffer) {
                Err(ParseError::Incomplete) if self.buffer.len() < limit => {
                    // Need more data → fall through to read
                }

                Err(ParseError::Incomplete) => return Ok(Some(Err(ParseError::Malformed))),

                outcome => return Ok(Some(outcome)),
            }

            let mut temp = [0u8; 1024];
            let room = (limit - self.buffer.len()).min(temp.len());
            let n = self.stream.read(&mut temp[..room]).await?;

            if n == 0 {
                if self.buffer.is_empty() {
                    return Ok(None);
                }
                return Ok(Some(Err(ParseError::Malformed)));
            }

            self.buffer.extend_from_slice(&temp[..n]);
        }
    }

    async fn handle_request(
        files: &FileService,
        outcome: Result<Request, ParseError>,
    ) -> Response {
        let request = match outcome {
            Ok(request) => request,
            Err(e) => {
                tracing::info!(error = %e, status = 404, "Unusable request");
                return Response::not_found();
            }
        };

        match files.load(&request.path).await {
            Ok(content) => {
                let content_type = ContentType::from_extension(request.path.extension());
                tracing::info!(
                    method = %request.method,
                    path = %request.path,
                    status = 200,
                    bytes = content.len(),
                    content_type = content_type.as_str(),
                    "Serving file"
                );
                Response::file(content, content_type)
            }
            Err(e) => {
                tracing::info!(
                    method = %request.method,
                    path = %request.path,
                    status = 404,
                    reason = %e,
                    "File not served"
                );
                Response::not_found()
            }
        }
    }
}
