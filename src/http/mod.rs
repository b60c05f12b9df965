//! HTTP protocol implementation.
//!
//! Just enough HTTP/1.x to serve files: one request line in, one response
//! out, then the connection is closed.
//!
//! # Architecture
//!
//! - **`connection`**: The per-connection state machine
//! - **`parser`**: Extracts the resource path from the raw request bytes
//! - **`request`**: The parsed request and its resource path
//! - **`response`**: Status codes, the response type and its builder
//! - **`writer`**: Serializes and writes responses to the client
//! - **`mime`**: Content type selection by file extension
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for the request line
//!        └──────┬──────┘
//!               │ Target known (or request unusable)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Load the file, pick 200 or 404
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ▼
//!        ┌──────────────────┐
//!        │     Closed       │
//!        └──────────────────┘
//! ```
//!
//! A peer that hangs up before sending anything goes straight from
//! `Reading` to `Closed`. A transport error in any state ends the connection.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use webserver::files::FileService;
//! use webserver::http::connection::Connection;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!     let files = Arc::new(FileService::new(".", true));
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let files = files.clone();
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, files);
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod request;
pub mod response;
pub mod parser;
pub mod connection;
pub mod writer;
pub mod mime;
