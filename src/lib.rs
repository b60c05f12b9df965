//! webserver - a small concurrent static file server
//!
//! Each accepted connection gets its own task that reads one request line,
//! loads the named file and answers with either the file or a 404.

pub mod config;
pub mod files;
pub mod http;
pub mod server;
