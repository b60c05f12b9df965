//! Connection dispatch.

pub mod listener;

pub use listener::Server;
