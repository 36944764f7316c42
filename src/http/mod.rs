//! HTTP server module.
//!
//! The service speaks plain HTTP and expects TLS to be terminated by the
//! hosting platform's proxy. The server drains connections gracefully on
//! SIGTERM/SIGINT.

mod server;
mod shutdown;

pub use server::{start_server, ServerError};
