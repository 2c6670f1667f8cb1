//! Network Module
//!
//! TCP server and client handling.
//!
//! ## Architecture
//! - Single acceptor thread
//! - Sequential mode: each connection served on the acceptor, one at a time
//! - Pooled mode: bounded queue feeding a fixed set of worker threads

mod server;
mod connection;
mod pool;

pub use server::{Server, ShutdownHandle};
pub use connection::{serve_connection, serve_session, Connection, SessionEnd};
pub use pool::WorkerPool;
