//! Connection Handler
//!
//! Handles individual client connections.

use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::net::{Shutdown, TcpStream};
use std::time::Duration;

use crate::config::Config;
use crate::error::{CalcError, Result};
use crate::eval::evaluate;
use crate::protocol::{is_quit, read_line, split_tokens, write_banner, write_echo, write_response};

/// How a session ended without an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Client sent QUIT
    Quit,

    /// Client closed its side of the connection
    Disconnected,
}

/// Run the banner → read → evaluate → respond loop over any byte streams.
///
/// Returns when the client sends QUIT or the input ends. Every write is
/// flushed before the next line is read, so responses leave in input order.
pub fn serve_session<R: BufRead, W: Write>(reader: &mut R, writer: &mut W) -> Result<SessionEnd> {
    write_banner(writer)?;
    tracing::debug!("Reading until client sends QUIT or closes the connection");

    loop {
        let line = match read_line(reader)? {
            Some(line) => line,
            None => return Ok(SessionEnd::Disconnected),
        };

        let upper = line.to_uppercase();
        write_echo(writer, &upper)?;

        if is_quit(&upper) {
            return Ok(SessionEnd::Quit);
        }

        let tokens = split_tokens(&upper);
        let response = evaluate(&tokens);
        tracing::trace!("{:?} -> {}", upper, response);

        write_response(writer, &response)?;
    }
}

/// Handles a single client connection
pub struct Connection {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection {
    /// Create a new connection handler
    ///
    /// Sets up buffered I/O on two handles of the same socket
    pub fn new(stream: TcpStream) -> Result<Self> {
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Every response is flushed right away; don't let Nagle hold it back
        stream.set_nodelay(true)?;

        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            peer_addr,
        })
    }

    /// Configure connection timeouts (0 leaves the socket blocking forever)
    pub fn set_timeouts(&mut self, read_ms: u64, write_ms: u64) -> Result<()> {
        if read_ms > 0 {
            self.reader
                .get_ref()
                .set_read_timeout(Some(Duration::from_millis(read_ms)))?;
        }
        if write_ms > 0 {
            self.writer
                .get_ref()
                .set_write_timeout(Some(Duration::from_millis(write_ms)))?;
        }
        Ok(())
    }

    /// Handle the connection (blocking until closed)
    ///
    /// Consumes the connection: the socket is shut down and both handles
    /// released on every path out, whether the session ended or failed.
    /// A peer vanishing mid-session counts as a disconnect, not an error.
    pub fn handle(mut self) -> Result<SessionEnd> {
        tracing::debug!("Connection established from {}", self.peer_addr);

        let outcome = match serve_session(&mut self.reader, &mut self.writer) {
            Err(ref e) if is_disconnect(e) => {
                tracing::debug!("Client {} went away: {}", self.peer_addr, e);
                Ok(SessionEnd::Disconnected)
            }
            outcome => outcome,
        };

        self.close();
        outcome
    }

    /// Release the socket, logging anything that goes wrong on the way
    fn close(mut self) {
        tracing::debug!("Cleaning up resources for {}", self.peer_addr);

        if let Err(e) = self.writer.flush() {
            tracing::debug!("Discarding unflushed output for {}: {}", self.peer_addr, e);
        }

        // into_parts keeps the BufWriter from retrying the flush on drop
        let (stream, _unflushed) = self.writer.into_parts();
        match stream.shutdown(Shutdown::Both) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotConnected => {}
            Err(e) => tracing::warn!("Error shutting down socket for {}: {}", self.peer_addr, e),
        }
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}

/// Serve one accepted stream to completion and log how it ended.
///
/// Never fails: errors are confined to this connection.
pub fn serve_connection(id: u64, stream: TcpStream, config: &Config) {
    let mut connection = match Connection::new(stream) {
        Ok(connection) => connection,
        Err(e) => {
            tracing::warn!("Failed to set up connection {}: {}", id, e);
            return;
        }
    };

    let span = tracing::info_span!("connection", id, peer = %connection.peer_addr());
    let _guard = span.enter();

    if let Err(e) = connection.set_timeouts(config.read_timeout_ms, config.write_timeout_ms) {
        tracing::warn!("Failed to configure timeouts: {}", e);
        return;
    }

    match connection.handle() {
        Ok(SessionEnd::Quit) => tracing::info!("Client sent QUIT, connection closed"),
        Ok(SessionEnd::Disconnected) => tracing::info!("Client disconnected"),
        Err(e) => tracing::warn!("Connection aborted: {}", e),
    }
}

/// I/O failures that mean the peer is gone (or silent past the timeout)
fn is_disconnect(error: &CalcError) -> bool {
    match error {
        CalcError::Io(e) => matches!(
            e.kind(),
            io::ErrorKind::UnexpectedEof
                | io::ErrorKind::ConnectionReset
                | io::ErrorKind::ConnectionAborted
                | io::ErrorKind::BrokenPipe
                | io::ErrorKind::WouldBlock
                | io::ErrorKind::TimedOut
        ),
        _ => false,
    }
}
