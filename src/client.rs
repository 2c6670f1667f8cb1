//! Blocking client
//!
//! Speaks the calcd protocol from the other end: reads the banner, sends
//! lines, and splits the server's answer into echo and result.

use std::io::{BufReader, BufWriter};
use std::net::{TcpStream, ToSocketAddrs};

use crate::error::{CalcError, Result};
use crate::protocol::{decode_response, is_quit, read_line, write_line, Response, ECHO_PREFIX};

/// The server's answer to one line
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    /// Echoed line, without the `> ` prefix
    pub echo: String,

    /// Result line; `None` after QUIT
    pub response: Option<Response>,
}

/// Connection to a calcd server
pub struct Client {
    reader: BufReader<TcpStream>,
    writer: BufWriter<TcpStream>,
    banner: String,
}

impl Client {
    /// Connect and consume the banner
    pub fn connect<A: ToSocketAddrs>(addr: A) -> Result<Self> {
        let stream = TcpStream::connect(addr)?;
        stream.set_nodelay(true)?;

        let mut reader = BufReader::new(stream.try_clone()?);
        let writer = BufWriter::new(stream);

        let banner = read_line(&mut reader)?.ok_or_else(|| {
            CalcError::Protocol("connection closed before banner".to_string())
        })?;

        Ok(Self {
            reader,
            writer,
            banner,
        })
    }

    /// Banner sent by the server on connect
    pub fn banner(&self) -> &str {
        &self.banner
    }

    /// Send one line and read the reply
    pub fn send(&mut self, line: &str) -> Result<Reply> {
        if line.contains('\n') {
            return Err(CalcError::Protocol(
                "a request must fit on one line".to_string(),
            ));
        }

        write_line(&mut self.writer, line)?;

        let echo_line = self.next_line()?;
        let echo = echo_line
            .strip_prefix(ECHO_PREFIX)
            .ok_or_else(|| CalcError::Protocol(format!("Expected echo, got {:?}", echo_line)))?
            .to_string();

        if is_quit(&echo) {
            return Ok(Reply {
                echo,
                response: None,
            });
        }

        let response = decode_response(&self.next_line()?)?;
        Ok(Reply {
            echo,
            response: Some(response),
        })
    }

    /// Evaluate `op left right` and return the result line
    pub fn calculate(&mut self, op: &str, left: &str, right: &str) -> Result<Response> {
        let reply = self.send(&format!("{} {} {}", op, left, right))?;
        reply
            .response
            .ok_or_else(|| CalcError::Protocol("server sent no result".to_string()))
    }

    /// End the session politely
    pub fn quit(mut self) -> Result<()> {
        self.send("QUIT")?;
        Ok(())
    }

    fn next_line(&mut self) -> Result<String> {
        read_line(&mut self.reader)?
            .ok_or_else(|| CalcError::Protocol("connection closed by server".to_string()))
    }
}
