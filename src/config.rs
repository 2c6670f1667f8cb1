//! Configuration for calcd
//!
//! Centralized configuration with sensible defaults.

use crate::error::{CalcError, Result};

/// Main configuration for a calcd server
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// Interface to bind (all interfaces by default)
    pub host: String,

    /// TCP port to listen on
    pub port: u16,

    /// Connection read timeout (milliseconds, 0 = block indefinitely)
    pub read_timeout_ms: u64,

    /// Connection write timeout (milliseconds, 0 = block indefinitely)
    pub write_timeout_ms: u64,

    // -------------------------------------------------------------------------
    // Scheduling Configuration
    // -------------------------------------------------------------------------
    /// How accepted connections are scheduled
    pub mode: ConnectionMode,
}

/// Connection scheduling strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionMode {
    /// Serve one client at a time on the accepting thread.
    /// Further clients wait in the kernel backlog.
    Sequential,

    /// Hand connections to a fixed set of worker threads through a
    /// bounded queue; the acceptor blocks while the queue is full.
    Pooled { workers: usize, queue: usize },
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 2205,
            read_timeout_ms: 0,
            write_timeout_ms: 0,
            mode: ConnectionMode::Sequential,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Address string handed to the listener (`host:port`)
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check the configuration for values the server cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(CalcError::Config("host must not be empty".to_string()));
        }
        if let ConnectionMode::Pooled { workers, queue } = self.mode {
            if workers == 0 {
                return Err(CalcError::Config(
                    "pooled mode needs at least one worker".to_string(),
                ));
            }
            if queue == 0 {
                return Err(CalcError::Config(
                    "pooled mode needs a queue capacity of at least one".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the interface to bind
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the TCP port (0 lets the OS pick one)
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    /// Set the connection scheduling mode
    pub fn mode(mut self, mode: ConnectionMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Serve connections on `workers` threads with a hand-off queue of `queue`.
    /// Zero workers selects sequential mode.
    pub fn workers(mut self, workers: usize, queue: usize) -> Self {
        self.config.mode = if workers == 0 {
            ConnectionMode::Sequential
        } else {
            ConnectionMode::Pooled { workers, queue }
        };
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
