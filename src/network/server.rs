//! TCP Server
//!
//! Accepts connections and serves them inline or through the worker pool.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::{Config, ConnectionMode};
use crate::error::{CalcError, Result};
use super::connection::serve_connection;
use super::pool::WorkerPool;

/// TCP server for calcd
pub struct Server {
    config: Config,
    listener: TcpListener,
    shutdown: Arc<AtomicBool>,
}

impl Server {
    /// Validate the config and bind the listening socket.
    ///
    /// There is no retry: a port that cannot be bound is reported as
    /// `CalcError::Bind` and the caller decides whether to exit.
    pub fn bind(config: Config) -> Result<Self> {
        config.validate()?;

        let addr = config.listen_addr();
        let listener = TcpListener::bind(&addr).map_err(|source| CalcError::Bind {
            addr: addr.clone(),
            source,
        })?;

        tracing::info!("Listening on {} ({:?})", listener.local_addr()?, config.mode);

        Ok(Self {
            config,
            listener,
            shutdown: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Address actually bound (useful with port 0)
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Handle that stops `run` from another thread
    pub fn shutdown_handle(&self) -> Result<ShutdownHandle> {
        Ok(ShutdownHandle {
            flag: Arc::clone(&self.shutdown),
            addr: self.local_addr()?,
        })
    }

    /// Start the server (blocking)
    ///
    /// Accepts until shut down. Accept errors are logged and skipped.
    pub fn run(&self) -> Result<()> {
        match self.config.mode {
            ConnectionMode::Sequential => self.accept_loop(|id, stream| {
                serve_connection(id, stream, &self.config);
                Ok(())
            }),
            ConnectionMode::Pooled { workers, queue } => {
                let pool = WorkerPool::new(workers, queue, &self.config)?;
                let result = self.accept_loop(|id, stream| pool.dispatch(id, stream));
                pool.join();
                result
            }
        }
    }

    fn accept_loop<F>(&self, mut dispatch: F) -> Result<()>
    where
        F: FnMut(u64, TcpStream) -> Result<()>,
    {
        let mut next_id: u64 = 0;

        loop {
            tracing::debug!("Waiting (blocking) for a new client on port {}", self.config.port);

            let accepted = self.listener.accept();
            if self.shutdown.load(Ordering::SeqCst) {
                tracing::info!("Shutdown requested, no longer accepting");
                return Ok(());
            }

            let (stream, peer) = match accepted {
                Ok(accepted) => accepted,
                Err(e) => {
                    tracing::warn!("Failed to accept connection: {}", e);
                    continue;
                }
            };

            next_id += 1;
            tracing::info!("Accepted connection {} from {}", next_id, peer);
            dispatch(next_id, stream)?;
        }
    }
}

/// Stops a running server
///
/// In sequential mode the server notices only once the current session has
/// ended, because the accept loop is blocked on that session.
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    flag: Arc<AtomicBool>,
    addr: SocketAddr,
}

impl ShutdownHandle {
    /// Signal the server to stop accepting and return from `run`
    pub fn shutdown(&self) {
        if self.flag.swap(true, Ordering::SeqCst) {
            return;
        }

        // Wake the blocking accept with a throwaway connection
        if let Err(e) = TcpStream::connect(wake_addr(self.addr)) {
            tracing::debug!("Wake-up connect to {} failed: {}", self.addr, e);
        }
    }
}

/// Loopback address that reaches a listener bound to `addr`
fn wake_addr(addr: SocketAddr) -> SocketAddr {
    match addr.ip() {
        IpAddr::V4(ip) if ip.is_unspecified() => {
            SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), addr.port())
        }
        IpAddr::V6(ip) if ip.is_unspecified() => {
            SocketAddr::new(IpAddr::V6(Ipv6Addr::LOCALHOST), addr.port())
        }
        _ => addr,
    }
}
