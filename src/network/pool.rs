//! Worker Pool
//!
//! Fixed set of threads serving connections handed over by the acceptor.

use std::net::TcpStream;
use std::thread::{self, JoinHandle};

use crossbeam::channel::{self, Sender};

use crate::config::Config;
use crate::error::{CalcError, Result};
use super::connection::serve_connection;

/// An accepted connection waiting for a worker
struct Job {
    id: u64,
    stream: TcpStream,
}

/// Bounded pool of connection workers
///
/// The hand-off queue is bounded, so `dispatch` blocks the acceptor once
/// every worker is busy and the queue is full.
pub struct WorkerPool {
    sender: Option<Sender<Job>>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawn `workers` threads sharing a queue of `queue` pending connections
    pub fn new(workers: usize, queue: usize, config: &Config) -> Result<Self> {
        if workers == 0 {
            return Err(CalcError::Config(
                "worker pool needs at least one worker".to_string(),
            ));
        }

        let (sender, receiver) = channel::bounded::<Job>(queue);
        let mut handles = Vec::with_capacity(workers);

        for index in 0..workers {
            let receiver = receiver.clone();
            let config = config.clone();
            let handle = thread::Builder::new()
                .name(format!("calcd-worker-{}", index))
                .spawn(move || {
                    for job in receiver.iter() {
                        serve_connection(job.id, job.stream, &config);
                    }
                    tracing::debug!("Worker {} exiting", index);
                })?;
            handles.push(handle);
        }

        tracing::info!("Started {} workers (queue capacity {})", workers, queue);

        Ok(Self {
            sender: Some(sender),
            workers: handles,
        })
    }

    /// Queue a connection for the next free worker
    pub fn dispatch(&self, id: u64, stream: TcpStream) -> Result<()> {
        let sender = self
            .sender
            .as_ref()
            .ok_or_else(|| CalcError::Pool("pool is shut down".to_string()))?;

        sender
            .send(Job { id, stream })
            .map_err(|_| CalcError::Pool("all workers have exited".to_string()))
    }

    /// Stop taking work and wait for in-flight sessions to finish
    pub fn join(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        // Closing the channel ends each worker's receive loop
        drop(self.sender.take());

        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                tracing::error!("A worker thread panicked");
            }
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}
