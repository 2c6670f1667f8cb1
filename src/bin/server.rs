//! calcd Server Binary
//!
//! Starts the arithmetic TCP server.

use clap::Parser;
use calcd::network::Server;
use calcd::Config;
use tracing_subscriber::{fmt, EnvFilter};

/// calcd Server
#[derive(Parser, Debug)]
#[command(name = "calcd-server")]
#[command(about = "Line-oriented arithmetic server")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "2205")]
    port: u16,

    /// Interface to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Worker threads serving clients concurrently (0 = one client at a time)
    #[arg(short, long, default_value = "0")]
    workers: usize,

    /// Accepted connections allowed to wait for a free worker
    #[arg(short, long, default_value = "64")]
    queue: usize,

    /// Read timeout in milliseconds (0 = wait forever)
    #[arg(long, default_value = "0")]
    read_timeout_ms: u64,

    /// Write timeout in milliseconds (0 = wait forever)
    #[arg(long, default_value = "0")]
    write_timeout_ms: u64,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,calcd=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("calcd Server v{}", calcd::VERSION);

    let config = Config::builder()
        .host(&args.host)
        .port(args.port)
        .workers(args.workers, args.queue)
        .read_timeout_ms(args.read_timeout_ms)
        .write_timeout_ms(args.write_timeout_ms)
        .build();

    let server = match Server::bind(config) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Failed to start server: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run() {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Server stopped");
}
