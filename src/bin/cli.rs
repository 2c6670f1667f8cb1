//! calcd CLI Client
//!
//! Command-line interface for talking to a calcd server.

use std::io::{self, BufRead};

use clap::Parser;
use calcd::client::Client;
use calcd::Result;
use tracing_subscriber::{fmt, EnvFilter};

/// calcd CLI
#[derive(Parser, Debug)]
#[command(name = "calcd-cli")]
#[command(about = "CLI for the calcd arithmetic server")]
#[command(version)]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1:2205")]
    server: String,

    /// Expression to evaluate, e.g. `add 2 3`. Reads stdin when omitted.
    expr: Vec<String>,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(io::stderr).init();

    let args = Args::parse();

    let outcome = if args.expr.is_empty() {
        interactive(&args.server)
    } else {
        one_shot(&args.server, &args.expr.join(" "))
    };

    if let Err(e) = outcome {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Send a single line, print its result, then quit
fn one_shot(server: &str, line: &str) -> Result<()> {
    let mut client = Client::connect(server)?;
    let reply = client.send(line)?;

    match reply.response {
        Some(response) => {
            println!("{}", response);
            client.quit()
        }
        // The expression itself was QUIT
        None => Ok(()),
    }
}

/// Relay stdin lines and print the server's full reply to each
fn interactive(server: &str) -> Result<()> {
    let mut client = Client::connect(server)?;
    println!("{}", client.banner());

    for line in io::stdin().lock().lines() {
        let reply = client.send(&line?)?;
        println!("> {}", reply.echo);

        match reply.response {
            Some(response) => println!("{}", response),
            None => return Ok(()),
        }
    }

    client.quit()
}
