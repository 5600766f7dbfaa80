//! unitconv MCP Server
//!
//! Line-delimited JSON-RPC over stdio. Logs go to stderr; stdout carries
//! only protocol responses.
//!
//! Tools:
//! - list_categories / list_units: populate selectors
//! - convert: convert a value between two units of a category
//! - convert_text: convert a free-form query ("5 km to mi")
//! - search_units: find categories by name or unit
//! - formula: show the conversion formula for a unit pair
//! - history: recent conversions in this session
//! - toggle_favorite / favorites: remembered unit pairs

mod config;
mod protocol;
mod server;
mod session;

use std::io::{self, BufRead, IsTerminal, Write};
use tracing::{debug, error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use config::Config;
use server::{Server, PROTOCOL_VERSION, SERVER_VERSION};

fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_ansi(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env();
    let mut server = Server::new(config.clone());

    info!(version = SERVER_VERSION, protocol = PROTOCOL_VERSION, "unitconv MCP server started");
    info!(sigfigs = config.sigfigs, history_limit = config.history_limit, "configuration loaded");
    debug!(
        stdin_is_terminal = io::stdin().is_terminal(),
        stdout_is_terminal = io::stdout().is_terminal(),
        "stdio"
    );

    let stdin = io::stdin();
    let mut reader = io::BufReader::new(stdin.lock());

    info!("server ready, waiting for requests");

    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => {
                info!("client disconnected (EOF)");
                break;
            }
            Ok(_) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                debug!(bytes = line.len(), "received");

                let Some(response) = server.process_line(line) else {
                    continue;
                };

                let mut stdout = io::stdout().lock();
                if let Err(e) = writeln!(stdout, "{}", response) {
                    error!(error = %e, "error writing response");
                    break;
                }
                if let Err(e) = stdout.flush() {
                    error!(error = %e, "error flushing stdout");
                    break;
                }
            }
            Err(e) => {
                error!(error = %e, "error reading input");
                break;
            }
        }
    }

    info!("server shutting down");
}
