//! slirc-bot - console front end for slirc-cmd.
//!
//! Reads raw IRC lines on stdin, dispatches every PRIVMSG and writes the
//! bot's replies as raw IRC lines on stdout. Logs go to stderr.

mod builtins;

use futures_util::StreamExt;
use slirc_cmd::{Config, Dispatcher, LineClient, Message, load_commands};
use std::sync::Arc;
use tokio_util::codec::{FramedRead, LinesCodec};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "bot.toml".to_string());

    let config = Config::load(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;

    info!(
        prefix = %config.prefix,
        case_sensitive = config.case_sensitive,
        chantypes = %config.chantypes,
        "Starting slirc-bot"
    );

    let client = Arc::new(LineClient::new(std::io::stdout()));
    let mut dispatcher = Dispatcher::from_config(client, &config);

    match &config.commands.dir {
        Some(dir) => {
            load_commands(&mut dispatcher, dir, &builtins::handler_table()).map_err(|e| {
                error!(dir = %dir.display(), error = %e, "Failed to load commands");
                e
            })?;
        }
        None => {
            for command in builtins::default_commands() {
                dispatcher.add_command(command);
            }
        }
    }
    info!(count = dispatcher.registry().len(), "Commands registered");

    let mut lines = FramedRead::new(tokio::io::stdin(), LinesCodec::new());
    while let Some(line) = lines.next().await {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "Failed to read line");
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let msg = match Message::parse_line(&line) {
            Ok(Some(msg)) => msg,
            Ok(None) => {
                debug!(line = %line, "Ignoring non-PRIVMSG line");
                continue;
            }
            Err(e) => {
                warn!(error = %e, "Unparseable line");
                continue;
            }
        };

        if let Err(e) = dispatcher.handle_privmsg(&msg) {
            error!(code = e.error_code(), error = %e, text = %msg.text, "Dispatch aborted");
        }
    }

    info!("stdin closed, shutting down");
    Ok(())
}
