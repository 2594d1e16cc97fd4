// input/command_handler.rs

use crate::normalizer::normalize_symbol;
use crate::storage::PriceCache;
use std::sync::Arc;
use tokio::sync::{Mutex, Notify};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Recompute now, reloading config and reusing cached series.
    Refresh,
    /// Drop every cached series, then recompute.
    Invalidate,
    /// Drop the cached ranges of one symbol, then recompute.
    InvalidateSymbol(String),
    Quit,
    Help,
}

pub fn parse_command(text: &str) -> Option<Command> {
    let mut parts = text.trim().trim_start_matches('/').split_whitespace();
    let name = parts.next()?.to_lowercase();
    let arg = parts.next();
    if parts.next().is_some() {
        return None;
    }
    match (name.as_str(), arg) {
        ("refresh" | "r", None) => Some(Command::Refresh),
        ("invalidate" | "i", None) => Some(Command::Invalidate),
        ("invalidate" | "i", Some(symbol)) => Some(Command::InvalidateSymbol(normalize_symbol(symbol))),
        ("quit" | "exit" | "q", None) => Some(Command::Quit),
        ("help" | "h" | "?", None) => Some(Command::Help),
        _ => None,
    }
}

/// Shared handles a command may act on.
pub struct CommandContext {
    pub refresh_notify: Arc<Notify>,
    pub shutdown_notify: Arc<Notify>,
    pub cache: Arc<Mutex<PriceCache>>,
}

/// Applies a command. Returns false when input handling should stop.
pub async fn handle_command(command: Command, ctx: &CommandContext) -> bool {
    info!("Handling command: {:?}", command);
    match command {
        Command::Refresh => {
            ctx.refresh_notify.notify_one();
        }
        Command::Invalidate => {
            let mut cache = ctx.cache.lock().await;
            info!("Dropping {} cached series", cache.len());
            cache.clear();
            drop(cache);
            ctx.refresh_notify.notify_one();
        }
        Command::InvalidateSymbol(symbol) => {
            let removed = ctx.cache.lock().await.invalidate_symbol(&symbol);
            info!("Dropped {} cached series for {}", removed, symbol);
            ctx.refresh_notify.notify_one();
        }
        Command::Quit => {
            ctx.shutdown_notify.notify_one();
            return false;
        }
        Command::Help => {
            info!("Commands: refresh (r), invalidate (i) [SYMBOL], quit (q), help (h)");
        }
    }
    true
}
