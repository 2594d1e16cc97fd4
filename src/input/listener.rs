// input/listener.rs

use crate::input::command_handler::{handle_command, parse_command, CommandContext};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

/// Reads commands from stdin, one per line, until quit or end of input.
pub async fn listen_for_commands(ctx: CommandContext) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if line.trim().is_empty() {
                    continue;
                }
                match parse_command(&line) {
                    Some(command) => {
                        if !handle_command(command, &ctx).await {
                            break;
                        }
                    }
                    None => warn!("Unknown command: {}", line.trim()),
                }
            }
            Ok(None) => {
                info!("Input closed, refresh timer only.");
                break;
            }
            Err(e) => {
                warn!("Failed to read input: {}", e);
                break;
            }
        }
    }
}
