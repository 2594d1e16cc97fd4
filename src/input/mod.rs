pub mod command_handler;
pub mod listener;

pub use command_handler::CommandContext;

/// Spawns the stdin command listener on the runtime.
pub fn spawn_listener(ctx: CommandContext) {
    tokio::spawn(async move {
        tracing::info!("Starting command listener...");
        listener::listen_for_commands(ctx).await;
        tracing::info!("Command listener ended.");
    });
}
