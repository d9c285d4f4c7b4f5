use anyhow::Result;
use taskdeck::commands::Cli;
use taskdeck::libs::messages::macros::is_debug_mode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    if is_debug_mode() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("taskdeck=debug"));
        let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(true).try_init();
    }

    Cli::menu().await
}
