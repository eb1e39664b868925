mod app;
mod client;
mod config;
mod error;
mod form;
mod model;
mod session;
mod ui;

use crate::{config::AppConfig, error::Result};

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;
    init_tracing(&config)?;

    let mut app = app::App::new(config)?;
    app.run().await?;
    Ok(())
}

/// Logging goes to a file, never to stdout: the terminal belongs to
/// ratatui's alternate screen while the app runs.
fn init_tracing(config: &AppConfig) -> Result<()> {
    let Some(path) = config.log_file.as_deref() else {
        return Ok(());
    };
    let file = std::fs::File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "wecdesk_tui={level},listview={level}",
            level = config.log_level
        ))
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
