#![windows_subsystem = "windows"]

use anyhow::{Context, Result};
use druid::{AppLauncher, WindowDesc};
use rectpaint::Config;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

mod app;
mod canvas;

use app::{AppState, build_root};

/// `RUST_LOG`-style directives; anything not covered logs at info.
fn log_filter(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives)
}

fn main() -> Result<()> {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    tracing_subscriber::fmt().with_env_filter(log_filter(&directives)).init();

    let config = Config::discover()?;
    tracing::debug!("config: {:?}", config);

    let init = AppState::from_config(&config);
    let window = WindowDesc::new(build_root(&config))
        .title("rectpaint")
        .window_size((config.window_width, config.window_height));
    AppLauncher::with_window(window)
        .launch(init)
        .context("Failed to launch window")?;
    Ok(())
}
