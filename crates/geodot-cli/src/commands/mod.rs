pub mod building_points;
pub mod camera;
pub mod catalog;
pub mod config;
pub mod export;
pub mod features;
pub mod images;

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use console::Term;
use geodot_core::api::{execute, ApiRequest, ApiResponse, HttpBackend};
use geodot_core::config::AppConfig;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

/// Load the config file if one was given and apply the `--server` override.
pub fn load_config(path: Option<&Path>, server: Option<&str>) -> Result<AppConfig> {
    let mut config = match path {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AppConfig::default(),
    };
    if let Some(server) = server {
        config.server.base_url = server.to_string();
    }
    debug!(base_url = %config.server.base_url, "Using backend");
    Ok(config)
}

pub fn backend(config: &AppConfig) -> HttpBackend {
    HttpBackend::new(&config.server)
}

/// Spinner shown while a request is in flight.
pub fn spinner(message: impl Into<String>) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}")?);
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

/// Run one request against the configured backend behind a spinner.
pub fn request(config: &AppConfig, request: ApiRequest) -> Result<ApiResponse> {
    let what = request.describe();
    let pb = spinner(format!("Trying to {what}"))?;
    let result = execute(&backend(config), request);
    pb.finish_and_clear();
    result.with_context(|| format!("Failed to {what} at {}", config.server.base_url))
}

/// Yes/no prompt on the terminal; anything but `y` declines.
pub fn confirm(prompt: &str) -> Result<bool> {
    let term = Term::stdout();
    term.write_str(&format!("{prompt} [y/N] "))?;
    let answer = term.read_line()?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}
