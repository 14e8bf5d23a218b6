mod cli;
mod client;
mod config;
mod errors;
mod models;
mod queue;
mod results;
mod session;
mod settings;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::repl::Repl;
use crate::client::{AnalysisClient, DEFAULT_API_BASE};
use crate::config::Config;
use crate::settings::SettingsStore;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Logs go to stderr so they do not interleave with command output.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting screener v{}", env!("CARGO_PKG_VERSION"));

    let settings_path = config
        .settings_path
        .clone()
        .unwrap_or_else(SettingsStore::default_path);
    let settings = SettingsStore::load(settings_path)?;
    info!("Settings file: {}", settings.path().display());

    // Environment beats the saved setting, which beats the built-in default.
    let api_base = config
        .api_base
        .clone()
        .or_else(|| settings.api_base().map(str::to_string))
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

    let client = match AnalysisClient::new(&api_base, config.request_timeout) {
        Ok(client) => client,
        Err(e) => {
            warn!("{e}; falling back to {DEFAULT_API_BASE}");
            AnalysisClient::new(DEFAULT_API_BASE, config.request_timeout)?
        }
    };
    info!("Analysis service: {}", client.base_url());

    Repl::new(client, settings, config.request_timeout)
        .run()
        .await
}
