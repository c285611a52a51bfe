use std::fs::OpenOptions;
use std::sync::Mutex;

use color_eyre::eyre::{eyre, Result};
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

/// Installs the global subscriber. The dashboard owns the terminal, so
/// interactive runs log to a file; headless runs log to stderr.
pub fn init(config: &AppConfig, headless: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if config.debug {
            "smogsense_tui=debug,smogsense_core=debug"
        } else {
            "smogsense_tui=info,smogsense_core=info"
        })
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let installed = if headless {
        builder.with_writer(std::io::stderr).try_init()
    } else {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)
            .map_err(|e| eyre!("Failed to open log file {}: {e}", config.log_file.display()))?;
        builder
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init()
    };

    installed.map_err(|e| eyre!("Failed to install logger: {e}"))
}
