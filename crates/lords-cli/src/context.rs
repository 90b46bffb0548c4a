//! Configuration resolution and application start-up for the CLI

use lords::LordsApp;
use lords::config::LordsConfig;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::CliError;

/// Values given on the command line; they win over file and environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub log_level: Option<String>,
    pub session_file: Option<PathBuf>,
}

/// `<config dir>/lords/session.toml`
pub fn default_session_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("lords").join("session.toml"))
}

/// defaults, then the config file, then `LORDS_*` variables, then flags
pub fn resolve_config(config_file: Option<&Path>, overrides: Overrides) -> Result<LordsConfig, CliError> {
    let config = match config_file {
        Some(path) => match LordsConfig::load_from_file(path) {
            Ok(config) => {
                info!("Configuration loaded from: {}", path.display());
                config
            }
            Err(e) => {
                warn!("Failed to load config file: {}. Using default configuration.", e);
                LordsConfig::default()
            }
        },
        None => LordsConfig::default(),
    };

    let mut config = config.with_env()?;
    if let Some(api_url) = overrides.api_url {
        config.api_url = api_url;
    }
    if let Some(log_level) = overrides.log_level {
        config.log_level = log_level;
    }
    if overrides.session_file.is_some() {
        config.session_file = overrides.session_file;
    }
    if config.session_file.is_none() {
        config.session_file = default_session_file();
    }
    Ok(config)
}

pub async fn start(config: LordsConfig) -> Result<LordsApp, CliError> {
    Ok(LordsApp::builder(config).build().await?)
}

/// Refuse admin commands before any request goes out
pub fn require_admin(app: &LordsApp) -> Result<(), CliError> {
    if !app.session().is_authenticated() {
        return Err(CliError::Forbidden(
            "log in first with `lords login`".to_string(),
        ));
    }
    if !app.session().is_admin() {
        return Err(CliError::Forbidden(
            "this command needs an administrator account".to_string(),
        ));
    }
    Ok(())
}
