use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default number of models requested per page
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Lords client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LordsConfig {
    /// Base URL of the catalog REST API
    pub api_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Models per page for list and search calls
    pub page_size: u32,

    /// Where the session token is persisted; `None` keeps it in memory only
    pub session_file: Option<PathBuf>,

    /// Log level
    pub log_level: String,

    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for LordsConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000/api".to_string(),
            timeout_secs: 30,
            page_size: DEFAULT_PAGE_SIZE,
            session_file: None,
            log_level: "info".to_string(),
            user_agent: format!("lords/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl LordsConfig {
    /// Load from configuration file (TOML, or JSON when the extension is `.json`)
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            serde_json::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))
        } else {
            toml::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))
        }
    }

    /// Overlay `LORDS_*` environment variables (after reading `.env`)
    pub fn with_env(mut self) -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        self.apply_vars(|key| std::env::var(key).ok())?;
        Ok(self)
    }

    fn apply_vars(&mut self, lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<()> {
        if let Some(url) = lookup("LORDS_API_URL") {
            self.api_url = url;
        }
        if let Some(size) = lookup("LORDS_PAGE_SIZE") {
            self.page_size = size
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid LORDS_PAGE_SIZE '{}': {}", size, e))?;
        }
        if let Some(timeout) = lookup("LORDS_TIMEOUT_SECS") {
            self.timeout_secs = timeout
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid LORDS_TIMEOUT_SECS '{}': {}", timeout, e))?;
        }
        if let Some(file) = lookup("LORDS_SESSION_FILE") {
            self.session_file = Some(PathBuf::from(file));
        }
        if let Some(level) = lookup("LORDS_LOG_LEVEL") {
            self.log_level = level;
        }
        Ok(())
    }

    /// `api_url` without a trailing slash
    pub fn base_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = LordsConfig::default();
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert!(config.session_file.is_none());
        assert!(config.user_agent.starts_with("lords/"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: LordsConfig = toml::from_str(
            r#"
api_url = "https://lords.example/api/"
page_size = 50
"#,
        )
        .unwrap();
        assert_eq!(config.base_url(), "https://lords.example/api");
        assert_eq!(config.page_size, 50);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_env_overlay() {
        let vars: HashMap<&str, &str> = [
            ("LORDS_API_URL", "http://10.0.0.2:8080"),
            ("LORDS_PAGE_SIZE", "5"),
            ("LORDS_SESSION_FILE", "/tmp/lords-session.toml"),
        ]
        .into_iter()
        .collect();

        let mut config = LordsConfig::default();
        config
            .apply_vars(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.api_url, "http://10.0.0.2:8080");
        assert_eq!(config.page_size, 5);
        assert_eq!(
            config.session_file,
            Some(PathBuf::from("/tmp/lords-session.toml"))
        );
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_env_overlay_rejects_bad_numbers() {
        let mut config = LordsConfig::default();
        let result = config.apply_vars(|key| (key == "LORDS_PAGE_SIZE").then(|| "many".to_string()));
        assert!(result.is_err());
    }
}
