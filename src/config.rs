use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Optional config file looked up in the working directory.
pub const CONFIG_FILE: &str = "dashboard.json";

/// Where the GDP CSV lives and how to read it. Every field has a default;
/// a missing or broken config file never stops the dashboard from starting.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Path of the EUC-KR encoded World Bank GDP export.
    pub data_path: PathBuf,
    /// Row to select from the wide table.
    pub country: String,
    /// GDP cache time-to-live, in seconds.
    pub cache_ttl_secs: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/gdp_data.csv"),
            country: "Korea, Rep.".to_string(),
            cache_ttl_secs: 3600,
        }
    }
}

impl DashboardConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Load from [`CONFIG_FILE`] if present, otherwise use defaults.
    /// Parse failures are logged and the defaults win.
    pub fn load() -> Self {
        match Self::from_file(Path::new(CONFIG_FILE)) {
            Ok(Some(config)) => {
                log::info!("Loaded config from {CONFIG_FILE}");
                config
            }
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("Ignoring {CONFIG_FILE}: {e:#}");
                Self::default()
            }
        }
    }

    fn from_file(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(Some(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_deployed_layout() {
        let config = DashboardConfig::default();
        assert_eq!(config.data_path, PathBuf::from("data/gdp_data.csv"));
        assert_eq!(config.country, "Korea, Rep.");
        assert_eq!(config.cache_ttl(), Duration::from_secs(3600));
    }

    #[test]
    fn partial_json_keeps_defaults_for_missing_fields() {
        let config: DashboardConfig =
            serde_json::from_str(r#"{"country": "Japan"}"#).unwrap();
        assert_eq!(config.country, "Japan");
        assert_eq!(config.cache_ttl_secs, 3600);
    }

    #[test]
    fn missing_file_yields_none() {
        assert!(DashboardConfig::from_file(Path::new("no/such/config.json"))
            .unwrap()
            .is_none());
    }
}
