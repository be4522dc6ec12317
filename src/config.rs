//! Optional YAML configuration for the CLI.
//!
//! Everything here is a default; command-line flags win. A config file
//! looks like:
//!
//! ```yaml
//! base_url: http://lms.nthu.edu.tw
//! locale: zh-TW
//! platform: android
//! ```

use serde::Deserialize;
use std::error::Error;
use std::fs;

#[derive(Debug, Default, Clone, Deserialize)]
pub struct AppConfig {
    pub base_url: Option<String>,
    pub locale: Option<String>,
    pub platform: Option<String>,
}

impl AppConfig {
    pub fn load(path: &str) -> Result<Self, Box<dyn Error>> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_partial_config() {
        let config: AppConfig = serde_yaml::from_str("locale: en-US\n").unwrap();
        assert_eq!(config.locale.as_deref(), Some("en-US"));
        assert!(config.base_url.is_none());
        assert!(config.platform.is_none());
    }

    #[test]
    fn test_parses_full_config() {
        let config: AppConfig = serde_yaml::from_str(
            "base_url: http://localhost:8080\nlocale: zh-TW\nplatform: ios\n",
        )
        .unwrap();
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(config.platform.as_deref(), Some("ios"));
    }
}
