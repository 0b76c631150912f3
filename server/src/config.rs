// server/src/config.rs

use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use anyhow::{Context, Result};

/// Represents the configuration for the site server itself.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    pub host: String,
    pub port: u16,
    pub data_directory: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8082, // Default API port
            data_directory: "./data".to_string(),
        }
    }
}

// Define a wrapper struct to match the 'site:' key in the YAML config.
#[derive(Debug, Deserialize)]
struct SiteConfigWrapper {
    site: SiteConfig,
}

/// Loads the site configuration from a YAML file shaped as:
///
/// ```yaml
/// site:
///   host: 127.0.0.1
///   port: 8082
///   data_directory: ./data
/// ```
///
/// With no path given, defaults are returned; a given but unreadable or
/// unparseable file is an error.
pub fn load_site_config(config_file_path: Option<PathBuf>) -> Result<SiteConfig> {
    let Some(path) = config_file_path else {
        return Ok(SiteConfig::default());
    };

    let config_content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read site config file {}", path.display()))?;

    let wrapper: SiteConfigWrapper = serde_yaml2::from_str(&config_content)
        .with_context(|| format!("Failed to parse site config file {}", path.display()))?;

    Ok(wrapper.site)
}
