//! Service configuration
//!
//! JSON file, every field optional:
//! ```json
//! {
//!   "data_file": "pokemons.json",
//!   "host": "0.0.0.0",
//!   "port": 5000,
//!   "cors_origins": [],
//!   "public_base_url": "http://localhost:5000",
//!   "images_dir": "public/images"
//! }
//! ```
//!
//! Environment variables override the file: `PORT`, `DATA_FILE`, and
//! `PROTOCOL` + `DOMAIN_NAME` (with `PORT`) rebuild `public_base_url`.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::http_server::HttpServerConfig;
use crate::import::ImportOptions;

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Collection document path
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    #[serde(flatten)]
    pub http: HttpServerConfig,

    /// Base of generated image URLs
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,

    /// Directory holding `<id>.png` image assets
    #[serde(default = "default_images_dir")]
    pub images_dir: PathBuf,
}

fn default_data_file() -> PathBuf {
    PathBuf::from("pokemons.json")
}

fn default_public_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_images_dir() -> PathBuf {
    PathBuf::from("public/images")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            http: HttpServerConfig::default(),
            public_base_url: default_public_base_url(),
            images_dir: default_images_dir(),
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults when the file
    /// does not exist, then apply environment overrides and validate.
    pub fn load(path: &Path) -> CliResult<Self> {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path)
                .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

            serde_json::from_str(&content)
                .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?
        } else {
            Config::default()
        };

        config.apply_overrides(|key| env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Applies overrides looked up by variable name.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> CliResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.http.port = port
                .trim()
                .parse()
                .map_err(|_| CliError::config_error(format!("Invalid PORT: '{}'", port)))?;
        }

        if let Some(data_file) = lookup("DATA_FILE") {
            self.data_file = PathBuf::from(data_file);
        }

        if let Some(domain) = lookup("DOMAIN_NAME") {
            let protocol = lookup("PROTOCOL").unwrap_or_else(|| "http".to_string());
            self.public_base_url = format!("{}://{}:{}", protocol, domain, self.http.port);
        }

        Ok(())
    }

    /// Validate configuration
    fn validate(&self) -> CliResult<()> {
        if self.http.port == 0 {
            return Err(CliError::config_error("port must be > 0"));
        }

        if self.data_file.as_os_str().is_empty() {
            return Err(CliError::config_error("data_file must not be empty"));
        }

        Ok(())
    }

    pub fn import_options(&self) -> ImportOptions {
        ImportOptions {
            public_base_url: self.public_base_url.clone(),
            images_dir: self.images_dir.clone(),
        }
    }
}
