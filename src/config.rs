//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::error::ScrapeError;
use crate::store::targets::{default_targets, PageTarget};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory to write the per-page CSV files into
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Run the browser without a window
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Upper bound on "load more" activations per page
    #[serde(default = "default_max_clicks")]
    pub max_clicks: usize,

    /// Delay after each activation so newly revealed cards can render
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,

    /// Listing pages to scrape, each with its pagination need declared
    #[serde(default = "default_targets")]
    pub targets: Vec<PageTarget>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_headless() -> bool {
    true
}

fn default_max_clicks() -> usize {
    200
}

fn default_settle_ms() -> u64 {
    250
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            headless: default_headless(),
            max_clicks: default_max_clicks(),
            settle_ms: default_settle_ms(),
            targets: default_targets(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ScrapeError> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)?;

        toml::from_str(&content).map_err(|e| {
            ScrapeError::Config(format!("failed to parse config file {}: {e}", path.display()))
        })
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, ScrapeError> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("ecom-crawler").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        // 4. Return default config
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(dir) = std::env::var("ECOM_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(dir);
        }

        if let Ok(headless) = std::env::var("ECOM_HEADLESS") {
            match headless.to_lowercase().as_str() {
                "1" | "true" | "yes" => self.headless = true,
                "0" | "false" | "no" => self.headless = false,
                _ => {}
            }
        }

        if let Ok(clicks) = std::env::var("ECOM_MAX_CLICKS") {
            if let Ok(n) = clicks.parse() {
                self.max_clicks = n;
            }
        }

        self
    }
}
