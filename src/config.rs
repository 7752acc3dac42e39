use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::utils::{
    CONFIG_DIR_NAME, CONFIG_FILE, DEFAULT_BASE_URL, DEFAULT_BYTE_DECIMALS, DEFAULT_DEBOUNCE_MS,
};

pub const BASE_URL_ENV: &str = "ADMIN_UI_BASE_URL";
pub const DEBOUNCE_MS_ENV: &str = "ADMIN_UI_DEBOUNCE_MS";

// ============================================================================
// SETTINGS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    pub byte_decimals: i32,
    pub debounce_ms: u64,
    /// Where the console posts on save; defaults to the endpoint it loaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_endpoint: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            byte_decimals: DEFAULT_BYTE_DECIMALS,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            save_endpoint: None,
        }
    }
}

impl Settings {
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE)
    }

    /// Load from the default path, then apply environment overrides.
    ///
    /// # Errors
    ///
    /// Fails on an unreadable or malformed config file, or a bad env value.
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Self::from_file(&Self::default_path())?;
        settings.apply_env(|key| env::var(key).ok())?;
        Ok(settings)
    }

    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply overrides looked up through `lookup` (the process env in [`load`](Self::load)).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] when the debounce override is not an integer.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.base_url = base_url.trim().to_string();
        }

        if let Some(raw) = lookup(DEBOUNCE_MS_ENV) {
            self.debounce_ms = raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                key: DEBOUNCE_MS_ENV,
                value: raw.clone(),
            })?;
        }

        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
