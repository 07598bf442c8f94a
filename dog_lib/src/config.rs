//! Credential loading from `~/.dogrc`-style INI files and command-line flags.
//!
//! The file format is:
//!
//! ```ini
//! [Connection]
//! apikey = <api key>
//! appkey = <application key>
//! ```

use crate::error::ConfigError;
use ini::{Ini, ParseOption};
use std::path::{Path, PathBuf};

const SECTION: &str = "Connection";
const API_KEY: &str = "apikey";
const APP_KEY: &str = "appkey";

/// API key / application key pair used to authenticate every call.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub apikey: String,
    pub appkey: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("apikey", &"<redacted>")
            .field("appkey", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Load both keys from the `[Connection]` section of an INI file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loading credentials");
        Self::parse(&text)
    }

    /// Parse INI text. Fails unless the section and both keys are present and non-empty.
    ///
    /// Values are taken verbatim (no quote stripping or escape decoding), key names match
    /// case-insensitively, and a repeated key keeps its last value.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let opt = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..Default::default()
        };
        let ini = Ini::load_from_str_opt(text, opt).map_err(|e| ConfigError::Parse(e.to_string()))?;
        let sections: Vec<_> = ini.section_all(Some(SECTION)).collect();
        if sections.is_empty() {
            return Err(ConfigError::MissingSection(SECTION.to_string()));
        }
        let get = |key: &str| -> Result<String, ConfigError> {
            let value = sections
                .iter()
                .flat_map(|props| props.iter())
                .filter(|(k, _)| k.trim().eq_ignore_ascii_case(key))
                .map(|(_, v)| v.trim())
                .last()
                .ok_or_else(|| ConfigError::MissingKey {
                    section: SECTION.to_string(),
                    key: key.to_string(),
                })?;
            if value.is_empty() {
                return Err(ConfigError::Empty(key.to_string()));
            }
            Ok(value.to_string())
        };
        Ok(Self {
            apikey: get(API_KEY)?,
            appkey: get(APP_KEY)?,
        })
    }

    /// Resolve credentials for one invocation.
    ///
    /// When both flags are given the config file is never read. Otherwise the file at
    /// `config` (or `~/.dogrc`) is loaded and any single flag overrides its field.
    pub fn resolve(
        config: Option<&Path>,
        api_key: Option<&str>,
        app_key: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let api_key = api_key.map(str::trim).filter(|s| !s.is_empty());
        let app_key = app_key.map(str::trim).filter(|s| !s.is_empty());
        if let (Some(apikey), Some(appkey)) = (api_key, app_key) {
            tracing::debug!("using credentials from command-line flags");
            return Ok(Self {
                apikey: apikey.to_string(),
                appkey: appkey.to_string(),
            });
        }
        let path = match config {
            Some(p) => p.to_path_buf(),
            None => default_config_path().ok_or(ConfigError::NoConfigPath)?,
        };
        let mut creds = Self::load(&path)?;
        if let Some(k) = api_key {
            creds.apikey = k.to_string();
        }
        if let Some(k) = app_key {
            creds.appkey = k.to_string();
        }
        Ok(creds)
    }
}

/// `~/.dogrc`, when a home directory is known.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".dogrc"))
}
