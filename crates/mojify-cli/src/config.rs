//! Configuration management for Mojify CLI
//!
//! Stores the API base URL, the voter fingerprint and feed settings in
//! ~/.config/mojify/config.toml

use anyhow::{bail, Context, Result};
use mojify::{VoterFingerprint, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const CONFIG_DIR: &str = "mojify";
const CONFIG_FILE: &str = "config.toml";

/// Environment variable overriding `base_url`
pub const API_URL_ENV: &str = "MOJIFY_API_URL";

/// CLI Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Generated on first vote, then reused so re-votes upsert server-side
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<VoterFingerprint>,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            fingerprint: None,
            page_size: default_page_size(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join(CONFIG_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        Self::parse(&content)
    }

    fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse config file")?;
        if config.page_size == 0 {
            bail!("page_size in config file must be at least 1");
        }
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory {:?}", dir))?;

        let path = Self::config_path()?;
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Base URL with precedence: flag, then `MOJIFY_API_URL`, then file
    pub fn resolve_base_url(&self, flag: Option<&str>) -> String {
        Self::pick_base_url(flag, std::env::var(API_URL_ENV).ok().as_deref(), &self.base_url)
    }

    fn pick_base_url(flag: Option<&str>, env: Option<&str>, file: &str) -> String {
        let non_blank = |url: &&str| !url.trim().is_empty();

        flag.filter(non_blank)
            .or(env.filter(non_blank))
            .unwrap_or(file)
            .trim()
            .trim_end_matches('/')
            .to_string()
    }

    /// Return the stored fingerprint, generating one if absent.
    /// The bool is `true` when a new fingerprint was generated and the
    /// config needs saving.
    pub fn ensure_fingerprint(&mut self) -> (VoterFingerprint, bool) {
        match &self.fingerprint {
            Some(fp) => (fp.clone(), false),
            None => {
                let fp = VoterFingerprint::generate();
                self.fingerprint = Some(fp.clone());
                (fp, true)
            }
        }
    }
}
