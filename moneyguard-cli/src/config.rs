use anyhow::{Context, Result};
use moneyguard_client::api::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::state::{default_storage_path, ensure_moneyguard_home};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub storage: StorageSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSection {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StorageSection {
    /// Store file; defaults to ~/.moneyguard/storage.json
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs.max(1))
    }

    pub fn storage_path(&self) -> Result<PathBuf> {
        match &self.storage.file {
            Some(p) => Ok(p.clone()),
            None => default_storage_path(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_moneyguard_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config_to(cfg: &Config, p: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config_to(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.api.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.api.timeout_secs = 3;
        cfg.storage.file = Some(dir.path().join("store.json"));
        save_config_to(&cfg, &p).unwrap();

        let loaded = load_config_from(&p).unwrap();
        assert_eq!(loaded, cfg);
        assert_eq!(loaded.timeout(), Duration::from_secs(3));
        assert_eq!(loaded.storage_path().unwrap(), dir.path().join("store.json"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(&p, "[storage]\nfile = \"/tmp/mg.json\"\n").unwrap();

        let cfg = load_config_from(&p).unwrap();
        assert_eq!(cfg.api, ApiSection::default());
        assert_eq!(cfg.storage.file, Some(PathBuf::from("/tmp/mg.json")));
    }

    #[test]
    fn test_zero_timeout_is_clamped() {
        let mut cfg = Config::default();
        cfg.api.timeout_secs = 0;
        assert_eq!(cfg.timeout(), Duration::from_secs(1));
    }
}
