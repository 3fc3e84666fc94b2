use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$MONEYGUARD_HOME`, or `~/.moneyguard`.
pub fn moneyguard_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("MONEYGUARD_HOME") {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".moneyguard"))
}

pub fn ensure_moneyguard_home() -> Result<PathBuf> {
    let dir = moneyguard_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// Default location of the local key/value store.
pub fn default_storage_path() -> Result<PathBuf> {
    Ok(moneyguard_home()?.join("storage.json"))
}
