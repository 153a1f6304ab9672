use std::path::{Path, PathBuf};

use diary_core::{KeyWrap, LoadPolicy};
use serde::{Deserialize, Serialize};

/// Contents of `config.toml`. Every section and key is optional.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiaryConfig {
    pub journal: JournalSection,
    pub keys: KeysSection,
    pub load: LoadSection,
    pub entry: EntrySection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JournalSection {
    pub entry_dir: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KeysSection {
    pub public_key: Option<String>,
    pub private_key: Option<String>,
    pub wrap: Option<KeyWrap>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadSection {
    pub policy: Option<LoadPolicy>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EntrySection {
    pub date_format: Option<String>,
    pub editor: Option<String>,
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_entry_dir() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("entries"))
}

pub fn default_public_key_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("public.pem"))
}

pub fn default_private_key_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("private.pem"))
}

pub fn read_config(path: &Path) -> anyhow::Result<DiaryConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

/// Expand a leading `~` to `$HOME`.
pub fn expand_path(value: &str) -> anyhow::Result<PathBuf> {
    if value == "~" {
        return home_dir();
    }
    if let Some(rest) = value.strip_prefix("~/") {
        return Ok(home_dir()?.join(rest));
    }
    Ok(PathBuf::from(value))
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("diary"));
        }
    }
    Ok(home_dir()?.join(".config").join("diary"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("diary"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("diary"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
