//! Sync configuration stored as TOML (default `ledger.toml`).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Sync layer configuration (TOML).
///
/// Missing fields default to a local development API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SyncConfig {
    /// Origin of the remote resource API, without the `/api` prefix.
    pub base_url: String,

    /// Per-request timeout in seconds for gateway calls.
    pub request_timeout_secs: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl SyncConfig {
    pub fn validate(&self) -> Result<()> {
        let base_url = self.base_url.trim();
        if base_url.is_empty() {
            return Err(anyhow!("base_url must be non-empty"));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(anyhow!(
                "base_url must start with http:// or https://, got `{base_url}`"
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(anyhow!("request_timeout_secs must be > 0"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `SyncConfig::default()`.
pub fn load_config(path: &Path) -> Result<SyncConfig> {
    if !path.exists() {
        let cfg = SyncConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: SyncConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &SyncConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, SyncConfig::default());
    }

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("ledger.toml");
        let cfg = SyncConfig {
            base_url: "https://ledger.example.com".to_string(),
            request_timeout_secs: 5,
        };
        write_config(&path, &cfg).expect("write");
        let loaded = load_config(&path).expect("load");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("ledger.toml");
        fs::write(&path, "request_timeout_secs = 3\n").expect("write");
        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.base_url, SyncConfig::default().base_url);
        assert_eq!(cfg.request_timeout_secs, 3);
    }

    #[test]
    fn rejects_zero_timeout_and_bad_scheme() {
        let cfg = SyncConfig {
            request_timeout_secs: 0,
            ..SyncConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = SyncConfig {
            base_url: "ftp://example.com".to_string(),
            ..SyncConfig::default()
        };
        let err = cfg.validate().expect_err("scheme");
        assert!(err.to_string().contains("http://"));
    }
}
