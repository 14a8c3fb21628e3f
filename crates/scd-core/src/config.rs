use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::resolver::DEFAULT_MAX_PROXY_HOPS;

/// Environment variable holding the explorer API key.
pub const API_KEY_ENV: &str = "ETHERSCAN_APIKEY";

/// Global configuration loaded from `~/.config/scd/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScdConfig {
    /// Etherscan-compatible API endpoint (`module=contract&action=getsourcecode` is appended).
    pub explorer_url: String,
    /// Directory that receives `<ContractName>_<address>.zip` archives.
    pub output_dir: PathBuf,
    /// Maximum proxy → implementation redirections before giving up.
    pub max_proxy_hops: usize,
    /// Connect timeout per explorer request, in seconds.
    pub connect_timeout_secs: u64,
    /// Total timeout per explorer request, in seconds.
    pub timeout_secs: u64,
    /// API key used when `ETHERSCAN_APIKEY` is not set.
    pub api_key: Option<String>,
}

impl Default for ScdConfig {
    fn default() -> Self {
        Self {
            explorer_url: "https://api.etherscan.io/api".to_string(),
            output_dir: PathBuf::from("output"),
            max_proxy_hops: DEFAULT_MAX_PROXY_HOPS,
            connect_timeout_secs: 15,
            timeout_secs: 30,
            api_key: None,
        }
    }
}

impl ScdConfig {
    /// API key from the environment, falling back to the config file. Empty values count as missing.
    pub fn api_key(&self) -> Option<String> {
        select_api_key(std::env::var(API_KEY_ENV).ok(), self.api_key.clone())
    }
}

fn select_api_key(from_env: Option<String>, from_file: Option<String>) -> Option<String> {
    [from_env, from_file]
        .into_iter()
        .flatten()
        .map(|k| k.trim().to_string())
        .find(|k| !k.is_empty())
}

/// Loads `KEY=value` lines from `path` into the process environment.
/// Variables that are already set win. Returns `false` when the file does not exist.
pub fn load_env_file(path: &Path) -> Result<bool> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(true),
        Err(e) if e.not_found() => Ok(false),
        Err(e) => Err(e).with_context(|| format!("failed to load {}", path.display())),
    }
}

/// Loads the nearest `.env` (current directory, then its parents), if any.
pub fn load_dotenv() -> Result<Option<PathBuf>> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e).context("failed to load .env"),
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("scd")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ScdConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ScdConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: ScdConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = ScdConfig::default();
        assert_eq!(cfg.explorer_url, "https://api.etherscan.io/api");
        assert_eq!(cfg.output_dir, PathBuf::from("output"));
        assert_eq!(cfg.max_proxy_hops, 10);
        assert_eq!(cfg.connect_timeout_secs, 15);
        assert_eq!(cfg.timeout_secs, 30);
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = ScdConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: ScdConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.explorer_url, cfg.explorer_url);
        assert_eq!(parsed.output_dir, cfg.output_dir);
        assert_eq!(parsed.max_proxy_hops, cfg.max_proxy_hops);
        assert_eq!(parsed.timeout_secs, cfg.timeout_secs);
    }

    #[test]
    fn config_toml_partial_uses_defaults() {
        let toml = r#"
            output_dir = "/tmp/contracts"
            max_proxy_hops = 3
            api_key = "ABC"
        "#;
        let cfg: ScdConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.output_dir, PathBuf::from("/tmp/contracts"));
        assert_eq!(cfg.max_proxy_hops, 3);
        assert_eq!(cfg.api_key.as_deref(), Some("ABC"));
        assert_eq!(cfg.explorer_url, "https://api.etherscan.io/api");
        assert_eq!(cfg.connect_timeout_secs, 15);
    }

    #[test]
    fn env_key_wins_over_file() {
        assert_eq!(
            select_api_key(Some("ENV".into()), Some("FILE".into())).as_deref(),
            Some("ENV")
        );
    }

    #[test]
    fn empty_env_key_falls_back_to_file() {
        assert_eq!(
            select_api_key(Some("  ".into()), Some("FILE".into())).as_deref(),
            Some("FILE")
        );
        assert_eq!(select_api_key(None, Some("".into())), None);
        assert_eq!(select_api_key(None, None), None);
    }

    #[test]
    fn env_file_supplies_api_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, format!("# scan key\n{API_KEY_ENV}=FROM_DOTENV\n")).unwrap();

        std::env::remove_var(API_KEY_ENV);
        assert!(load_env_file(&path).unwrap());
        let key = ScdConfig::default().api_key();
        std::env::remove_var(API_KEY_ENV);

        assert_eq!(key.as_deref(), Some("FROM_DOTENV"));
    }

    #[test]
    fn missing_env_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!load_env_file(&dir.path().join(".env")).unwrap());
    }
}
