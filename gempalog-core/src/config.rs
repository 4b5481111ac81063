use anyhow::{Context, Result, anyhow, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

pub const DEFAULT_RECENT_URL: &str = "https://data.bmkg.go.id/DataMKG/TEWS/gempaterkini.json";
pub const DEFAULT_FELT_URL: &str = "https://data.bmkg.go.id/DataMKG/TEWS/gempadirasakan.json";
pub const DEFAULT_STORE_PATH: &str = "data/bantuan.csv";

/// Where earthquake listings come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub recent_url: String,
    pub felt_url: String,
    /// Whole-request timeout for each feed call.
    pub timeout_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            recent_url: DEFAULT_RECENT_URL.to_string(),
            felt_url: DEFAULT_FELT_URL.to_string(),
            timeout_secs: 5,
        }
    }
}

impl FeedConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// store_path = "data/bantuan.csv"
/// recent_limit = 10
///
/// [feed]
/// timeout_secs = 5
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// CSV file holding aid submissions. Relative paths resolve against the working directory.
    pub store_path: PathBuf,

    /// How many recent earthquakes the info page lists.
    pub recent_limit: usize,

    pub feed: FeedConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            recent_limit: 10,
            feed: FeedConfig::default(),
        }
    }
}

impl Config {
    /// Load config from the platform config directory, or defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    /// Load config from an explicit file, or defaults if it doesn't exist yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, use defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        cfg.validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to the platform config directory.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("id", "gempalog", "gempalog")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.store_path.as_os_str().is_empty() {
            bail!("store_path must not be empty");
        }
        if self.recent_limit == 0 {
            bail!("recent_limit must be at least 1");
        }
        if self.feed.timeout_secs == 0 {
            bail!("feed.timeout_secs must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("absent.toml")).unwrap();

        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.store_path, PathBuf::from("data/bantuan.csv"));
        assert_eq!(cfg.feed.timeout(), Duration::from_secs(5));
        assert_eq!(cfg.recent_limit, 10);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "recent_limit = 3\n[feed]\ntimeout_secs = 2\n").unwrap();

        let cfg = Config::load_from(&path).unwrap();

        assert_eq!(cfg.recent_limit, 3);
        assert_eq!(cfg.feed.timeout_secs, 2);
        assert_eq!(cfg.feed.recent_url, DEFAULT_RECENT_URL);
        assert_eq!(cfg.store_path, PathBuf::from(DEFAULT_STORE_PATH));
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.store_path = PathBuf::from("/var/lib/gempalog/bantuan.csv");
        cfg.feed.felt_url = "http://localhost:8080/felt.json".to_string();
        cfg.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), cfg);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[feed]\ntimeout_secs = 0\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("timeout_secs must be at least 1"));
    }

    #[test]
    fn zero_recent_limit_is_rejected() {
        let cfg = Config { recent_limit: 0, ..Config::default() };
        assert!(cfg.validate().is_err());
    }
}
