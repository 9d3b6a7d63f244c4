use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Retry-after cap the original driver applied to server hints (2 minutes).
pub const SUGGESTED_MAX_RETRY_AFTER_MS: u32 = 120_000;

/// Decision engine parameters (optional `[engine]` section in config.toml).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Clamp forwarded retry-after hints to this many milliseconds.
    /// Absent = forward hints verbatim.
    #[serde(default)]
    pub max_retry_after_ms: Option<u32>,
}

/// Global configuration loaded from `~/.config/transport-core/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TcConfig {
    /// Attempt budget the CLI uses when `--max-attempts` is not given.
    pub default_max_attempts: u8,
    /// Optional engine section; if missing, built-in defaults are used.
    #[serde(default)]
    pub engine: Option<EngineConfig>,
}

impl Default for TcConfig {
    fn default() -> Self {
        Self {
            default_max_attempts: 3,
            engine: None,
        }
    }
}

impl TcConfig {
    pub fn engine(&self) -> EngineConfig {
        self.engine.clone().unwrap_or_default()
    }

    fn validate(&self) -> Result<()> {
        if self.default_max_attempts == 0 {
            bail!("default_max_attempts must be at least 1");
        }
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("transport-core")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<TcConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = TcConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load configuration from an explicit path.
pub fn load_from(path: &Path) -> Result<TcConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config: {}", path.display()))?;
    let cfg: TcConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config: {}", path.display()))?;
    Ok(cfg)
}
