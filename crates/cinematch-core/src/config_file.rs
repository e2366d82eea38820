use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::Config;

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub endpoints: Option<EndpointsConfig>,
    pub requests: Option<RequestsConfig>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EndpointsConfig {
    pub backend_url: Option<String>,
    pub proxy_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestsConfig {
    pub timeout_secs: Option<u64>,
    pub recommendation_count: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub theme: Option<String>,
    pub fps: Option<u32>,
}

/// Platform config directory path: `<config_dir>/cinematch/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("cinematch").join("config.toml"))
}

/// Load config by cascading CWD `.cinematch.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".cinematch.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparseable config");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let base_ep = base.endpoints.unwrap_or_default();
    let over_ep = overlay.endpoints.unwrap_or_default();
    let base_rq = base.requests.unwrap_or_default();
    let over_rq = overlay.requests.unwrap_or_default();
    let base_ds = base.display.unwrap_or_default();
    let over_ds = overlay.display.unwrap_or_default();

    ConfigFile {
        endpoints: Some(EndpointsConfig {
            backend_url: over_ep.backend_url.or(base_ep.backend_url),
            proxy_url: over_ep.proxy_url.or(base_ep.proxy_url),
        }),
        requests: Some(RequestsConfig {
            timeout_secs: over_rq.timeout_secs.or(base_rq.timeout_secs),
            recommendation_count: over_rq
                .recommendation_count
                .or(base_rq.recommendation_count),
        }),
        display: Some(DisplayConfig {
            theme: over_ds.theme.or(base_ds.theme),
            fps: over_ds.fps.or(base_ds.fps),
        }),
    }
}

/// Save the config to the platform config directory.
pub fn save_config(config: &ConfigFile) -> Result<PathBuf, String> {
    let path = config_path().ok_or_else(|| "Could not determine config directory".to_string())?;
    save_to_path(config, &path)?;
    Ok(path)
}

/// Save the config to `path`, creating parent directories.
pub fn save_to_path(config: &ConfigFile, path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create config directory: {}", e))?;
    }
    let content =
        toml::to_string_pretty(config).map_err(|e| format!("Failed to serialize config: {}", e))?;
    std::fs::write(path, content).map_err(|e| format!("Failed to write config: {}", e))?;
    Ok(())
}

/// Fill `config` from the file. Only sets values that are `Some` (and
/// non-empty for URLs) in the file, so defaults survive partial files.
pub fn apply_to_config(file_cfg: &ConfigFile, config: &mut Config) {
    if let Some(ep) = &file_cfg.endpoints {
        if let Some(url) = ep.backend_url.as_ref().filter(|u| !u.is_empty()) {
            config.backend_url = url.clone();
        }
        if let Some(url) = ep.proxy_url.as_ref().filter(|u| !u.is_empty()) {
            config.proxy_url = url.clone();
        }
    }
    if let Some(rq) = &file_cfg.requests {
        if let Some(secs) = rq.timeout_secs {
            config.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }
        if let Some(n) = rq.recommendation_count {
            config.recommendation_count = Some(n);
        }
    }
}

/// Snapshot of a resolved config plus display settings, for `save_config`.
pub fn from_config(config: &Config, display: DisplayConfig) -> ConfigFile {
    ConfigFile {
        endpoints: Some(EndpointsConfig {
            backend_url: Some(config.backend_url.clone()),
            proxy_url: Some(config.proxy_url.clone()),
        }),
        requests: Some(RequestsConfig {
            timeout_secs: config.timeout.map(|t| t.as_secs()),
            recommendation_count: config.recommendation_count,
        }),
        display: Some(display),
    }
}
