use std::path::PathBuf;
use std::time::Duration;

use cinematch_core::Config;
use cinematch_core::config_file::{self, ConfigFile, DisplayConfig};

pub const DEFAULT_THEME: &str = "hacker";
pub const DEFAULT_FPS: u32 = 10;

/// Values taken from the command line; `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub backend_url: Option<String>,
    pub proxy_url: Option<String>,
    pub config_path: Option<PathBuf>,
    pub theme: Option<String>,
    pub timeout_secs: Option<u64>,
    pub recommendations: Option<usize>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub config: Config,
    pub theme: String,
    pub fps: u32,
}

impl Settings {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.fps.max(1)))
    }

    pub fn display(&self) -> DisplayConfig {
        DisplayConfig {
            theme: Some(self.theme.clone()),
            fps: Some(self.fps),
        }
    }
}

/// Read the config file named on the command line, or the usual cascade.
pub fn load_file(overrides: &Overrides) -> ConfigFile {
    match &overrides.config_path {
        Some(path) => config_file::load_from_path(path).unwrap_or_default(),
        None => config_file::load_config(),
    }
}

/// Resolve settings from CLI flags > env vars > config file > defaults.
/// `env` looks up an environment variable.
pub fn resolve(
    overrides: Overrides,
    file_cfg: &ConfigFile,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut config = Config::default();
    config_file::apply_to_config(file_cfg, &mut config);

    if let Some(url) = overrides
        .backend_url
        .or_else(|| env("CINEMATCH_BACKEND_URL"))
    {
        config.backend_url = url;
    }
    if let Some(url) = overrides.proxy_url.or_else(|| env("CINEMATCH_PROXY_URL")) {
        config.proxy_url = url;
    }
    if let Some(secs) = overrides
        .timeout_secs
        .or_else(|| env("CINEMATCH_TIMEOUT").and_then(|v| v.parse().ok()))
    {
        config.timeout = (secs > 0).then(|| Duration::from_secs(secs));
    }
    if let Some(n) = overrides.recommendations {
        config.recommendation_count = Some(n);
    }

    let display = file_cfg.display.clone().unwrap_or_default();
    let theme = overrides
        .theme
        .or(display.theme)
        .unwrap_or_else(|| DEFAULT_THEME.to_string());
    let fps = display.fps.filter(|&f| f > 0).unwrap_or(DEFAULT_FPS);

    Settings { config, theme, fps }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use cinematch_core::config_file::{EndpointsConfig, RequestsConfig};
    use cinematch_core::{DEFAULT_BACKEND_URL, DEFAULT_PROXY_URL};

    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn file_with_backend(url: &str) -> ConfigFile {
        ConfigFile {
            endpoints: Some(EndpointsConfig {
                backend_url: Some(url.to_string()),
                proxy_url: None,
            }),
            ..ConfigFile::default()
        }
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let settings = resolve(Overrides::default(), &ConfigFile::default(), no_env);
        assert_eq!(settings.config.backend_url, DEFAULT_BACKEND_URL);
        assert_eq!(settings.config.proxy_url, DEFAULT_PROXY_URL);
        assert_eq!(settings.config.timeout, None);
        assert_eq!(settings.theme, "hacker");
        assert_eq!(settings.fps, DEFAULT_FPS);
        assert_eq!(settings.tick_rate(), Duration::from_millis(100));
    }

    #[test]
    fn env_beats_file_and_flag_beats_env() {
        let env: HashMap<&str, &str> = [("CINEMATCH_BACKEND_URL", "http://env")].into();
        let lookup = |k: &str| env.get(k).map(|v| v.to_string());
        let file_cfg = file_with_backend("http://file");

        let from_env = resolve(Overrides::default(), &file_cfg, lookup);
        assert_eq!(from_env.config.backend_url, "http://env");

        let from_flag = resolve(
            Overrides {
                backend_url: Some("http://flag".into()),
                ..Overrides::default()
            },
            &file_cfg,
            lookup,
        );
        assert_eq!(from_flag.config.backend_url, "http://flag");
    }

    #[test]
    fn file_values_apply_when_no_override() {
        let file_cfg = ConfigFile {
            requests: Some(RequestsConfig {
                timeout_secs: Some(4),
                recommendation_count: Some(8),
            }),
            display: Some(DisplayConfig {
                theme: Some("modern".into()),
                fps: Some(20),
            }),
            ..file_with_backend("http://file")
        };

        let settings = resolve(Overrides::default(), &file_cfg, no_env);

        assert_eq!(settings.config.backend_url, "http://file");
        assert_eq!(settings.config.timeout, Some(Duration::from_secs(4)));
        assert_eq!(settings.config.recommendation_count, Some(8));
        assert_eq!(settings.theme, "modern");
        assert_eq!(settings.tick_rate(), Duration::from_millis(50));
    }

    #[test]
    fn zero_timeout_flag_disables_file_timeout() {
        let file_cfg = ConfigFile {
            requests: Some(RequestsConfig {
                timeout_secs: Some(4),
                recommendation_count: None,
            }),
            ..ConfigFile::default()
        };
        let settings = resolve(
            Overrides {
                timeout_secs: Some(0),
                ..Overrides::default()
            },
            &file_cfg,
            no_env,
        );
        assert_eq!(settings.config.timeout, None);
    }

    #[test]
    fn unparseable_env_timeout_is_ignored() {
        let settings = resolve(Overrides::default(), &ConfigFile::default(), |k| {
            (k == "CINEMATCH_TIMEOUT").then(|| "soon".to_string())
        });
        assert_eq!(settings.config.timeout, None);
    }
}
