use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::view::CalendarView;

const CONFIG_FILE: &str = "almanac.toml";
const CONFIG_ENV_VAR: &str = "ALMANAC_CONFIG";

fn default_color() -> String {
    "on".to_string()
}

fn default_view_key() -> String {
    "month".to_string()
}

fn default_hour_end() -> u32 {
    23
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlmanacConfig {
    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_view_key")]
    pub default_view: String,

    #[serde(default)]
    pub day_view: DayViewConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DayViewConfig {
    #[serde(default)]
    pub hour_start: u32,

    #[serde(default = "default_hour_end")]
    pub hour_end: u32,
}

impl Default for AlmanacConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
            default_view: default_view_key(),
            day_view: DayViewConfig::default(),
        }
    }
}

impl Default for DayViewConfig {
    fn default() -> Self {
        Self {
            hour_start: 0,
            hour_end: default_hour_end(),
        }
    }
}

impl AlmanacConfig {
    /// Loads configuration. An explicitly passed path must exist and
    /// parse; discovered paths (env var, platform config dir) fall back
    /// to defaults when missing or malformed.
    #[tracing::instrument(skip(override_path))]
    pub fn load(override_path: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = override_path {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let mut config: Self = toml::from_str(&raw)
                .with_context(|| format!("failed to parse {}", path.display()))?;
            config.sanitize();
            info!(file = %path.display(), "loaded config");
            return Ok(config);
        }

        let Some(path) = discovered_config_path() else {
            debug!("no config path discovered; using defaults");
            return Ok(Self::default());
        };

        if !path.exists() {
            debug!(file = %path.display(), "config file not found; using defaults");
            return Ok(Self::default());
        }

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(file = %path.display(), error = %err, "failed reading config; using defaults");
                return Ok(Self::default());
            }
        };

        match toml::from_str::<Self>(&raw) {
            Ok(mut config) => {
                config.sanitize();
                info!(file = %path.display(), "loaded config");
                Ok(config)
            }
            Err(err) => {
                warn!(file = %path.display(), error = %err, "failed parsing config; using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn color_enabled(&self) -> bool {
        matches!(
            self.color.to_ascii_lowercase().as_str(),
            "on" | "yes" | "true" | "1"
        )
    }

    pub fn default_view(&self) -> CalendarView {
        CalendarView::from_key(&self.default_view).unwrap_or(CalendarView::Month)
    }

    fn sanitize(&mut self) {
        if CalendarView::from_key(&self.default_view).is_none() {
            warn!(view = %self.default_view, "unknown default_view; falling back to month");
            self.default_view = default_view_key();
        }

        if self.day_view.hour_start > 23 {
            self.day_view.hour_start = 23;
        }
        if self.day_view.hour_end > 23 {
            self.day_view.hour_end = 23;
        }
        if self.day_view.hour_end < self.day_view.hour_start {
            self.day_view.hour_end = self.day_view.hour_start;
        }
    }
}

fn discovered_config_path() -> Option<PathBuf> {
    if let Ok(raw) = std::env::var(CONFIG_ENV_VAR) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }

    dirs::config_dir().map(|dir| dir.join("almanac").join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::CalendarView;

    #[test]
    fn defaults_are_sane() {
        let config = AlmanacConfig::default();
        assert!(config.color_enabled());
        assert_eq!(config.default_view(), CalendarView::Month);
        assert_eq!(config.day_view.hour_start, 0);
        assert_eq!(config.day_view.hour_end, 23);
    }

    #[test]
    fn sanitize_repairs_bad_values() {
        let mut config = AlmanacConfig {
            color: "off".to_string(),
            default_view: "quarter".to_string(),
            day_view: DayViewConfig {
                hour_start: 30,
                hour_end: 5,
            },
        };
        config.sanitize();

        assert!(!config.color_enabled());
        assert_eq!(config.default_view(), CalendarView::Month);
        assert_eq!(config.day_view.hour_start, 23);
        assert_eq!(config.day_view.hour_end, 23);
    }

    #[test]
    fn parses_partial_toml() {
        let mut config: AlmanacConfig =
            toml::from_str("default_view = \"week\"\n[day_view]\nhour_start = 8\n")
                .expect("parse config");
        config.sanitize();

        assert_eq!(config.default_view(), CalendarView::Week);
        assert_eq!(config.day_view.hour_start, 8);
        assert_eq!(config.day_view.hour_end, 23);
    }
}
