use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::sanitize::SanitizePolicy;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: Logging,
    pub sanitize: SanitizePolicy,
    pub paths: PathsCfg,
    pub navigation: Navigation,
}

impl Config {
    pub fn load(path_opt: Option<&Path>) -> Result<Self> {
        let default_path = Path::new("config.toml");
        let path = if let Some(p) = path_opt {
            Some(p)
        } else if default_path.exists() {
            Some(default_path)
        } else {
            None
        };

        let mut cfg = Config::default();

        if let Some(path) = path {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed reading config file: {}", path.display()))?;
            cfg = Self::from_toml(&raw)
                .with_context(|| format!("failed parsing TOML config: {}", path.display()))?;
        }

        Ok(cfg)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn to_toml_pretty(&self) -> Result<String> {
        let s = toml::to_string_pretty(self).context("failed serializing config as TOML")?;
        Ok(s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Logging {
    pub level: String,
    pub format: String,
    pub debug_cue_samples: usize,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            debug_cue_samples: 20,
        }
    }
}

/// File name suffixes appended to the media stem.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsCfg {
    pub subtitle_suffix: String,
    pub record_suffix: String,
    pub report_suffix: String,
}

impl Default for PathsCfg {
    fn default() -> Self {
        Self {
            subtitle_suffix: "_eng.srt".to_string(),
            record_suffix: "_tags.json".to_string(),
            report_suffix: "_custom.srt".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Navigation {
    /// Cues skipped by a page step.
    pub page_step: i64,
}

impl Default for Navigation {
    fn default() -> Self {
        Self { page_step: 10 }
    }
}

pub fn init_tracing(logging: &Logging, cli_override_level: Option<&str>) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt};

    let level = cli_override_level.unwrap_or(logging.level.as_str());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let is_json = logging.format.to_lowercase() == "json";

    // Logs go to stderr so rendered output on stdout stays clean.
    if is_json {
        fmt()
            .with_env_filter(filter)
            .event_format(fmt::format().json())
            .with_writer(std::io::stderr)
            .with_target(true)
            .init();
    } else {
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .pretty()
            .init();
    }

    tracing::info!(
        level = level,
        format = logging.format.as_str(),
        "logging initialized"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sanitize::DropScope;

    #[test]
    fn default_config_survives_toml() {
        let raw = Config::default().to_toml_pretty().unwrap();
        let back = Config::from_toml(&raw).unwrap();
        assert_eq!(back.sanitize, SanitizePolicy::default());
        assert_eq!(back.navigation.page_step, 10);
        assert_eq!(back.paths.record_suffix, "_tags.json");
    }

    #[test]
    fn partial_config_fills_defaults() {
        let cfg =
            Config::from_toml("[sanitize]\ndashed = \"line\"\nnon_verbal = \"cue\"\n").unwrap();
        assert_eq!(cfg.sanitize.dashed, DropScope::Line);
        assert_eq!(cfg.sanitize.non_verbal, DropScope::Cue);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn unknown_scope_is_rejected() {
        assert!(Config::from_toml("[sanitize]\ndashed = \"word\"\n").is_err());
    }
}
