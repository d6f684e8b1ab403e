pub mod theme;

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::chart::ChartKind;
use feed::Timeframe;
use theme::ThemeChoice;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Persisted user state. Unknown or missing fields fall back to defaults so
/// old config files keep loading across releases.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub symbol: String,
    pub timeframe: Timeframe,
    pub chart_kind: ChartKind,
    pub expert_mode: bool,
    pub theme: ThemeChoice,
    /// `None` disables the periodic refresh task.
    pub refresh_secs: Option<u64>,
    /// Fixed RNG seed for the synthetic feed; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            symbol: "AAPL".to_string(),
            timeframe: Timeframe::Month1,
            chart_kind: ChartKind::default(),
            expert_mode: false,
            theme: ThemeChoice::default(),
            refresh_secs: Some(30),
            seed: None,
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs_next::config_dir().map(|dir| dir.join("tickerscape").join("config.json"))
}

impl Config {
    /// Read the saved config, falling back to defaults when it is missing or
    /// unreadable. A malformed file is reported, not fatal.
    pub fn load_or_default() -> Self {
        let Some(path) = config_path() else {
            return Self::default();
        };
        match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(config) => config,
                Err(err) => {
                    log::error!("Failed to parse {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let Some(path) = config_path() else {
            log::warn!("No config directory on this platform; not saving");
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = Config::default();
        assert_eq!(config.symbol, "AAPL");
        assert_eq!(config.timeframe, Timeframe::Month1);
        assert_eq!(config.chart_kind, ChartKind::Area);
        assert!(!config.expert_mode);
    }

    #[test]
    fn partial_config_files_still_load() {
        let config: Config =
            serde_json::from_str(r#"{"symbol":"NVDA","chart_kind":"candlestick"}"#).unwrap();
        assert_eq!(config.symbol, "NVDA");
        assert_eq!(config.chart_kind, ChartKind::Candlestick);
        assert_eq!(config.timeframe, Timeframe::Month1);
        assert_eq!(config.refresh_secs, Some(30));
    }

    #[test]
    fn saved_form_roundtrips() {
        let config = Config {
            symbol: "ASPI".to_string(),
            timeframe: Timeframe::Year1,
            chart_kind: ChartKind::Line,
            expert_mode: true,
            theme: ThemeChoice::Light,
            refresh_secs: None,
            seed: Some(7),
        };
        let raw = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<Config>(&raw).unwrap(), config);
    }
}
