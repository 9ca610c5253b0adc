use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::gps::DeviceCapabilities;
use crate::window::DEFAULT_WINDOW_SECS;

/// Innstillinger for analysen. Terskler for spike/drop/avvik er faste
/// konstanter; kun vindusbredde og enhetstabell kan settes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzerConfig {
    #[serde(default = "default_window_secs")]
    pub window_secs: f64,
    #[serde(default)]
    pub device_capabilities: DeviceCapabilities,
}

fn default_window_secs() -> f64 {
    DEFAULT_WINDOW_SECS
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            window_secs: DEFAULT_WINDOW_SECS,
            device_capabilities: DeviceCapabilities::default(),
        }
    }
}

/// Leser inn konfig fra disk (JSON).
/// Hvis filen ikke finnes, returneres default-konfig.
pub fn load_config(path: impl AsRef<Path>) -> Result<AnalyzerConfig> {
    let path = path.as_ref();
    if path.exists() {
        let contents = std::fs::read_to_string(path)?;
        let cfg: AnalyzerConfig = serde_json::from_str(&contents)?;
        log::info!(
            "config loaded from {} (window={}s, devices={})",
            path.display(),
            cfg.window_secs,
            cfg.device_capabilities.len()
        );
        Ok(cfg)
    } else {
        log::info!("no config at {}, using defaults", path.display());
        Ok(AnalyzerConfig::default())
    }
}

/// Lagrer konfig til disk som JSON (pretty-print).
pub fn save_config(cfg: &AnalyzerConfig, path: impl AsRef<Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(cfg)?;
    std::fs::write(path.as_ref(), json)?;
    log::info!("config saved to {}", path.as_ref().display());
    Ok(())
}
