//! Dragy core: anomali-analyse av akselerasjons- og GPS-telemetri fra en
//! ferdig innspilt kjøring, pluss density altitude fra værdata.
//!
//! Motoren (`window`, `spikes`, `deviation`, `gps`, `density`, `analyzer`) er
//! rene funksjoner uten I/O. Henting (`client`), dekoding (`payload`),
//! URL-oppslag (`url`) og segmenttider (`segments`) ligger rundt den.

pub mod analyzer;
pub mod client;
pub mod config;
pub mod density;
pub mod deviation;
pub mod error;
pub mod gps;
pub mod metrics;
pub mod models;
pub mod payload;
pub mod segments;
pub mod spikes;
pub mod types;
pub mod url;
pub mod window;

#[cfg(feature = "python")]
mod py;

pub use analyzer::{analyze_acceleration, analyze_record, analyze_samples};
pub use config::{load_config, save_config, AnalyzerConfig};
pub use density::density_altitude;
pub use deviation::detect_deviations;
pub use error::{DragyError, Result};
pub use gps::{detect_gps_errors, DeviceCapabilities};
pub use models::{
    AccelerationAnomaly, AccelerationKind, GpsAnomaly, GpsKind, RunReport, Sample, WeatherReading,
};
pub use payload::{decode_envelope, RunRecord, Stage, StageStatus};
pub use spikes::{dedup_same_event, detect_spikes_and_drops};
pub use types::RunAnalysis;
pub use url::{extract_run_id, parse_run_url};
pub use window::{rolling_window_stats, window_stats, WindowStats};

/// Dekoder et rått API-svar og returnerer analysen som JSON-streng.
pub fn analyze_run_json(payload: &str, cfg: &AnalyzerConfig) -> Result<String> {
    let record = decode_envelope(payload)?;
    let analysis = analyze_record(&record, cfg);
    Ok(serde_json::to_string(&analysis)?)
}
