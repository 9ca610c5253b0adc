use crate::config::AnalyzerConfig;
use crate::density::density_altitude;
use crate::deviation::deviation_at;
use crate::gps::detect_gps_errors;
use crate::models::{AccelerationAnomaly, RunReport, Sample, WeatherReading};
use crate::payload::RunRecord;
use crate::segments::segment_timings;
use crate::spikes::{drop_at, spike_at};
use crate::types::RunAnalysis;
use crate::window::rolling_window_stats;

/// Én passering over akselerasjonskanalen. Per punkt: spike, drop, avvik –
/// i den rekkefølgen, uten sortering i etterkant.
pub fn analyze_acceleration(samples: &[Sample], cfg: &AnalyzerConfig) -> Vec<AccelerationAnomaly> {
    let windows = rolling_window_stats(samples, cfg.window_secs);
    let mut out = Vec::new();

    for (i, (s, w)) in samples.iter().zip(&windows).enumerate() {
        out.extend(spike_at(samples, i));
        out.extend(drop_at(samples, i));
        out.extend(deviation_at(s, w));
    }

    out
}

/// Kjører alle sjekkene på ferdig dekodet input.
pub fn analyze_samples(
    samples: &[Sample],
    weather: Option<&WeatherReading>,
    model_number: Option<&str>,
    cfg: &AnalyzerConfig,
) -> RunReport {
    let report = RunReport {
        acceleration_anomalies: analyze_acceleration(samples, cfg),
        gps_anomalies: detect_gps_errors(samples, model_number, &cfg.device_capabilities),
        density_altitude: weather.and_then(density_altitude),
    };

    log::debug!(
        "analyzed {} samples: {} acceleration / {} gps anomalies, DA={:?}",
        samples.len(),
        report.acceleration_anomalies.len(),
        report.gps_anomalies.len(),
        report.density_altitude
    );
    report
}

/// Analyserer det dekodepipen fikk til: samples kun når dataInfo er dekodet,
/// density altitude kun når weatherInfo er dekodet.
pub fn analyze_record(record: &RunRecord, cfg: &AnalyzerConfig) -> RunAnalysis {
    let weather = record.weather();
    let report = analyze_samples(record.samples(), weather.as_ref(), record.model_number(), cfg);

    RunAnalysis {
        run_id: record.id.clone(),
        brand: record.brand_name.clone(),
        model: record.models.clone(),
        model_number: record.model_number().map(str::to_string),
        decode: record.decode_summary(),
        report,
        segments: segment_timings(record.details()),
    }
}
