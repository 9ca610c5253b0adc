use crate::models::{AccelerationAnomaly, AccelerationKind, Sample};
use crate::window::{rolling_window_stats, WindowStats};

/// Antall standardavvik fra vindussnittet før et punkt regnes som avvik.
pub const DEVIATION_SIGMA: f64 = 3.0;
/// Nesten-konstante vinduer (flyttallsstøy) skal ikke trigge.
pub const MIN_STD_DEV_G: f64 = 0.01;

/// Avvikstest for ett punkt mot sitt eget vindu.
pub(crate) fn deviation_at(sample: &Sample, stats: &WindowStats) -> Option<AccelerationAnomaly> {
    if !stats.is_valid() || stats.std_dev <= MIN_STD_DEV_G {
        return None;
    }
    let deviation = (sample.acceleration - stats.mean).abs();
    if deviation > DEVIATION_SIGMA * stats.std_dev {
        Some(AccelerationAnomaly {
            kind: AccelerationKind::Deviation,
            time: sample.time,
            value: sample.acceleration,
            delta: None,
            message: format!(
                "Unusual acceleration: {:.3}g from mean ({:.3}g)",
                deviation, stats.mean
            ),
        })
    } else {
        None
    }
}

/// Statistiske avvik (> 3σ) mot et bakovervindu på `window_secs` sekunder.
pub fn detect_deviations(samples: &[Sample], window_secs: f64) -> Vec<AccelerationAnomaly> {
    rolling_window_stats(samples, window_secs)
        .iter()
        .zip(samples)
        .filter_map(|(w, s)| deviation_at(s, w))
        .collect()
}
