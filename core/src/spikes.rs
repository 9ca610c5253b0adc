use crate::models::{AccelerationAnomaly, AccelerationKind, Sample};

/// Minste akselerasjonsendring (g) mellom to punkter som regnes som spike/drop.
pub const SPIKE_DELTA_G: f64 = 0.15;
/// Endringen må skje raskere enn dette (sek).
pub const SPIKE_MAX_DT_S: f64 = 0.1;

/// Spike-test for paret (i-1, i). Bruker absolutt endring.
pub(crate) fn spike_at(samples: &[Sample], i: usize) -> Option<AccelerationAnomaly> {
    if i == 0 || i >= samples.len() {
        return None;
    }
    let (prev, cur) = (&samples[i - 1], &samples[i]);
    let dt = cur.time - prev.time;
    let delta = (cur.acceleration - prev.acceleration).abs();

    if dt < SPIKE_MAX_DT_S && delta > SPIKE_DELTA_G {
        Some(AccelerationAnomaly {
            kind: AccelerationKind::Spike,
            time: cur.time,
            value: cur.acceleration,
            delta: Some(delta),
            message: format!("Sharp acceleration spike: {:.3}g in {:.3}s", delta, dt),
        })
    } else {
        None
    }
}

/// Drop-test for paret (i-1, i). Positiv delta = akselerasjonen falt.
pub(crate) fn drop_at(samples: &[Sample], i: usize) -> Option<AccelerationAnomaly> {
    if i == 0 || i >= samples.len() {
        return None;
    }
    let (prev, cur) = (&samples[i - 1], &samples[i]);
    let dt = cur.time - prev.time;
    let delta = prev.acceleration - cur.acceleration;

    if dt < SPIKE_MAX_DT_S && delta > SPIKE_DELTA_G {
        Some(AccelerationAnomaly {
            kind: AccelerationKind::Drop,
            time: cur.time,
            value: cur.acceleration,
            delta: Some(delta),
            message: format!("Power drop detected: {:.3}g decrease in {:.3}s", delta, dt),
        })
    } else {
        None
    }
}

/// Spike- og drop-deteksjon over hele serien.
///
/// En brå nedgang som passerer begge tersklene gir *to* anomalier (spike, så drop)
/// for samme overgang. Det er en del av kontrakten; se `dedup_same_event`.
pub fn detect_spikes_and_drops(samples: &[Sample]) -> Vec<AccelerationAnomaly> {
    let mut out = Vec::new();
    for i in 1..samples.len() {
        out.extend(spike_at(samples, i));
        out.extend(drop_at(samples, i));
    }
    out
}

/// Valgfri etterbehandling: slår sammen spike+drop med samme tidspunkt til én drop.
/// Brukes aldri av detektorene selv.
pub fn dedup_same_event(anomalies: &[AccelerationAnomaly]) -> Vec<AccelerationAnomaly> {
    let mut out: Vec<AccelerationAnomaly> = Vec::with_capacity(anomalies.len());
    for a in anomalies {
        if a.kind == AccelerationKind::Drop {
            if let Some(last) = out.last() {
                if last.kind == AccelerationKind::Spike && last.time == a.time {
                    out.pop();
                }
            }
        }
        out.push(a.clone());
    }
    out
}
