use crate::models::Sample;

/// Standard vindusbredde (sek) for rullerende akselerasjonsstatistikk.
pub const DEFAULT_WINDOW_SECS: f64 = 0.5;
/// Vinduer med så mange punkter eller færre er statistisk for tynne.
pub const MIN_WINDOW_POINTS: usize = 3;

/// Snitt og populasjons-standardavvik av akselerasjon i ett bakovervindu.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WindowStats {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
}

impl WindowStats {
    fn from_values<I>(values: I) -> Self
    where
        I: Iterator<Item = f64> + Clone,
    {
        let mut count = 0usize;
        let mut sum = 0.0;
        for v in values.clone() {
            sum += v;
            count += 1;
        }
        if count == 0 {
            return WindowStats::default();
        }
        let mean = sum / count as f64;
        // Populasjonsvarians (nevner = antall, ikke antall-1)
        let var = values.map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;
        WindowStats { count, mean, std_dev: var.sqrt() }
    }

    /// Kun vinduer med mer enn 3 punkter kan brukes til avviksvurdering.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.count > MIN_WINDOW_POINTS
    }
}

/// Sjekker at tidsserien er ikke-synkende (krav for binærsøk-varianten).
pub fn is_time_ordered(samples: &[Sample]) -> bool {
    samples.windows(2).all(|w| w[0].time <= w[1].time)
}

/// Vindusstatistikk for indeks `i`: alle punkter med tid i
/// `[t_i - width_secs, t_i]` (inklusivt), også senere punkter med samme tid.
pub fn window_stats(samples: &[Sample], i: usize, width_secs: f64) -> WindowStats {
    let Some(current) = samples.get(i) else {
        return WindowStats::default();
    };
    let t = current.time;
    let start = t - width_secs;
    let in_window = move |s: &&Sample| s.time >= start && s.time <= t;
    WindowStats::from_values(samples.iter().filter(in_window).map(|s| s.acceleration))
}

/// Samme som `window_stats` for hver indeks. På tidsordnet input finnes
/// vindusgrensene med binærsøk; ellers lineær filtrering med identisk resultat.
pub fn rolling_window_stats(samples: &[Sample], width_secs: f64) -> Vec<WindowStats> {
    if !is_time_ordered(samples) {
        log::debug!("rolling_window_stats: tidsserien er ikke ordnet, bruker lineært filter");
        return (0..samples.len())
            .map(|i| window_stats(samples, i, width_secs))
            .collect();
    }

    let mut out = Vec::with_capacity(samples.len());
    for s in samples {
        let t = s.time;
        let start = t - width_secs;
        let lo = samples.partition_point(|p| p.time < start);
        let hi = samples.partition_point(|p| p.time <= t);
        let slice = &samples[lo..hi.max(lo)];
        out.push(WindowStats::from_values(slice.iter().map(|p| p.acceleration)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(time: f64, acceleration: f64) -> Sample {
        Sample { time, acceleration, satellite_count: 12, fix_type: 3, ..Default::default() }
    }

    #[test]
    fn population_std_dev() {
        let samples = vec![s(0.0, 1.0), s(0.1, 2.0), s(0.2, 3.0), s(0.3, 4.0)];
        let w = window_stats(&samples, 3, 0.5);
        assert_eq!(w.count, 4);
        assert!((w.mean - 2.5).abs() < 1e-12);
        // sqrt(1.25) – populasjon, ikke utvalg
        assert!((w.std_dev - 1.25f64.sqrt()).abs() < 1e-12);
        assert!(w.is_valid());
    }

    #[test]
    fn window_is_trailing_and_inclusive() {
        let samples = vec![s(0.0, 0.0), s(0.5, 1.0), s(0.6, 2.0), s(1.2, 3.0)];
        assert_eq!(window_stats(&samples, 1, 0.5).count, 2); // 0.0 og 0.5
        assert_eq!(window_stats(&samples, 2, 0.5).count, 2); // 0.5 og 0.6
        assert_eq!(window_stats(&samples, 3, 0.5).count, 1);
    }

    #[test]
    fn equal_timestamps_ahead_are_included() {
        let samples = vec![s(0.0, 0.0), s(0.1, 1.0), s(0.1, 5.0)];
        let w = window_stats(&samples, 1, 0.5);
        assert_eq!(w.count, 3);
        assert_eq!(rolling_window_stats(&samples, 0.5)[1], w);
    }

    #[test]
    fn rolling_matches_per_index_for_ordered_and_unordered() {
        let ordered: Vec<Sample> = (0..40)
            .map(|i| s(i as f64 * 0.05, ((i * 7) % 5) as f64 * 0.1))
            .collect();
        let fast = rolling_window_stats(&ordered, 0.5);
        for (i, w) in fast.iter().enumerate() {
            let slow = window_stats(&ordered, i, 0.5);
            assert_eq!(w.count, slow.count, "count @ {i}");
            assert!((w.mean - slow.mean).abs() < 1e-12);
            assert!((w.std_dev - slow.std_dev).abs() < 1e-12);
        }

        let mut shuffled = ordered.clone();
        shuffled.swap(3, 17);
        assert!(!is_time_ordered(&shuffled));
        let lin = rolling_window_stats(&shuffled, 0.5);
        assert_eq!(lin[3], window_stats(&shuffled, 3, 0.5));
    }

    #[test]
    fn three_points_is_not_valid() {
        let samples = vec![s(0.0, 0.0), s(0.1, 0.0), s(0.2, 9.0)];
        assert!(!window_stats(&samples, 2, 0.5).is_valid());
    }

    #[test]
    fn empty_and_out_of_range() {
        assert!(rolling_window_stats(&[], 0.5).is_empty());
        assert_eq!(window_stats(&[], 0, 0.5), WindowStats::default());
    }
}
