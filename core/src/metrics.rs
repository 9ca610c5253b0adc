use prometheus::core::Collector;
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

use crate::models::RunReport;

/// Prometheus-tellere for analyserte kjøringer og anomalier per type.
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    runs_analyzed: IntCounter,
    anomalies: IntCounterVec,
}

impl Metrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();
        let runs_analyzed =
            IntCounter::new("dragy_runs_analyzed_total", "Number of analyzed runs")?;
        let anomalies = IntCounterVec::new(
            Opts::new("dragy_anomalies_total", "Anomalies emitted per kind"),
            &["kind"],
        )?;
        registry.register(Box::new(runs_analyzed.clone()))?;
        registry.register(Box::new(anomalies.clone()))?;
        Ok(Self { registry, runs_analyzed, anomalies })
    }

    pub fn observe(&self, report: &RunReport) {
        self.runs_analyzed.inc();
        for a in &report.acceleration_anomalies {
            self.anomalies.with_label_values(&[a.kind.as_str()]).inc();
        }
        for g in &report.gps_anomalies {
            self.anomalies.with_label_values(&[g.kind.as_str()]).inc();
        }
    }

    pub fn runs_analyzed(&self) -> u64 {
        self.runs_analyzed.get()
    }

    /// Leser uten å opprette serien; en type som aldri er observert gir 0.
    pub fn anomalies(&self, kind: &str) -> u64 {
        self.anomalies
            .collect()
            .iter()
            .flat_map(|mf| mf.get_metric())
            .filter(|m| {
                m.get_label()
                    .iter()
                    .any(|l| l.get_name() == "kind" && l.get_value() == kind)
            })
            .map(|m| m.get_counter().get_value() as u64)
            .sum()
    }

    /// Tekstformat for scraping / CLI-utskrift.
    pub fn render(&self) -> String {
        let mut buf = Vec::new();
        let encoder = TextEncoder::new();
        if let Err(e) = encoder.encode(&self.registry.gather(), &mut buf) {
            log::warn!("metrics encode failed: {e}");
            return String::new();
        }
        String::from_utf8_lossy(&buf).into_owned()
    }
}
