use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::models::{GpsAnomaly, GpsKind, Sample};

/// Under dette antallet satellitter flagges punktet.
pub const MIN_SATELLITES: u32 = 10;
/// fixType-koden for RTK-klasse fix.
pub const RTK_FIX_TYPE: i32 = 3;

static DEFAULT_CAPABILITIES: Lazy<HashMap<String, bool>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("DRG70".to_string(), true);
    m
});

/// Oppslagstabell modellnummer -> "støtter RTK-klasse fix".
/// Ukjente modeller regnes som uten RTK.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceCapabilities {
    rtk_by_model: HashMap<String, bool>,
}

impl Default for DeviceCapabilities {
    fn default() -> Self {
        Self { rtk_by_model: DEFAULT_CAPABILITIES.clone() }
    }
}

impl DeviceCapabilities {
    /// Tom tabell: ingen modell får nonRTK-sjekk.
    pub fn empty() -> Self {
        Self { rtk_by_model: HashMap::new() }
    }

    pub fn with_model(mut self, model: impl Into<String>, supports_rtk: bool) -> Self {
        self.rtk_by_model.insert(model.into(), supports_rtk);
        self
    }

    pub fn supports_rtk(&self, model: Option<&str>) -> bool {
        model
            .and_then(|m| self.rtk_by_model.get(m))
            .copied()
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.rtk_by_model.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rtk_by_model.is_empty()
    }
}

/// Fix-kvalitet per punkt: lavt satellittall, og manglende RTK-fix
/// for enheter som skal klare det.
pub fn detect_gps_errors(
    samples: &[Sample],
    model_number: Option<&str>,
    capabilities: &DeviceCapabilities,
) -> Vec<GpsAnomaly> {
    let rtk_expected = capabilities.supports_rtk(model_number);
    let mut out = Vec::new();

    for s in samples {
        if s.satellite_count < MIN_SATELLITES {
            out.push(GpsAnomaly {
                kind: GpsKind::LowSatellites,
                time: s.time,
                value: s.satellite_count as f64,
                message: format!("Low satellite count: {}", s.satellite_count),
            });
        }

        if rtk_expected && s.fix_type != RTK_FIX_TYPE {
            out.push(GpsAnomaly {
                kind: GpsKind::NonRtk,
                time: s.time,
                value: s.fix_type as f64,
                message: format!(
                    "Non-RTK GPS fix: {} (RTK-fix recommended for precision)",
                    s.fix_type
                ),
            });
        }
    }

    out
}
