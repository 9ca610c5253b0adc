use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Segmenttider fra 100 km/t og oppover er de som rapporteres.
pub const SEGMENT_FROM_KMH: u32 = 100;

/// Én segmenttid, f.eks. `100-200` km/t på 6.512 s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentTiming {
    pub name: String,
    pub from_kmh: u32,
    pub to_kmh: u32,
    pub time: Option<f64>,
}

impl SegmentTiming {
    /// Tolker en detail-post på formen `{"name": "100-200", "time": 6.512, ...}`.
    /// Poster uten gyldig `fra-til`-navn gir `None`.
    pub fn from_detail(detail: &Value) -> Option<Self> {
        let name = detail.get("name")?.as_str()?;
        let (from, to) = name.split_once('-')?;
        let from_kmh = leading_kmh(from)?;
        let to_kmh = leading_kmh(to)?;
        Some(SegmentTiming {
            name: name.to_string(),
            from_kmh,
            to_kmh,
            time: detail.get("time").and_then(Value::as_f64),
        })
    }
}

/// Sifrene i starten av en fartsangivelse: `"200km"` -> 200, `"km"` -> `None`.
fn leading_kmh(text: &str) -> Option<u32> {
    let text = text.trim_start();
    let end = text.find(|c: char| !c.is_ascii_digit()).unwrap_or(text.len());
    text[..end].parse().ok()
}

/// Segmenter som starter på 100 km/t, sortert etter sluttfart.
pub fn segment_timings(details: &[Value]) -> Vec<SegmentTiming> {
    let mut out: Vec<SegmentTiming> = details
        .iter()
        .filter_map(SegmentTiming::from_detail)
        .filter(|s| s.from_kmh == SEGMENT_FROM_KMH)
        .collect();
    out.sort_by_key(|s| s.to_kmh);
    out
}
