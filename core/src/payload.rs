// Dekoding av rå kjøringsdata fra Dragy-API-et.
//
// Konvolutten {data: {carResults: {...}}} må kunne leses; ellers feiler hele
// hentingen. Inne i carResults kan graphData, dataInfo og weatherInfo være
// objekter eller JSON-strenger (noen ganger dobbelt-enkodet). Hvert felt dekodes
// for seg og faller tilbake til råverdien ved feil.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value};
use serde_path_to_error as spte;

use crate::error::{DragyError, Result};
use crate::models::{Sample, WeatherReading};

/// Maks antall streng-lag som pakkes ut per felt.
pub const MAX_STRING_LAYERS: usize = 2;

// ──────────────────────────────────────────────────────────────────────────────
// STAGE: typet resultat per dekodesteg
// ──────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Stage<T> {
    Decoded(T),
    /// Feltet fantes men kunne ikke dekodes; opprinnelig verdi beholdes.
    Raw(Value),
    Missing,
}

impl<T> Stage<T> {
    pub fn decoded(&self) -> Option<&T> {
        match self {
            Stage::Decoded(t) => Some(t),
            _ => None,
        }
    }

    pub fn status(&self) -> StageStatus {
        match self {
            Stage::Decoded(_) => StageStatus::Decoded,
            Stage::Raw(_) => StageStatus::Raw,
            Stage::Missing => StageStatus::Missing,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    Decoded,
    Raw,
    Missing,
}

/// Per-felt status, slik at nedstrøms kan se hva som faktisk er analyserbart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodeSummary {
    pub graph_data: StageStatus,
    pub data_info: StageStatus,
    pub weather_info: StageStatus,
}

// ──────────────────────────────────────────────────────────────────────────────
// TYPER
// ──────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct DataInfo {
    #[serde(default, rename = "dataArr")]
    pub data_arr: Vec<Sample>,
    /// Segmentdetaljer; tolkes videre i `segments`.
    #[serde(default)]
    pub detail: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct WeatherInfo {
    #[serde(default)]
    pub main: Option<WeatherReading>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphData {
    pub data_info: Stage<DataInfo>,
    pub weather_info: Stage<WeatherInfo>,
    pub da_value: Option<f64>,
    pub g_max: Option<f64>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub model_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunRecord {
    pub id: Option<String>,
    pub brand_name: Option<String>,
    pub models: Option<String>,
    pub graph_data: Stage<GraphData>,
}

impl RunRecord {
    fn data_info(&self) -> Option<&DataInfo> {
        self.graph_data.decoded().and_then(|g| g.data_info.decoded())
    }

    /// Tom slice når dataInfo ikke ble dekodet.
    pub fn samples(&self) -> &[Sample] {
        self.data_info().map(|d| d.data_arr.as_slice()).unwrap_or(&[])
    }

    pub fn details(&self) -> &[Value] {
        self.data_info().map(|d| d.detail.as_slice()).unwrap_or(&[])
    }

    pub fn weather(&self) -> Option<WeatherReading> {
        self.graph_data
            .decoded()
            .and_then(|g| g.weather_info.decoded())
            .and_then(|w| w.main)
    }

    pub fn model_number(&self) -> Option<&str> {
        self.graph_data.decoded().and_then(|g| g.model_number.as_deref())
    }

    pub fn decode_summary(&self) -> DecodeSummary {
        match self.graph_data.decoded() {
            Some(g) => DecodeSummary {
                graph_data: StageStatus::Decoded,
                data_info: g.data_info.status(),
                weather_info: g.weather_info.status(),
            },
            None => DecodeSummary {
                graph_data: self.graph_data.status(),
                data_info: StageStatus::Missing,
                weather_info: StageStatus::Missing,
            },
        }
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// KONVOLUTT
// ──────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct Envelope {
    data: EnvelopeData,
}

#[derive(Debug, Deserialize)]
struct EnvelopeData {
    #[serde(rename = "carResults")]
    car_results: JsonMap<String, Value>,
}

/// Leser hele API-svaret. Kun konvolutten er fatal; indre felt isoleres.
pub fn decode_envelope(text: &str) -> Result<RunRecord> {
    let mut de = serde_json::Deserializer::from_str(text);
    let env: Envelope = spte::deserialize(&mut de).map_err(|e| DragyError::Envelope {
        path: e.path().to_string(),
        message: e.inner().to_string(),
    })?;
    Ok(decode_car_results(env.data.car_results))
}

/// Dekoder et carResults-objekt (uten konvolutt).
pub fn decode_car_results(mut car: JsonMap<String, Value>) -> RunRecord {
    let graph_data = match car.remove("graphData") {
        None | Some(Value::Null) => Stage::Missing,
        Some(raw) => decode_graph_data(raw),
    };

    RunRecord {
        id: car.get("id").and_then(scalar_string),
        brand_name: car.get("brand_name").and_then(scalar_string),
        models: car.get("models").and_then(scalar_string),
        graph_data,
    }
}

fn decode_graph_data(raw: Value) -> Stage<GraphData> {
    let unwrapped = match unwrap_string_layers("graphData", &raw) {
        Some(v) => v,
        None => return Stage::Raw(raw),
    };
    let Value::Object(mut map) = unwrapped else {
        log::warn!("graphData is not an object, keeping raw value");
        return Stage::Raw(raw);
    };

    let data_info = decode_field::<DataInfo>("dataInfo", map.remove("dataInfo"));
    let weather_info = decode_field::<WeatherInfo>("weatherInfo", map.remove("weatherInfo"));

    Stage::Decoded(GraphData {
        data_info,
        weather_info,
        da_value: map.get("daValue").and_then(Value::as_f64),
        g_max: map.get("gMax").and_then(Value::as_f64),
        brand: map.get("brand").and_then(scalar_string),
        model: map.get("model").and_then(scalar_string),
        model_number: map.get("modelNumber").and_then(scalar_string),
    })
}

// ──────────────────────────────────────────────────────────────────────────────
// HJELPERE
// ──────────────────────────────────────────────────────────────────────────────

/// Pakker ut opptil `MAX_STRING_LAYERS` lag med JSON-i-streng.
/// `None` betyr at en streng ikke lot seg parse.
fn unwrap_string_layers(field: &str, raw: &Value) -> Option<Value> {
    let mut current = raw.clone();
    for _ in 0..MAX_STRING_LAYERS {
        let Value::String(s) = &current else { break };
        match serde_json::from_str::<Value>(s) {
            Ok(inner) => current = inner,
            Err(e) => {
                log::warn!("Error parsing {field}: {e}");
                return None;
            }
        }
    }
    Some(current)
}

fn decode_field<T: DeserializeOwned>(field: &str, raw: Option<Value>) -> Stage<T> {
    let raw = match raw {
        None | Some(Value::Null) => return Stage::Missing,
        Some(v) => v,
    };
    let Some(unwrapped) = unwrap_string_layers(field, &raw) else {
        return Stage::Raw(raw);
    };
    match spte::deserialize::<_, T>(unwrapped) {
        Ok(t) => Stage::Decoded(t),
        Err(e) => {
            log::warn!("Error decoding {field} at {}: {}", e.path(), e.inner());
            Stage::Raw(raw)
        }
    }
}

fn scalar_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
