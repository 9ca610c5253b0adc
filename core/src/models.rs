use serde::{Deserialize, Deserializer, Serialize};

/// Ett telemetripunkt fra loggeren. Feltnavn følger Dragy-formatet (camelCase).
///
/// Geometri- og nøyaktighetsfeltene brukes ikke av sjekkene; `null` eller
/// ikke-numeriske verdier der blir `NaN` i stedet for å velte hele `dataArr`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    pub time: f64,         // sek fra start
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub speed: f64,        // km/t
    pub acceleration: f64, // g
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub heading: f64,      // grader
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub latitude: f64,
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub longitude: f64,
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub altitude: f64,     // meter
    #[serde(rename = "satelliteNum", alias = "satelliteCount")]
    pub satellite_count: u32,
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub h_acc: f64,
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub v_acc: f64,
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub s_acc: f64,
    pub fix_type: i32,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientF64 {
    Number(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

/// Tall -> tall, tallstreng ("NaN", "12.5") -> parset, alt annet (null, objekt) -> NaN.
fn de_lenient_f64<'de, D>(de: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match LenientF64::deserialize(de)? {
        LenientF64::Number(v) => v,
        LenientF64::Text(s) => s.trim().parse().unwrap_or(f64::NAN),
        LenientF64::Other(_) => f64::NAN,
    })
}

/// Værdata for hele kjøringen (én verdi, ikke en serie).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReading {
    #[serde(default)]
    pub temp: Option<f64>,     // °C
    #[serde(default)]
    pub humidity: Option<f64>, // %
    #[serde(default)]
    pub pressure: Option<f64>, // hPa
    /// Ferdig beregnet density altitude (fot) hvis enheten allerede har den.
    #[serde(default, deserialize_with = "de_opt_feet", skip_serializing_if = "Option::is_none")]
    pub da_value: Option<i64>,
}

/// Aksepterer både heltall og desimaltall for fot; desimaler rundes til nærmeste fot.
fn de_opt_feet<'de, D>(de: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<f64> = Option::deserialize(de)?;
    Ok(raw.filter(|v| v.is_finite()).map(|v| v.round() as i64))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccelerationKind {
    Spike,
    Drop,
    Deviation,
}

impl AccelerationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccelerationKind::Spike => "spike",
            AccelerationKind::Drop => "drop",
            AccelerationKind::Deviation => "deviation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccelerationAnomaly {
    #[serde(rename = "type")]
    pub kind: AccelerationKind,
    pub time: f64,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta: Option<f64>,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GpsKind {
    #[serde(rename = "lowSatellites")]
    LowSatellites,
    #[serde(rename = "nonRTK")]
    NonRtk,
}

impl GpsKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GpsKind::LowSatellites => "lowSatellites",
            GpsKind::NonRtk => "nonRTK",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpsAnomaly {
    #[serde(rename = "type")]
    pub kind: GpsKind,
    pub time: f64,
    pub value: f64,
    pub message: String,
}

/// Resultatet av én analyse. `density_altitude = None` betyr "ikke tilgjengelig".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub acceleration_anomalies: Vec<AccelerationAnomaly>,
    pub gps_anomalies: Vec<GpsAnomaly>,
    pub density_altitude: Option<i64>,
}

impl RunReport {
    pub fn count_acceleration(&self, kind: AccelerationKind) -> usize {
        self.acceleration_anomalies.iter().filter(|a| a.kind == kind).count()
    }

    pub fn count_gps(&self, kind: GpsKind) -> usize {
        self.gps_anomalies.iter().filter(|a| a.kind == kind).count()
    }

    pub fn is_clean(&self) -> bool {
        self.acceleration_anomalies.is_empty() && self.gps_anomalies.is_empty()
    }
}
