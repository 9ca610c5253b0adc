use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

use serde_json as json;
use serde_path_to_error as spte;

use crate::config::AnalyzerConfig;
use crate::models::{Sample, WeatherReading};

// ──────────────────────────────────────────────────────────────────────────────
// HJELPERE
// ──────────────────────────────────────────────────────────────────────────────

fn value_err(msg: String) -> PyErr {
    PyErr::new::<PyValueError, _>(msg)
}

fn parse_at<T: serde::de::DeserializeOwned>(what: &str, json_in: &str) -> PyResult<T> {
    let mut de = json::Deserializer::from_str(json_in);
    spte::deserialize(&mut de)
        .map_err(|e| value_err(format!("{what} parse at {}: {}", e.path(), e.inner())))
}

fn parse_cfg(cfg_json: Option<&str>) -> PyResult<AnalyzerConfig> {
    match cfg_json {
        Some(s) => parse_at("config", s),
        None => Ok(AnalyzerConfig::default()),
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// PYTHON-FUNKSJONER
// ──────────────────────────────────────────────────────────────────────────────

/// Rått API-svar (konvolutt) -> RunAnalysis som JSON.
#[pyfunction]
#[pyo3(signature = (payload, cfg_json = None))]
fn analyze_run_json(payload: &str, cfg_json: Option<&str>) -> PyResult<String> {
    let cfg = parse_cfg(cfg_json)?;
    crate::analyze_run_json(payload, &cfg).map_err(|e| value_err(e.to_string()))
}

/// Ferdig dekodede samples (+ valgfritt vær og modellnummer) -> RunReport som JSON.
#[pyfunction]
#[pyo3(signature = (samples_json, weather_json = None, model_number = None, cfg_json = None))]
fn analyze_samples_json(
    samples_json: &str,
    weather_json: Option<&str>,
    model_number: Option<&str>,
    cfg_json: Option<&str>,
) -> PyResult<String> {
    let samples: Vec<Sample> = parse_at("samples", samples_json)?;
    let weather: Option<WeatherReading> = match weather_json {
        Some(w) => Some(parse_at("weather", w)?),
        None => None,
    };
    let cfg = parse_cfg(cfg_json)?;

    let report = crate::analyze_samples(&samples, weather.as_ref(), model_number, &cfg);
    json::to_string(&report).map_err(|e| value_err(format!("serialize error: {e}")))
}

#[pyfunction]
fn extract_run_id(url: &str) -> Option<String> {
    crate::url::extract_run_id(url)
}

#[pyfunction]
#[pyo3(signature = (temp = None, pressure = None, humidity = None, da_value = None))]
fn density_altitude(
    temp: Option<f64>,
    pressure: Option<f64>,
    humidity: Option<f64>,
    da_value: Option<i64>,
) -> Option<i64> {
    crate::density::density_altitude(&WeatherReading { temp, humidity, pressure, da_value })
}

#[pymodule]
fn dragy_core(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(analyze_run_json, m)?)?;
    m.add_function(wrap_pyfunction!(analyze_samples_json, m)?)?;
    m.add_function(wrap_pyfunction!(extract_run_id, m)?)?;
    m.add_function(wrap_pyfunction!(density_altitude, m)?)?;
    Ok(())
}
