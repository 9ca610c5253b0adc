// core/tests/test_payload.rs
use serde_json::{json, Value};

use dragy_core::payload::{decode_car_results, DecodeSummary};
use dragy_core::{
    analyze_record, analyze_run_json, decode_envelope, AccelerationKind, AnalyzerConfig,
    DragyError, GpsKind, StageStatus,
};

fn point(time: f64, acceleration: f64, sats: u32, fix: i32) -> Value {
    json!({
        "time": time, "speed": time * 40.0, "acceleration": acceleration,
        "heading": 90.0, "latitude": 59.91, "longitude": 10.75, "altitude": 12.0,
        "satelliteNum": sats, "hAcc": 0.4, "vAcc": 0.6, "sAcc": 0.1, "fixType": fix
    })
}

fn data_info() -> Value {
    json!({
        "dataArr": [
            point(0.00, 0.30, 14, 3),
            point(0.05, 0.10, 14, 3), // spike + drop
            point(0.15, 0.12, 8, 2),  // lowSatellites + nonRTK
        ],
        "detail": [
            {"name": "100-200", "time": 6.512},
            {"name": "0-100", "time": 3.901},
            {"name": "100-150", "time": 2.734}
        ]
    })
}

fn weather_info() -> Value {
    json!({"main": {"temp": 15.0, "humidity": 50.0, "pressure": 1013.25}})
}

/// API-svar der graphData og de indre feltene er JSON-strenger, som fra Dragy.
fn envelope(graph: Value) -> String {
    json!({
        "data": {"carResults": {
            "id": 123456,
            "brand_name": "BMW",
            "models": "M3 Competition",
            "graphData": graph.to_string()
        }}
    })
    .to_string()
}

fn graph_with(data: Value, weather: Value) -> Value {
    json!({
        "dataInfo": data,
        "weatherInfo": weather,
        "daValue": 120,
        "modelNumber": "DRG70"
    })
}

#[test]
fn decodes_string_encoded_fields() {
    let text = envelope(graph_with(
        Value::String(data_info().to_string()),
        Value::String(weather_info().to_string()),
    ));
    let record = decode_envelope(&text).expect("envelope");

    assert_eq!(record.id.as_deref(), Some("123456"));
    assert_eq!(record.brand_name.as_deref(), Some("BMW"));
    assert_eq!(record.model_number(), Some("DRG70"));
    assert_eq!(record.samples().len(), 3);
    assert_eq!(record.samples()[2].satellite_count, 8);
    assert_eq!(record.weather().and_then(|w| w.pressure), Some(1013.25));
    assert_eq!(
        record.decode_summary(),
        DecodeSummary {
            graph_data: StageStatus::Decoded,
            data_info: StageStatus::Decoded,
            weather_info: StageStatus::Decoded,
        }
    );
}

#[test]
fn full_analysis_of_decoded_run() {
    let text = envelope(graph_with(data_info(), weather_info()));
    let record = decode_envelope(&text).unwrap();
    let analysis = analyze_record(&record, &AnalyzerConfig::default());

    let r = &analysis.report;
    assert_eq!(r.count_acceleration(AccelerationKind::Spike), 1);
    assert_eq!(r.count_acceleration(AccelerationKind::Drop), 1);
    assert_eq!(r.count_acceleration(AccelerationKind::Deviation), 0);
    assert_eq!(r.count_gps(GpsKind::LowSatellites), 1);
    assert_eq!(r.count_gps(GpsKind::NonRtk), 1);
    assert_eq!(r.density_altitude, Some(0));

    let names: Vec<_> = analysis.segments.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["100-150", "100-200"]);
    assert_eq!(analysis.model.as_deref(), Some("M3 Competition"));
}

#[test]
fn broken_weather_does_not_stop_other_checks() {
    let text = envelope(graph_with(data_info(), Value::String("{\"main\": {".into())));
    let record = decode_envelope(&text).unwrap();
    let analysis = analyze_record(&record, &AnalyzerConfig::default());

    assert_eq!(analysis.decode.weather_info, StageStatus::Raw);
    assert_eq!(analysis.decode.data_info, StageStatus::Decoded);
    assert_eq!(analysis.report.density_altitude, None);
    assert_eq!(analysis.report.acceleration_anomalies.len(), 2);
    assert_eq!(analysis.report.gps_anomalies.len(), 2);
}

#[test]
fn broken_data_info_keeps_weather() {
    let bad_data = json!({"dataArr": [{"time": "soon"}]});
    let text = envelope(graph_with(bad_data, weather_info()));
    let analysis = analyze_record(&decode_envelope(&text).unwrap(), &AnalyzerConfig::default());

    assert_eq!(analysis.decode.data_info, StageStatus::Raw);
    assert!(analysis.report.is_clean());
    assert!(analysis.segments.is_empty());
    assert_eq!(analysis.report.density_altitude, Some(0));
}

#[test]
fn reported_da_value_inside_weather_wins() {
    let weather = json!({"main": {"temp": 35.0, "humidity": 20.0, "pressure": 990.0, "daValue": 2750.4}});
    let text = envelope(graph_with(data_info(), weather));
    let analysis = analyze_record(&decode_envelope(&text).unwrap(), &AnalyzerConfig::default());
    assert_eq!(analysis.report.density_altitude, Some(2750));
}

#[test]
fn unparsable_graph_data_is_raw() {
    let text = json!({
        "data": {"carResults": {"id": "77", "graphData": "{oops"}}
    })
    .to_string();
    let record = decode_envelope(&text).unwrap();
    assert_eq!(record.decode_summary().graph_data, StageStatus::Raw);
    assert_eq!(record.decode_summary().data_info, StageStatus::Missing);
    assert!(record.samples().is_empty());
    assert!(record.weather().is_none());
}

#[test]
fn missing_graph_data_is_missing() {
    let car = json!({"id": 5, "brand_name": "Audi"});
    let record = decode_car_results(car.as_object().unwrap().clone());
    assert_eq!(record.decode_summary().graph_data, StageStatus::Missing);
    let analysis = analyze_record(&record, &AnalyzerConfig::default());
    assert!(analysis.report.is_clean());
    assert_eq!(analysis.report.density_altitude, None);
}

#[test]
fn envelope_without_car_results_is_fatal() {
    let err = decode_envelope(r#"{"data": {"other": 1}}"#).unwrap_err();
    match err {
        DragyError::Envelope { path, .. } => assert!(path.starts_with("data"), "path={path}"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(matches!(decode_envelope("not json"), Err(DragyError::Envelope { .. })));
}

#[test]
fn analyze_run_json_emits_camel_case_report() {
    let text = envelope(graph_with(data_info(), json!({})));
    let out = analyze_run_json(&text, &AnalyzerConfig::default()).unwrap();
    let v: Value = serde_json::from_str(&out).unwrap();

    assert_eq!(v["runId"], "123456");
    assert_eq!(v["decode"]["weatherInfo"], "decoded");
    assert!(v["report"]["densityAltitude"].is_null());
    assert_eq!(v["report"]["accelerationAnomalies"][0]["type"], "spike");
    assert_eq!(v["report"]["accelerationAnomalies"][1]["type"], "drop");
    assert_eq!(v["report"]["gpsAnomalies"][1]["type"], "nonRTK");
    assert!(v["report"]["accelerationAnomalies"][0]["delta"].is_number());
}

#[test]
fn null_coordinates_keep_scalar_checks_running() {
    let mut bad_lat = point(0.05, 0.10, 5, 2);
    bad_lat["latitude"] = Value::Null;
    let mut bad_lon = point(0.15, 0.12, 5, 2);
    bad_lon["longitude"] = json!("NaN");
    let data = json!({"dataArr": [point(0.00, 0.30, 5, 2), bad_lat, bad_lon]});

    let record = decode_envelope(&envelope(graph_with(data, weather_info()))).expect("envelope");
    assert_eq!(record.decode_summary().data_info, StageStatus::Decoded);
    assert_eq!(record.samples().len(), 3);
    assert!(record.samples()[1].latitude.is_nan());
    assert!(record.samples()[2].longitude.is_nan());

    let report = analyze_record(&record, &AnalyzerConfig::default()).report;
    assert_eq!(report.count_acceleration(AccelerationKind::Spike), 1);
    assert_eq!(report.count_acceleration(AccelerationKind::Drop), 1);
    assert_eq!(report.count_gps(GpsKind::LowSatellites), 3);
    assert_eq!(report.count_gps(GpsKind::NonRtk), 3);
}
