use crate::models::WeatherReading;

/// Standard lufttrykk ved havnivå (hPa).
pub const SEA_LEVEL_HPA: f64 = 1013.25;
const PRESSURE_EXPONENT: f64 = 0.190284;
const FEET_SCALE: f64 = 145366.45;

#[inline]
fn celsius_to_kelvin(temp_c: f64) -> f64 {
    temp_c + 273.15
}

/// Trykkhøyde i fot fra lufttrykk (hPa), avrundet til nærmeste fot.
pub fn pressure_altitude_ft(pressure_hpa: f64) -> i64 {
    let da = (1.0 - (pressure_hpa / SEA_LEVEL_HPA).powf(PRESSURE_EXPONENT)) * FEET_SCALE;
    da.round() as i64
}

/// Density altitude (fot) for en kjøring.
///
/// 1) `da_value` fra enheten returneres uendret.
/// 2) Ellers, med temp/trykk/fuktighet tilstede: forenklet trykkformel.
///    Temperatur (K) og fuktighet inngår ikke i formelen.
/// 3) Ellers `None` (ikke tilgjengelig, ulikt en beregnet 0).
pub fn density_altitude(weather: &WeatherReading) -> Option<i64> {
    if let Some(da) = weather.da_value {
        return Some(da);
    }

    match (weather.temp, weather.pressure, weather.humidity) {
        (Some(temp_c), Some(pressure_hpa), Some(_humidity)) => {
            let _temp_k = celsius_to_kelvin(temp_c);
            Some(pressure_altitude_ft(pressure_hpa))
        }
        _ => None,
    }
}
