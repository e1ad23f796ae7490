use std::f64::consts::PI;

use log::warn;
use time::{Date, PrimitiveDateTime};

use super::{parse_twelve_hour, FeatureRecord, Observation, Season};

pub const MONTH_PERIOD: f64 = 12.0;
/// Every month is encoded against 31 days, whatever its real length.
pub const DAY_PERIOD: f64 = 31.0;
pub const HOUR_PERIOD: f64 = 24.0;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Sine and cosine of `2π·value/period`.
pub fn cyclic_encode(value: f64, period: f64) -> (f64, f64) {
    let angle = 2.0 * PI * value / period;
    (angle.sin(), angle.cos())
}

/// Expand one observation into the feature set the model was trained on.
///
/// Never fails: if sunrise or sunset can't be read, `day_length_hours` and
/// `day_progress` are left undefined and everything else is still filled in.
pub fn transform(observation: &Observation) -> FeatureRecord {
    let at = observation.timestamp;
    let month = u8::from(at.month());
    let day = at.day();
    let hour = at.hour();

    let (month_sin, month_cos) = cyclic_encode(f64::from(month), MONTH_PERIOD);
    let (day_sin, day_cos) = cyclic_encode(f64::from(day), DAY_PERIOD);
    let (hour_sin, hour_cos) = cyclic_encode(f64::from(hour), HOUR_PERIOD);

    let daylight = Daylight::derive(
        at,
        observation.sunrise.as_deref(),
        observation.sunset.as_deref(),
    );

    FeatureRecord {
        dew_point_c: observation.dew_point_c,
        humidity: observation.humidity,
        cloud_cover: observation.cloud_cover,
        uv_index: observation.uv_index,
        sun_hour: observation.sun_hour,
        precip_mm: observation.precip_mm,
        pressure: observation.pressure,
        wind_speed_kmph: observation.wind_speed_kmph,
        month,
        day,
        hour,
        month_sin,
        month_cos,
        day_sin,
        day_cos,
        hour_sin,
        hour_cos,
        season: Season::for_month(month),
        precip_flag: u8::from(observation.precip_mm > 0.0),
        precip_amount: observation.precip_mm,
        day_length_hours: daylight.length_hours,
        day_progress: daylight.progress,
    }
}

#[derive(Debug, Default, PartialEq)]
struct Daylight {
    length_hours: Option<f64>,
    progress: Option<f64>,
}

impl Daylight {
    fn derive(at: PrimitiveDateTime, sunrise: Option<&str>, sunset: Option<&str>) -> Self {
        let sunrise = sunrise.and_then(|s| instant_on(at.date(), s));
        let sunset = sunset.and_then(|s| instant_on(at.date(), s));

        let (Some(sunrise), Some(sunset)) = (sunrise, sunset) else {
            return Daylight::default();
        };

        let length_hours = hours_between(sunrise, sunset);
        let progress = if length_hours == 0.0 {
            None
        } else {
            Some((hours_between(sunrise, at) / length_hours).clamp(0.0, 1.0))
        };

        Daylight {
            length_hours: Some(length_hours),
            progress,
        }
    }
}

fn instant_on(date: Date, clock: &str) -> Option<PrimitiveDateTime> {
    match parse_twelve_hour(clock) {
        Some(time) => Some(PrimitiveDateTime::new(date, time)),
        None => {
            warn!(
                "sunrise/sunset '{}' is not a 12-hour time, daylight features left undefined",
                clock
            );
            None
        }
    }
}

fn hours_between(from: PrimitiveDateTime, to: PrimitiveDateTime) -> f64 {
    (to - from).as_seconds_f64() / SECONDS_PER_HOUR
}
