use serde::Serialize;
use time::PrimitiveDateTime;

/// One raw weather observation, as received from a prediction request.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub timestamp: PrimitiveDateTime,
    /// Dew point in Celsius
    pub dew_point_c: f64,
    /// Relative humidity in percent
    pub humidity: f64,
    /// Cloud cover in percent
    pub cloud_cover: f64,
    pub uv_index: i64,
    pub sun_hour: f64,
    /// Precipitation in millimetres
    pub precip_mm: f64,
    pub pressure: f64,
    pub wind_speed_kmph: f64,
    /// Sunrise as `hh:mm AM/PM`
    pub sunrise: Option<String>,
    /// Sunset as `hh:mm AM/PM`
    pub sunset: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Season {
    Summer,
    Monsoon,
    PostMonsoon,
    Winter,
}

impl Season {
    /// Months 3-5 are summer, 6-9 monsoon, 10-11 post-monsoon, everything else winter.
    pub fn for_month(month: u8) -> Self {
        match month {
            3..=5 => Season::Summer,
            6..=9 => Season::Monsoon,
            10 | 11 => Season::PostMonsoon,
            _ => Season::Winter,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Summer => "summer",
            Season::Monsoon => "monsoon",
            Season::PostMonsoon => "post-monsoon",
            Season::Winter => "winter",
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Columns a [`FeatureRecord`] exposes as numbers, named as in training.
pub const NUMERIC_COLUMNS: [&str; 21] = [
    "DewPointC",
    "humidity",
    "cloudcover",
    "uvIndex",
    "sunHour",
    "precipMM",
    "pressure",
    "windspeedKmph",
    "month",
    "day",
    "hour",
    "month_sin",
    "month_cos",
    "day_sin",
    "day_cos",
    "hour_sin",
    "hour_cos",
    "precip_flag",
    "precip_amount",
    "day_length_hours",
    "day_progress",
];

/// Columns a [`FeatureRecord`] exposes as labels.
pub const CATEGORICAL_COLUMNS: [&str; 1] = ["season"];

/// The engineered features for one observation.
///
/// Serializes with the training column names. `None` means the value could
/// not be derived; [`FeatureRecord::column`] reports it as NaN.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRecord {
    #[serde(rename = "DewPointC")]
    pub dew_point_c: f64,
    pub humidity: f64,
    #[serde(rename = "cloudcover")]
    pub cloud_cover: f64,
    #[serde(rename = "uvIndex")]
    pub uv_index: i64,
    #[serde(rename = "sunHour")]
    pub sun_hour: f64,
    #[serde(rename = "precipMM")]
    pub precip_mm: f64,
    pub pressure: f64,
    #[serde(rename = "windspeedKmph")]
    pub wind_speed_kmph: f64,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub month_sin: f64,
    pub month_cos: f64,
    pub day_sin: f64,
    pub day_cos: f64,
    pub hour_sin: f64,
    pub hour_cos: f64,
    pub season: Season,
    pub precip_flag: u8,
    pub precip_amount: f64,
    pub day_length_hours: Option<f64>,
    pub day_progress: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnValue {
    Numeric(f64),
    Categorical(&'static str),
}

impl FeatureRecord {
    /// Look a column up by its training name.
    pub fn column(&self, name: &str) -> Option<ColumnValue> {
        let numeric = match name {
            "DewPointC" => self.dew_point_c,
            "humidity" => self.humidity,
            "cloudcover" => self.cloud_cover,
            "uvIndex" => self.uv_index as f64,
            "sunHour" => self.sun_hour,
            "precipMM" => self.precip_mm,
            "pressure" => self.pressure,
            "windspeedKmph" => self.wind_speed_kmph,
            "month" => f64::from(self.month),
            "day" => f64::from(self.day),
            "hour" => f64::from(self.hour),
            "month_sin" => self.month_sin,
            "month_cos" => self.month_cos,
            "day_sin" => self.day_sin,
            "day_cos" => self.day_cos,
            "hour_sin" => self.hour_sin,
            "hour_cos" => self.hour_cos,
            "precip_flag" => f64::from(self.precip_flag),
            "precip_amount" => self.precip_amount,
            "day_length_hours" => self.day_length_hours.unwrap_or(f64::NAN),
            "day_progress" => self.day_progress.unwrap_or(f64::NAN),
            "season" => return Some(ColumnValue::Categorical(self.season.as_str())),
            _ => return None,
        };
        Some(ColumnValue::Numeric(numeric))
    }
}
