//! Feature engineering for a single weather observation
//!
//! [`transform`] expands an [`Observation`] into the [`FeatureRecord`] the
//! preprocessing pipeline was fitted on. The `clock` helpers coerce the
//! time strings that arrive from the web form.

mod clock;
mod observation;
mod transform;

pub use clock::{format_timestamp, parse_date_time, parse_twelve_hour, to_twelve_hour};
pub use observation::{
    ColumnValue, FeatureRecord, Observation, Season, CATEGORICAL_COLUMNS, NUMERIC_COLUMNS,
};
pub use transform::{cyclic_encode, transform, DAY_PERIOD, HOUR_PERIOD, MONTH_PERIOD};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Unrecognised date_time format: '{0}'")]
    DateTime(String),
    #[error("Failed to format time string: {0}")]
    TimeFormat(#[from] time::error::Format),
}
