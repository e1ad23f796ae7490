use log::debug;
use time::{macros::format_description, Date, OffsetDateTime, PrimitiveDateTime, Time};

use super::Error;

/// Convert a 24-hour `HH:MM` string (what an HTML time input posts) into
/// the `hh:mm AM/PM` form the sunrise/sunset columns were recorded in.
///
/// Empty input gives `None`. Anything that isn't a 24-hour time is handed
/// back untouched; [`parse_twelve_hour`] rejects it later and the day-length
/// features end up undefined.
pub fn to_twelve_hour(input: Option<&str>) -> Option<String> {
    let raw = input.filter(|s| !s.is_empty())?;

    let parsed = Time::parse(
        raw,
        format_description!("[hour padding:none]:[minute padding:none]"),
    );
    let formatted = parsed.ok().and_then(|t| {
        t.format(format_description!("[hour repr:12]:[minute] [period]"))
            .ok()
    });

    match formatted {
        Some(twelve_hour) => Some(twelve_hour),
        None => {
            debug!("'{}' is not a 24-hour time, passing it through", raw);
            Some(raw.to_owned())
        }
    }
}

/// Parse `hh:mm AM/PM` (surrounding whitespace ignored, designator in any case).
pub fn parse_twelve_hour(input: &str) -> Option<Time> {
    Time::parse(
        input.trim(),
        format_description!(
            "[hour repr:12 padding:none]:[minute padding:none] [period case_sensitive:false]"
        ),
    )
    .ok()
}

/// Parse the request's `date_time`.
///
/// A `T` separator is accepted in place of the space. Year-first ISO dates
/// are tried first, then day-first dates with `-`, `/` or `.` separators. A
/// bare date means midnight. Year-first values may end in `Z` or a `±HH:MM`
/// offset; the local wall-clock time is kept and the offset dropped.
pub fn parse_date_time(input: &str) -> Result<PrimitiveDateTime, Error> {
    let mut normalized = input.trim().replace('T', " ");
    if normalized.ends_with(['Z', 'z']) {
        normalized.pop();
        normalized.push_str("+00:00");
    }

    let with_offset = [
        format_description!(
            "[year]-[month]-[day] [hour padding:none]:[minute]:[second].[subsecond][offset_hour sign:mandatory]:[offset_minute]"
        ),
        format_description!(
            "[year]-[month]-[day] [hour padding:none]:[minute]:[second][offset_hour sign:mandatory]:[offset_minute]"
        ),
        format_description!(
            "[year]-[month]-[day] [hour padding:none]:[minute][offset_hour sign:mandatory]:[offset_minute]"
        ),
    ];
    if let Some(parsed) = with_offset
        .iter()
        .find_map(|fd| OffsetDateTime::parse(&normalized, *fd).ok())
    {
        return Ok(PrimitiveDateTime::new(parsed.date(), parsed.time()));
    }

    let date_times = [
        format_description!(
            "[year]-[month]-[day] [hour padding:none]:[minute]:[second].[subsecond]"
        ),
        format_description!("[year]-[month]-[day] [hour padding:none]:[minute]:[second]"),
        format_description!("[year]-[month]-[day] [hour padding:none]:[minute]"),
        format_description!(
            "[day padding:none]-[month padding:none]-[year] [hour padding:none]:[minute]:[second]"
        ),
        format_description!(
            "[day padding:none]-[month padding:none]-[year] [hour padding:none]:[minute]"
        ),
        format_description!(
            "[day padding:none]/[month padding:none]/[year] [hour padding:none]:[minute]:[second]"
        ),
        format_description!(
            "[day padding:none]/[month padding:none]/[year] [hour padding:none]:[minute]"
        ),
        format_description!(
            "[day padding:none].[month padding:none].[year] [hour padding:none]:[minute]:[second]"
        ),
        format_description!(
            "[day padding:none].[month padding:none].[year] [hour padding:none]:[minute]"
        ),
    ];
    if let Some(parsed) = date_times
        .iter()
        .find_map(|fd| PrimitiveDateTime::parse(&normalized, *fd).ok())
    {
        return Ok(parsed);
    }

    let dates = [
        format_description!("[year]-[month]-[day]"),
        format_description!("[day padding:none]-[month padding:none]-[year]"),
        format_description!("[day padding:none]/[month padding:none]/[year]"),
        format_description!("[day padding:none].[month padding:none].[year]"),
    ];
    dates
        .iter()
        .find_map(|fd| Date::parse(&normalized, *fd).ok())
        .map(Date::midnight)
        .ok_or_else(|| Error::DateTime(input.to_owned()))
}

/// Render a timestamp as `YYYY-MM-DD HH:MM:SS`.
pub fn format_timestamp(at: PrimitiveDateTime) -> Result<String, Error> {
    Ok(at.format(format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second]"
    ))?)
}
