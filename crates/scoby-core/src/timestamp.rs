//! Timestamp normalization between the UTC-tagged wire form and the
//! local-naive form used everywhere else.
//!
//! Local-naive timestamps look like `2025-03-01T14:30:00`: wall-clock time
//! with no zone attached. Older documents stored `toISOString()` output such
//! as `2025-03-01T13:30:00.000Z`; those are converted into the wall-clock time
//! of the processing time zone. That conversion depends on where the
//! notebook runs, which is a known limitation of the stored format: the same
//! document migrated under two different zones yields two different
//! local-naive values. The `*_in` variants take the zone (and clock)
//! explicitly so callers and tests can pin it.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};

/// Render format of local-naive timestamps.
pub const LOCAL_NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const DISPLAY_FORMAT: &str = "%d/%m/%Y %H:%M";
const EDITING_MINUTES_FORMAT: &str = "%Y-%m-%dT%H:%M";
const EXPORT_DATE_FORMAT: &str = "%d.%m.%Y";
const EXPORT_TIME_FORMAT: &str = "%H:%M";

const NAIVE_PARSE_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Render a wall-clock time in local-naive form.
#[must_use]
pub fn render(value: NaiveDateTime) -> String {
    value.format(LOCAL_NAIVE_FORMAT).to_string()
}

/// Current wall-clock time in local-naive form.
#[must_use]
pub fn now() -> String {
    render(Local::now().naive_local())
}

/// Whether `ts` carries the UTC designator of the legacy wire form.
#[must_use]
pub fn is_utc_tagged(ts: &str) -> bool {
    ts.ends_with('Z')
}

/// Normalize a stored timestamp into local-naive form using the process
/// time zone.
///
/// Absent (or empty) input becomes "now" when `required`, otherwise stays
/// absent. UTC-tagged input is converted to local wall-clock time. Anything
/// else is returned unchanged, which makes the function idempotent.
#[must_use]
pub fn normalize(ts: Option<&str>, required: bool) -> Option<String> {
    normalize_in(ts, required, &Local, Local::now().naive_local())
}

/// [`normalize`] with an explicit time zone and clock.
#[must_use]
pub fn normalize_in<Tz: TimeZone>(
    ts: Option<&str>,
    required: bool,
    tz: &Tz,
    now: NaiveDateTime,
) -> Option<String> {
    let Some(ts) = ts.filter(|value| !value.is_empty()) else {
        return required.then(|| render(now));
    };

    if !is_utc_tagged(ts) {
        return Some(ts.to_string());
    }

    if let Some(utc) = parse_utc(ts) {
        return Some(render(utc.with_timezone(tz).naive_local()));
    }

    tracing::warn!(timestamp = ts, "unparseable UTC timestamp left as stored");
    Some(if required {
        render(now)
    } else {
        ts.to_string()
    })
}

/// Parse any accepted timestamp into wall-clock time in the process zone.
#[must_use]
pub fn parse(ts: &str) -> Option<NaiveDateTime> {
    parse_in(ts, &Local)
}

/// Parse any accepted timestamp into wall-clock time in `tz`.
///
/// Accepts local-naive values (with or without seconds, with fractional
/// seconds, `T` or space separated), bare dates (midnight) and RFC 3339
/// values with an offset, which are converted into `tz`.
#[must_use]
pub fn parse_in<Tz: TimeZone>(ts: &str, tz: &Tz) -> Option<NaiveDateTime> {
    let ts = ts.trim();
    if ts.is_empty() {
        return None;
    }

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(ts) {
        return Some(with_offset.with_timezone(tz).naive_local());
    }
    if is_utc_tagged(ts) {
        return parse_utc(ts).map(|utc| utc.with_timezone(tz).naive_local());
    }

    NAIVE_PARSE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(ts, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(ts, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// `DD/MM/YYYY HH:mm` for people; empty for absent or invalid input.
#[must_use]
pub fn for_display(ts: Option<&str>) -> String {
    for_display_in(ts, &Local)
}

/// [`for_display`] with an explicit time zone for offset-carrying input.
#[must_use]
pub fn for_display_in<Tz: TimeZone>(ts: Option<&str>, tz: &Tz) -> String {
    ts.and_then(|value| parse_in(value, tz))
        .map(|value| value.format(DISPLAY_FORMAT).to_string())
        .unwrap_or_default()
}

/// Value for a date-time editing widget: `YYYY-MM-DDTHH:mm`, with `:ss`
/// appended when the seconds are not zero so that [`from_editing`] can
/// restore the exact input. Empty for absent or invalid input.
#[must_use]
pub fn for_editing(ts: Option<&str>) -> String {
    ts.and_then(parse)
        .map(|value| {
            if value.second() == 0 {
                value.format(EDITING_MINUTES_FORMAT).to_string()
            } else {
                value.format(LOCAL_NAIVE_FORMAT).to_string()
            }
        })
        .unwrap_or_default()
}

/// Inverse of [`for_editing`]: widget value back to local-naive form.
/// Empty or invalid input yields `None`.
#[must_use]
pub fn from_editing(value: &str) -> Option<String> {
    let value = value.trim();
    [LOCAL_NAIVE_FORMAT, EDITING_MINUTES_FORMAT]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(render)
}

/// `DD.MM.YYYY` for the export date column; empty when absent or invalid.
#[must_use]
pub fn export_date(ts: Option<&str>) -> String {
    ts.and_then(parse)
        .map(|value| value.format(EXPORT_DATE_FORMAT).to_string())
        .unwrap_or_default()
}

/// `HH:mm` for the export time column; empty when absent or invalid.
#[must_use]
pub fn export_time(ts: Option<&str>) -> String {
    ts.and_then(parse)
        .map(|value| value.format(EXPORT_TIME_FORMAT).to_string())
        .unwrap_or_default()
}

fn parse_utc(ts: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(ts) {
        return Some(parsed.with_timezone(&Utc));
    }
    let naive = ts.trim_end_matches('Z');
    NAIVE_PARSE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(naive, format).ok())
        .map(|value| value.and_utc())
}
