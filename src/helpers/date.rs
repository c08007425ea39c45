//! Date helper functions
//!
//! All reader-facing dates render in Brazilian Portuguese: "15 mar
//! 2021" for publication dates, "19 mar 2021, às 15:49" when the time
//! matters.

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};

/// Portuguese month abbreviations, indexed by zero-based month
const MONTHS_PT: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

/// Format a date as "15 mar 2021"
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{:02} {} {}",
        date.day(),
        MONTHS_PT[date.month0() as usize],
        date.year()
    )
}

/// Format a timestamp as "19 mar 2021, às 15:49"
pub fn format_datetime<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{}, às {:02}:{:02}",
        format_date(date),
        date.hour(),
        date.minute()
    )
}

/// Format a date in ISO 8601 / XML format, for `<time datetime>`
pub fn date_xml<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}

/// Resolve the configured display timezone, falling back to UTC when
/// the name is unknown
pub fn display_timezone(name: &str) -> chrono_tz::Tz {
    match name.parse::<chrono_tz::Tz>() {
        Ok(tz) => tz,
        Err(_) => {
            if !name.is_empty() {
                tracing::warn!("Unknown timezone {:?}, falling back to UTC", name);
            }
            chrono_tz::UTC
        }
    }
}

/// Shift a UTC timestamp into the display timezone
pub fn in_timezone(date: &DateTime<Utc>, tz: chrono_tz::Tz) -> DateTime<chrono_tz::Tz> {
    date.with_timezone(&tz)
}
