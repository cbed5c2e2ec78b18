//! Date formats and time zones for temporal range bounds.
//!
//! A date bound is decoded with a [`DateFormat`] in a [`Zone`] and normalized
//! to UTC:
//!
//! - `epoch_millis` / `epoch_second` read the bound as a number since the epoch.
//! - RFC 3339 (the default) also accepts a missing offset and bare dates.
//! - Java-style patterns (`yyyy-MM-dd HH:mm:ss`) are translated to strftime.
//! - strftime patterns (`%Y-%m-%d`) are used as they are.
//!
//! Named zones (`Asia/Shanghai`, `America/New_York`) resolve their offset per
//! instant, so daylight saving time applies to each bound separately.
//!
//! # Examples
//!
//! ```
//! use querydsl::util::time::{DateFormat, parse_time_zone};
//! use serde_json::json;
//!
//! let format = DateFormat::parse("yyyy-MM-dd HH:mm:ss");
//! let zone = parse_time_zone("+08:00").unwrap();
//! let date = format.parse_value(&json!("2024-03-01 08:00:00"), zone).unwrap();
//! assert_eq!(date.to_rfc3339(), "2024-03-01T00:00:00+00:00");
//!
//! let zone = parse_time_zone("America/New_York").unwrap();
//! let date = format.parse_value(&json!("2024-07-01 12:00:00"), zone).unwrap();
//! assert_eq!(date.to_rfc3339(), "2024-07-01T16:00:00+00:00");
//! ```

use std::fmt;

use chrono::{
    DateTime, FixedOffset, Local, MappedLocalTime, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc,
};
use chrono_tz::Tz;
use serde_json::Value;

/// The zone a date without an explicit offset is read in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Fixed(FixedOffset),
    Named(Tz),
    Local,
}

impl Zone {
    pub const UTC: Zone = Zone::Named(Tz::UTC);

    /// Place a wall-clock time in this zone. Times repeated by a DST fold
    /// take the earlier instant; times skipped by a DST gap are an error.
    pub fn to_utc(&self, naive: &NaiveDateTime) -> Option<DateTime<Utc>> {
        fn earliest<Z: TimeZone>(result: MappedLocalTime<DateTime<Z>>) -> Option<DateTime<Utc>> {
            result.earliest().map(|date| date.with_timezone(&Utc))
        }
        match self {
            Zone::Fixed(offset) => earliest(offset.from_local_datetime(naive)),
            Zone::Named(tz) => earliest(tz.from_local_datetime(naive)),
            Zone::Local => earliest(Local.from_local_datetime(naive)),
        }
    }

    /// Offset from UTC in seconds at `instant`.
    pub fn offset_at(&self, instant: &DateTime<Utc>) -> i32 {
        match self {
            Zone::Fixed(offset) => offset.local_minus_utc(),
            Zone::Named(tz) => tz.offset_from_utc_datetime(&instant.naive_utc()).fix().local_minus_utc(),
            Zone::Local => Local.offset_from_utc_datetime(&instant.naive_utc()).local_minus_utc(),
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Fixed(offset) => write!(f, "{offset}"),
            Zone::Named(tz) => f.write_str(tz.name()),
            Zone::Local => f.write_str("local"),
        }
    }
}

/// Parse a time zone name: `UTC`, `Z`, `LOCAL`, a fixed offset
/// (`+08:00`, `+0800`, `+08`, `-05:30`) or an IANA name (`Europe/Paris`).
///
/// The error is a human readable detail, to be wrapped by the caller.
pub fn parse_time_zone(name: &str) -> Result<Zone, String> {
    let name = name.trim();
    if let Some(sign) = name.chars().next().filter(|c| *c == '+' || *c == '-') {
        let digits: String = name[1..].chars().filter(|c| *c != ':').collect();
        let valid = matches!(digits.len(), 2 | 4) && digits.chars().all(|c| c.is_ascii_digit());
        if !valid {
            return Err(format!("invalid time zone offset [{name}]"));
        }
        let hours: i32 = digits[..2].parse().map_err(|_| format!("invalid time zone offset [{name}]"))?;
        let minutes: i32 = match digits.get(2..) {
            Some("") | None => 0,
            Some(m) => m.parse().map_err(|_| format!("invalid time zone offset [{name}]"))?,
        };
        let seconds = (hours * 3600 + minutes * 60) * if sign == '-' { -1 } else { 1 };
        return FixedOffset::east_opt(seconds)
            .map(Zone::Fixed)
            .ok_or_else(|| format!("time zone offset out of range [{name}]"));
    }

    match name.to_uppercase().as_str() {
        "" | "UTC" | "Z" | "GMT" => Ok(Zone::UTC),
        "LOCAL" => Ok(Zone::Local),
        _ => name
            .parse::<Tz>()
            .map(Zone::Named)
            .map_err(|_| format!("unknown time zone [{name}]")),
    }
}

/// How a date bound is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateFormat {
    Rfc3339,
    EpochMillis,
    EpochSecond,
    /// A strftime pattern.
    Pattern(String),
}

impl DateFormat {
    /// Interpret a format name or pattern.
    pub fn parse(format: &str) -> Self {
        match format.trim() {
            "" | "rfc3339" | "strict_date_optional_time" | "date_optional_time" => {
                DateFormat::Rfc3339
            }
            "epoch_millis" => DateFormat::EpochMillis,
            "epoch_second" => DateFormat::EpochSecond,
            pattern if pattern.contains('%') => DateFormat::Pattern(pattern.to_string()),
            pattern => DateFormat::Pattern(java_to_strftime(pattern)),
        }
    }

    /// Decode a JSON bound (string or number) into a UTC instant.
    pub fn parse_value(&self, value: &Value, zone: Zone) -> Result<DateTime<Utc>, String> {
        let text = match value {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            other => return Err(format!("unsupported date value [{other}]")),
        };

        match self {
            DateFormat::EpochMillis => {
                let millis = epoch_number(&text)?;
                DateTime::from_timestamp_millis(millis)
                    .ok_or_else(|| format!("timestamp out of range [{text}]"))
            }
            DateFormat::EpochSecond => {
                let seconds = epoch_number(&text)?;
                DateTime::from_timestamp(seconds, 0)
                    .ok_or_else(|| format!("timestamp out of range [{text}]"))
            }
            DateFormat::Rfc3339 => match DateTime::parse_from_rfc3339(&text) {
                Ok(date) => Ok(date.with_timezone(&Utc)),
                Err(e) => parse_local(&text, "%Y-%m-%dT%H:%M:%S%.f", zone)
                    .or_else(|_| parse_local(&text, "%Y-%m-%d", zone))
                    .map_err(|_| format!("parsing time [{text}] as RFC3339: {e}")),
            },
            DateFormat::Pattern(pattern) => match DateTime::parse_from_str(&text, pattern) {
                Ok(date) => Ok(date.with_timezone(&Utc)),
                Err(_) => parse_local(&text, pattern, zone),
            },
        }
    }
}

fn epoch_number(text: &str) -> Result<i64, String> {
    text.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(|n| n as i64)
        .ok_or_else(|| format!("[{text}] is not a number"))
}

/// Parse a date without offset and place it in `zone`.
fn parse_local(text: &str, pattern: &str, zone: Zone) -> Result<DateTime<Utc>, String> {
    let naive = match NaiveDateTime::parse_from_str(text, pattern) {
        Ok(naive) => naive,
        Err(e) => NaiveDate::parse_from_str(text, pattern)
            .map_err(|_| format!("parsing time [{text}] as [{pattern}]: {e}"))?
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| format!("parsing time [{text}] as [{pattern}]"))?,
    };
    zone.to_utc(&naive)
        .ok_or_else(|| format!("local time [{text}] does not exist in [{zone}]"))
}

/// Translate a Java date pattern (`yyyy-MM-dd'T'HH:mm:ss.SSSZ`) to strftime.
fn java_to_strftime(pattern: &str) -> String {
    const SYMBOLS: &[(&str, &str)] = &[
        ("yyyy", "%Y"),
        ("uuuu", "%Y"),
        ("yy", "%y"),
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        ("dd", "%d"),
        ("HH", "%H"),
        ("hh", "%I"),
        ("mm", "%M"),
        ("ss", "%S"),
        ("SSSSSSSSS", "%9f"),
        ("SSSSSS", "%6f"),
        ("SSS", "%3f"),
        ("XXX", "%:z"),
        ("xxx", "%:z"),
        ("ZZ", "%z"),
        ("Z", "%z"),
        ("a", "%p"),
        ("EEEE", "%A"),
        ("EEE", "%a"),
    ];

    let mut out = String::with_capacity(pattern.len() + 8);
    let mut rest = pattern;
    while !rest.is_empty() {
        if let Some(quoted) = rest.strip_prefix('\'') {
            let end = quoted.find('\'').unwrap_or(quoted.len());
            out.push_str(&quoted[..end].replace('%', "%%"));
            rest = quoted.get(end + 1..).unwrap_or("");
            continue;
        }
        if let Some((symbol, spec)) = SYMBOLS.iter().find(|(symbol, _)| rest.starts_with(symbol)) {
            out.push_str(spec);
            rest = &rest[symbol.len()..];
            continue;
        }
        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            out.push(c);
        }
        rest = chars.as_str();
    }
    out
}
