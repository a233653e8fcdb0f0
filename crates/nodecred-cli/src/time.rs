//! # Issue-Time Parsing
//!
//! Parses the `--time` argument into Unix seconds. The primary format is the
//! one existing tooling prints:
//!
//! ```text
//! Mon 02 Jan 2006 3:04:05 PM MST
//! ```
//!
//! RFC 3339 (`2006-01-02T22:04:05Z`) is accepted as well.
//!
//! ## Zone Abbreviations
//!
//! Abbreviations are ambiguous in general, so only a fixed table is
//! resolved: `UTC`, `GMT`, `Z` and the continental US zones. Numeric offsets
//! (`+0530`, `-0700`) are also accepted. Any other abbreviation is read as
//! UTC and a warning is logged.
//!
//! Table entries are fixed offsets and ignore the host time zone: `MST` is
//! always UTC-7. Issuers that resolve abbreviations through the host's local
//! zone get a different instant for the same text on a UTC host (`MST`
//! becomes zero offset there), so pass RFC 3339 or a numeric offset when
//! interoperating with them.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};

use nodecred_core::Credential;

/// chrono format of the date and clock part, without the zone.
pub const ISSUE_TIME_FORMAT: &str = "%a %d %b %Y %I:%M:%S %p";

const ZONES: &[(&str, i32)] = &[
    ("UTC", 0),
    ("GMT", 0),
    ("Z", 0),
    ("EST", -5),
    ("EDT", -4),
    ("CST", -6),
    ("CDT", -5),
    ("MST", -7),
    ("MDT", -6),
    ("PST", -8),
    ("PDT", -7),
];

/// Parse an issue time into Unix seconds.
///
/// # Errors
///
/// Fails if the input matches neither the issue-time format nor RFC 3339.
pub fn parse_issue_time(input: &str) -> Result<i64> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.timestamp());
    }

    let (clock, zone) = input
        .rsplit_once(' ')
        .ok_or_else(|| anyhow!("invalid time {input:?}: missing time zone"))?;
    let naive = NaiveDateTime::parse_from_str(clock, ISSUE_TIME_FORMAT).with_context(|| {
        format!("invalid time {input:?}: expected e.g. \"Mon 02 Jan 2006 3:04:05 PM MST\"")
    })?;
    let offset = zone_offset(zone)?;
    let local = offset
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| anyhow!("invalid time {input:?}: ambiguous local time"))?;
    Ok(local.timestamp())
}

/// Render a UTC instant in the issue-time format.
pub fn format_issue_time(dt: DateTime<Utc>) -> String {
    dt.format("%a %d %b %Y %-I:%M:%S %p UTC").to_string()
}

/// Issue time of a credential in the issue-time format, or `None` if the
/// timestamp is outside the range chrono can represent.
pub fn credential_issue_time(credential: &Credential) -> Option<String> {
    credential.issued_at().map(format_issue_time)
}

fn zone_offset(zone: &str) -> Result<FixedOffset> {
    let seconds = if let Some(hours) = ZONES
        .iter()
        .find(|(abbr, _)| abbr.eq_ignore_ascii_case(zone))
        .map(|(_, hours)| *hours)
    {
        hours * 3600
    } else if let Some(seconds) = numeric_offset(zone) {
        seconds
    } else {
        tracing::warn!(zone, "unknown time zone abbreviation; treating as UTC");
        0
    };
    FixedOffset::east_opt(seconds).ok_or_else(|| anyhow!("time zone offset out of range: {zone}"))
}

fn numeric_offset(zone: &str) -> Option<i32> {
    let (sign, digits) = match zone.as_bytes().first()? {
        b'+' => (1, &zone[1..]),
        b'-' => (-1, &zone[1..]),
        _ => return None,
    };
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    Some(sign * (hours * 3600 + minutes * 60))
}
