//! Normalization of the upstream's vendor date tokens.
//!
//! Listing records carry dates as `/Date(1687392000000)/`, milliseconds
//! since the Unix epoch wrapped in ASP.NET marker syntax.

use chrono::{DateTime, SecondsFormat};

/// Convert a vendor date token into an ISO-8601 UTC string ending in `Z`.
///
/// The first maximal run of decimal digits anywhere in the input is read as
/// epoch milliseconds. No digits, a value too large for `i64`, or an
/// instant chrono cannot represent all yield `None`; one bad date field
/// must never fail a whole record.
pub fn normalize_vendor_date(raw: &str) -> Option<String> {
    let ms: i64 = first_digit_run(raw)?.parse().ok()?;
    let ts = DateTime::from_timestamp_millis(ms)?;
    Some(ts.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

fn first_digit_run(raw: &str) -> Option<&str> {
    let bytes = raw.as_bytes();
    let start = bytes.iter().position(|b| b.is_ascii_digit())?;
    let len = bytes[start..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    Some(&raw[start..start + len])
}
