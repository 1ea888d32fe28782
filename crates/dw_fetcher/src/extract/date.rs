use chrono::NaiveDate;
use dw_core::{Error, Result};

use crate::adapter::SiteAdapter;

/// Publication date from the first `articleChangeDateShort: "YYYYMMDD"` marker.
pub fn extract_date(raw: &[u8], adapter: &SiteAdapter) -> Result<NaiveDate> {
    let captures = adapter
        .date_marker
        .captures(raw)
        .ok_or_else(|| Error::NotFound("date marker matched nothing".to_string()))?;
    let value = captures
        .get(1)
        .map(|m| String::from_utf8_lossy(m.as_bytes()).into_owned())
        .ok_or_else(|| Error::NotFound("date marker has no value".to_string()))?;

    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::MalformedDate(format!("expected 8 digits, got {:?}", value)));
    }

    NaiveDate::parse_from_str(&value, &adapter.date_format)
        .map_err(|e| Error::MalformedDate(format!("{:?}: {}", value, e)))
}
