#![allow(clippy::result_large_err)]

use crate::errors::Result;
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use infraudit_core::errors::{ExError, ExErrorKind};

const KEY_FORMAT: &str = "%Y%m%dT%H%M%S%.6fZ";
const FILE_PREFIX: &str = "snapshot_";
const FILE_SUFFIX: &str = ".json";

/// Storage key for a snapshot timestamp (`20240101T120000.000000Z`)
pub fn snapshot_key(timestamp: DateTime<Utc>) -> String {
    timestamp.format(KEY_FORMAT).to_string()
}

pub(crate) fn file_name(timestamp: DateTime<Utc>) -> String {
    format!("{}{}{}", FILE_PREFIX, snapshot_key(timestamp), FILE_SUFFIX)
}

/// Timestamp encoded in a snapshot file name, `None` for unrelated files
pub(crate) fn timestamp_from_file_name(name: &str) -> Option<DateTime<Utc>> {
    let key = name.strip_prefix(FILE_PREFIX)?.strip_suffix(FILE_SUFFIX)?;
    NaiveDateTime::parse_from_str(key, KEY_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Parse a user-supplied timestamp: RFC 3339 or a snapshot key.
pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(input) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(input, KEY_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| {
            ExError::new(ExErrorKind::InvalidSnapshot)
                .with_op("parse_timestamp")
                .with_message(format!(
                    "'{}' is neither RFC 3339 (e.g. {}) nor a snapshot key: {}",
                    input,
                    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
                    e
                ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_key_format() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(snapshot_key(ts), "20240102T030405.000000Z");
        assert_eq!(file_name(ts), "snapshot_20240102T030405.000000Z.json");
    }

    #[test]
    fn test_file_name_parses_back() {
        let ts = Utc.with_ymd_and_hms(2024, 6, 30, 23, 59, 59).unwrap();
        assert_eq!(timestamp_from_file_name(&file_name(ts)), Some(ts));
        assert_eq!(timestamp_from_file_name("notes.txt"), None);
        assert_eq!(timestamp_from_file_name("snapshot_garbage.json"), None);
    }

    #[test]
    fn test_parse_timestamp_accepts_both_forms() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(parse_timestamp("2024-01-02T03:04:05Z").unwrap(), ts);
        assert_eq!(parse_timestamp("2024-01-02T04:04:05+01:00").unwrap(), ts);
        assert_eq!(parse_timestamp("20240102T030405.000000Z").unwrap(), ts);
        assert_eq!(
            parse_timestamp("yesterday").unwrap_err().kind(),
            ExErrorKind::InvalidSnapshot
        );
    }
}
