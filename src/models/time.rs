//! Wall-clock helpers.
//!
//! Sections meet at fixed times of day, so the crate works with
//! `chrono::NaiveTime` (no date, no zone). Two textual forms exist:
//!
//! - **HHMM**: four-digit 24-hour clock used by the catalog text format
//!   and the `time` filter (`"0935"`).
//! - **`[hour, minute]`**: the JSON array form used for
//!   `"start time"` / `"end time"` fields.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Parses a four-digit `HHMM` clock value.
///
/// Returns `None` unless the input is exactly four ASCII digits forming
/// a valid time of day.
pub fn parse_hhmm(value: &str) -> Option<NaiveTime> {
    if value.len() != 4 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hour: u32 = value[0..2].parse().ok()?;
    let minute: u32 = value[2..4].parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Formats a time as `HHMM`.
pub fn format_hhmm(time: NaiveTime) -> String {
    format!("{:02}{:02}", time.hour(), time.minute())
}

/// Formats a time as `HH:MM`.
pub fn format_clock(time: NaiveTime) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

/// Serde adapter: `NaiveTime` as `[hour, minute]`.
pub(crate) mod hour_minute {
    use super::*;

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        [time.hour(), time.minute()].serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let [hour, minute] = <[u32; 2]>::deserialize(deserializer)?;
        NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid clock value [{hour}, {minute}]"))
        })
    }
}

/// Serde adapter: `Option<NaiveTime>` as `[hour, minute]` or `null`.
pub(crate) mod opt_hour_minute {
    use super::*;

    pub fn serialize<S: Serializer>(
        time: &Option<NaiveTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        time.map(|t| [t.hour(), t.minute()]).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        match Option::<[u32; 2]>::deserialize(deserializer)? {
            None => Ok(None),
            Some([hour, minute]) => NaiveTime::from_hms_opt(hour, minute, 0)
                .map(Some)
                .ok_or_else(|| {
                    serde::de::Error::custom(format!("invalid clock value [{hour}, {minute}]"))
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hhmm() {
        assert_eq!(parse_hhmm("0935"), NaiveTime::from_hms_opt(9, 35, 0));
        assert_eq!(parse_hhmm("2359"), NaiveTime::from_hms_opt(23, 59, 0));
        assert_eq!(parse_hhmm("0000"), NaiveTime::from_hms_opt(0, 0, 0));
    }

    #[test]
    fn test_parse_hhmm_rejects_malformed() {
        assert!(parse_hhmm("935").is_none());
        assert!(parse_hhmm("09:35").is_none());
        assert!(parse_hhmm("2400").is_none());
        assert!(parse_hhmm("0960").is_none());
        assert!(parse_hhmm("ab12").is_none());
        assert!(parse_hhmm("").is_none());
    }

    #[test]
    fn test_formatting() {
        let t = NaiveTime::from_hms_opt(9, 5, 0).unwrap();
        assert_eq!(format_hhmm(t), "0905");
        assert_eq!(format_clock(t), "09:05");
    }
}
