//! Time zone and epoch conversion helpers.
//!
//! The sensor stamps clips with UTC epoch seconds; operators think in the
//! sensor's local calendar day.

use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;

/// Parse an IANA time zone name such as `Europe/Rome`.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>().map_err(|e| Error::InvalidTimezone {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

/// Convert epoch seconds to a local date-time in `tz`.
///
/// Returns `None` for timestamps outside chrono's representable range.
pub fn to_local(epoch_secs: i64, tz: Tz) -> Option<DateTime<Tz>> {
    DateTime::from_timestamp(epoch_secs, 0).map(|utc| utc.with_timezone(&tz))
}

/// Epoch seconds of local midnight starting `date` in `tz`.
///
/// On a DST gap at midnight the earliest valid instant is used; if none
/// exists the naive midnight is interpreted as UTC.
pub fn local_midnight_epoch(date: NaiveDate, tz: Tz) -> i64 {
    let midnight = date.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .map_or_else(|| midnight.and_utc().timestamp(), |dt| dt.timestamp())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_timezone_valid() {
        assert_eq!(parse_timezone("Europe/Rome").unwrap(), chrono_tz::Europe::Rome);
        assert_eq!(parse_timezone("UTC").unwrap(), chrono_tz::UTC);
    }

    #[test]
    fn test_parse_timezone_invalid() {
        let result = parse_timezone("Nowhere/Special");
        assert!(matches!(result, Err(Error::InvalidTimezone { .. })));
    }

    #[test]
    fn test_to_local_applies_summer_offset() {
        // 2024-06-01 10:00:00 UTC is 12:00 in Rome (CEST)
        let local = to_local(1_717_236_000, chrono_tz::Europe::Rome).unwrap();
        assert_eq!(local.hour(), 12);
        assert_eq!(local.day(), 1);
    }

    #[test]
    fn test_to_local_crosses_midnight() {
        // 2024-01-15 23:30:00 UTC is already the 16th in Rome (CET)
        let local = to_local(1_705_361_400, chrono_tz::Europe::Rome).unwrap();
        assert_eq!(local.day(), 16);
        assert_eq!(local.hour(), 0);
    }

    #[test]
    fn test_local_midnight_epoch() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        // Midnight CEST is 22:00 UTC the previous day
        assert_eq!(
            local_midnight_epoch(date, chrono_tz::Europe::Rome),
            1_717_192_800
        );
        assert_eq!(local_midnight_epoch(date, chrono_tz::UTC), 1_717_200_000);
    }
}
