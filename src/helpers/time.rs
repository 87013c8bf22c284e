use chrono::{Local, NaiveDateTime, TimeDelta, Utc};

/// Query timestamps are whole minutes in the account's local time.
pub const QUERY_TS_FORMAT: &str = "%Y-%m-%dT%H:%M:00";

pub fn now_i64() -> i64 {
    Utc::now().timestamp()
}

pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// `at` shifted by `offset_seconds`, formatted for the data query.
/// `None` when the shift leaves the representable calendar.
pub fn query_ts(at: NaiveDateTime, offset_seconds: i64) -> Option<String> {
    let shifted = at.checked_add_signed(TimeDelta::try_seconds(offset_seconds)?)?;
    Some(shifted.format(QUERY_TS_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ts: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(ts, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    #[test]
    fn query_ts_truncates_to_minute() {
        assert_eq!(query_ts(at("2024-05-01T10:00:45"), -300).unwrap(), "2024-05-01T09:55:00");
        assert_eq!(query_ts(at("2024-05-01T23:59:10"), 120).unwrap(), "2024-05-02T00:01:00");
    }

    #[test]
    fn query_ts_out_of_calendar() {
        assert!(query_ts(at("2024-05-01T10:00:00"), -10_000_000_000_000).is_none());
        assert!(query_ts(at("2024-05-01T10:00:00"), i64::MAX).is_none());
    }

    #[test]
    fn local_now_formats() {
        let ts = query_ts(local_now(), 0).unwrap();
        assert!(NaiveDateTime::parse_from_str(&ts, QUERY_TS_FORMAT).is_ok());
    }
}
