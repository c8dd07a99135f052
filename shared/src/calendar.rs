use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Days, Utc};
use serde_json::Value;

const DAY_SECS: i64 = 86_400;

/// Parse a submission calendar into unix-day timestamp -> submission count.
///
/// The host API ships the calendar as a JSON object serialized into a string;
/// a plain object is accepted too. Anything unparseable yields an empty map,
/// and individual malformed entries are skipped.
pub fn parse_submission_calendar(raw: &Value) -> BTreeMap<i64, u64> {
    let decoded;
    let object = match raw {
        Value::Object(map) => map,
        Value::String(text) => {
            decoded = serde_json::from_str::<Value>(text).ok();
            match &decoded {
                Some(Value::Object(map)) => map,
                _ => return BTreeMap::new(),
            }
        }
        _ => return BTreeMap::new(),
    };

    object
        .iter()
        .filter_map(|(key, value)| {
            let day = key.trim().parse::<i64>().ok()?;
            let count = match value {
                Value::Number(n) => n.as_u64()?,
                Value::String(s) => s.trim().parse::<u64>().ok()?,
                _ => return None,
            };
            Some((day, count))
        })
        .collect()
}

/// 00:00 UTC of the most recent Sunday (today, if today is Sunday).
pub fn week_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let back = u64::from(now.weekday().num_days_from_sunday());
    now.date_naive()
        .checked_sub_days(Days::new(back))
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .unwrap_or(now)
}

/// Submissions counted since the start of the current week.
pub fn weekly_ac_count(calendar: &BTreeMap<i64, u64>, now: DateTime<Utc>) -> u64 {
    let start = week_start(now).timestamp();
    calendar.range(start..).map(|(_, count)| *count).sum()
}

/// Submissions in the trailing seven days, as shown on friend cards.
pub fn rolling_seven_day_count(calendar: &BTreeMap<i64, u64>, now: DateTime<Utc>) -> u64 {
    let start = now.timestamp() - 7 * DAY_SECS;
    calendar.range(start..).map(|(_, count)| *count).sum()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use super::{parse_submission_calendar, rolling_seven_day_count, week_start, weekly_ac_count};

    #[test]
    fn week_start_rewinds_to_sunday_midnight() {
        // Wednesday 2024-03-13 15:30 UTC -> Sunday 2024-03-10 00:00 UTC
        let now = Utc.with_ymd_and_hms(2024, 3, 13, 15, 30, 0).unwrap();
        let expected = Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap();
        assert_eq!(week_start(now), expected);
    }

    #[test]
    fn week_start_on_sunday_is_same_day() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 23, 59, 59).unwrap();
        let expected = Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap();
        assert_eq!(week_start(now), expected);
    }

    #[test]
    fn weekly_sum_only_counts_entries_since_sunday() {
        let now = Utc.with_ymd_and_hms(2024, 3, 13, 12, 0, 0).unwrap();
        let before = Utc.with_ymd_and_hms(2024, 3, 9, 0, 0, 0).unwrap().timestamp();
        let after = Utc.with_ymd_and_hms(2024, 3, 11, 0, 0, 0).unwrap().timestamp();
        let calendar = BTreeMap::from([(before, 3), (after, 5)]);
        assert_eq!(weekly_ac_count(&calendar, now), 5);
    }

    #[test]
    fn entry_exactly_at_week_start_counts() {
        let now = Utc.with_ymd_and_hms(2024, 3, 13, 12, 0, 0).unwrap();
        let sunday = Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap().timestamp();
        let calendar = BTreeMap::from([(sunday, 2)]);
        assert_eq!(weekly_ac_count(&calendar, now), 2);
    }

    #[test]
    fn seven_day_window_is_rolling() {
        let now = Utc.with_ymd_and_hms(2024, 3, 13, 12, 0, 0).unwrap();
        let eight_days_ago = now.timestamp() - 8 * 86_400;
        let two_days_ago = now.timestamp() - 2 * 86_400;
        let calendar = BTreeMap::from([(eight_days_ago, 7), (two_days_ago, 1)]);
        assert_eq!(rolling_seven_day_count(&calendar, now), 1);
    }

    #[test]
    fn parses_string_encoded_calendar() {
        let raw = json!("{\"1710028800\": 4, \"1710115200\": \"2\"}");
        let calendar = parse_submission_calendar(&raw);
        assert_eq!(calendar.get(&1_710_028_800), Some(&4));
        assert_eq!(calendar.get(&1_710_115_200), Some(&2));
    }

    #[test]
    fn parses_object_calendar() {
        let raw = json!({ "1710028800": 1 });
        assert_eq!(parse_submission_calendar(&raw).len(), 1);
    }

    #[test]
    fn invalid_calendar_is_empty_and_sums_to_zero() {
        let now = Utc.with_ymd_and_hms(2024, 3, 13, 12, 0, 0).unwrap();
        for raw in [json!("not json"), json!("[1, 2]"), json!(17), json!(null)] {
            let calendar = parse_submission_calendar(&raw);
            assert!(calendar.is_empty());
            assert_eq!(weekly_ac_count(&calendar, now), 0);
        }
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let raw = json!({ "abc": 3, "1710028800": -1, "1710115200": 6 });
        let calendar = parse_submission_calendar(&raw);
        assert_eq!(calendar.len(), 1);
        assert_eq!(calendar.get(&1_710_115_200), Some(&6));
    }
}
