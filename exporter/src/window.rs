use crate::errors::{Error, Result};
use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};

pub const MS_PER_DAY: i64 = 86_400_000;
const MINUTES_PER_DAY: f64 = 1440.0;
const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// Operator input format, read as IST wall-clock time.
pub const INPUT_FORMAT: &str = "%d%m%Y %I:%M %p";
const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// India Standard Time, UTC+05:30.
pub fn ist() -> FixedOffset {
    FixedOffset::east_opt(IST_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Parses `DDMMYYYY HH:MM AM/PM` in IST into UTC milliseconds.
pub fn parse_ist(input: &str) -> Result<i64> {
    let input = input.trim();
    let naive = NaiveDateTime::parse_from_str(input, INPUT_FORMAT).map_err(|e| {
        Error::InvalidDateTime {
            input: input.to_string(),
            reason: e.to_string(),
        }
    })?;

    let local = ist()
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| Error::InvalidDateTime {
            input: input.to_string(),
            reason: "ambiguous local time".to_string(),
        })?;
    Ok(local.timestamp_millis())
}

/// Renders UTC milliseconds as IST `YYYY-MM-DD HH:MM:SS`.
pub fn format_ist(ts_ms: i64) -> String {
    match ist().timestamp_millis_opt(ts_ms).single() {
        Some(dt) => dt.format(DISPLAY_FORMAT).to_string(),
        None => ts_ms.to_string(),
    }
}

/// Points to request for `[start_ts, end_ts)` at one point per `interval_minutes`.
///
/// Rounds down, so a window the interval does not divide evenly is
/// undercounted. An empty or inverted window gives zero or less.
pub fn estimate_limit(start_ts: i64, end_ts: i64, interval_minutes: u32) -> i64 {
    let total_days = (end_ts - start_ts) as f64 / MS_PER_DAY as f64;
    let points_per_day = MINUTES_PER_DAY / f64::from(interval_minutes);
    (points_per_day * total_days).floor() as i64
}

/// A non-empty `[start_ts, end_ts)` range in UTC milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start_ts: i64,
    end_ts: i64,
}

impl TimeWindow {
    pub fn new(start_ts: i64, end_ts: i64) -> Result<Self> {
        if end_ts <= start_ts {
            return Err(Error::InvalidWindow { start_ts, end_ts });
        }
        Ok(Self { start_ts, end_ts })
    }

    /// The `days` days leading up to `now`.
    pub fn last_days(now: DateTime<Utc>, days: i64) -> Result<Self> {
        let start = now - Duration::days(days);
        Self::new(start.timestamp_millis(), now.timestamp_millis())
    }

    pub fn start_ts(&self) -> i64 {
        self.start_ts
    }

    pub fn end_ts(&self) -> i64 {
        self.end_ts
    }

    pub fn total_days(&self) -> f64 {
        (self.end_ts - self.start_ts) as f64 / MS_PER_DAY as f64
    }

    pub fn fetch_limit(&self, interval_minutes: u32) -> Result<u64> {
        if interval_minutes == 0 {
            return Err(Error::InvalidInterval);
        }
        let limit = estimate_limit(self.start_ts, self.end_ts, interval_minutes);
        Ok(limit.max(0) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_day_at_three_minutes() {
        assert_eq!(estimate_limit(0, MS_PER_DAY, 3), 480);
        let window = TimeWindow::new(0, MS_PER_DAY).unwrap();
        assert_eq!(window.fetch_limit(3).unwrap(), 480);
    }

    #[test]
    fn test_week_at_default_interval() {
        let window = TimeWindow::new(0, 7 * MS_PER_DAY).unwrap();
        assert_eq!(window.fetch_limit(3).unwrap(), 3360);
        assert_eq!(window.total_days(), 7.0);
    }

    #[test]
    fn test_uneven_interval_rounds_down() {
        // 10 minutes at a 3 minute interval is 3.33 points
        assert_eq!(estimate_limit(0, 10 * 60_000, 3), 3);
        // 1 day at 7 minutes is 205.7 points
        assert_eq!(estimate_limit(0, MS_PER_DAY, 7), 205);
    }

    #[test]
    fn test_empty_or_inverted_window() {
        assert_eq!(estimate_limit(1000, 1000, 3), 0);
        assert!(estimate_limit(MS_PER_DAY, 0, 3) < 0);
        assert!(matches!(
            TimeWindow::new(MS_PER_DAY, 0),
            Err(Error::InvalidWindow { .. })
        ));
        assert!(TimeWindow::new(5, 5).is_err());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let window = TimeWindow::new(0, MS_PER_DAY).unwrap();
        assert!(matches!(window.fetch_limit(0), Err(Error::InvalidInterval)));
    }

    #[test]
    fn test_parse_ist() {
        // 01 Jan 2024 05:30 AM IST is midnight UTC
        assert_eq!(parse_ist("01012024 05:30 AM").unwrap(), 1_704_067_200_000);
        assert_eq!(
            parse_ist(" 01012024 05:30 pm ").unwrap(),
            1_704_067_200_000 + 12 * 3_600_000
        );
    }

    #[test]
    fn test_parse_ist_rejects_bad_input() {
        assert!(parse_ist("2024-01-01 05:30").is_err());
        assert!(parse_ist("32012024 05:30 AM").is_err());
        assert!(parse_ist("01012024 13:30 PM").is_err());
        assert!(matches!(
            parse_ist(""),
            Err(Error::InvalidDateTime { .. })
        ));
    }

    #[test]
    fn test_format_ist() {
        assert_eq!(format_ist(1_704_067_200_000), "2024-01-01 05:30:00");
        assert_eq!(format_ist(0), "1970-01-01 05:30:00");
    }

    #[test]
    fn test_last_days() {
        let now = Utc.timestamp_millis_opt(10 * MS_PER_DAY).unwrap();
        let window = TimeWindow::last_days(now, 7).unwrap();
        assert_eq!(window.start_ts(), 3 * MS_PER_DAY);
        assert_eq!(window.end_ts(), 10 * MS_PER_DAY);
    }
}
