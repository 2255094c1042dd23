//! Human-readable distance between two instants ("3 minutes", "about 2 hours").
//!
//! Month and year lengths are approximated as 30 and 360 days; this only
//! feeds display text.

use chrono::{DateTime, Utc};

const MINUTES_IN_DAY: i64 = 1440;
const MINUTES_IN_ALMOST_TWO_DAYS: i64 = 2520;
const MINUTES_IN_MONTH: i64 = 43200;
const MINUTES_IN_TWO_MONTHS: i64 = 86400;

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

fn rounded_div(value: i64, divisor: i64) -> i64 {
    (value as f64 / divisor as f64).round() as i64
}

/// Distance from `from` to `to` in words. A `from` later than `to` counts as zero.
///
/// With `include_seconds`, distances under two minutes are bucketed more
/// finely ("less than 10 seconds", "half a minute", ...).
pub fn format_distance(from: DateTime<Utc>, to: DateTime<Utc>, include_seconds: bool) -> String {
    let seconds = (to - from).num_seconds().max(0);
    let minutes = rounded_div(seconds, 60);

    if minutes < 2 {
        if include_seconds {
            let text = match seconds {
                s if s < 5 => "less than 5 seconds",
                s if s < 10 => "less than 10 seconds",
                s if s < 20 => "less than 20 seconds",
                s if s < 40 => "half a minute",
                s if s < 60 => "less than a minute",
                _ => "1 minute",
            };
            return text.to_string();
        }
        return if minutes == 0 {
            "less than a minute".to_string()
        } else {
            "1 minute".to_string()
        };
    }

    if minutes < 45 {
        return plural(minutes, "minute");
    }
    if minutes < 90 {
        return "about 1 hour".to_string();
    }
    if minutes < MINUTES_IN_DAY {
        return format!("about {}", plural(rounded_div(minutes, 60), "hour"));
    }
    if minutes < MINUTES_IN_ALMOST_TWO_DAYS {
        return "1 day".to_string();
    }
    if minutes < MINUTES_IN_MONTH {
        return plural(rounded_div(minutes, MINUTES_IN_DAY), "day");
    }
    if minutes < MINUTES_IN_TWO_MONTHS {
        return format!("about {}", plural(rounded_div(minutes, MINUTES_IN_MONTH), "month"));
    }

    let months = minutes / MINUTES_IN_MONTH;
    if months < 12 {
        return plural(rounded_div(minutes, MINUTES_IN_MONTH), "month");
    }

    let years = months / 12;
    match months % 12 {
        m if m < 3 => format!("about {}", plural(years, "year")),
        m if m < 9 => format!("over {}", plural(years, "year")),
        _ => format!("almost {}", plural(years + 1, "year")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap()
    }

    fn after(seconds: i64, include_seconds: bool) -> String {
        format_distance(base(), base() + Duration::seconds(seconds), include_seconds)
    }

    #[test]
    fn test_seconds_buckets() {
        assert_eq!(after(3, true), "less than 5 seconds");
        assert_eq!(after(7, true), "less than 10 seconds");
        assert_eq!(after(15, true), "less than 20 seconds");
        assert_eq!(after(30, true), "half a minute");
        assert_eq!(after(50, true), "less than a minute");
        assert_eq!(after(75, true), "1 minute");
    }

    #[test]
    fn test_under_two_minutes_without_seconds() {
        assert_eq!(after(10, false), "less than a minute");
        assert_eq!(after(30, false), "1 minute");
        assert_eq!(after(80, false), "1 minute");
    }

    #[test]
    fn test_minutes_and_hours() {
        assert_eq!(after(10 * 60, false), "10 minutes");
        assert_eq!(after(60 * 60, false), "about 1 hour");
        assert_eq!(after(3 * 3600, false), "about 3 hours");
    }

    #[test]
    fn test_days_and_months() {
        assert_eq!(after(25 * 3600, false), "1 day");
        assert_eq!(after(5 * 86400, false), "5 days");
        assert_eq!(after(40 * 86400, false), "about 1 month");
        assert_eq!(after(45 * 86400, false), "about 2 months");
        assert_eq!(after(100 * 86400, false), "3 months");
    }

    #[test]
    fn test_years() {
        assert_eq!(after(400 * 86400, false), "about 1 year");
        assert_eq!(after(880 * 86400, false), "over 2 years");
        assert_eq!(after(1060 * 86400, false), "almost 3 years");
    }

    #[test]
    fn test_future_counts_as_zero() {
        assert_eq!(after(-120, true), "less than 5 seconds");
        assert_eq!(after(-120, false), "less than a minute");
    }
}
