use chrono::{DateTime, Utc};

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    // The backend serializes LocalDateTime without an offset.
    chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Compact counter: 950, 1.2K, 3.4M.
pub fn format_number(n: u64) -> String {
    fn scaled(n: u64, unit: u64, suffix: &str) -> String {
        let tenths = n / (unit / 10);
        if tenths % 10 == 0 {
            format!("{}{}", tenths / 10, suffix)
        } else {
            format!("{}.{}{}", tenths / 10, tenths % 10, suffix)
        }
    }

    match n {
        0..=999 => n.to_string(),
        1_000..=999_999 => scaled(n, 1_000, "K"),
        _ => scaled(n, 1_000_000, "M"),
    }
}

/// Relative age for recent timestamps ("now", "5m", "3h", "2d"), calendar
/// date after a week. Unparseable input is returned as is.
pub fn format_date(raw: &str, now: DateTime<Utc>) -> String {
    let Some(ts) = parse_timestamp(raw) else {
        return raw.to_string();
    };

    let age = now.signed_duration_since(ts);
    if age.num_minutes() < 1 {
        "now".to_string()
    } else if age.num_hours() < 1 {
        format!("{}m", age.num_minutes())
    } else if age.num_days() < 1 {
        format!("{}h", age.num_hours())
    } else if age.num_days() < 7 {
        format!("{}d", age.num_days())
    } else {
        ts.format("%b %-d, %Y").to_string()
    }
}

pub fn format_join_date(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|ts| ts.format("%B %Y").to_string())
        .unwrap_or_else(|| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn compact_numbers() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1K");
        assert_eq!(format_number(1200), "1.2K");
        assert_eq!(format_number(3_450_000), "3.4M");
        assert_eq!(format_number(u64::MAX), "18446744073709.5M");
    }

    #[test]
    fn relative_dates() {
        let now = Utc::now();
        assert_eq!(format_date(&now.to_rfc3339(), now), "now");
        assert_eq!(format_date(&(now - Duration::minutes(5)).to_rfc3339(), now), "5m");
        assert_eq!(format_date(&(now - Duration::hours(3)).to_rfc3339(), now), "3h");
        assert_eq!(format_date(&(now - Duration::days(2)).to_rfc3339(), now), "2d");
        assert_eq!(format_date("2023-01-01T00:00:00Z", now), "Jan 1, 2023");
        assert_eq!(format_date("yesterday-ish", now), "yesterday-ish");
    }

    #[test]
    fn join_dates_accept_offsetless_timestamps() {
        assert_eq!(format_join_date("2022-08-10T00:00:00Z"), "August 2022");
        assert_eq!(format_join_date("2023-02-15T10:20:30.123"), "February 2023");
    }
}
