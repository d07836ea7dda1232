use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

/// Parses the dataset's start timestamps: UTC, formatted `YYYY-MM-DD HHmm`
/// with no colon in the time part. The time part may be absent. Unparsable
/// values degrade to the Unix epoch (which sorts oldest) rather than failing.
pub fn parse_start_timestamp(raw: &str) -> DateTime<Utc> {
    parse_opt(raw).unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

fn parse_opt(raw: &str) -> Option<DateTime<Utc>> {
    let mut parts = raw.trim().split_whitespace();
    let date_part = parts.next()?;
    let time_part = parts.next().unwrap_or("0000");
    let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()?;
    let (hour, minute) = split_hhmm(time_part)?;
    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
    Some(Utc.from_utc_datetime(&date.and_time(time)))
}

// First two digits are the hour, the remainder is the minute padded on the
// right: "2052" -> 20:52, "20" -> 20:00. Out-of-range parts fail the parse.
fn split_hhmm(time_part: &str) -> Option<(u32, u32)> {
    if time_part.is_empty()
        || time_part.len() > 4
        || !time_part.chars().all(|c| c.is_ascii_digit())
    {
        return None;
    }
    let (hour_str, minute_str) = if time_part.len() >= 2 {
        time_part.split_at(2)
    } else {
        (time_part, "")
    };
    let hour = hour_str.parse().ok()?;
    let mut minute_str = minute_str.to_string();
    while minute_str.len() < 2 {
        minute_str.push('0');
    }
    let minute = minute_str.parse().ok()?;
    Some((hour, minute))
}

/// Display form for awarded dates, e.g. "09 Mar 2025".
pub fn format_awarded(date: DateTime<Utc>) -> String {
    date.format("%d %b %Y").to_string()
}
