use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};

/// Days back (exclusive) for which a relative label is used.
const RELATIVE_WINDOW_DAYS: i64 = 7;

/// Human label for when `timestamp` happened, seen from `now`.
///
/// Calendar days are counted in the time zone of `now`.
pub fn format_relative_date<Tz: TimeZone>(timestamp: &DateTime<Utc>, now: &DateTime<Tz>) -> String {
    let local = timestamp.with_timezone(&now.timezone()).date_naive();
    let days = (now.date_naive() - local).num_days();
    match days {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        d if d > 1 && d < RELATIVE_WINDOW_DAYS => format!("{d} days ago"),
        _ => format_date(local),
    }
}

/// `Mar 5, 2024` style date.
pub fn format_date(date: NaiveDate) -> String {
    format!("{} {}, {}", month_label(date.month()), date.day(), date.year())
}

/// True when both instants fall in the same calendar month of `now`'s time zone.
pub fn same_month<Tz: TimeZone>(timestamp: &DateTime<Utc>, now: &DateTime<Tz>) -> bool {
    let local = timestamp.with_timezone(&now.timezone());
    local.year() == now.year() && local.month() == now.month()
}

pub fn month_label(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "",
    }
}
