use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use unicode_width::UnicodeWidthChar;

/// "05:00 AM", "12:30 PM", "12:05 AM"
pub fn format_12h(t: NaiveTime) -> String {
    let (pm, hour) = t.hour12();
    format!("{:02}:{:02} {}", hour, t.minute(), if pm { "PM" } else { "AM" })
}

/// Wall clock with seconds, e.g. "08:04:09 PM".
pub fn format_clock(now: NaiveDateTime) -> String {
    let t = now.time();
    let (pm, hour) = t.hour12();
    format!(
        "{:02}:{:02}:{:02} {}",
        hour,
        t.minute(),
        t.second(),
        if pm { "PM" } else { "AM" }
    )
}

/// "Saturday, March 14, 2026"
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// Pad or truncate to a display width, counting wide glyphs correctly.
pub fn fit_width(s: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push_str(&" ".repeat(width - used));
    out
}
