use chrono::{DateTime, Utc};

/// Lines of code shown in a preview
pub const CODE_PREVIEW_LINES: usize = 8;

pub fn format_date_time(date_time: &DateTime<Utc>) -> (String, String) {
    let date = date_time.format("%Y-%m-%d").to_string();
    let time = date_time.format("%H:%M:%S").to_string();
    (date, time)
}

/// First line of `text`, cut to at most `max_chars` characters with an
/// ellipsis when something was dropped.
pub fn summary_line(text: &str, max_chars: usize) -> String {
    let line = text.lines().map(|l| l.trim()).find(|l| !l.is_empty()).unwrap_or("");
    let truncated = line.chars().count() > max_chars || text.trim().lines().count() > 1;
    let mut summary: String = line.chars().take(max_chars).collect();
    if truncated {
        summary.push('…');
    }
    summary
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 { format!("1 {} ago", unit) } else { format!("{} {}s ago", n, unit) }
}

/// Coarse age of `date` seen from `now`, in the largest whole unit out of
/// days, hours and minutes. Anything under a minute, or in the future, is
/// "just now".
pub fn format_relative_date(date: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let diff = now.signed_duration_since(*date);

    if diff.num_days() > 0 {
        plural(diff.num_days(), "day")
    } else if diff.num_hours() > 0 {
        plural(diff.num_hours(), "hour")
    } else if diff.num_minutes() > 0 {
        plural(diff.num_minutes(), "minute")
    } else {
        "just now".to_string()
    }
}

/// Keeps the first `max_lines` lines of `code` and marks the cut with a
/// trailing `...` line.
pub fn truncate_code(code: &str, max_lines: usize) -> String {
    let lines: Vec<&str> = code.split('\n').collect();
    if lines.len() <= max_lines {
        return code.to_string();
    }
    let mut preview = lines[..max_lines].join("\n");
    preview.push_str("\n...");
    preview
}
