//! Shared utility functions used across multiple modules.

/// Trim draft text and reject whitespace-only input.
///
/// Returns `None` when nothing but whitespace remains.
pub fn normalize_draft(value: &str) -> Option<&str> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Render a number of seconds as zero-padded `MM:SS`.
pub fn format_clock(total_seconds: u64) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Render a clip duration as `MM:SS`, rounding to the nearest second and never
/// showing less than one second.
pub fn format_voice_duration(duration_ms: u64) -> String {
    let total_seconds = duration_ms.saturating_add(500) / 1000;
    format_clock(total_seconds.max(1))
}

/// Truncate text to at most `max_chars` characters on its first line.
pub fn preview_line(value: &str, max_chars: usize) -> String {
    value
        .lines()
        .next()
        .unwrap_or("")
        .chars()
        .take(max_chars)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_draft_rejects_whitespace() {
        assert_eq!(normalize_draft(""), None);
        assert_eq!(normalize_draft(" \n\t "), None);
    }

    #[test]
    fn normalize_draft_trims_value() {
        assert_eq!(normalize_draft("  hello \n"), Some("hello"));
        assert_eq!(normalize_draft("line 1\nline 2\n"), Some("line 1\nline 2"));
    }

    #[test]
    fn format_clock_pads_minutes_and_seconds() {
        assert_eq!(format_clock(900), "15:00");
        assert_eq!(format_clock(61), "01:01");
        assert_eq!(format_clock(0), "00:00");
    }

    #[test]
    fn format_voice_duration_rounds_and_floors_at_one_second() {
        assert_eq!(format_voice_duration(0), "00:01");
        assert_eq!(format_voice_duration(500), "00:01");
        assert_eq!(format_voice_duration(1_499), "00:01");
        assert_eq!(format_voice_duration(1_500), "00:02");
        assert_eq!(format_voice_duration(75_000), "01:15");
    }

    #[test]
    fn preview_line_takes_first_line() {
        assert_eq!(preview_line("First line\nSecond", 50), "First line");
        assert_eq!(preview_line("First line", 5), "First");
    }
}
