use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Shorten `s` to at most `max_width` display columns, ending with "..."
/// when something was cut.
pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let budget = max_width.saturating_sub(3);
    let mut out = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > budget {
            break;
        }
        out.push(ch);
        width += w;
    }
    out.push_str("...");
    out
}

/// Success rate as shown to the user, two decimals.
pub fn format_rate(rate: f64) -> String {
    format!("{:.2}%", rate)
}

pub fn export_file_name<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("flashdeck-export-{}.json", now.format("%Y%m%d-%H%M%S"))
}

/// Default path offered by the export prompt.
pub fn default_export_path<Tz: TimeZone>(dir: &Path, now: &DateTime<Tz>) -> PathBuf
where
    Tz::Offset: std::fmt::Display,
{
    dir.join(export_file_name(now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_truncate_string_no_truncation() {
        assert_eq!(truncate_string("Short string", 20), "Short string");
    }

    #[test]
    fn test_truncate_string_with_truncation() {
        let result = truncate_string("This is a very long string that should be truncated", 20);
        assert_eq!(result, "This is a very lo...");
        assert!(result.width() <= 20);
    }

    #[test]
    fn test_truncate_string_exact_length() {
        assert_eq!(truncate_string("Exactly twenty!!!!!!", 20), "Exactly twenty!!!!!!");
    }

    #[test]
    fn test_truncate_string_wide_chars() {
        let result = truncate_string("日本語のテキストです", 9);
        assert_eq!(result, "日本語...");
        assert!(result.width() <= 9);
    }

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(200.0 / 3.0), "66.67%");
        assert_eq!(format_rate(0.0), "0.00%");
        assert_eq!(format_rate(100.0), "100.00%");
    }

    #[test]
    fn test_default_export_path() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(
            default_export_path(Path::new("/exports"), &now),
            PathBuf::from("/exports/flashdeck-export-20240309-140507.json")
        );
    }
}
