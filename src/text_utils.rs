use chrono::{DateTime, NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;
use unidecode::unidecode;

/// Turns heading or title text into a URL-safe anchor id.
///
/// This is the single slugification rule shared by the styling pass and the
/// table-of-contents builder. Both sides must produce byte-identical ids or
/// anchor links break silently.
pub fn slugify(text: &str) -> String {
    lazy_static! {
        static ref NON_WORD: Regex = Regex::new(r"[^\w\s]").unwrap();
        static ref SPACES: Regex = Regex::new(r"\s+").unwrap();
    }

    let text = unidecode(text).to_lowercase();
    let text = NON_WORD.replace_all(&text, "");
    SPACES.replace_all(text.trim(), "-").to_string()
}

/// Read time at 200 words per minute, rounded up, never below one minute.
pub fn read_time(word_count: usize) -> String {
    let minutes = std::cmp::max(1, word_count.div_ceil(200));
    format!("{} min read", minutes)
}

/// Parses the date shapes we accept in frontmatter. Returns None for
/// anything unparseable so the caller can fall back to "now".
pub fn parse_date(buf: &str) -> Option<NaiveDateTime> {
    let buf = buf.trim();
    if let Ok(date_time) = DateTime::parse_from_rfc3339(buf) {
        return Some(date_time.naive_utc());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(date_time) = NaiveDateTime::parse_from_str(buf, fmt) {
            return Some(date_time);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(buf, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    None
}

/// For file stems following the `YYYY-MM-DD-slug` convention, returns the
/// slug part after the date prefix.
pub fn strip_date_prefix(stem: &str) -> Option<&str> {
    lazy_static! {
        static ref DATED: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}-(.+)$").unwrap();
    }
    DATED.captures(stem).and_then(|cap| cap.get(1)).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  SEO & Growth  "), "seo-growth");
        assert_eq!(slugify("What's new in 2024?"), "whats-new-in-2024");
        assert_eq!(slugify("Crème brûlée"), "creme-brulee");
    }

    #[test]
    fn test_read_time() {
        assert_eq!(read_time(0), "1 min read");
        assert_eq!(read_time(199), "1 min read");
        assert_eq!(read_time(200), "1 min read");
        assert_eq!(read_time(201), "2 min read");
        assert_eq!(read_time(1000), "5 min read");
    }

    #[test]
    fn test_read_time_monotonic() {
        let mut last = 0;
        for words in [50, 100, 200, 400, 800, 1600] {
            let rendered = read_time(words);
            let minutes: usize = rendered.split(' ').next().unwrap().parse().unwrap();
            assert!(minutes >= last, "read time dropped at {} words", words);
            last = minutes;
        }
    }

    #[test]
    fn test_parse_date() {
        let date_time = parse_date("2024-03-01").unwrap();
        assert_eq!(date_time.to_string(), "2024-03-01 00:00:00");

        let date_time = parse_date("2024-03-01T10:42:32").unwrap();
        assert_eq!(date_time.to_string(), "2024-03-01 10:42:32");

        let date_time = parse_date("2024-03-01 10:42:32").unwrap();
        assert_eq!(date_time.to_string(), "2024-03-01 10:42:32");

        let date_time = parse_date("2024-03-01T10:42:32+00:00").unwrap();
        assert_eq!(date_time.to_string(), "2024-03-01 10:42:32");

        assert!(parse_date("first of march").is_none());
        assert!(parse_date("").is_none());
    }

    #[test]
    fn test_strip_date_prefix() {
        assert_eq!(strip_date_prefix("2024-03-01-my-post"), Some("my-post"));
        assert_eq!(strip_date_prefix("my-post"), None);
        assert_eq!(strip_date_prefix("2024-03-01-"), None);
    }
}
