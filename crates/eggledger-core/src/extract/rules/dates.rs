//! Permissive date parsing for order headers.

use chrono::{Datelike, Local, NaiveDate};

use super::patterns::DATE_NUMERIC_TRIPLE;

/// Formats tried in order before the numeric fallback.
const DATE_FORMATS: &[&str] = &[
    "%B %d, %Y", // March 6, 2024
    "%b %d, %Y", // Mar 6, 2024
    "%m/%d/%Y",  // 03/06/2024
    "%Y-%m-%d",  // 2024-03-06
    "%d %B %Y",  // 6 March 2024
    "%d %b %Y",  // 6 Mar 2024
    "%B %d %Y",  // March 6 2024
    "%b %d %Y",  // Mar 6 2024
    "%m-%d-%Y",  // 03-06-2024
    "%Y/%m/%d",  // 2024/03/06
];

/// Parse a date in any of the supported human formats.
///
/// Falls back to the first `month/day/year` numeric triple in the text,
/// reading a 2-digit year as 20xx.
pub fn try_parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    // chrono's %Y also takes 1-3 digit years; those belong to the fallback.
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, fmt) {
            if (1000..=9999).contains(&date.year()) {
                return Some(date);
            }
        }
    }

    let caps = DATE_NUMERIC_TRIPLE.captures(text)?;
    let month: u32 = caps[1].parse().ok()?;
    let day: u32 = caps[2].parse().ok()?;
    let year: i32 = if caps[3].len() == 2 {
        format!("20{}", &caps[3]).parse().ok()?
    } else {
        caps[3].parse().ok()?
    };

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse a date, falling back to today's local date.
///
/// Empty or unrecognized input yields today, so a bad header never stops
/// a batch import.
pub fn parse_flexible_date(text: &str) -> NaiveDate {
    try_parse_date(text).unwrap_or_else(|| {
        tracing::debug!(input = text, "unrecognized date, using today");
        Local::now().date_naive()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_equivalent_formats() {
        let expected = ymd(2024, 3, 6);

        assert_eq!(parse_flexible_date("March 6, 2024"), expected);
        assert_eq!(parse_flexible_date("03/06/2024"), expected);
        assert_eq!(parse_flexible_date("2024-03-06"), expected);
    }

    #[test]
    fn test_named_month_variants() {
        let expected = ymd(2024, 3, 6);

        assert_eq!(try_parse_date("Mar 6, 2024"), Some(expected));
        assert_eq!(try_parse_date("6 March 2024"), Some(expected));
        assert_eq!(try_parse_date("6 Mar 2024"), Some(expected));
        assert_eq!(try_parse_date("March 6 2024"), Some(expected));
        assert_eq!(try_parse_date("  Mar 6 2024  "), Some(expected));
    }

    #[test]
    fn test_numeric_variants() {
        let expected = ymd(2024, 3, 6);

        assert_eq!(try_parse_date("03-06-2024"), Some(expected));
        assert_eq!(try_parse_date("2024/03/06"), Some(expected));
    }

    #[test]
    fn test_fallback_triple_in_text() {
        assert_eq!(try_parse_date("Placed on 3/6/24 at noon"), Some(ymd(2024, 3, 6)));
        assert_eq!(try_parse_date("Order date: 12 25 2023"), Some(ymd(2023, 12, 25)));
    }

    #[test]
    fn test_two_digit_years() {
        assert_eq!(try_parse_date("3/6/24"), Some(ymd(2024, 3, 6)));
        assert_eq!(try_parse_date("03-06-24"), Some(ymd(2024, 3, 6)));
        assert_eq!(try_parse_date("Mar 6, 24"), None);
    }

    #[test]
    fn test_invalid_dates() {
        assert_eq!(try_parse_date(""), None);
        assert_eq!(try_parse_date("yesterday"), None);
        assert_eq!(try_parse_date("13/45/2024"), None);
    }

    #[test]
    fn test_fallback_to_today() {
        let before = Local::now().date_naive();
        let parsed = parse_flexible_date("");
        let after = Local::now().date_naive();
        assert!(parsed == before || parsed == after);

        let parsed = parse_flexible_date("not a date");
        assert!(parsed >= before && parsed <= Local::now().date_naive());
    }
}
