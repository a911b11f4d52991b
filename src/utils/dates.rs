use chrono::{Datelike, NaiveDate, NaiveDateTime};
use mongodb::bson::Document;

/// Format used by the web client for `requestDate` / `approveDate`,
/// e.g. `07-10-2026 09:15am`.
pub const REQUEST_DATE_FORMAT: &str = "%d-%m-%Y %I:%M%p";
const SPACED_MERIDIEM_FORMAT: &str = "%d-%m-%Y %I:%M %p";
const REQUEST_DAY_FORMAT: &str = "%d-%m-%Y";

/// Parses a request date string. Accepts lower or upper case meridiem, with
/// or without a space before it, and a bare `DD-MM-YYYY` without the time part.
pub fn parse_request_date(raw: &str) -> Option<NaiveDateTime> {
    let normalized = raw.trim().to_ascii_uppercase();
    if normalized.is_empty() {
        return None;
    }

    NaiveDateTime::parse_from_str(&normalized, REQUEST_DATE_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(&normalized, SPACED_MERIDIEM_FORMAT))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(&normalized, REQUEST_DAY_FORMAT)
                .ok()
                .and_then(|day| day.and_hms_opt(0, 0, 0))
        })
}

/// True when the document's `requestDate` parses and falls in the same
/// calendar month and year as `today`.
pub fn requested_in_month(doc: &Document, today: NaiveDate) -> bool {
    match doc.get_str("requestDate") {
        Ok(raw) => parse_request_date(raw)
            .map(|date| date.year() == today.year() && date.month() == today.month())
            .unwrap_or(false),
        Err(_) => false,
    }
}

/// Keeps only the requests dated in `today`'s month.
pub fn retain_current_month(docs: Vec<Document>, today: NaiveDate) -> Vec<Document> {
    docs.into_iter()
        .filter(|doc| requested_in_month(doc, today))
        .collect()
}

/// Regex that pre-selects date strings in `today`'s month on the store side.
/// It is deliberately loose; `requested_in_month` makes the final call.
pub fn month_prefix_pattern(today: NaiveDate) -> String {
    format!(
        r"^\s*\d{{1,2}}-0?{}-{}(\s|$)",
        today.month(),
        today.year()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;
    use regex::Regex;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn parses_client_format() {
        let parsed = parse_request_date("07-10-2026 09:15pm").unwrap();
        assert_eq!(parsed.to_string(), "2026-10-07 21:15:00");

        assert!(parse_request_date("07-10-2026 09:15AM").is_some());
        assert_eq!(parse_request_date("07-10-2026 09:15 pm"), Some(parsed));
        assert!(parse_request_date("7-10-2026").is_some());
    }

    #[test]
    fn rejects_garbage() {
        for raw in ["", "   ", "2026-10-07", "31-02-2026 10:00am", "yesterday", "07-13-2026 10:00am"] {
            assert!(parse_request_date(raw).is_none(), "{raw}");
        }
    }

    #[test]
    fn keeps_only_current_month() {
        let docs = vec![
            doc! { "name": "in", "requestDate": "01-10-2026 08:00am" },
            doc! { "name": "last-day", "requestDate": "31-10-2026 11:59pm" },
            doc! { "name": "prev-month", "requestDate": "30-09-2026 10:00am" },
            doc! { "name": "prev-year", "requestDate": "18-10-2025 10:00am" },
            doc! { "name": "unparseable", "requestDate": "soon" },
            doc! { "name": "not-a-string", "requestDate": 20261018_i64 },
            doc! { "name": "missing" },
        ];

        let kept: Vec<String> = retain_current_month(docs, today())
            .into_iter()
            .map(|d| d.get_str("name").unwrap().to_string())
            .collect();

        assert_eq!(kept, vec!["in".to_string(), "last-day".to_string()]);
    }

    #[test]
    fn every_day_of_other_months_is_excluded() {
        for month in 1..=12u32 {
            for day in [1u32, 15, 28] {
                let raw = format!("{:02}-{:02}-2026 10:30am", day, month);
                let doc = doc! { "requestDate": raw.as_str() };
                assert_eq!(requested_in_month(&doc, today()), month == 10, "{raw}");
            }
        }
    }

    #[test]
    fn store_pattern_matches_same_strings_as_the_filter() {
        let pattern = Regex::new(&month_prefix_pattern(today())).unwrap();

        assert!(pattern.is_match("01-10-2026 08:00am"));
        assert!(pattern.is_match("5-10-2026"));
        assert!(pattern.is_match("07-10-2026 09:15 pm"));
        assert!(!pattern.is_match("01-11-2026 08:00am"));
        assert!(!pattern.is_match("01-10-2025 08:00am"));
        assert!(!pattern.is_match("01-10-20261 08:00am"));
    }
}
