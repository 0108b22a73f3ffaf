use chrono::{Local, NaiveDate};

/// Calendar day in the caller's local time zone.
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// `March 01, 2024`
pub fn long_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

/// `Mar 01, 2024`
pub fn short_date(date: NaiveDate) -> String {
    date.format("%b %d, %Y").to_string()
}
