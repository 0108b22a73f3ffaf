use chrono::{Duration, NaiveDate};
use leptos::*;

use crate::utils::time::iso_date;

/// Days shown in an employee's history when no range is given.
pub const DEFAULT_HISTORY_DAYS: i64 = 30;

#[derive(Clone, Copy)]
pub struct HistoryRangeForm {
    from: RwSignal<String>,
    to: RwSignal<String>,
}

impl HistoryRangeForm {
    pub fn new() -> Self {
        Self {
            from: create_rw_signal(String::new()),
            to: create_rw_signal(String::new()),
        }
    }

    pub fn start_date_signal(&self) -> RwSignal<String> {
        self.from
    }

    pub fn end_date_signal(&self) -> RwSignal<String> {
        self.to
    }

    pub fn set_range(&self, from: NaiveDate, to: NaiveDate) {
        self.from.set(iso_date(from));
        self.to.set(iso_date(to));
    }

    pub fn to_range(&self) -> Result<(Option<NaiveDate>, Option<NaiveDate>), String> {
        let from = parse_date_input(
            &self.from.get_untracked(),
            "Start date must be in YYYY-MM-DD format.",
        )?;
        let to = parse_date_input(
            &self.to.get_untracked(),
            "End date must be in YYYY-MM-DD format.",
        )?;
        if let (Some(f), Some(t)) = (from, to) {
            if f > t {
                return Err("Start date must not be after the end date.".into());
            }
        }
        Ok((from, to))
    }
}

impl Default for HistoryRangeForm {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_date_input(value: &str, error_message: &str) -> Result<Option<NaiveDate>, String> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map(Some)
        .map_err(|_| error_message.into())
}

/// The trailing window ending on `today`, inclusive.
pub fn recent_range(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (today - Duration::days(DEFAULT_HISTORY_DAYS - 1), today)
}
