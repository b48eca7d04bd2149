//! Time source for note ids and display dates.

use chrono::{Local, NaiveDate, Utc};

/// Display date format, e.g. `January 31, 2025`.
const DISPLAY_DATE_FORMAT: &str = "%B %-d, %Y";

/// Supplies the current instant to the note store.
pub trait Clock {
    /// Unix epoch milliseconds.
    fn now_millis(&self) -> i64;
    /// Calendar date in the user's local time zone.
    fn today(&self) -> NaiveDate;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock frozen at a given instant and date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub millis: i64,
    pub date: NaiveDate,
}

impl FixedClock {
    pub fn new(millis: i64, date: NaiveDate) -> Self {
        Self { millis, date }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.millis
    }

    fn today(&self) -> NaiveDate {
        self.date
    }
}

/// Formats a date the way note cards display it.
pub fn format_display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::format_display_date;
    use chrono::NaiveDate;

    #[test]
    fn display_date_uses_long_month_without_padding() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 5).expect("valid date");
        assert_eq!(format_display_date(date), "January 5, 2025");
    }
}
