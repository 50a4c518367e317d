use chrono::{DateTime, Datelike, NaiveDate, Utc};

/// Tags identifying the day, ISO week, month and year a visit falls into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodTags {
    pub date: String,
    pub week: String,
    pub month: String,
    pub year: i32,
}

impl PeriodTags {
    pub fn at(now: DateTime<Utc>) -> Self {
        let day = now.date_naive();
        Self {
            date: date_key(day),
            week: week_key(day),
            month: month_key(day),
            year: day.year(),
        }
    }
}

fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

// Week-based year, so late-December days in week 1 carry the next year.
fn week_key(date: NaiveDate) -> String {
    let iso = date.iso_week();
    format!("{}-{}", iso.year(), iso.week())
}

fn month_key(date: NaiveDate) -> String {
    format!("{}-{}", date.year(), date.month())
}
