// src/dates.rs

use chrono::{Datelike, Months, NaiveDate};
use std::fmt;

use crate::error::{HarvestError, Result};

/// Where a run picks up: the first day not stored yet and the month it stops at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResumePoint {
    pub first_covered_date: NaiveDate,
    pub present_month_start: NaiveDate,
    pub first_month_day: u32,
}

impl ResumePoint {
    /// Every month from the first covered one through the present month, inclusive.
    pub fn months(&self) -> MonthRange {
        MonthRange {
            next: month_start(self.first_covered_date),
            last: self.present_month_start,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthQuery {
    pub month: u32,
    pub year: i32,
}

impl fmt::Display for MonthQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}.{}", self.month, self.year)
    }
}

pub struct MonthRange {
    next: NaiveDate,
    last: NaiveDate,
}

impl Iterator for MonthRange {
    type Item = MonthQuery;

    fn next(&mut self) -> Option<MonthQuery> {
        if self.next > self.last {
            return None;
        }
        let query = MonthQuery {
            month: self.next.month(),
            year: self.next.year(),
        };
        self.next = advance_one_calendar_month(self.next);
        Some(query)
    }
}

/// Parse a stored `DD.MM.YYYY` date and derive the resume point from it.
pub fn parse_last_stored_date(text: &str, today: NaiveDate) -> Result<ResumePoint> {
    let stored = parse_day_month_year(text).ok_or_else(|| HarvestError::MalformedDate {
        text: text.to_string(),
    })?;
    let first_covered_date = stored
        .succ_opt()
        .ok_or_else(|| HarvestError::MalformedDate {
            text: text.to_string(),
        })?;

    Ok(ResumePoint {
        first_covered_date,
        present_month_start: present_month_start(today),
        first_month_day: first_covered_date.day(),
    })
}

/// First day of the month containing `today`.
pub fn present_month_start(today: NaiveDate) -> NaiveDate {
    month_start(today)
}

/// Same day of month, one calendar month later.
pub fn advance_one_calendar_month(date: NaiveDate) -> NaiveDate {
    date.checked_add_months(Months::new(1))
        .unwrap_or(NaiveDate::MAX)
}

fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn parse_day_month_year(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.len() != 10 || !s.is_ascii() || &s[2..3] != "." || &s[5..6] != "." {
        return None;
    }
    let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    let (day, month, year) = (&s[0..2], &s[3..5], &s[6..10]);
    if !digits(day) || !digits(month) || !digits(year) {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}
