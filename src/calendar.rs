//! Term calendar: which week of the term a date falls in.
//!
//! Weeks are counted from a fixed epoch Monday, the first day of the term.
//! Week 0 is an odd week, week 1 even, and so on.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::schedule::{WeekParity, Weekday};

/// Week numbering anchored at the first Monday of the term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WeekCalendar {
    /// Day 0 of the term
    pub epoch: NaiveDate,
}

impl Default for WeekCalendar {
    fn default() -> Self {
        Self {
            epoch: NaiveDate::from_ymd_opt(2024, 9, 2).unwrap_or_default(),
        }
    }
}

impl WeekCalendar {
    /// Create a calendar with the given epoch.
    pub fn new(epoch: NaiveDate) -> Self {
        Self { epoch }
    }

    /// Whole weeks between the epoch and `date`, rounded down.
    ///
    /// Dates before the epoch give negative week numbers.
    pub fn week_number(&self, date: NaiveDate) -> i64 {
        (date - self.epoch).num_days().div_euclid(7)
    }

    /// Odd or even week for `date`.
    pub fn week_parity(&self, date: NaiveDate) -> WeekParity {
        if self.week_number(date).rem_euclid(2) == 0 {
            WeekParity::Odd
        } else {
            WeekParity::Even
        }
    }

    /// Day of the week for `date`.
    pub fn weekday(&self, date: NaiveDate) -> Weekday {
        Weekday::from(date.weekday())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_epoch_is_a_monday() {
        let calendar = WeekCalendar::default();
        assert_eq!(calendar.epoch, date(2024, 9, 2));
        assert_eq!(calendar.weekday(calendar.epoch), Weekday::Monday);
    }

    #[test]
    fn test_epoch_day_is_odd_week() {
        let calendar = WeekCalendar::default();
        assert_eq!(calendar.week_parity(date(2024, 9, 2)), WeekParity::Odd);
        assert_eq!(calendar.week_parity(date(2024, 9, 8)), WeekParity::Odd);
        assert_eq!(calendar.week_parity(date(2024, 9, 9)), WeekParity::Even);
        assert_eq!(calendar.week_parity(date(2024, 9, 16)), WeekParity::Odd);
    }

    #[test]
    fn test_dates_before_epoch_round_down() {
        let calendar = WeekCalendar::default();
        assert_eq!(calendar.week_number(date(2024, 9, 1)), -1);
        assert_eq!(calendar.week_parity(date(2024, 9, 1)), WeekParity::Even);
        assert_eq!(calendar.week_number(date(2024, 8, 26)), -1);
        assert_eq!(calendar.week_number(date(2024, 8, 25)), -2);
    }

    #[test]
    fn test_custom_epoch() {
        let calendar = WeekCalendar::new(date(2025, 2, 10));
        assert_eq!(calendar.week_number(date(2025, 2, 24)), 2);
        assert_eq!(calendar.week_parity(date(2025, 2, 24)), WeekParity::Odd);
        assert_eq!(calendar.weekday(date(2025, 2, 27)), Weekday::Thursday);
    }
}
