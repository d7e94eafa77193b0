//! Calendar month periods used for budgets and analytics.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthPeriod {
    /// Calendar year.
    pub year: i32,
    /// Month number (1-12).
    pub month: u32,
}

impl MonthPeriod {
    /// Returns the month containing `date`.
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// First day of the month.
    #[must_use]
    pub fn start_date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// First day of the following month (exclusive upper bound).
    #[must_use]
    pub fn end_date_exclusive(&self) -> NaiveDate {
        self.start_date()
            .checked_add_months(Months::new(1))
            .unwrap_or(NaiveDate::MAX)
    }

    /// The month before this one.
    #[must_use]
    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// The `count` months ending with this one, oldest first.
    #[must_use]
    pub fn trailing(&self, count: u32) -> Vec<Self> {
        let mut months = Vec::with_capacity(count as usize);
        let mut current = *self;
        for _ in 0..count {
            months.push(current);
            current = current.previous();
        }
        months.reverse();
        months
    }

    /// Short display label, e.g. "Mar 2024".
    #[must_use]
    pub fn label(&self) -> String {
        self.start_date().format("%b %Y").to_string()
    }
}

impl std::fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_bounds() {
        let month = MonthPeriod::containing(date(2024, 2, 17));
        assert_eq!(month.start_date(), date(2024, 2, 1));
        assert_eq!(month.end_date_exclusive(), date(2024, 3, 1));
        assert_eq!(MonthPeriod::containing(date(2024, 2, 29)), month);
        assert_ne!(MonthPeriod::containing(month.end_date_exclusive()), month);
    }

    #[test]
    fn test_previous_wraps_year() {
        let january = MonthPeriod { year: 2024, month: 1 };
        assert_eq!(january.previous(), MonthPeriod { year: 2023, month: 12 });
    }

    #[test]
    fn test_trailing_oldest_first() {
        let month = MonthPeriod { year: 2024, month: 2 };
        let months: Vec<String> = month.trailing(3).iter().map(ToString::to_string).collect();
        assert_eq!(months, vec!["2023-12", "2024-01", "2024-02"]);
        assert!(month.trailing(0).is_empty());
    }

    #[test]
    fn test_label() {
        assert_eq!(MonthPeriod { year: 2024, month: 3 }.label(), "Mar 2024");
    }
}
