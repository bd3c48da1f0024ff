use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A calendar month, used to bucket transactions and trips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    /// 1-based month
    pub month: u32,
}

impl YearMonth {
    pub fn from_date(date: NaiveDate) -> Self {
        YearMonth {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The month `n` months after this one
    pub fn plus_months(self, n: u32) -> Self {
        // u32::MAX / 12 leaves the year well inside i32
        let index = i64::from(self.year) * 12 + i64::from(self.month) - 1 + i64::from(n);
        YearMonth {
            year: index.div_euclid(12) as i32,
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    /// `None` once the year is outside the calendar chrono can represent
    pub fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Short label, e.g. "Oct 26"
    pub fn label(self) -> String {
        self.format_or_numeric("%b %y")
    }

    /// Long label, e.g. "October 2026"
    pub fn long_label(self) -> String {
        self.format_or_numeric("%B %Y")
    }

    fn format_or_numeric(self, fmt: &str) -> String {
        match self.first_day() {
            Some(day) => day.format(fmt).to_string(),
            None => self.to_string(),
        }
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Months left in the calendar year, counting the current month.
/// January gives 12, December gives 1.
pub fn months_remaining_in_year(reference_date: NaiveDate) -> u32 {
    12 - reference_date.month0()
}

pub fn start_of_year(reference_date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(reference_date.year(), 1, 1).expect("1 January always exists")
}

/// Reporting window ending at the reference date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Month,
    Quarter,
    Year,
}

impl Period {
    /// First day of the period containing `reference_date`
    pub fn start_date(self, reference_date: NaiveDate) -> NaiveDate {
        let month = match self {
            Period::Month => reference_date.month(),
            Period::Quarter => (reference_date.month0() / 3) * 3 + 1,
            Period::Year => 1,
        };
        NaiveDate::from_ymd_opt(reference_date.year(), month, 1).expect("valid month start")
    }

    pub fn display(self) -> &'static str {
        match self {
            Period::Month => "This Month",
            Period::Quarter => "This Quarter",
            Period::Year => "This Year",
        }
    }
}
