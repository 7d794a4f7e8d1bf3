use crate::utils::error::{Result, SummaryError};
use chrono::{Datelike, Duration, NaiveDate};
use std::fmt;
use std::str::FromStr;

const MAX_DAYS: u32 = 365;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    LastMonth,
    LastWeek,
    LastNDays(u32),
}

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.from, self.to)
    }
}

impl Period {
    /// 以 `today` 為基準計算日期區間（不含今天）
    pub fn range(&self, today: NaiveDate) -> DateRange {
        match self {
            Period::LastMonth => {
                let this_month = today - Duration::days(today.day0() as i64);
                let to = this_month - Duration::days(1);
                let from = to - Duration::days(to.day0() as i64);
                DateRange { from, to }
            }
            Period::LastWeek => {
                let this_monday =
                    today - Duration::days(today.weekday().num_days_from_monday() as i64);
                DateRange {
                    from: this_monday - Duration::days(7),
                    to: this_monday - Duration::days(1),
                }
            }
            Period::LastNDays(days) => DateRange {
                from: today - Duration::days(*days as i64),
                to: today - Duration::days(1),
            },
        }
    }

    pub fn label(&self) -> String {
        match self {
            Period::LastMonth => "last month".to_string(),
            Period::LastWeek => "last week".to_string(),
            Period::LastNDays(days) => format!("last {} days", days),
        }
    }
}

impl FromStr for Period {
    type Err = SummaryError;

    fn from_str(s: &str) -> Result<Self> {
        let incorrect = || SummaryError::expected(format!("Incorrect period \"{}\"", s));

        match s {
            "lastmonth" => Ok(Period::LastMonth),
            "lastweek" => Ok(Period::LastWeek),
            _ => {
                let days = s
                    .strip_prefix("lastndays:")
                    .and_then(|n| n.parse::<u32>().ok())
                    .ok_or_else(incorrect)?;
                if days == 0 || days > MAX_DAYS {
                    return Err(incorrect());
                }
                Ok(Period::LastNDays(days))
            }
        }
    }
}
