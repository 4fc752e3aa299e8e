use chrono::{DateTime, Datelike, NaiveDate, Utc};

/// Strategy that maps a point in time to the start of its fiscal year.
pub trait FiscalCalendar: Send + Sync {
    fn year_start(&self, now: DateTime<Utc>) -> DateTime<Utc>;
}

impl<F> FiscalCalendar for F
where
    F: Fn(DateTime<Utc>) -> DateTime<Utc> + Send + Sync,
{
    fn year_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self(now)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("fiscal year cannot start on month {month} day {day}")]
pub struct InvalidFiscalYearStart {
    pub month: u32,
    pub day: u32,
}

/// Fiscal year beginning every year on a fixed month/day at 00:00 UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiscalYear {
    month: u32,
    day: u32,
}

impl Default for FiscalYear {
    fn default() -> Self {
        Self { month: 4, day: 1 }
    }
}

impl FiscalYear {
    /// Only dates that exist in every calendar year are accepted.
    pub fn new(month: u32, day: u32) -> Result<Self, InvalidFiscalYearStart> {
        // 2001 is not a leap year, so February 29 is refused here.
        NaiveDate::from_ymd_opt(2001, month, day).ok_or(InvalidFiscalYearStart { month, day })?;
        Ok(Self { month, day })
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn start_of(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let current = self.boundary(now.year());
        if now < current {
            self.boundary(now.year() - 1)
        } else {
            current
        }
    }

    fn boundary(&self, year: i32) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|midnight| midnight.and_utc())
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

impl FiscalCalendar for FiscalYear {
    fn year_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.start_of(now)
    }
}

/// Start of the fiscal year containing `now`, for the April 1 calendar.
pub fn fiscal_year_start(now: DateTime<Utc>) -> DateTime<Utc> {
    FiscalYear::default().start_of(now)
}
