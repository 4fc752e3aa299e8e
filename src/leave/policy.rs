use chrono::{DateTime, Months, NaiveDate, Utc};
use std::fmt;

/// Which rule(s) kept an employee from submitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ineligibility {
    TenureTooShort,
    QuotaExhausted,
    Both,
}

impl fmt::Display for Ineligibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ineligibility::TenureTooShort => f.write_str("minimum tenure not reached"),
            Ineligibility::QuotaExhausted => f.write_str("yearly leave quota used up"),
            Ineligibility::Both => {
                f.write_str("minimum tenure not reached and yearly leave quota used up")
            }
        }
    }
}

/// Tenure and quota rules deciding whether a leave request may be filed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibilityPolicy {
    pub minimum_tenure_months: u32,
    pub yearly_quota: u32,
}

impl Default for EligibilityPolicy {
    fn default() -> Self {
        Self {
            minimum_tenure_months: 6,
            yearly_quota: 5,
        }
    }
}

impl EligibilityPolicy {
    /// Hired at least `minimum_tenure_months` calendar months before `now`.
    /// The anniversary itself counts. Month ends clamp, so Aug 31 + 6 months
    /// is the last day of February.
    pub fn has_minimum_tenure(&self, hire_date: NaiveDate, now: DateTime<Utc>) -> bool {
        let Some(eligible_from) = hire_date
            .checked_add_months(Months::new(self.minimum_tenure_months))
            .and_then(|date| date.and_hms_opt(0, 0, 0))
        else {
            return false;
        };
        eligible_from.and_utc() <= now
    }

    pub fn within_quota(&self, fiscal_year_count: u32) -> bool {
        fiscal_year_count < self.yearly_quota
    }

    pub fn evaluate(
        &self,
        hire_date: NaiveDate,
        fiscal_year_count: u32,
        now: DateTime<Utc>,
    ) -> Result<(), Ineligibility> {
        match (
            self.has_minimum_tenure(hire_date, now),
            self.within_quota(fiscal_year_count),
        ) {
            (true, true) => Ok(()),
            (false, true) => Err(Ineligibility::TenureTooShort),
            (true, false) => Err(Ineligibility::QuotaExhausted),
            (false, false) => Err(Ineligibility::Both),
        }
    }

    pub fn can_submit(
        &self,
        hire_date: NaiveDate,
        fiscal_year_count: u32,
        now: DateTime<Utc>,
    ) -> bool {
        self.evaluate(hire_date, fiscal_year_count, now).is_ok()
    }
}

/// Six months of tenure and fewer than five requests this fiscal year.
pub fn can_submit(hire_date: NaiveDate, fiscal_year_count: u32, now: DateTime<Utc>) -> bool {
    EligibilityPolicy::default().can_submit(hire_date, fiscal_year_count, now)
}
