//! Leave submission core: fiscal calendar, eligibility rules, ports and the
//! submission workflow that ties them together.

pub mod fiscal_year;
pub mod policy;
pub mod ports;
pub mod submit;

#[cfg(test)]
pub(crate) mod testing;

pub use fiscal_year::{FiscalCalendar, FiscalYear};
pub use policy::{EligibilityPolicy, Ineligibility};
pub use submit::{SubmissionInput, SubmissionOutcome, SubmitError, SubmitLeave};
