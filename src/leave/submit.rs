use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

use super::fiscal_year::{FiscalCalendar, FiscalYear};
use super::policy::{EligibilityPolicy, Ineligibility};
use super::ports::{
    Clock, EmployeeLookup, Notifier, RepositoryError, SubmissionCounter, SubmissionStore,
};
use crate::model::employee::EmployeeId;
use crate::model::leave_request::{LeavePeriod, LeaveRequest, LeaveRequestId, LeaveStatus};

/// Decoded submission, handed over once by the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionInput {
    pub employee_id: EmployeeId,
    pub reason: String,
    pub period: LeavePeriod,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOutcome {
    pub id: LeaveRequestId,
    pub status: LeaveStatus,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("employee {0} is unknown")]
    EmployeeUnknown(EmployeeId),
    #[error("employee is not eligible: {0}")]
    NotEligible(Ineligibility),
    #[error("dependency unavailable: {0}")]
    Unavailable(RepositoryError),
}

impl SubmitError {
    /// Only dependency failures may succeed when tried again unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SubmitError::Unavailable(_))
    }
}

/// Leave submission use case: lookup, quota count, policy, persist, notify.
#[derive(Clone)]
pub struct SubmitLeave {
    employees: Arc<dyn EmployeeLookup>,
    counter: Arc<dyn SubmissionCounter>,
    store: Arc<dyn SubmissionStore>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    calendar: Arc<dyn FiscalCalendar>,
    policy: EligibilityPolicy,
}

impl SubmitLeave {
    pub fn new(
        employees: Arc<dyn EmployeeLookup>,
        counter: Arc<dyn SubmissionCounter>,
        store: Arc<dyn SubmissionStore>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            employees,
            counter,
            store,
            notifier,
            clock,
            calendar: Arc::new(FiscalYear::default()),
            policy: EligibilityPolicy::default(),
        }
    }

    pub fn with_calendar(mut self, calendar: Arc<dyn FiscalCalendar>) -> Self {
        self.calendar = calendar;
        self
    }

    pub fn with_policy(mut self, policy: EligibilityPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[instrument(skip_all, fields(employee_id = %input.employee_id))]
    pub async fn submit(&self, input: SubmissionInput) -> Result<SubmissionOutcome, SubmitError> {
        // Read once; policy and persistence must agree on "now".
        let now = self.clock.now();

        let employee = self
            .employees
            .find_by_id(&input.employee_id)
            .await
            .map_err(|err| match err {
                RepositoryError::NotFound => {
                    SubmitError::EmployeeUnknown(input.employee_id.clone())
                }
                other => unavailable("employee lookup", other),
            })?;

        let since = self.calendar.year_start(now);
        let count = self
            .counter
            .count_since(&input.employee_id, since)
            .await
            .map_err(|err| unavailable("fiscal year count", err))?;
        debug!(%since, count, "counted requests this fiscal year");

        if let Err(reason) = self.policy.evaluate(employee.hire_date, count, now) {
            info!(%reason, count, hire_date = %employee.hire_date, "leave request refused");
            return Err(SubmitError::NotEligible(reason));
        }

        let mut request = LeaveRequest::pending(input.employee_id, input.reason, input.period, now);
        self.store
            .create(&mut request)
            .await
            .map_err(|err| unavailable("store", err))?;
        let Some(id) = request.id.clone() else {
            return Err(unavailable(
                "store",
                RepositoryError::Unavailable("no identity assigned on create".to_string()),
            ));
        };
        info!(request_id = %id, days = request.period.days(), "leave request created");

        // The request is already stored; a lost notification does not undo it.
        if let Err(err) = self.notifier.notify_manager_new_request(&id).await {
            warn!(error = %err, request_id = %id, "manager notification failed");
        }

        Ok(SubmissionOutcome {
            id,
            status: request.status,
        })
    }
}

fn unavailable(step: &'static str, err: RepositoryError) -> SubmitError {
    error!(error = %err, step, "leave submission dependency failed");
    SubmitError::Unavailable(err)
}
