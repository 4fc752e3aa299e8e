//! Capabilities the submission workflow needs from the outside world.
//!
//! Database, mail and clock adapters live in `crate::adapters`; in-memory
//! doubles for tests live in `crate::leave::testing`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::model::employee::{Employee, EmployeeId};
use crate::model::leave_request::{LeaveRequest, LeaveRequestId};

/// Error enumeration for lookup, counting and storage failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Notification dispatch error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotifyError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[async_trait]
pub trait EmployeeLookup: Send + Sync {
    /// `RepositoryError::NotFound` when no employee carries `id`.
    async fn find_by_id(&self, id: &EmployeeId) -> Result<Employee, RepositoryError>;
}

#[async_trait]
pub trait SubmissionCounter: Send + Sync {
    /// Requests filed by `employee_id` with a creation time at or after `since`,
    /// in any of the states that consume quota.
    async fn count_since(
        &self,
        employee_id: &EmployeeId,
        since: DateTime<Utc>,
    ) -> Result<u32, RepositoryError>;
}

#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Persists `request` and writes the assigned identity into `request.id`.
    async fn create(&self, request: &mut LeaveRequest) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify_manager_new_request(&self, request_id: &LeaveRequestId)
    -> Result<(), NotifyError>;
}
