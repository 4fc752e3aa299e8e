use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

use crate::model::employee::EmployeeId;

/// Identifier assigned by the store when a leave request is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LeaveRequestId(pub String);

impl LeaveRequestId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LeaveRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
    ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
    /// Sent back to the employee for changes.
    Returned,
}

impl LeaveStatus {
    /// States that consume a slot of the yearly quota.
    pub const COUNTED: [LeaveStatus; 4] = [
        LeaveStatus::Pending,
        LeaveStatus::Approved,
        LeaveStatus::Rejected,
        LeaveStatus::Returned,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("leave period starts on {from} which is after its end on {to}")]
pub struct InvalidPeriod {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// Inclusive date range `[from, to]` of a leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeavePeriod {
    from: NaiveDate,
    to: NaiveDate,
}

impl LeavePeriod {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, InvalidPeriod> {
        if from > to {
            return Err(InvalidPeriod { from, to });
        }
        Ok(Self { from, to })
    }

    pub fn from(&self) -> NaiveDate {
        self.from
    }

    pub fn to(&self) -> NaiveDate {
        self.to
    }

    /// Number of calendar days covered, both ends included.
    pub fn days(&self) -> i64 {
        (self.to - self.from).num_days() + 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveRequest {
    /// `None` until the store has persisted the request.
    pub id: Option<LeaveRequestId>,
    pub employee_id: EmployeeId,
    pub reason: String,
    pub period: LeavePeriod,
    pub status: LeaveStatus,
    pub created_at: DateTime<Utc>,
}

impl LeaveRequest {
    /// A fresh, not yet persisted request awaiting a decision.
    pub fn pending(
        employee_id: EmployeeId,
        reason: String,
        period: LeavePeriod,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            employee_id,
            reason,
            period,
            status: LeaveStatus::Pending,
            created_at,
        }
    }
}
