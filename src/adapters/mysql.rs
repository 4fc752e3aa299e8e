//! MySQL implementations of the lookup, counting and storage ports.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, MySqlPool};

use crate::leave::ports::{EmployeeLookup, RepositoryError, SubmissionCounter, SubmissionStore};
use crate::model::employee::{Employee, EmployeeId};
use crate::model::leave_request::{LeaveRequest, LeaveRequestId, LeaveStatus};

#[derive(FromRow)]
struct EmployeeRow {
    id: String,
    hire_date: NaiveDate,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Employee {
            id: EmployeeId(row.id),
            hire_date: row.hire_date,
        }
    }
}

/// Binds, in order: employee id, window start, then each of `LeaveStatus::COUNTED`.
fn count_since_sql() -> String {
    let placeholders = vec!["?"; LeaveStatus::COUNTED.len()].join(", ");
    format!(
        "SELECT COUNT(*) FROM leave_requests \
         WHERE employee_id = ? AND created_at >= ? AND status IN ({placeholders})"
    )
}

fn unavailable(err: sqlx::Error) -> RepositoryError {
    RepositoryError::Unavailable(err.to_string())
}

pub struct MySqlEmployeeDirectory {
    pool: MySqlPool,
}

impl MySqlEmployeeDirectory {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeLookup for MySqlEmployeeDirectory {
    async fn find_by_id(&self, id: &EmployeeId) -> Result<Employee, RepositoryError> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            r#"
            SELECT CAST(id AS CHAR) AS id, hire_date
            FROM employees
            WHERE id = ?
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(unavailable)?;

        row.map(Employee::from).ok_or(RepositoryError::NotFound)
    }
}

/// Counts and inserts rows of `leave_requests`.
///
/// Counting and inserting run as separate statements, so two concurrent
/// submissions can both pass the quota check.
pub struct MySqlLeaveRequests {
    pool: MySqlPool,
}

impl MySqlLeaveRequests {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionCounter for MySqlLeaveRequests {
    async fn count_since(
        &self,
        employee_id: &EmployeeId,
        since: DateTime<Utc>,
    ) -> Result<u32, RepositoryError> {
        let sql = count_since_sql();
        let mut query = sqlx::query_scalar::<_, i64>(&sql)
            .bind(employee_id.as_str())
            .bind(since);
        for status in LeaveStatus::COUNTED {
            query = query.bind(status.to_string());
        }

        let count = query.fetch_one(&self.pool).await.map_err(unavailable)?;
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }
}

#[async_trait]
impl SubmissionStore for MySqlLeaveRequests {
    async fn create(&self, request: &mut LeaveRequest) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            INSERT INTO leave_requests
                (employee_id, reason, from_date, to_date, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(request.employee_id.as_str())
        .bind(&request.reason)
        .bind(request.period.from())
        .bind(request.period.to())
        .bind(request.status.as_ref())
        .bind(request.created_at)
        .execute(&self.pool)
        .await
        .map_err(unavailable)?;

        request.id = Some(LeaveRequestId(result.last_insert_id().to_string()));
        Ok(())
    }
}
