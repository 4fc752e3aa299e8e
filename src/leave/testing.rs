//! Recording in-memory doubles for every workflow port.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Barrier;

use super::ports::{
    Clock, EmployeeLookup, Notifier, NotifyError, RepositoryError, SubmissionCounter,
    SubmissionStore,
};
use super::submit::SubmitLeave;
use crate::model::employee::{Employee, EmployeeId};
use crate::model::leave_request::{LeavePeriod, LeaveRequest, LeaveRequestId, LeaveStatus};

pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub(crate) fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(crate) struct FixedClock {
    now: DateTime<Utc>,
    reads: AtomicUsize,
}

impl FixedClock {
    pub(crate) fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            reads: AtomicUsize::new(0),
        }
    }

    pub(crate) fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.now
    }
}

#[derive(Default)]
pub(crate) struct MemoryEmployees {
    employees: Mutex<HashMap<EmployeeId, Employee>>,
    failure: Mutex<Option<String>>,
    lookups: AtomicUsize,
}

impl MemoryEmployees {
    pub(crate) fn insert(&self, id: &str, hire_date: NaiveDate) {
        let employee = Employee {
            id: EmployeeId::from(id),
            hire_date,
        };
        self.employees
            .lock()
            .expect("employees lock")
            .insert(employee.id.clone(), employee);
    }

    pub(crate) fn fail_with(&self, reason: &str) {
        *self.failure.lock().expect("failure lock") = Some(reason.to_string());
    }

    pub(crate) fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmployeeLookup for MemoryEmployees {
    async fn find_by_id(&self, id: &EmployeeId) -> Result<Employee, RepositoryError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if let Some(reason) = self.failure.lock().expect("failure lock").clone() {
            return Err(RepositoryError::Unavailable(reason));
        }
        self.employees
            .lock()
            .expect("employees lock")
            .get(id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }
}

/// Counter and store over one shared list, like a single table would be.
#[derive(Default)]
pub(crate) struct MemoryLeaveRequests {
    records: Mutex<Vec<LeaveRequest>>,
    sequence: AtomicU64,
    count_calls: AtomicUsize,
    create_calls: AtomicUsize,
    last_since: Mutex<Option<DateTime<Utc>>>,
    fail_count: Mutex<bool>,
    fail_create: Mutex<bool>,
    count_gate: Mutex<Option<Arc<Barrier>>>,
}

impl MemoryLeaveRequests {
    pub(crate) fn seed(&self, employee: &str, n: usize, created_at: DateTime<Utc>) {
        let period = LeavePeriod::new(date(2025, 1, 6), date(2025, 1, 6)).expect("valid period");
        let mut records = self.records.lock().expect("records lock");
        for _ in 0..n {
            let mut request = LeaveRequest::pending(
                EmployeeId::from(employee),
                "seed".to_string(),
                period,
                created_at,
            );
            request.id = Some(self.next_id());
            records.push(request);
        }
    }

    pub(crate) fn created(&self) -> Vec<LeaveRequest> {
        self.records.lock().expect("records lock").clone()
    }

    pub(crate) fn count_calls(&self) -> usize {
        self.count_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_since(&self) -> Option<DateTime<Utc>> {
        *self.last_since.lock().expect("since lock")
    }

    pub(crate) fn fail_counting(&self) {
        *self.fail_count.lock().expect("flag lock") = true;
    }

    pub(crate) fn fail_creating(&self) {
        *self.fail_create.lock().expect("flag lock") = true;
    }

    /// Every count waits on `barrier` after reading, so callers interleave.
    pub(crate) fn hold_counts_at(&self, barrier: Arc<Barrier>) {
        *self.count_gate.lock().expect("gate lock") = Some(barrier);
    }

    fn next_id(&self) -> LeaveRequestId {
        let id = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        LeaveRequestId(format!("lr-{id:04}"))
    }
}

#[async_trait]
impl SubmissionCounter for MemoryLeaveRequests {
    async fn count_since(
        &self,
        employee_id: &EmployeeId,
        since: DateTime<Utc>,
    ) -> Result<u32, RepositoryError> {
        self.count_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_since.lock().expect("since lock") = Some(since);
        if *self.fail_count.lock().expect("flag lock") {
            return Err(RepositoryError::Unavailable("count timed out".to_string()));
        }
        let count = self
            .records
            .lock()
            .expect("records lock")
            .iter()
            .filter(|r| &r.employee_id == employee_id)
            .filter(|r| r.created_at >= since)
            .filter(|r| LeaveStatus::COUNTED.contains(&r.status))
            .count();
        let gate = self.count_gate.lock().expect("gate lock").clone();
        if let Some(barrier) = gate {
            barrier.wait().await;
        }
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }
}

#[async_trait]
impl SubmissionStore for MemoryLeaveRequests {
    async fn create(&self, request: &mut LeaveRequest) -> Result<(), RepositoryError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if *self.fail_create.lock().expect("flag lock") {
            return Err(RepositoryError::Unavailable("insert failed".to_string()));
        }
        request.id = Some(self.next_id());
        self.records.lock().expect("records lock").push(request.clone());
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct RecordingNotifier {
    sent: Mutex<Vec<LeaveRequestId>>,
    fail: Mutex<bool>,
}

impl RecordingNotifier {
    pub(crate) fn fail_next(&self) {
        *self.fail.lock().expect("flag lock") = true;
    }

    pub(crate) fn sent(&self) -> Vec<LeaveRequestId> {
        self.sent.lock().expect("sent lock").clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify_manager_new_request(
        &self,
        request_id: &LeaveRequestId,
    ) -> Result<(), NotifyError> {
        let mut fail = self.fail.lock().expect("flag lock");
        if *fail {
            *fail = false;
            return Err(NotifyError::Transport("smtp refused".to_string()));
        }
        self.sent.lock().expect("sent lock").push(request_id.clone());
        Ok(())
    }
}

/// A workflow wired to fresh doubles, with handles kept for assertions.
pub(crate) struct Harness {
    pub(crate) clock: Arc<FixedClock>,
    pub(crate) employees: Arc<MemoryEmployees>,
    pub(crate) requests: Arc<MemoryLeaveRequests>,
    pub(crate) notifier: Arc<RecordingNotifier>,
    pub(crate) workflow: SubmitLeave,
}

impl Harness {
    pub(crate) fn new(now: DateTime<Utc>) -> Self {
        let clock = Arc::new(FixedClock::new(now));
        let employees = Arc::new(MemoryEmployees::default());
        let requests = Arc::new(MemoryLeaveRequests::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let workflow = SubmitLeave::new(
            employees.clone(),
            requests.clone(),
            requests.clone(),
            notifier.clone(),
            clock.clone(),
        );
        Self {
            clock,
            employees,
            requests,
            notifier,
            workflow,
        }
    }
}
