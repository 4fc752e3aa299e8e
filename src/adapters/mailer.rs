use async_trait::async_trait;
use tracing::info;

use crate::leave::ports::{Notifier, NotifyError};
use crate::model::leave_request::LeaveRequestId;

/// Writes the manager notification to the application log.
///
/// Delivery is fire-and-forget; nothing is queued or retried.
pub struct LogMailer {
    manager_email: String,
}

impl LogMailer {
    pub fn new(manager_email: impl Into<String>) -> Self {
        Self {
            manager_email: manager_email.into(),
        }
    }
}

#[async_trait]
impl Notifier for LogMailer {
    async fn notify_manager_new_request(
        &self,
        request_id: &LeaveRequestId,
    ) -> Result<(), NotifyError> {
        if self.manager_email.trim().is_empty() {
            return Err(NotifyError::Transport("no manager address configured".to_string()));
        }
        info!(
            to = %self.manager_email,
            subject = "New leave request",
            request_id = %request_id,
            "manager notification sent"
        );
        Ok(())
    }
}
