use crate::api::leave_request::{SubmitLeaveReq, SubmitLeaveRes};
use crate::model::leave_request::LeaveStatus;
use utoipa::OpenApi;

/// Paths are documented under the default `/api` prefix; `API_PREFIX` moves them.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Leave Desk API",
        version = "1.0.0",
        description = r#"
## Leave Desk

Accepts employee **leave-of-absence requests**, checks them against the
company leave rules and hands them to a manager for review.

### 🔹 Rules
- The employee must have been hired at least **six months** ago
- At most **five** requests per fiscal year (starting **April 1**)

### 🔗 Paths
Paths below assume the default `API_PREFIX` of `/api`. A deployment with a
different prefix serves the same routes under that prefix instead.

### 📦 Response Format
- JSON bodies; errors carry a `message` field
- `403` means the rules refused the request, `404` an unknown employee

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::leave_request::submit_leave,
    ),
    components(
        schemas(
            SubmitLeaveReq,
            SubmitLeaveRes,
            LeaveStatus
        )
    ),
    tags(
        (name = "Leave", description = "Leave submission APIs"),
    )
)]
pub struct ApiDoc;
