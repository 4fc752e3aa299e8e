use crate::leave::{SubmissionInput, SubmitError, SubmitLeave};
use crate::model::employee::EmployeeId;
use crate::model::leave_request::{LeavePeriod, LeaveStatus};
use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitLeaveReq {
    #[schema(example = "1000")]
    pub employee_id: String,
    #[schema(example = "Family trip")]
    pub reason: String,
    #[schema(example = "2026-01-05", format = "date", value_type = String)]
    pub from: String,
    #[schema(example = "2026-01-07", format = "date", value_type = String)]
    pub to: String,
}

#[derive(Serialize, ToSchema)]
pub struct SubmitLeaveRes {
    #[schema(example = "42")]
    pub id: String,
    #[schema(example = "PENDING")]
    pub status: LeaveStatus,
}

impl SubmitLeaveReq {
    /// Shape checks only. Tenure and quota are decided by the workflow.
    fn into_input(self) -> Result<SubmissionInput, String> {
        let employee_id = self.employee_id.trim();
        if employee_id.is_empty() {
            return Err("employeeId is required".to_string());
        }
        let from = parse_date("from", &self.from)?;
        let to = parse_date("to", &self.to)?;
        let period = LeavePeriod::new(from, to).map_err(|e| e.to_string())?;

        Ok(SubmissionInput {
            employee_id: EmployeeId::from(employee_id),
            reason: self.reason,
            period,
        })
    }
}

// YYYY-MM-DD exactly; chrono alone would also take "2025-1-5" or "+2025-1-05".
fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, String> {
    let invalid = || format!("{field} must be an ISO-8601 date (YYYY-MM-DD)");
    let well_formed = raw.len() == 10
        && raw.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| invalid())
}

/* =========================
Submit leave request
========================= */
/// Swagger doc for submit_leave endpoint
#[utoipa::path(
    post,
    path = "/api/leave-requests",
    request_body(
        content = SubmitLeaveReq,
        description = "Leave request payload",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Leave request submitted", body = SubmitLeaveRes),
        (status = 400, description = "Malformed payload", body = Object, example = json!({
            "message": "from must be an ISO-8601 date (YYYY-MM-DD)"
        })),
        (status = 403, description = "Employee is not eligible", body = Object, example = json!({
            "message": "Employee is not eligible to submit leave",
            "reason": "yearly leave quota used up"
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        })),
        (status = 429, description = "Too many requests"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Leave"
)]
pub async fn submit_leave(
    workflow: web::Data<SubmitLeave>,
    payload: web::Json<SubmitLeaveReq>,
) -> impl Responder {
    let input = match payload.into_inner().into_input() {
        Ok(input) => input,
        Err(message) => {
            return HttpResponse::BadRequest().json(json!({ "message": message }));
        }
    };

    match workflow.submit(input).await {
        Ok(outcome) => HttpResponse::Ok().json(SubmitLeaveRes {
            id: outcome.id.to_string(),
            status: outcome.status,
        }),
        Err(SubmitError::NotEligible(reason)) => HttpResponse::Forbidden().json(json!({
            "message": "Employee is not eligible to submit leave",
            "reason": reason.to_string()
        })),
        Err(SubmitError::EmployeeUnknown(_)) => HttpResponse::NotFound().json(json!({
            "message": "Employee not found"
        })),
        Err(SubmitError::Unavailable(_)) => HttpResponse::InternalServerError().json(json!({
            "message": "Internal Server Error"
        })),
    }
}
