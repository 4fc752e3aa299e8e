use crate::api::leave_request;
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{HttpResponse, error::InternalError, web};
use anyhow::{Context, Result};
use serde_json::json;
use std::sync::Arc;

pub type Limiter = Arc<Governor<PeerIpKeyExtractor, NoOpMiddleware>>;

/// Per-peer limiter allowing `requests_per_min` with an equal burst.
pub fn build_limiter(requests_per_min: u32) -> Result<Limiter> {
    let per_ms = (60_000 / u64::from(requests_per_min.max(1))).max(1);
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .context("invalid rate limit settings")?;
    Ok(Arc::new(Governor::new(&cfg)))
}

/// Malformed bodies get the same JSON shape as other client errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(json!({
            "message": format!("Invalid JSON payload: {err}")
        }));
        InternalError::from_response(err, response).into()
    })
}

pub fn configure(cfg: &mut web::ServiceConfig, api_prefix: &str, submit_limiter: Limiter) {
    cfg.service(
        web::scope(api_prefix)
            .app_data(json_config())
            // /leave-requests
            .service(
                web::resource("/leave-requests")
                    .wrap(submit_limiter)
                    .route(web::post().to(leave_request::submit_leave)),
            ),
    );
}
