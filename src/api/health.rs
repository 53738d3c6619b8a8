//! Liveness endpoint

use actix_web::{get, HttpResponse, web};

use crate::metrics;
use crate::services::HeartbeatService;

/// Heartbeat endpoint
#[get("/heartbeat")]
pub async fn heartbeat() -> HttpResponse {
    metrics::record_heartbeat_request();

    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(HeartbeatService::new().ping())
}

/// Configure health routes
pub fn configure_health_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(heartbeat);
}
