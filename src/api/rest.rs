//! REST API endpoints using Actix-Web

use actix_web::{web, HttpResponse};
use std::sync::Arc;
use tracing::debug;

use crate::api::responses::ApiResult;
use crate::metrics;
use crate::models::{StorageError, StorageReport};
use crate::services::StorageMetadataService;

use super::health::configure_health_routes;

/// Shared application state
#[derive(Clone)]
pub struct ApiState {
    pub metadata_service: Arc<StorageMetadataService>,
}

impl ApiState {
    pub fn new(metadata_service: StorageMetadataService) -> Self {
        Self {
            metadata_service: Arc::new(metadata_service),
        }
    }
}

/// Configure all REST API routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    configure_health_routes(cfg);

    cfg.route("/storage-metadata", web::get().to(get_storage_metadata));
}

/// Run the blocking collector off the async workers
async fn collect_report(state: &ApiState) -> ApiResult<StorageReport> {
    let service = Arc::clone(&state.metadata_service);

    tokio::task::spawn_blocking(move || service.build_report())
        .await
        .map_err(|e| StorageError::Internal(format!("storage collection task failed: {}", e)))?
}

async fn get_storage_metadata(state: web::Data<ApiState>) -> HttpResponse {
    metrics::record_storage_report_request();

    match collect_report(&state).await {
        Ok(report) => {
            debug!("Storage report with {} drives", report.drives.len());
            HttpResponse::Ok().json(report)
        }
        Err(e) => {
            metrics::record_storage_report_failure();
            HttpResponse::from(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fixtures::{gigabyte_usage, ssd, FakeCollector};
    use actix_web::{test, App};

    fn state(collector: FakeCollector) -> web::Data<ApiState> {
        web::Data::new(ApiState::new(StorageMetadataService::new(Arc::new(collector))))
    }

    #[actix_rt::test]
    async fn test_storage_metadata_json() {
        let state = state(FakeCollector::new(Ok(gigabyte_usage()), Ok(vec![ssd()])));
        let app = test::init_service(App::new().app_data(state).configure(configure_routes)).await;

        let req = test::TestRequest::get().uri("/storage-metadata").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["platform"], "linux");
        assert_eq!(body["totalStorage"], 1_000_000_000u64);
        assert_eq!(body["usedStorage"], 600_000_000u64);
        assert_eq!(body["freeStorage"], 400_000_000u64);
        assert_eq!(body["availableStorage"], 350_000_000u64);
        assert_eq!(body["drives"][0]["name"], "sda");
        assert_eq!(body["drives"][0]["bus"], "scsi/sata/usb");
        assert_eq!(body["drives"][0]["isSsd"], true);
    }

    #[actix_rt::test]
    async fn test_storage_metadata_without_drives() {
        let state = state(FakeCollector::new(Ok(gigabyte_usage()), Err("no sysfs".to_string())));
        let app = test::init_service(App::new().app_data(state).configure(configure_routes)).await;

        let req = test::TestRequest::get().uri("/storage-metadata").to_request();
        let report: StorageReport = test::call_and_read_body_json(&app, req).await;
        assert!(report.drives.is_empty());
        assert_eq!(report.used_storage, 600_000_000);
    }

    #[actix_rt::test]
    async fn test_storage_metadata_failure_is_bare_500() {
        let state = state(FakeCollector::new(Err("permission denied".to_string()), Ok(vec![ssd()])));
        let app = test::init_service(App::new().app_data(state).configure(configure_routes)).await;

        let req = test::TestRequest::get().uri("/storage-metadata").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);

        let body = test::read_body(resp).await;
        assert!(body.is_empty());
    }
}
