//! Transport failures must surface as `ApiError::Transport`, never as a response.

use api::{AnalysisService, ApiConfig, ApiError, HttpAnalysisService, ReportFile};

fn unreachable_service() -> HttpAnalysisService {
    // Port 9 (discard) on loopback is closed on CI hosts, so the connect is refused.
    HttpAnalysisService::new(ApiConfig::new("http://127.0.0.1:9").unwrap())
}

#[tokio::test]
async fn upload_without_listener_is_a_transport_error() {
    let service = unreachable_service();
    let file = ReportFile::from_name("report.pdf", b"%PDF-1.4".to_vec());

    let outcome = service.upload(&file).await;
    assert!(matches!(outcome, Err(ApiError::Transport(_))));
}

#[tokio::test]
async fn health_without_listener_is_a_transport_error() {
    let service = unreachable_service();
    assert!(matches!(service.health().await, Err(ApiError::Transport(_))));
}

#[test]
fn service_targets_configured_endpoint() {
    let service = unreachable_service();
    assert_eq!(
        service.config().upload_url(),
        "http://127.0.0.1:9/api/blood-report/upload"
    );
}
