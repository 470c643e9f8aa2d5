//! Health endpoints.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["status"], "ok");
    assert!(response.body["data"]["version"].is_string());
}

#[tokio::test]
async fn test_detailed_health_reports_unreachable_database() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/health/detailed", None, None).await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.body["data"]["status"], "degraded");
    assert_eq!(response.body["data"]["database"], "unavailable");
    assert_eq!(response.body["data"]["storage"], "available");
}
