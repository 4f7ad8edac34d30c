use axum::http::StatusCode;
use salonbook_api::middleware::error_handling::{AppError, map_error};
use salonbook_core::errors::SalonError;
use salonbook_core::models::MasterId;
use salonbook_core::store::StoreError;

#[test]
fn test_error_handling_not_found() {
    let response = map_error(SalonError::NotFound("Resource not found".to_string()));

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test]
fn test_error_handling_reference_not_found() {
    let response = map_error(SalonError::ReferenceNotFound("User 7 does not exist".to_string()));

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test]
fn test_error_handling_validation() {
    let response = map_error(SalonError::Validation("Invalid input".to_string()));

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn test_error_handling_conflict() {
    let err: SalonError = StoreError::SlotTaken {
        master_id: MasterId(1),
        time: chrono::Utc::now(),
    }
    .into();

    let response = map_error(err);

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[test]
fn test_error_handling_database() {
    let response = map_error(SalonError::Database(eyre::eyre!("connection refused")));

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn test_store_backend_errors_map_through_salon_error() {
    let err: SalonError = StoreError::Backend(eyre::eyre!("pool timed out")).into();

    let app_error = AppError::from(err);

    assert!(matches!(app_error.0, SalonError::Database(_)));
    assert_eq!(app_error.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_server_errors_hide_details() {
    let response = map_error(SalonError::Database(eyre::eyre!("password=hunter2")));

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], "Internal server error");
}
