use std::error::Error;

use chrono::{TimeZone, Utc};
use salonbook_core::errors::{SalonError, SalonResult};
use salonbook_core::models::MasterId;
use salonbook_core::store::StoreError;

#[test]
fn test_salon_error_display() {
    let reference = SalonError::ReferenceNotFound("User 999 does not exist".to_string());
    let not_found = SalonError::NotFound("Appointment 7 not found".to_string());
    let validation = SalonError::Validation("Invalid input".to_string());
    let conflict = SalonError::Conflict("Already registered".to_string());
    let database = SalonError::Database(eyre::eyre!("Database connection failed"));
    let internal = SalonError::Internal(Box::new(std::io::Error::other("Internal error")));

    assert_eq!(
        reference.to_string(),
        "Reference not found: User 999 does not exist"
    );
    assert_eq!(
        not_found.to_string(),
        "Resource not found: Appointment 7 not found"
    );
    assert_eq!(validation.to_string(), "Validation error: Invalid input");
    assert_eq!(conflict.to_string(), "Conflict: Already registered");
    assert!(database.to_string().contains("Database error:"));
    assert!(internal.to_string().contains("Internal server error:"));
}

#[test]
fn test_error_conversion() {
    let io_error = std::io::Error::other("IO error");
    let salon_error = SalonError::Internal(Box::new(io_error));

    assert!(salon_error.source().is_some());
}

#[test]
fn test_salon_result() {
    let result: SalonResult<i32> = Ok(42);
    assert_eq!(result.unwrap(), 42);

    let result: SalonResult<i32> = Err(SalonError::NotFound("Not found".to_string()));
    assert!(result.is_err());
}

#[test]
fn test_store_backend_error_becomes_database_error() {
    let store_error = StoreError::Backend(eyre::eyre!("connection reset"));
    let salon_error: SalonError = store_error.into();

    assert!(matches!(salon_error, SalonError::Database(_)));
    assert!(salon_error.to_string().contains("connection reset"));
}

#[test]
fn test_store_slot_taken_becomes_conflict() {
    let time = Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap();
    let store_error = StoreError::SlotTaken {
        master_id: MasterId(3),
        time,
    };
    let salon_error: SalonError = store_error.into();

    match salon_error {
        SalonError::Conflict(message) => {
            assert!(message.contains("Master 3"));
            assert!(message.contains("2025-06-01 10:00:00"));
        }
        other => panic!("expected conflict, got {other:?}"),
    }
}
