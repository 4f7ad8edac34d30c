use axum::http::StatusCode;
use chrono::Duration;
use pretty_assertions::assert_eq;
use salonbook_core::models::{
    Appointment, AppointmentDetails, AppointmentStatus, BookingOutcome,
};
use salonbook_core::store::EntityStore;
use serde_json::{Value, json};

use crate::test_utils::{TestContext, now, slot};

async fn book(ctx: &TestContext, time: chrono::DateTime<chrono::Utc>) -> Appointment {
    let response = ctx
        .server
        .post("/api/appointments")
        .json(&json!({
            "client_id": ctx.client,
            "master_id": ctx.master,
            "service_id": ctx.service,
            "appointment_time": time,
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    match response.json::<BookingOutcome>() {
        BookingOutcome::Scheduled(appointment) => appointment,
        other => panic!("expected a scheduled booking, got {other:?}"),
    }
}

#[tokio::test]
async fn test_create_appointment_returns_pending_booking() {
    let ctx = TestContext::new().await;

    let appointment = book(&ctx, slot()).await;

    assert_eq!(appointment.status, AppointmentStatus::Pending);
    assert_eq!(appointment.appointment_time, slot());
    assert_eq!(appointment.client_id, ctx.client);
}

#[tokio::test]
async fn test_create_appointment_in_taken_slot_conflicts() {
    let ctx = TestContext::new().await;
    book(&ctx, slot()).await;

    let response = ctx
        .server
        .post("/api/appointments")
        .json(&json!({
            "client_id": ctx.client,
            "master_id": ctx.master,
            "service_id": ctx.service,
            "appointment_time": slot(),
        }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    response.assert_json(&json!({ "outcome": "slot_taken" }));
}

#[tokio::test]
async fn test_create_appointment_in_the_past_is_unprocessable() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/api/appointments")
        .json(&json!({
            "client_id": ctx.client,
            "master_id": ctx.master,
            "service_id": ctx.service,
            "appointment_time": now() - Duration::hours(1),
        }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    response.assert_json(&json!({ "outcome": "past_time" }));
    assert_eq!(ctx.store.appointment_count().await, 0);
}

#[tokio::test]
async fn test_create_appointment_with_unknown_service_is_not_found() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/api/appointments")
        .json(&json!({
            "client_id": ctx.client,
            "master_id": ctx.master,
            "service_id": 999,
            "appointment_time": slot(),
        }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body = response.json::<Value>();
    assert_eq!(
        body["error"],
        "Reference not found: Service 999 does not exist"
    );
}

#[tokio::test]
async fn test_get_appointment_attaches_relations() {
    let ctx = TestContext::new().await;
    let appointment = book(&ctx, slot()).await;

    let response = ctx
        .server
        .get(&format!("/api/appointments/{}", appointment.id))
        .await;

    response.assert_status_ok();
    let details = response.json::<AppointmentDetails>();
    assert_eq!(details.appointment, appointment);
    assert_eq!(details.client.name, "Alice");
    assert_eq!(details.master.id, ctx.master);
    assert_eq!(details.service.name, "Haircut");
}

#[tokio::test]
async fn test_get_missing_appointment_is_not_found() {
    let ctx = TestContext::new().await;

    let response = ctx.server.get("/api/appointments/42").await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_appointment_moves_and_confirms() {
    let ctx = TestContext::new().await;
    let appointment = book(&ctx, slot()).await;
    let later = slot() + Duration::hours(3);

    let response = ctx
        .server
        .put(&format!("/api/appointments/{}", appointment.id))
        .json(&json!({ "appointment_time": later, "status": "Confirmed" }))
        .await;

    response.assert_status_ok();
    let updated = response.json::<BookingOutcome>();
    let updated = updated.appointment().unwrap();
    assert_eq!(updated.appointment_time, later);
    assert_eq!(updated.status, AppointmentStatus::Confirmed);
}

#[tokio::test]
async fn test_update_into_taken_slot_keeps_original() {
    let ctx = TestContext::new().await;
    let first = book(&ctx, slot()).await;
    let second = book(&ctx, slot() + Duration::hours(1)).await;

    let response = ctx
        .server
        .put(&format!("/api/appointments/{}", second.id))
        .json(&json!({ "appointment_time": slot(), "status": "Pending" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let stored = ctx.store.find_appointment(second.id).await.unwrap().unwrap();
    assert_eq!(stored, second);
    assert_ne!(stored.appointment_time, first.appointment_time);
}

#[tokio::test]
async fn test_update_rejects_unknown_status_names() {
    let ctx = TestContext::new().await;
    let appointment = book(&ctx, slot()).await;

    let response = ctx
        .server
        .put(&format!("/api/appointments/{}", appointment.id))
        .json(&json!({ "appointment_time": slot(), "status": "Rescheduled" }))
        .await;

    assert!(response.status_code().is_client_error());
    let stored = ctx
        .store
        .find_appointment(appointment.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, AppointmentStatus::Pending);
}

#[tokio::test]
async fn test_update_missing_appointment_is_not_found() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .put("/api/appointments/7")
        .json(&json!({ "appointment_time": slot(), "status": "Confirmed" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_json(&json!({ "outcome": "unknown_appointment" }));
}

#[tokio::test]
async fn test_cancel_frees_slot_and_is_idempotent() {
    let ctx = TestContext::new().await;
    let appointment = book(&ctx, slot()).await;

    ctx.server
        .post(&format!("/api/appointments/{}/cancel", appointment.id))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    ctx.server
        .post("/api/appointments/999/cancel")
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let rebooked = book(&ctx, slot()).await;
    assert_ne!(rebooked.id, appointment.id);
}

#[tokio::test]
async fn test_delete_reports_removal() {
    let ctx = TestContext::new().await;
    let appointment = book(&ctx, slot()).await;
    let path = format!("/api/appointments/{}", appointment.id);

    let first = ctx.server.delete(&path).await;
    first.assert_status_ok();
    first.assert_json(&json!({ "deleted": true }));

    let second = ctx.server.delete(&path).await;
    second.assert_json(&json!({ "deleted": false }));
    assert_eq!(
        ctx.store.find_appointment(appointment.id).await.unwrap(),
        None
    );
}

#[tokio::test]
async fn test_user_appointments_include_cancelled() {
    let ctx = TestContext::new().await;
    let cancelled = book(&ctx, slot()).await;
    ctx.server
        .post(&format!("/api/appointments/{}/cancel", cancelled.id))
        .await;
    let pending = book(&ctx, slot()).await;

    let response = ctx
        .server
        .get(&format!("/api/users/{}/appointments", ctx.client))
        .await;

    response.assert_status_ok();
    let appointments = response.json::<Vec<AppointmentDetails>>();
    let statuses: Vec<_> = appointments
        .iter()
        .map(|d| (d.appointment.id, d.appointment.status))
        .collect();
    assert_eq!(
        statuses,
        vec![
            (cancelled.id, AppointmentStatus::Cancelled),
            (pending.id, AppointmentStatus::Pending),
        ]
    );
    assert!(appointments.iter().all(|d| d.service.id == ctx.service));
}

#[tokio::test]
async fn test_master_appointments_for_unknown_master_are_empty() {
    let ctx = TestContext::new().await;
    book(&ctx, slot()).await;

    let own = ctx
        .server
        .get(&format!("/api/masters/{}/appointments", ctx.master))
        .await
        .json::<Vec<AppointmentDetails>>();
    let other = ctx
        .server
        .get("/api/masters/99/appointments")
        .await
        .json::<Vec<AppointmentDetails>>();

    assert_eq!(own.len(), 1);
    assert!(other.is_empty());
}
