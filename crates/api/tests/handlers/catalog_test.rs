use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use rstest::rstest;
use salonbook_core::models::{Master, MasterProfile, Role, Service, User};
use serde_json::{Value, json};

use crate::test_utils::TestContext;

#[tokio::test]
async fn test_register_user_hides_credential() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/api/users")
        .json(&json!({
            "name": "Carol",
            "email": "carol@example.com",
            "role": "Master",
            "password_hash": "opaque",
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(body["name"], "Carol");
    assert_eq!(body["role"], "Master");
    assert!(body.get("password_hash").is_none());
}

#[rstest]
#[case::blank_name(json!({ "name": " ", "email": "x@example.com", "role": "Client" }))]
#[case::blank_email(json!({ "name": "X", "email": "", "role": "Client" }))]
#[tokio::test]
async fn test_register_user_validates_input(#[case] payload: Value) {
    let ctx = TestContext::new().await;

    let response = ctx.server.post("/api/users").json(&payload).await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_master_flow() {
    let ctx = TestContext::new().await;
    let user = ctx
        .server
        .post("/api/users")
        .json(&json!({ "name": "Dana", "email": "dana@example.com", "role": "Master" }))
        .await
        .json::<User>();

    let response = ctx
        .server
        .post("/api/masters")
        .json(&json!({ "user_id": user.id, "specialization": "Nail artist" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let master = response.json::<Master>();
    assert_eq!(master.user_id, user.id);

    let lookup = ctx
        .server
        .get(&format!("/api/users/{}/master", user.id))
        .await;
    lookup.assert_status_ok();
    assert_eq!(lookup.json::<Master>(), master);

    let duplicate = ctx
        .server
        .post("/api/masters")
        .json(&json!({ "user_id": user.id, "specialization": "Barber" }))
        .await;
    duplicate.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_master_for_client_is_rejected() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/api/masters")
        .json(&json!({ "user_id": ctx.client, "specialization": "Barber" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_master_for_unknown_user_is_not_found() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/api/masters")
        .json(&json!({ "user_id": 404, "specialization": "Barber" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_master_lookup_for_user_without_profile() {
    let ctx = TestContext::new().await;

    ctx.server
        .get(&format!("/api/users/{}/master", ctx.client))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    ctx.server
        .get(&format!("/api/users/{}/master", ctx.master_user))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_list_masters_includes_user() {
    let ctx = TestContext::new().await;

    let masters = ctx.server.get("/api/masters").await.json::<Vec<MasterProfile>>();

    assert_eq!(masters.len(), 1);
    assert_eq!(masters[0].master.id, ctx.master);
    assert_eq!(masters[0].user.name, "Bob");
    assert_eq!(masters[0].user.role, Role::Master);
}

#[tokio::test]
async fn test_add_and_list_services() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/api/services")
        .json(&json!({ "name": "Manicure", "duration_minutes": 45, "price": "30.50" }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let services = ctx.server.get("/api/services").await.json::<Vec<Service>>();
    let names: Vec<_> = services.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Haircut", "Manicure"]);
    assert_eq!(services[1].price.to_string(), "30.50");
}

#[rstest]
#[case::zero_duration(json!({ "name": "Trim", "duration_minutes": 0, "price": "10" }))]
#[case::negative_price(json!({ "name": "Trim", "duration_minutes": 15, "price": "-1" }))]
#[case::blank_name(json!({ "name": "", "duration_minutes": 15, "price": "10" }))]
#[tokio::test]
async fn test_add_service_validates_input(#[case] payload: Value) {
    let ctx = TestContext::new().await;

    let response = ctx.server.post("/api/services").json(&payload).await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
