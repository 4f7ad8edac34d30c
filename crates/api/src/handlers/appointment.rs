use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use salonbook_core::{
    errors::SalonError,
    models::{
        AppointmentDetails, AppointmentId, BookingOutcome, CreateAppointmentRequest,
        DeleteAppointmentResponse, MasterId, UpdateAppointmentRequest, UserId,
    },
};
use std::sync::Arc;

use crate::{ApiState, middleware::error_handling::AppError};

/// Status code for a booking outcome; `success` applies to `Scheduled`.
pub fn outcome_status(outcome: &BookingOutcome, success: StatusCode) -> StatusCode {
    match outcome {
        BookingOutcome::Scheduled(_) => success,
        BookingOutcome::PastTime => StatusCode::UNPROCESSABLE_ENTITY,
        BookingOutcome::SlotTaken => StatusCode::CONFLICT,
        BookingOutcome::UnknownAppointment => StatusCode::NOT_FOUND,
    }
}

fn outcome_response(outcome: BookingOutcome, success: StatusCode) -> Response {
    (outcome_status(&outcome, success), Json(outcome)).into_response()
}

#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateAppointmentRequest>,
) -> Result<Response, AppError> {
    let outcome = state
        .scheduling
        .create_appointment(
            payload.client_id,
            payload.master_id,
            payload.service_id,
            payload.appointment_time,
        )
        .await?;

    Ok(outcome_response(outcome, StatusCode::CREATED))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<Json<AppointmentDetails>, AppError> {
    let details = state
        .scheduling
        .get_appointment(AppointmentId(id))
        .await?
        .ok_or_else(|| SalonError::NotFound(format!("Appointment with ID {} not found", id)))?;

    Ok(Json(details))
}

#[axum::debug_handler]
pub async fn update_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateAppointmentRequest>,
) -> Result<Response, AppError> {
    let outcome = state
        .scheduling
        .update_appointment(AppointmentId(id), payload.appointment_time, payload.status)
        .await?;

    Ok(outcome_response(outcome, StatusCode::OK))
}

#[axum::debug_handler]
pub async fn delete_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteAppointmentResponse>, AppError> {
    let deleted = state.scheduling.delete_appointment(AppointmentId(id)).await?;

    Ok(Json(DeleteAppointmentResponse { deleted }))
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.scheduling.cancel_appointment(AppointmentId(id)).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn get_user_appointments(
    State(state): State<Arc<ApiState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<AppointmentDetails>>, AppError> {
    let appointments = state
        .scheduling
        .get_user_appointments(UserId(user_id))
        .await?;

    Ok(Json(appointments))
}

#[axum::debug_handler]
pub async fn get_master_appointments(
    State(state): State<Arc<ApiState>>,
    Path(master_id): Path<i64>,
) -> Result<Json<Vec<AppointmentDetails>>, AppError> {
    let appointments = state
        .scheduling
        .get_master_appointments(MasterId(master_id))
        .await?;

    Ok(Json(appointments))
}
