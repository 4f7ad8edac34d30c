use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use salonbook_core::{
    errors::SalonError,
    models::{Master, MasterProfile, NewService, NewUser, Service, User, UserId},
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{ApiState, middleware::error_handling::AppError};

#[derive(Debug, Deserialize)]
pub struct RegisterMasterRequest {
    pub user_id: UserId,
    pub specialization: String,
}

#[axum::debug_handler]
pub async fn register_user(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<NewUser>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = state.catalog.register_user(payload).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

#[axum::debug_handler]
pub async fn master_for_user(
    State(state): State<Arc<ApiState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<Master>, AppError> {
    let master = state
        .catalog
        .master_for_user(UserId(user_id))
        .await?
        .ok_or_else(|| {
            SalonError::NotFound(format!("User {} has no master profile", user_id))
        })?;

    Ok(Json(master))
}

#[axum::debug_handler]
pub async fn register_master(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<RegisterMasterRequest>,
) -> Result<(StatusCode, Json<Master>), AppError> {
    let master = state
        .catalog
        .register_master(payload.user_id, &payload.specialization)
        .await?;

    Ok((StatusCode::CREATED, Json(master)))
}

#[axum::debug_handler]
pub async fn list_masters(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<MasterProfile>>, AppError> {
    Ok(Json(state.catalog.list_masters().await?))
}

#[axum::debug_handler]
pub async fn add_service(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<NewService>,
) -> Result<(StatusCode, Json<Service>), AppError> {
    let service = state.catalog.add_service(payload).await?;

    Ok((StatusCode::CREATED, Json(service)))
}

#[axum::debug_handler]
pub async fn list_services(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Service>>, AppError> {
    Ok(Json(state.catalog.list_services().await?))
}
