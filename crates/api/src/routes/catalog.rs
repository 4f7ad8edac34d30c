use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers::catalog};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/users", post(catalog::register_user))
        .route("/api/users/:id/master", get(catalog::master_for_user))
        .route(
            "/api/masters",
            get(catalog::list_masters).post(catalog::register_master),
        )
        .route(
            "/api/services",
            get(catalog::list_services).post(catalog::add_service),
        )
}
