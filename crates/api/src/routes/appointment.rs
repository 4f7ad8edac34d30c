use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers::appointment};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/appointments", post(appointment::create_appointment))
        .route(
            "/api/appointments/:id",
            get(appointment::get_appointment)
                .put(appointment::update_appointment)
                .delete(appointment::delete_appointment),
        )
        .route(
            "/api/appointments/:id/cancel",
            post(appointment::cancel_appointment),
        )
        .route(
            "/api/users/:id/appointments",
            get(appointment::get_user_appointments),
        )
        .route(
            "/api/masters/:id/appointments",
            get(appointment::get_master_appointments),
        )
}
