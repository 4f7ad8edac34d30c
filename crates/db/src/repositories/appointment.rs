use crate::models::DbAppointment;
use chrono::{DateTime, Utc};
use eyre::Result;
use salonbook_core::models::AppointmentFilter;
use sqlx::{Pool, Postgres, QueryBuilder};

pub async fn create_appointment(
    pool: &Pool<Postgres>,
    user_id: i64,
    master_id: i64,
    service_id: i64,
    appointment_time: DateTime<Utc>,
    status: &str,
) -> Result<DbAppointment> {
    tracing::debug!(
        "Creating appointment: user_id={}, master_id={}, service_id={}, time={}",
        user_id, master_id, service_id, appointment_time
    );

    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        INSERT INTO appointments (user_id, master_id, service_id, appointment_time, status)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, user_id, master_id, service_id, appointment_time, status
        "#,
    )
    .bind(user_id)
    .bind(master_id)
    .bind(service_id)
    .bind(appointment_time)
    .bind(status)
    .fetch_one(pool)
    .await?;

    Ok(appointment)
}

pub async fn get_appointment_by_id(
    pool: &Pool<Postgres>,
    id: i64,
) -> Result<Option<DbAppointment>> {
    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, user_id, master_id, service_id, appointment_time, status
        FROM appointments
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(appointment)
}

pub async fn find_appointments(
    pool: &Pool<Postgres>,
    filter: &AppointmentFilter,
) -> Result<Vec<DbAppointment>> {
    tracing::debug!("Finding appointments: {:?}", filter);

    let mut query = QueryBuilder::<Postgres>::new(
        "SELECT id, user_id, master_id, service_id, appointment_time, status \
         FROM appointments WHERE TRUE",
    );

    if let Some(client_id) = filter.client_id {
        query.push(" AND user_id = ").push_bind(client_id.get());
    }
    if let Some(master_id) = filter.master_id {
        query.push(" AND master_id = ").push_bind(master_id.get());
    }
    if let Some(appointment_time) = filter.appointment_time {
        query.push(" AND appointment_time = ").push_bind(appointment_time);
    }
    if filter.active_only {
        query.push(" AND status <> 'Cancelled'");
    }
    if let Some(excluded) = filter.excluding {
        query.push(" AND id <> ").push_bind(excluded.get());
    }
    query.push(" ORDER BY id ASC");

    let appointments = query
        .build_query_as::<DbAppointment>()
        .fetch_all(pool)
        .await?;

    Ok(appointments)
}

/// Writes back time and status. Returns whether a row was updated.
pub async fn update_appointment(
    pool: &Pool<Postgres>,
    id: i64,
    appointment_time: DateTime<Utc>,
    status: &str,
) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE appointments
        SET appointment_time = $2, status = $3
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(appointment_time)
    .bind(status)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_appointment(pool: &Pool<Postgres>, id: i64) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM appointments
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
