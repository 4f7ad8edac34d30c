use crate::models::DbService;
use eyre::Result;
use rust_decimal::Decimal;
use sqlx::{Pool, Postgres};

pub async fn create_service(
    pool: &Pool<Postgres>,
    name: &str,
    duration_minutes: i32,
    price: Decimal,
) -> Result<DbService> {
    let service = sqlx::query_as::<_, DbService>(
        r#"
        INSERT INTO services (name, duration_minutes, price)
        VALUES ($1, $2, $3)
        RETURNING id, name, duration_minutes, price
        "#,
    )
    .bind(name)
    .bind(duration_minutes)
    .bind(price)
    .fetch_one(pool)
    .await?;

    Ok(service)
}

pub async fn get_service_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<DbService>> {
    let service = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, name, duration_minutes, price
        FROM services
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(service)
}

pub async fn get_services_by_ids(pool: &Pool<Postgres>, ids: &[i64]) -> Result<Vec<DbService>> {
    let services = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, name, duration_minutes, price
        FROM services
        WHERE id = ANY($1)
        "#,
    )
    .bind(ids)
    .fetch_all(pool)
    .await?;

    Ok(services)
}

pub async fn get_all_services(pool: &Pool<Postgres>) -> Result<Vec<DbService>> {
    let services = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, name, duration_minutes, price
        FROM services
        ORDER BY id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(services)
}
