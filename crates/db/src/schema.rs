use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

/// Partial unique index backing the one-active-appointment-per-slot rule.
pub const ACTIVE_SLOT_INDEX: &str = "uq_appointments_active_slot";

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create users table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL,
            role VARCHAR(16) NOT NULL,
            password_hash TEXT NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_role CHECK (role IN ('Client', 'Master'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create services table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS services (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            duration_minutes INTEGER NOT NULL,
            price NUMERIC(10, 2) NOT NULL,
            CONSTRAINT positive_duration CHECK (duration_minutes > 0),
            CONSTRAINT non_negative_price CHECK (price >= 0)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create masters table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS masters (
            id BIGSERIAL PRIMARY KEY,
            user_id BIGINT NOT NULL UNIQUE REFERENCES users(id),
            specialization VARCHAR(255) NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create appointments table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS appointments (
            id BIGSERIAL PRIMARY KEY,
            user_id BIGINT NOT NULL REFERENCES users(id),
            master_id BIGINT NOT NULL REFERENCES masters(id),
            service_id BIGINT NOT NULL REFERENCES services(id),
            appointment_time TIMESTAMP WITH TIME ZONE NOT NULL,
            status VARCHAR(16) NOT NULL,
            CONSTRAINT valid_status CHECK (status IN ('Pending', 'Confirmed', 'Completed', 'Cancelled'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    let indexes = [
        "CREATE INDEX IF NOT EXISTS idx_appointments_master_time ON appointments(master_id, appointment_time)",
        "CREATE INDEX IF NOT EXISTS idx_appointments_user_id ON appointments(user_id)",
    ];
    for statement in indexes {
        sqlx::query(statement).execute(pool).await?;
    }

    sqlx::query(&format!(
        "CREATE UNIQUE INDEX IF NOT EXISTS {ACTIVE_SLOT_INDEX} \
         ON appointments(master_id, appointment_time) WHERE status <> 'Cancelled'"
    ))
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
