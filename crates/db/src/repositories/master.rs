use crate::models::DbMaster;
use eyre::Result;
use sqlx::{Pool, Postgres};

pub async fn create_master(
    pool: &Pool<Postgres>,
    user_id: i64,
    specialization: &str,
) -> Result<DbMaster> {
    tracing::debug!("Creating master profile: user_id={}", user_id);

    let master = sqlx::query_as::<_, DbMaster>(
        r#"
        INSERT INTO masters (user_id, specialization)
        VALUES ($1, $2)
        RETURNING id, user_id, specialization
        "#,
    )
    .bind(user_id)
    .bind(specialization)
    .fetch_one(pool)
    .await?;

    Ok(master)
}

pub async fn get_master_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<DbMaster>> {
    let master = sqlx::query_as::<_, DbMaster>(
        r#"
        SELECT id, user_id, specialization
        FROM masters
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(master)
}

pub async fn get_master_by_user_id(
    pool: &Pool<Postgres>,
    user_id: i64,
) -> Result<Option<DbMaster>> {
    let master = sqlx::query_as::<_, DbMaster>(
        r#"
        SELECT id, user_id, specialization
        FROM masters
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(master)
}

pub async fn get_masters_by_ids(pool: &Pool<Postgres>, ids: &[i64]) -> Result<Vec<DbMaster>> {
    let masters = sqlx::query_as::<_, DbMaster>(
        r#"
        SELECT id, user_id, specialization
        FROM masters
        WHERE id = ANY($1)
        "#,
    )
    .bind(ids)
    .fetch_all(pool)
    .await?;

    Ok(masters)
}

pub async fn get_all_masters(pool: &Pool<Postgres>) -> Result<Vec<DbMaster>> {
    let masters = sqlx::query_as::<_, DbMaster>(
        r#"
        SELECT id, user_id, specialization
        FROM masters
        ORDER BY id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(masters)
}
