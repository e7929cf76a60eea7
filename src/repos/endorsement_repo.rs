/*
 * Responsibility
 * - endorsements テーブル向け SQLx 操作 (同業オーナーによる推薦)
 * - (businessId, endorserId) unique 制約違反は Conflict として返す
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::RepoError;

#[derive(Debug, FromRow)]
pub struct EndorsementRow {
    #[sqlx(rename = "endorsementId")]
    pub endorsement_id: Uuid,
    #[sqlx(rename = "businessId")]
    pub business_id: i64,
    #[sqlx(rename = "endorserId")]
    pub endorser_id: Uuid,
    pub comment: Option<String>,
    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

pub async fn create(
    db: &PgPool,
    business_id: i64,
    endorser_id: Uuid,
    comment: Option<&str>,
) -> Result<EndorsementRow, RepoError> {
    let row = sqlx::query_as::<_, EndorsementRow>(
        r#"
        INSERT INTO endorsements ("businessId", "endorserId", comment)
        VALUES ($1, $2, $3)
        RETURNING "endorsementId", "businessId", "endorserId", comment, "createdAt"
        "#,
    )
    .bind(business_id)
    .bind(endorser_id)
    .bind(comment)
    .fetch_one(db)
    .await?;

    Ok(row)
}

pub async fn list_for_business(
    db: &PgPool,
    business_id: i64,
    limit: i64,
    offset: i64,
) -> Result<Vec<EndorsementRow>, RepoError> {
    let rows = sqlx::query_as::<_, EndorsementRow>(
        r#"
        SELECT "endorsementId", "businessId", "endorserId", comment, "createdAt"
        FROM endorsements
        WHERE "businessId" = $1
        ORDER BY "createdAt" DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(business_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await?;

    Ok(rows)
}
