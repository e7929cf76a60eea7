/*
 * Responsibility
 * - verifications テーブル向け SQLx 操作 (trust verification リクエスト)
 * - status 遷移は PENDING → VERIFIED | REJECTED のみ
 *   (decide は WHERE status = 'PENDING' で原子的に絞る)
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::RepoError;

#[derive(Debug, FromRow)]
pub struct VerificationRow {
    #[sqlx(rename = "verificationId")]
    pub verification_id: Uuid,
    #[sqlx(rename = "businessId")]
    pub business_id: i64,
    pub method: String,
    pub status: String,
    #[sqlx(rename = "reviewerNote")]
    pub reviewer_note: Option<String>,
    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[sqlx(rename = "decidedAt")]
    pub decided_at: Option<DateTime<Utc>>,
}

pub async fn create(
    db: &PgPool,
    business_id: i64,
    method: &str,
) -> Result<VerificationRow, RepoError> {
    let row = sqlx::query_as::<_, VerificationRow>(
        r#"
        INSERT INTO verifications ("businessId", method)
        VALUES ($1, $2)
        RETURNING "verificationId", "businessId", method, status,
                  "reviewerNote", "createdAt", "decidedAt"
        "#,
    )
    .bind(business_id)
    .bind(method)
    .fetch_one(db)
    .await?;

    Ok(row)
}

pub async fn get(
    db: &PgPool,
    verification_id: Uuid,
) -> Result<Option<VerificationRow>, RepoError> {
    let row = sqlx::query_as::<_, VerificationRow>(
        r#"
        SELECT "verificationId", "businessId", method, status,
               "reviewerNote", "createdAt", "decidedAt"
        FROM verifications
        WHERE "verificationId" = $1
        "#,
    )
    .bind(verification_id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn list_for_business(
    db: &PgPool,
    business_id: i64,
) -> Result<Vec<VerificationRow>, RepoError> {
    let rows = sqlx::query_as::<_, VerificationRow>(
        r#"
        SELECT "verificationId", "businessId", method, status,
               "reviewerNote", "createdAt", "decidedAt"
        FROM verifications
        WHERE "businessId" = $1
        ORDER BY "createdAt" DESC
        "#,
    )
    .bind(business_id)
    .fetch_all(db)
    .await?;

    Ok(rows)
}

/// Decide a PENDING request. Returns `None` when the row does not exist or was
/// already decided (caller distinguishes via a preceding `get`).
pub async fn decide(
    db: &PgPool,
    verification_id: Uuid,
    status: &str,
    reviewer_note: Option<&str>,
) -> Result<Option<VerificationRow>, RepoError> {
    let row = sqlx::query_as::<_, VerificationRow>(
        r#"
        UPDATE verifications
        SET status = $2, "reviewerNote" = $3, "decidedAt" = now()
        WHERE "verificationId" = $1 AND status = 'PENDING'
        RETURNING "verificationId", "businessId", method, status,
                  "reviewerNote", "createdAt", "decidedAt"
        "#,
    )
    .bind(verification_id)
    .bind(status)
    .bind(reviewer_note)
    .fetch_optional(db)
    .await?;

    Ok(row)
}
