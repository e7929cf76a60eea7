/*
 * Responsibility
 * - reviews テーブル向け SQLx 操作
 * - (businessId, authorId) unique 制約違反は Conflict として返す
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::RepoError;

#[derive(Debug, FromRow)]
pub struct ReviewRow {
    #[sqlx(rename = "reviewId")]
    pub review_id: Uuid,
    #[sqlx(rename = "businessId")]
    pub business_id: i64,
    #[sqlx(rename = "authorId")]
    pub author_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

pub async fn create(
    db: &PgPool,
    business_id: i64,
    author_id: Uuid,
    rating: i32,
    comment: Option<&str>,
) -> Result<ReviewRow, RepoError> {
    let row = sqlx::query_as::<_, ReviewRow>(
        r#"
        INSERT INTO reviews ("businessId", "authorId", rating, comment)
        VALUES ($1, $2, $3, $4)
        RETURNING "reviewId", "businessId", "authorId", rating, comment, "createdAt"
        "#,
    )
    .bind(business_id)
    .bind(author_id)
    .bind(rating)
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
) -> Result<Vec<ReviewRow>, RepoError> {
    let rows = sqlx::query_as::<_, ReviewRow>(
        r#"
        SELECT "reviewId", "businessId", "authorId", rating, comment, "createdAt"
        FROM reviews
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
