/*
 * Responsibility
 * - businesses テーブル向け SQLx 操作
 * - 内部 ID は BIGSERIAL (公開側は sqids で encode して返す)
 * - trustScore は保存値をそのまま返すだけ (計算エンジンは存在しない)
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::RepoError;

#[derive(Debug, Clone, FromRow)]
pub struct BusinessRow {
    #[sqlx(rename = "businessId")]
    pub business_id: i64,
    #[sqlx(rename = "ownerId")]
    pub owner_id: Uuid,
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    #[sqlx(rename = "upiVpa")]
    pub upi_vpa: Option<String>,
    #[sqlx(rename = "trustScore")]
    pub trust_score: i32,
    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[sqlx(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

const COLUMNS: &str = r#""businessId", "ownerId", name, category, description, phone, address, city, "upiVpa", "trustScore", "createdAt", "updatedAt""#;

pub async fn list(
    db: &PgPool,
    limit: i64,
    offset: i64,
    category: Option<&str>,
) -> Result<Vec<BusinessRow>, RepoError> {
    // $3 is NULL when no category filter was requested.
    let sql = format!(
        r#"
        SELECT {COLUMNS}
        FROM businesses
        WHERE ($3::text IS NULL OR category = $3)
        ORDER BY "businessId" DESC
        LIMIT $1 OFFSET $2
        "#
    );

    let rows = sqlx::query_as::<_, BusinessRow>(&sql)
        .bind(limit)
        .bind(offset)
        .bind(category)
        .fetch_all(db)
        .await?;

    Ok(rows)
}

pub async fn create(
    db: &PgPool,
    owner_id: Uuid,
    name: &str,
    category: &str,
    description: Option<&str>,
    phone: Option<&str>,
    address: Option<&str>,
    city: Option<&str>,
    upi_vpa: Option<&str>,
) -> Result<BusinessRow, RepoError> {
    let sql = format!(
        r#"
        INSERT INTO businesses ("ownerId", name, category, description, phone, address, city, "upiVpa")
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING {COLUMNS}
        "#
    );

    let row = sqlx::query_as::<_, BusinessRow>(&sql)
        .bind(owner_id)
        .bind(name)
        .bind(category)
        .bind(description)
        .bind(phone)
        .bind(address)
        .bind(city)
        .bind(upi_vpa)
        .fetch_one(db)
        .await?;

    Ok(row)
}

pub async fn get(db: &PgPool, business_id: i64) -> Result<Option<BusinessRow>, RepoError> {
    let sql = format!(
        r#"
        SELECT {COLUMNS}
        FROM businesses
        WHERE "businessId" = $1
        "#
    );

    let row = sqlx::query_as::<_, BusinessRow>(&sql)
        .bind(business_id)
        .fetch_optional(db)
        .await?;

    Ok(row)
}

pub async fn update(
    db: &PgPool,
    business_id: i64,
    name: Option<&str>,
    category: Option<&str>,
    description: Option<&str>,
    phone: Option<&str>,
    address: Option<&str>,
    city: Option<&str>,
    upi_vpa: Option<&str>,
) -> Result<Option<BusinessRow>, RepoError> {
    // COALESCE: None は「更新しない」。NULL への明示クリアは現状未対応
    // (元システムのフォームも空更新はフィールド維持の挙動)。
    let sql = format!(
        r#"
        UPDATE businesses
        SET
            name = COALESCE($2, name),
            category = COALESCE($3, category),
            description = COALESCE($4, description),
            phone = COALESCE($5, phone),
            address = COALESCE($6, address),
            city = COALESCE($7, city),
            "upiVpa" = COALESCE($8, "upiVpa"),
            "updatedAt" = now()
        WHERE "businessId" = $1
        RETURNING {COLUMNS}
        "#
    );

    let row = sqlx::query_as::<_, BusinessRow>(&sql)
        .bind(business_id)
        .bind(name)
        .bind(category)
        .bind(description)
        .bind(phone)
        .bind(address)
        .bind(city)
        .bind(upi_vpa)
        .fetch_optional(db)
        .await?;

    Ok(row)
}

pub async fn delete(db: &PgPool, business_id: i64) -> Result<bool, RepoError> {
    let result = sqlx::query(
        r#"
        DELETE FROM businesses
        WHERE "businessId" = $1
        "#,
    )
    .bind(business_id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}
