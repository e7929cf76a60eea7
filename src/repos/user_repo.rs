/*
 * Responsibility
 * - users テーブル向け SQLx 操作
 * - identity は token 側が正。ここはプロフィール行 (表示名・電話など) のみ
 * - DB エラーは RepoError に変換して返す
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::RepoError;

#[derive(Debug, FromRow)]
pub struct UserRow {
    #[sqlx(rename = "userId")]
    pub id: Uuid,
    #[sqlx(rename = "displayName")]
    pub display_name: String,
    pub role: String,
    pub phone: Option<String>,
    #[sqlx(rename = "imageUrl")]
    pub image_url: Option<String>,
    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[sqlx(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

pub async fn get(db: &PgPool, user_id: Uuid) -> Result<Option<UserRow>, RepoError> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT "userId", "displayName", role, phone, "imageUrl", "createdAt", "updatedAt"
        FROM users
        WHERE "userId" = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

/// Upsert: the subject id comes from the verified token, so the first PUT /me
/// creates the row. The role column mirrors the token role (denormalized for
/// directory queries; the token stays authoritative).
pub async fn upsert(
    db: &PgPool,
    user_id: Uuid,
    display_name: &str,
    role: &str,
    phone: Option<&str>,
    image_url: Option<&str>,
) -> Result<UserRow, RepoError> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users ("userId", "displayName", role, phone, "imageUrl")
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT ("userId") DO UPDATE SET
            "displayName" = EXCLUDED."displayName",
            role = EXCLUDED.role,
            phone = EXCLUDED.phone,
            "imageUrl" = EXCLUDED."imageUrl",
            "updatedAt" = now()
        RETURNING "userId", "displayName", role, phone, "imageUrl", "createdAt", "updatedAt"
        "#,
    )
    .bind(user_id)
    .bind(display_name)
    .bind(role)
    .bind(phone)
    .bind(image_url)
    .fetch_one(db)
    .await?;

    Ok(row)
}
