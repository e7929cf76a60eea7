/*
 * Responsibility
 * - upi_transactions テーブル向け SQLx 操作
 * - UPI 支払い verification の証跡 (UTR / 金額 / payer VPA)
 * - UTR unique 制約違反は Conflict として返す
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::RepoError;

#[derive(Debug, FromRow)]
pub struct UpiTransactionRow {
    #[sqlx(rename = "transactionId")]
    pub transaction_id: Uuid,
    #[sqlx(rename = "verificationId")]
    pub verification_id: Uuid,
    pub utr: String,
    #[sqlx(rename = "amountPaise")]
    pub amount_paise: i64,
    #[sqlx(rename = "payerVpa")]
    pub payer_vpa: String,
    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

pub async fn create(
    db: &PgPool,
    verification_id: Uuid,
    utr: &str,
    amount_paise: i64,
    payer_vpa: &str,
) -> Result<UpiTransactionRow, RepoError> {
    let row = sqlx::query_as::<_, UpiTransactionRow>(
        r#"
        INSERT INTO upi_transactions ("verificationId", utr, "amountPaise", "payerVpa")
        VALUES ($1, $2, $3, $4)
        RETURNING "transactionId", "verificationId", utr, "amountPaise", "payerVpa", "createdAt"
        "#,
    )
    .bind(verification_id)
    .bind(utr)
    .bind(amount_paise)
    .bind(payer_vpa)
    .fetch_one(db)
    .await?;

    Ok(row)
}

pub async fn list_for_verification(
    db: &PgPool,
    verification_id: Uuid,
) -> Result<Vec<UpiTransactionRow>, RepoError> {
    let rows = sqlx::query_as::<_, UpiTransactionRow>(
        r#"
        SELECT "transactionId", "verificationId", utr, "amountPaise", "payerVpa", "createdAt"
        FROM upi_transactions
        WHERE "verificationId" = $1
        ORDER BY "createdAt" DESC
        "#,
    )
    .bind(verification_id)
    .fetch_all(db)
    .await?;

    Ok(rows)
}
