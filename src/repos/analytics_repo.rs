/*
 * Responsibility
 * - analytics_events テーブル向け SQLx 操作 (VIEW / QR_SCAN の追記)
 * - 集計は SQL の count/avg そのまま (集計エンジンは持たない)
 */
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoError;

pub const EVENT_VIEW: &str = "VIEW";
pub const EVENT_QR_SCAN: &str = "QR_SCAN";

#[derive(Debug, FromRow)]
pub struct BusinessStats {
    pub views: i64,
    pub qr_scans: i64,
    pub review_count: i64,
    pub average_rating: Option<f64>,
    pub endorsement_count: i64,
}

pub async fn record_event(
    db: &PgPool,
    business_id: i64,
    event_type: &str,
) -> Result<(), RepoError> {
    sqlx::query(
        r#"
        INSERT INTO analytics_events ("businessId", "eventType")
        VALUES ($1, $2)
        "#,
    )
    .bind(business_id)
    .bind(event_type)
    .execute(db)
    .await?;

    Ok(())
}

pub async fn stats_for_business(db: &PgPool, business_id: i64) -> Result<BusinessStats, RepoError> {
    let row = sqlx::query_as::<_, BusinessStats>(
        r#"
        SELECT
            (SELECT count(*) FROM analytics_events
             WHERE "businessId" = $1 AND "eventType" = 'VIEW')     AS views,
            (SELECT count(*) FROM analytics_events
             WHERE "businessId" = $1 AND "eventType" = 'QR_SCAN')  AS qr_scans,
            (SELECT count(*) FROM reviews WHERE "businessId" = $1) AS review_count,
            (SELECT avg(rating)::float8 FROM reviews
             WHERE "businessId" = $1)                              AS average_rating,
            (SELECT count(*) FROM endorsements
             WHERE "businessId" = $1)                              AS endorsement_count
        "#,
    )
    .bind(business_id)
    .fetch_one(db)
    .await?;

    Ok(row)
}
