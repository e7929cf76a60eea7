/*
 * Responsibility
 * - Analytics summary の response DTO
 */
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct BusinessAnalyticsResponse {
    pub views: i64,
    pub qr_scans: i64,
    pub review_count: i64,
    pub average_rating: Option<f64>,
    pub endorsement_count: i64,
}
