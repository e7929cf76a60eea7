/*
 * Responsibility
 * - /businesses/{id}/analytics handler (owner or admin)
 * - 集計は repo の SQL に委譲。ここは所有チェックと整形のみ
 */
use axum::{Json, extract::State};

use crate::{
    api::v1::{
        dto::analytics::BusinessAnalyticsResponse,
        extractors::{AuthCtxExtractor, public_id::PublicBusinessId},
    },
    error::AppError,
    repos::{analytics_repo, business_repo},
    state::AppState,
};

pub async fn get_business_analytics(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    business_id: PublicBusinessId,
) -> Result<Json<BusinessAnalyticsResponse>, AppError> {
    let business = business_repo::get(&state.db, business_id.id)
        .await?
        .ok_or_else(|| AppError::not_found("business"))?;

    if !ctx.can_manage(business.owner_id) {
        return Err(AppError::Forbidden);
    }

    let stats = analytics_repo::stats_for_business(&state.db, business_id.id).await?;

    Ok(Json(BusinessAnalyticsResponse {
        views: stats.views,
        qr_scans: stats.qr_scans,
        review_count: stats.review_count,
        average_rating: stats.average_rating,
        endorsement_count: stats.endorsement_count,
    }))
}
