/*
 * Responsibility
 * - /businesses/{id}/reviews 系 handler
 * - 1 business × 1 author につき 1 review (unique 制約 → 409)
 */
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};

use crate::{
    api::v1::{
        dto::reviews::{CreateReviewRequest, ListQuery, ReviewResponse},
        extractors::{AuthCtxExtractor, public_id::PublicBusinessId},
    },
    error::AppError,
    repos::{business_repo, error::RepoError, review_repo},
    state::AppState,
};

fn row_to_response(row: review_repo::ReviewRow) -> ReviewResponse {
    ReviewResponse {
        id: row.review_id,
        author_id: row.author_id,
        rating: row.rating,
        comment: row.comment,
        created_at: row.created_at,
    }
}

pub async fn create_review(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    business_id: PublicBusinessId,
    Json(req): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<ReviewResponse>), AppError> {
    req.validate().map_err(AppError::bad_request)?;

    business_repo::get(&state.db, business_id.id)
        .await?
        .ok_or_else(|| AppError::not_found("business"))?;

    let row = review_repo::create(
        &state.db,
        business_id.id,
        ctx.user_id,
        req.rating,
        req.comment.as_deref(),
    )
    .await
    .map_err(|e| match e {
        RepoError::Conflict => AppError::conflict("you have already reviewed this business"),
        RepoError::MissingReference => AppError::conflict("create your profile first"),
        other => AppError::from(other),
    })?;

    Ok((StatusCode::CREATED, Json(row_to_response(row))))
}

pub async fn list_reviews(
    State(state): State<AppState>,
    business_id: PublicBusinessId,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ReviewResponse>>, AppError> {
    let limit = query.limit.unwrap_or(20).clamp(1, 100);
    let offset = query.offset.unwrap_or(0).max(0);

    let rows = review_repo::list_for_business(&state.db, business_id.id, limit, offset).await?;

    Ok(Json(rows.into_iter().map(row_to_response).collect()))
}
