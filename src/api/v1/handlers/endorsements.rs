/*
 * Responsibility
 * - /businesses/{id}/endorsements 系 handler
 * - 自分の business への自己推薦は 400
 * - (businessId, endorserId) unique 制約 → 409
 */
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};

use crate::{
    api::v1::{
        dto::{
            endorsements::{CreateEndorsementRequest, EndorsementResponse},
            reviews::ListQuery,
        },
        extractors::{AuthCtxExtractor, public_id::PublicBusinessId},
    },
    error::AppError,
    repos::{business_repo, endorsement_repo, error::RepoError},
    state::AppState,
};

fn row_to_response(row: endorsement_repo::EndorsementRow) -> EndorsementResponse {
    EndorsementResponse {
        id: row.endorsement_id,
        endorser_id: row.endorser_id,
        comment: row.comment,
        created_at: row.created_at,
    }
}

pub async fn create_endorsement(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    business_id: PublicBusinessId,
    Json(req): Json<CreateEndorsementRequest>,
) -> Result<(StatusCode, Json<EndorsementResponse>), AppError> {
    req.validate().map_err(AppError::bad_request)?;

    let business = business_repo::get(&state.db, business_id.id)
        .await?
        .ok_or_else(|| AppError::not_found("business"))?;

    if business.owner_id == ctx.user_id {
        return Err(AppError::bad_request("cannot endorse your own business"));
    }

    let row = endorsement_repo::create(
        &state.db,
        business_id.id,
        ctx.user_id,
        req.comment.as_deref(),
    )
    .await
    .map_err(|e| match e {
        RepoError::Conflict => AppError::conflict("you have already endorsed this business"),
        RepoError::MissingReference => AppError::conflict("create your profile first"),
        other => AppError::from(other),
    })?;

    Ok((StatusCode::CREATED, Json(row_to_response(row))))
}

pub async fn list_endorsements(
    State(state): State<AppState>,
    business_id: PublicBusinessId,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<EndorsementResponse>>, AppError> {
    let limit = query.limit.unwrap_or(20).clamp(1, 100);
    let offset = query.offset.unwrap_or(0).max(0);

    let rows =
        endorsement_repo::list_for_business(&state.db, business_id.id, limit, offset).await?;

    Ok(Json(rows.into_iter().map(row_to_response).collect()))
}
