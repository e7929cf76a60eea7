/*
 * Responsibility
 * - /me 系 handler (認証済み主体のプロフィール)
 * - identity は AuthCtx が正。body に id や role を受け取らない
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::v1::{
        dto::users::{ProfileResponse, UpdateProfileRequest},
        extractors::AuthCtxExtractor,
    },
    error::AppError,
    repos::user_repo,
    state::AppState,
};

fn row_to_response(row: user_repo::UserRow) -> ProfileResponse {
    ProfileResponse {
        id: row.id,
        display_name: row.display_name,
        role: row.role,
        phone: row.phone,
        image_url: row.image_url,
    }
}

pub async fn get_me(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
) -> Result<Json<ProfileResponse>, AppError> {
    let row = user_repo::get(&state.db, ctx.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("profile"))?;

    Ok(Json(row_to_response(row)))
}

pub async fn update_me(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<(StatusCode, Json<ProfileResponse>), AppError> {
    req.validate().map_err(AppError::bad_request)?;

    // Upsert: the first PUT creates the row. The role column mirrors the
    // token's role claim (token stays authoritative).
    let row = user_repo::upsert(
        &state.db,
        ctx.user_id,
        req.display_name.trim(),
        &ctx.role,
        req.phone.as_deref(),
        req.image_url.as_deref(),
    )
    .await?;

    Ok((StatusCode::OK, Json(row_to_response(row))))
}
