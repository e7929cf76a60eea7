/*
 * Responsibility
 * - /businesses 系 CRUD handler
 * - Path の id は公開 ID → extractor で復号して内部 ID として受け取る
 * - 所有チェック (owner or admin) はここで AuthCtx を使って行う
 * - 詳細 read は Valkey にキャッシュ。write 時はキー削除で invalidate
 */
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};

use crate::{
    api::v1::{
        dto::businesses::{
            BusinessResponse, CreateBusinessRequest, ListBusinessesQuery, QrPayloadResponse,
            UpdateBusinessRequest,
        },
        extractors::{AuthCtxExtractor, public_id::PublicBusinessId},
    },
    error::AppError,
    repos::{analytics_repo, business_repo, error::RepoError},
    services::cache::{CacheError, ttl_seconds},
    state::AppState,
};

fn cache_key(business_id: i64) -> String {
    format!("business:{}", business_id)
}

// Undecodable entries (stale schema, corrupted value) are a cache-layer error,
// not a request error: the caller drops the key and falls back to the DB.
fn decode_cached(cached: &str) -> Result<BusinessResponse, CacheError> {
    serde_json::from_str(cached).map_err(|e| CacheError::InvalidValue(e.to_string()))
}

fn row_to_response(
    state: &AppState,
    row: business_repo::BusinessRow,
) -> Result<BusinessResponse, AppError> {
    let public_id = state.id_codec.encode(row.business_id)?;

    Ok(BusinessResponse {
        id: public_id,
        owner_id: row.owner_id,
        name: row.name,
        category: row.category,
        description: row.description,
        phone: row.phone,
        address: row.address,
        city: row.city,
        upi_vpa: row.upi_vpa,
        trust_score: row.trust_score,
    })
}

/// Fetch the row and enforce owner-or-admin in one place.
async fn get_managed(
    state: &AppState,
    ctx: &crate::api::v1::extractors::AuthCtx,
    business_id: i64,
) -> Result<business_repo::BusinessRow, AppError> {
    let row = business_repo::get(&state.db, business_id)
        .await?
        .ok_or_else(|| AppError::not_found("business"))?;

    if !ctx.can_manage(row.owner_id) {
        return Err(AppError::Forbidden);
    }

    Ok(row)
}

pub async fn list_businesses(
    State(state): State<AppState>,
    Query(query): Query<ListBusinessesQuery>,
) -> Result<Json<Vec<BusinessResponse>>, AppError> {
    let limit = query.limit.unwrap_or(20).clamp(1, 100);
    let offset = query.offset.unwrap_or(0).max(0);

    let rows = business_repo::list(&state.db, limit, offset, query.category.as_deref()).await?;

    let mut res = Vec::with_capacity(rows.len());
    for row in rows {
        res.push(row_to_response(&state, row)?);
    }

    Ok(Json(res))
}

pub async fn create_business(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Json(req): Json<CreateBusinessRequest>,
) -> Result<(StatusCode, Json<BusinessResponse>), AppError> {
    req.validate().map_err(AppError::bad_request)?;

    let row = business_repo::create(
        &state.db,
        ctx.user_id,
        req.name.trim(),
        req.category.trim(),
        req.description.as_deref(),
        req.phone.as_deref(),
        req.address.as_deref(),
        req.city.as_deref(),
        req.upi_vpa.as_deref(),
    )
    .await
    .map_err(|e| match e {
        // ownerId references users: a valid token whose profile row was never
        // created (first PUT /me) must not surface as a 500
        RepoError::MissingReference => AppError::conflict("create your profile first"),
        other => AppError::from(other),
    })?;

    let res = row_to_response(&state, row)?;
    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn get_business(
    State(state): State<AppState>,
    business_id: PublicBusinessId,
) -> Result<Json<BusinessResponse>, AppError> {
    let key = cache_key(business_id.id);

    // Cache first. Any cache failure falls back to the DB (fail-open).
    match state.cache.get_string(&key).await {
        Ok(Some(cached)) => match decode_cached(&cached) {
            Ok(res) => {
                record_view(&state, business_id.id).await;
                return Ok(Json(res));
            }
            // Stale/incompatible entry: drop it and fall through.
            Err(err) => {
                tracing::warn!(error = %err, "dropping undecodable cache entry");
                let _ = state.cache.del(&key).await;
            }
        },
        Ok(None) => {}
        Err(err) => {
            tracing::warn!(error = %err, "business cache read failed");
        }
    }

    let row = business_repo::get(&state.db, business_id.id)
        .await?
        .ok_or_else(|| AppError::not_found("business"))?;

    let res = row_to_response(&state, row)?;

    if let Ok(serialized) = serde_json::to_string(&res)
        && let Err(err) = state
            .cache
            .set_string_with_ttl(
                &key,
                &serialized,
                ttl_seconds(state.business_cache_ttl_seconds),
            )
            .await
    {
        tracing::warn!(error = %err, "business cache write failed");
    }

    record_view(&state, business_id.id).await;

    Ok(Json(res))
}

pub async fn update_business(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    business_id: PublicBusinessId,
    Json(req): Json<UpdateBusinessRequest>,
) -> Result<Json<BusinessResponse>, AppError> {
    req.validate().map_err(AppError::bad_request)?;

    get_managed(&state, &ctx, business_id.id).await?;

    let row = business_repo::update(
        &state.db,
        business_id.id,
        req.name.as_deref(),
        req.category.as_deref(),
        req.description.as_deref(),
        req.phone.as_deref(),
        req.address.as_deref(),
        req.city.as_deref(),
        req.upi_vpa.as_deref(),
    )
    .await?
    .ok_or_else(|| AppError::not_found("business"))?;

    invalidate(&state, business_id.id).await;

    Ok(Json(row_to_response(&state, row)?))
}

pub async fn delete_business(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    business_id: PublicBusinessId,
) -> Result<StatusCode, AppError> {
    get_managed(&state, &ctx, business_id.id).await?;

    let deleted = business_repo::delete(&state.db, business_id.id).await?;

    invalidate(&state, business_id.id).await;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("business"))
    }
}

/// QR payload for the owner: the string to encode client-side.
pub async fn get_business_qr(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    business_id: PublicBusinessId,
) -> Result<Json<QrPayloadResponse>, AppError> {
    get_managed(&state, &ctx, business_id.id).await?;

    let public_id = state.id_codec.encode(business_id.id)?;
    let share_url = state.share_links.business_url(&public_id);

    Ok(Json(QrPayloadResponse {
        id: public_id,
        share_url,
    }))
}

/// QR scan ping from the frontend after rendering a scanned profile.
pub async fn record_scan(
    State(state): State<AppState>,
    business_id: PublicBusinessId,
) -> Result<StatusCode, AppError> {
    // 404 for unknown ids; the scan itself is fail-open.
    business_repo::get(&state.db, business_id.id)
        .await?
        .ok_or_else(|| AppError::not_found("business"))?;

    if let Err(err) =
        analytics_repo::record_event(&state.db, business_id.id, analytics_repo::EVENT_QR_SCAN).await
    {
        tracing::warn!(error = %err, "failed to record qr scan");
    }

    Ok(StatusCode::NO_CONTENT)
}

// Analytics must never fail a read path (fail-open for metrics).
async fn record_view(state: &AppState, business_id: i64) {
    if let Err(err) =
        analytics_repo::record_event(&state.db, business_id, analytics_repo::EVENT_VIEW).await
    {
        tracing::warn!(error = %err, "failed to record profile view");
    }
}

async fn invalidate(state: &AppState, business_id: i64) {
    // Invalidation is key deletion, nothing smarter. A failed DEL only means
    // a stale read until the TTL runs out.
    if let Err(err) = state.cache.del(&cache_key(business_id)).await {
        tracing::warn!(error = %err, "business cache invalidation failed");
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn cached_entry_round_trips() {
        let res = BusinessResponse {
            id: "k3J9mQxLp2".to_string(),
            owner_id: Uuid::new_v4(),
            name: "Chai Corner".to_string(),
            category: "cafe".to_string(),
            description: None,
            phone: None,
            address: None,
            city: None,
            upi_vpa: None,
            trust_score: 0,
        };
        let serialized = serde_json::to_string(&res).expect("serialize");

        let decoded = decode_cached(&serialized).expect("decode");
        assert_eq!(decoded.id, res.id);
        assert_eq!(decoded.owner_id, res.owner_id);
    }

    #[test]
    fn undecodable_entry_is_an_invalid_value_error() {
        for stale in ["", "not json", r#"{"id": 42}"#] {
            assert!(
                matches!(decode_cached(stale), Err(CacheError::InvalidValue(_))),
                "{stale:?} must be rejected as an invalid cache value"
            );
        }
    }
}
