/*
 * Responsibility
 * - trust verification 系 handler
 * - request 作成は business owner 本人、decide は admin のみ (route 側で gate)
 * - status 遷移は PENDING → VERIFIED | REJECTED の一方向
 * - UPI 証跡は PENDING な UPI_PAYMENT request にのみ添付できる
 */
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    api::v1::{
        dto::verifications::{
            AttachUpiTransactionRequest, CreateVerificationRequest, DecideVerificationRequest,
            UpiTransactionResponse, VerificationMethod, VerificationResponse,
        },
        extractors::{AuthCtx, AuthCtxExtractor, public_id::PublicBusinessId},
    },
    error::AppError,
    repos::{business_repo, error::RepoError, upi_transaction_repo, verification_repo},
    state::AppState,
};

fn row_to_response(row: verification_repo::VerificationRow) -> VerificationResponse {
    VerificationResponse {
        id: row.verification_id,
        method: row.method,
        status: row.status,
        reviewer_note: row.reviewer_note,
        created_at: row.created_at,
        decided_at: row.decided_at,
    }
}

fn txn_to_response(row: upi_transaction_repo::UpiTransactionRow) -> UpiTransactionResponse {
    UpiTransactionResponse {
        id: row.transaction_id,
        utr: row.utr,
        amount_paise: row.amount_paise,
        payer_vpa: row.payer_vpa,
        created_at: row.created_at,
    }
}

async fn get_owned_business(
    state: &AppState,
    ctx: &AuthCtx,
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

pub async fn create_verification(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    business_id: PublicBusinessId,
    Json(req): Json<CreateVerificationRequest>,
) -> Result<(StatusCode, Json<VerificationResponse>), AppError> {
    get_owned_business(&state, &ctx, business_id.id).await?;

    let row = verification_repo::create(&state.db, business_id.id, req.method.as_str()).await?;

    Ok((StatusCode::CREATED, Json(row_to_response(row))))
}

pub async fn list_verifications(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    business_id: PublicBusinessId,
) -> Result<Json<Vec<VerificationResponse>>, AppError> {
    get_owned_business(&state, &ctx, business_id.id).await?;

    let rows = verification_repo::list_for_business(&state.db, business_id.id).await?;

    Ok(Json(rows.into_iter().map(row_to_response).collect()))
}

/// Admin decision. Deciding an already-decided request is a conflict, not an
/// overwrite: the transition is one-way.
pub async fn decide_verification(
    State(state): State<AppState>,
    Path(verification_id): Path<Uuid>,
    Json(req): Json<DecideVerificationRequest>,
) -> Result<Json<VerificationResponse>, AppError> {
    req.validate().map_err(AppError::bad_request)?;

    let existing = verification_repo::get(&state.db, verification_id)
        .await?
        .ok_or_else(|| AppError::not_found("verification"))?;

    if existing.status != "PENDING" {
        return Err(AppError::conflict("verification is already decided"));
    }

    let row = verification_repo::decide(
        &state.db,
        verification_id,
        req.status.as_str(),
        req.reviewer_note.as_deref(),
    )
    .await?
    // Raced with another decision between get and update.
    .ok_or_else(|| AppError::conflict("verification is already decided"))?;

    Ok(Json(row_to_response(row)))
}

pub async fn attach_upi_transaction(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Path(verification_id): Path<Uuid>,
    Json(req): Json<AttachUpiTransactionRequest>,
) -> Result<(StatusCode, Json<UpiTransactionResponse>), AppError> {
    req.validate().map_err(AppError::bad_request)?;

    let verification = verification_repo::get(&state.db, verification_id)
        .await?
        .ok_or_else(|| AppError::not_found("verification"))?;

    // Owner-or-admin on the business behind the verification.
    get_owned_business(&state, &ctx, verification.business_id).await?;

    if verification.method != VerificationMethod::UpiPayment.as_str() {
        return Err(AppError::conflict(
            "verification method does not accept UPI evidence",
        ));
    }
    if verification.status != "PENDING" {
        return Err(AppError::conflict("verification is already decided"));
    }

    let row = upi_transaction_repo::create(
        &state.db,
        verification_id,
        req.utr.trim(),
        req.amount_paise,
        &req.payer_vpa,
    )
    .await
    .map_err(|e| match e {
        RepoError::Conflict => AppError::conflict("this UTR was already submitted"),
        other => AppError::from(other),
    })?;

    Ok((StatusCode::CREATED, Json(txn_to_response(row))))
}

pub async fn list_upi_transactions(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Path(verification_id): Path<Uuid>,
) -> Result<Json<Vec<UpiTransactionResponse>>, AppError> {
    let verification = verification_repo::get(&state.db, verification_id)
        .await?
        .ok_or_else(|| AppError::not_found("verification"))?;

    get_owned_business(&state, &ctx, verification.business_id).await?;

    let rows = upi_transaction_repo::list_for_verification(&state.db, verification_id).await?;

    Ok(Json(rows.into_iter().map(txn_to_response).collect()))
}
