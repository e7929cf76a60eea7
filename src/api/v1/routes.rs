/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - role allow-list は route_layer でここに集約する
 *   (認証そのものは app.rs が /api/v1 全体に掛ける)
 *
 * Policy
 * - layer 無し: 認証済みなら role 不問
 * - OWNER_OR_ADMIN / CUSTOMER_ONLY / ADMIN_ONLY: roles::require_any で 403
 * - 所有チェック (本人 or admin) は handler 側
 */
use axum::{
    Router,
    extract::Request,
    middleware::{self, Next},
    routing::{get, post, put},
};

use crate::middleware::auth::roles::{self, ADMIN_ONLY, CUSTOMER_ONLY, OWNER_OR_ADMIN};
use crate::state::AppState;

use crate::api::v1::handlers::{
    analytics::get_business_analytics,
    businesses::{
        create_business, delete_business, get_business, get_business_qr, list_businesses,
        record_scan, update_business,
    },
    endorsements::{create_endorsement, list_endorsements},
    reviews::{create_review, list_reviews},
    users::{get_me, update_me},
    verifications::{
        attach_upi_transaction, create_verification, decide_verification, list_upi_transactions,
        list_verifications,
    },
};

pub fn routes() -> Router<AppState> {
    authenticated_routes()
        .merge(owner_routes())
        .merge(customer_routes())
        .merge(admin_routes())
}

/// Any authenticated identity, regardless of role.
fn authenticated_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_me).put(update_me))
        .route("/businesses", get(list_businesses))
        .route("/businesses/{business_id}", get(get_business))
        .route("/businesses/{business_id}/reviews", get(list_reviews))
        .route(
            "/businesses/{business_id}/endorsements",
            get(list_endorsements),
        )
        .route("/businesses/{business_id}/scan", post(record_scan))
}

fn owner_routes() -> Router<AppState> {
    Router::new()
        .route("/businesses", post(create_business))
        .route(
            "/businesses/{business_id}",
            put(update_business).delete(delete_business),
        )
        .route("/businesses/{business_id}/qr", get(get_business_qr))
        .route(
            "/businesses/{business_id}/analytics",
            get(get_business_analytics),
        )
        .route(
            "/businesses/{business_id}/verifications",
            get(list_verifications).post(create_verification),
        )
        .route(
            "/verifications/{verification_id}/upi",
            get(list_upi_transactions).post(attach_upi_transaction),
        )
        // endorsement の作成は「他業者の owner」なので owner gate 側
        .route(
            "/businesses/{business_id}/endorsements",
            post(create_endorsement),
        )
        .route_layer(middleware::from_fn(|req: Request, next: Next| {
            roles::require_any(OWNER_OR_ADMIN, req, next)
        }))
}

fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/businesses/{business_id}/reviews", post(create_review))
        .route_layer(middleware::from_fn(|req: Request, next: Next| {
            roles::require_any(CUSTOMER_ONLY, req, next)
        }))
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/verifications/{verification_id}",
            put(decide_verification),
        )
        .route_layer(middleware::from_fn(|req: Request, next: Next| {
            roles::require_any(ADMIN_ONLY, req, next)
        }))
}
