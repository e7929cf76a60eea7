//! Role gate: per-route allow-list on top of the authentication layer.
//!
//! 適用は `route_layer` で行う（認証 layer の内側で動く）:
//!
//! ```ignore
//! .route("/businesses", post(create_business))
//! .route_layer(middleware::from_fn(|req: Request, next: Next| {
//!     roles::require_any(OWNER_OR_ADMIN, req, next)
//! }))
//! ```
//!
//! - allow-list が無い route は「認証済みなら role 不問」
//! - 未知の role 文字列は parse できず、どの allow-list にも属さない
//! - credential 不備は外側の認証 layer が先に 401 を返すため、
//!   ここに来る request は AuthCtx を持っている前提

use axum::{body::Body, http::Request, middleware::Next, response::Response};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::services::auth::Role;

pub const OWNER_OR_ADMIN: &[Role] = &[Role::BusinessOwner, Role::Admin];
pub const CUSTOMER_ONLY: &[Role] = &[Role::Customer];
pub const ADMIN_ONLY: &[Role] = &[Role::Admin];

pub async fn require_any(
    allowed: &'static [Role],
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let ctx = req
        .extensions()
        .get::<AuthCtx>()
        // 認証 layer の外で使われた場合の保険。rejection は 401。
        .ok_or_else(|| AppError::unauthorized(None, None))?;

    let is_member = ctx
        .parsed_role()
        .is_some_and(|role| allowed.contains(&role));

    if !is_member {
        tracing::debug!(role = %ctx.role, user_id = %ctx.user_id, "role not permitted");
        return Err(AppError::Forbidden);
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::Ordering;

    use axum::{
        Router,
        http::{Request, StatusCode},
        middleware,
        routing::get,
    };
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::middleware::auth::access;
    use crate::middleware::auth::testing::{CallCount, StaticVerifier, body_json, test_state};

    async fn ok() -> StatusCode {
        StatusCode::NO_CONTENT
    }

    /// Auth layer + one role-gated route, mirroring the production wiring.
    fn gated_router(verifier: StaticVerifier, allowed: &'static [Role], calls: CallCount) -> Router {
        let state = test_state(Arc::new(verifier));
        let router = Router::new()
            .route(
                "/guarded",
                get(move || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    ok()
                }),
            )
            .route_layer(middleware::from_fn(move |req: Request<Body>, next: Next| {
                require_any(allowed, req, next)
            }));
        access::apply(router, state.clone()).with_state(state)
    }

    fn authed_request() -> Request<axum::body::Body> {
        Request::builder()
            .uri("/guarded")
            .header("authorization", "Bearer token")
            .body(axum::body::Body::empty())
            .expect("request")
    }

    #[tokio::test]
    async fn role_outside_allow_list_gets_403() {
        let calls = CallCount::default();
        let app = gated_router(
            StaticVerifier::new(Uuid::new_v4(), "CUSTOMER"),
            ADMIN_ONLY,
            calls.clone(),
        );

        let res = app.oneshot(authed_request()).await.expect("response");

        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        let body = body_json(res).await;
        assert_eq!(
            body,
            serde_json::json!({ "success": false, "message": "Forbidden: Access denied" })
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0, "handler must not run");
    }

    #[tokio::test]
    async fn role_in_allow_list_passes() {
        let calls = CallCount::default();
        let app = gated_router(
            StaticVerifier::new(Uuid::new_v4(), "ADMIN"),
            OWNER_OR_ADMIN,
            calls.clone(),
        );

        let res = app.oneshot(authed_request()).await.expect("response");

        assert_eq!(res.status(), StatusCode::NO_CONTENT);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unknown_role_is_not_a_member_of_any_allow_list() {
        let calls = CallCount::default();
        let app = gated_router(
            StaticVerifier::new(Uuid::new_v4(), "SOMETHING_NEW"),
            OWNER_OR_ADMIN,
            calls.clone(),
        );

        let res = app.oneshot(authed_request()).await.expect("response");

        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unknown_role_passes_routes_without_allow_list() {
        // No role layer: any authenticated identity is authorized.
        let calls = CallCount::default();
        let counted = calls.clone();
        let state = test_state(Arc::new(StaticVerifier::new(Uuid::new_v4(), "SOMETHING_NEW")));
        let router = Router::new().route(
            "/open",
            get(move || {
                counted.fetch_add(1, Ordering::SeqCst);
                ok()
            }),
        );
        let app = access::apply(router, state.clone()).with_state(state);

        let res = app
            .oneshot(
                Request::builder()
                    .uri("/open")
                    .header("authorization", "Bearer token")
                    .body(axum::body::Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(res.status(), StatusCode::NO_CONTENT);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn missing_credential_yields_401_before_the_role_check() {
        let calls = CallCount::default();
        let app = gated_router(
            StaticVerifier::new(Uuid::new_v4(), "CUSTOMER"),
            ADMIN_ONLY,
            calls.clone(),
        );

        let res = app
            .oneshot(
                Request::builder()
                    .uri("/guarded")
                    .body(axum::body::Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(res).await;
        assert_eq!(body["message"], "Authentication failed");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
