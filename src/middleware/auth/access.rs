//! Authentication layer of the authorization gate.
//!
//! Per request:
//! - `Authorization: Bearer <token>` を取り出す
//! - TokenVerifier (JWT 検証) に委譲する
//! - 成功時のみ AuthCtx を extensions に入れて next を呼ぶ
//!
//! Rejection は常に `{ success: false, message }` の封筒で返す。
//! verifier が client 向け reason / status を示さない場合の既定は
//! "Authentication failed" / 401。

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::state::AppState;

/// `/api/v1/*` に認証を掛けるための middleware を適用する。
///
/// 例：
/// ```ignore
/// let v1 = api::v1::routes();
/// let v1 = middleware::auth::access::apply(v1, state.clone());
/// app = app.nest("/api/v1", v1);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let auth = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::unauthorized(None, None))?;

    let token = auth
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::unauthorized(None, None))?;

    // 署名 / iss / aud / exp / claim 検証は verifier 側で実施
    let verified = match state.auth.verify(token) {
        Ok(v) => v,
        Err(err) => {
            tracing::warn!(
                error = %err,
                "access token verification failed"
            );
            return Err(AppError::unauthorized(
                err.reason().map(str::to_string),
                err.status(),
            ));
        }
    };

    let auth_ctx = AuthCtx::new(verified.user_id, verified.role, verified.jti);

    // 相関用: jti があれば access log に載せる
    tracing::debug!(
        user_id = %auth_ctx.user_id,
        jti = auth_ctx.jti.as_deref().unwrap_or("-"),
        "access token verified"
    );

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(auth_ctx);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::Ordering;

    use axum::{
        Json, Router,
        http::{Request, StatusCode},
        routing::get,
    };
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::api::v1::extractors::AuthCtxExtractor;
    use crate::middleware::auth::testing::{
        CallCount, FailingVerifier, StaticVerifier, body_json, test_state,
    };

    /// Echoes the identity the gate injected.
    async fn whoami(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<serde_json::Value> {
        Json(serde_json::json!({ "id": ctx.user_id, "role": ctx.role, "jti": ctx.jti }))
    }

    fn guarded_router(
        verifier: Arc<dyn crate::services::auth::TokenVerifier>,
        calls: CallCount,
    ) -> Router {
        let state = test_state(verifier);
        let router = Router::new().route(
            "/whoami",
            get(move |ctx: AuthCtxExtractor| {
                calls.fetch_add(1, Ordering::SeqCst);
                whoami(ctx)
            }),
        );
        super::apply(router, state.clone()).with_state(state)
    }

    fn request(auth_header: Option<&str>) -> Request<axum::body::Body> {
        let mut builder = Request::builder().uri("/whoami");
        if let Some(value) = auth_header {
            builder = builder.header("authorization", value);
        }
        builder.body(axum::body::Body::empty()).expect("request")
    }

    #[tokio::test]
    async fn missing_credential_is_rejected_with_401() {
        let calls = CallCount::default();
        let app = guarded_router(Arc::new(StaticVerifier::customer()), calls.clone());

        let res = app.oneshot(request(None)).await.expect("response");

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(res).await;
        assert_eq!(body["success"], serde_json::json!(false));
        assert_eq!(body["message"], "Authentication failed");
        assert_eq!(calls.load(Ordering::SeqCst), 0, "handler must not run");
    }

    #[tokio::test]
    async fn non_bearer_scheme_is_rejected() {
        let calls = CallCount::default();
        let app = guarded_router(Arc::new(StaticVerifier::customer()), calls.clone());

        let res = app
            .oneshot(request(Some("Basic dXNlcjpwdw==")))
            .await
            .expect("response");

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn verifier_failure_without_reason_gets_default_message() {
        let calls = CallCount::default();
        let app = guarded_router(Arc::new(FailingVerifier::opaque()), calls.clone());

        let res = app
            .oneshot(request(Some("Bearer whatever")))
            .await
            .expect("response");

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(res).await;
        assert_eq!(body["message"], "Authentication failed");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn verifier_reason_is_surfaced_with_default_status() {
        let calls = CallCount::default();
        let app = guarded_router(
            Arc::new(FailingVerifier::with_reason("Token expired")),
            calls.clone(),
        );

        let res = app
            .oneshot(request(Some("Bearer stale")))
            .await
            .expect("response");

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(res).await;
        assert_eq!(body["message"], "Token expired");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn verifier_suggested_status_overrides_the_default() {
        let calls = CallCount::default();
        let app = guarded_router(
            Arc::new(FailingVerifier::with_reason_and_status(
                "Token revoked",
                StatusCode::FORBIDDEN,
            )),
            calls.clone(),
        );

        let res = app
            .oneshot(request(Some("Bearer revoked")))
            .await
            .expect("response");

        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        let body = body_json(res).await;
        assert_eq!(body["success"], serde_json::json!(false));
        assert_eq!(body["message"], "Token revoked");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn valid_credential_reaches_handler_with_bound_identity() {
        let user_id = Uuid::new_v4();
        let calls = CallCount::default();
        let app = guarded_router(
            Arc::new(StaticVerifier::new(user_id, "CUSTOMER").with_jti("jwt-1")),
            calls.clone(),
        );

        let res = app
            .oneshot(request(Some("Bearer good-token")))
            .await
            .expect("response");

        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(body["id"], serde_json::json!(user_id));
        assert_eq!(body["role"], "CUSTOMER");
        assert_eq!(body["jti"], "jwt-1");
        assert_eq!(calls.load(Ordering::SeqCst), 1, "handler runs exactly once");
    }

    async fn teapot() -> StatusCode {
        StatusCode::IM_A_TEAPOT
    }

    #[tokio::test]
    async fn handler_response_passes_through_unchanged() {
        let state = test_state(Arc::new(StaticVerifier::customer()));
        let router = Router::new().route("/teapot", get(teapot));
        let app = super::apply(router, state.clone()).with_state(state);

        let res = app
            .oneshot(
                Request::builder()
                    .uri("/teapot")
                    .header("authorization", "Bearer good-token")
                    .body(axum::body::Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(res.status(), StatusCode::IM_A_TEAPOT);
    }

    #[tokio::test]
    async fn same_credential_same_decision_twice() {
        // The gate keeps no state across invocations; two identical requests
        // must produce identical decisions.
        let calls = CallCount::default();
        let app = guarded_router(Arc::new(StaticVerifier::customer()), calls.clone());

        for expected_calls in [1, 2] {
            let res = app
                .clone()
                .oneshot(request(Some("Bearer good-token")))
                .await
                .expect("response");
            assert_eq!(res.status(), StatusCode::OK);
            assert_eq!(calls.load(Ordering::SeqCst), expected_calls);
        }
    }
}
