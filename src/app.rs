/*
 * Responsibility
 * - Config読み込み → 依存生成 → Router 組み立て
 * - Middleware の適用 (HTTP / CORS / security headers / 認証 gate)
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::Config;
use crate::middleware::{auth::access, cors, http, security_headers};
use crate::services::auth::build_token_verifier;
use crate::services::cache::ValkeyClient;
use crate::services::id_codec::IdCodec;
use crate::services::share_link::ShareLinkBuilder;
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,trustnet=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    // Keep the default hook as a fallback (prints to stderr with location/payload).
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Always surface panics via tracing so they don't get "lost"
        // (stderr can be hidden depending on how the process is launched.)
        tracing::error!(?info, "panic");

        // In development, fail fast: crash the whole process so we notice immediately.
        // In production, prefer the default behavior (stderr) and let the server keep running.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();

    let config = Config::from_env().context("configuration")?;

    let abort_on_panic = !config.app_env.is_production();
    init_panic_hook(abort_on_panic);

    tracing::info!(
        "starting TrustNet API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await?;
    tracing::info!(cache = state.cache.backend_name(), "dependencies ready");

    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .context("bind listener")?;
    axum::serve(listener, app).await.context("serve")?;

    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState> {
    let db = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("connect to postgres")?;

    let cache = ValkeyClient::new(&config.redis_url)
        .await
        .context("connect to valkey")?;

    let id_codec = IdCodec::new(config.sqids_min_length, &config.sqids_alphabet)
        .context("build id codec")?;

    let auth = build_token_verifier(config)
        .map_err(|e| anyhow::anyhow!("build token verifier: {e}"))?;

    let share_links =
        ShareLinkBuilder::new(&config.public_base_url).context("build share link base")?;

    Ok(AppState::new(
        db,
        Arc::new(cache),
        id_codec,
        auth,
        share_links,
        config.business_cache_ttl_seconds,
    ))
}

fn build_router(state: AppState, config: &Config) -> Router {
    // /api/v1 全体に認証 gate を掛ける。/health だけは素通し。
    let v1 = access::apply(api::v1::routes(), state.clone());

    let router = Router::new()
        .route("/health", get(crate::api::v1::handlers::health::health))
        .nest("/api/v1", v1)
        .with_state(state);

    let router = cors::apply(router, config);
    let router = security_headers::apply(router);
    http::apply(router)
}
