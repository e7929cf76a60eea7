/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - db: PgPool / cache / id_codec / auth (token verifier) / share links
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::services::{
    auth::TokenVerifier, cache::CacheClient, id_codec::IdCodec, share_link::ShareLinkBuilder,
};

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub cache: Arc<dyn CacheClient>,
    pub id_codec: IdCodec,
    pub auth: Arc<dyn TokenVerifier>,
    pub share_links: ShareLinkBuilder,
    pub business_cache_ttl_seconds: u64,
}

impl AppState {
    pub fn new(
        db: sqlx::PgPool,
        cache: Arc<dyn CacheClient>,
        id_codec: IdCodec,
        auth: Arc<dyn TokenVerifier>,
        share_links: ShareLinkBuilder,
        business_cache_ttl_seconds: u64,
    ) -> Self {
        Self {
            db,
            cache,
            id_codec,
            auth,
            share_links,
            business_cache_ttl_seconds,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // trait objects (cache/auth) は名前だけ出す
        f.debug_struct("AppState")
            .field("cache", &self.cache.backend_name())
            .field("id_codec", &self.id_codec)
            .field("share_links", &self.share_links)
            .finish()
    }
}
