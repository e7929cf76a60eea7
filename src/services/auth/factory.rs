/// Factory: build the token verifier from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::error::AppError;
use crate::services::auth::TokenVerifier;
use crate::services::auth::access_jwt::AuthService;

pub fn build_token_verifier(config: &Config) -> Result<Arc<dyn TokenVerifier>, AppError> {
    let auth = AuthService::new(
        &config.access_jwt_public_key_pem,
        &config.auth_issuer,
        &config.auth_audience,
        config.access_token_leeway_seconds,
    )
    .map_err(|e| {
        tracing::error!(error = %e, "failed to build access-token verifier");
        AppError::Internal
    })?;

    Ok(Arc::new(auth))
}
