pub mod access_jwt;
pub mod factory;
pub mod role;
pub mod verifier;

pub use factory::build_token_verifier;
pub use role::Role;
pub use verifier::{TokenVerifier, VerifiedAccessToken, VerifyError};
