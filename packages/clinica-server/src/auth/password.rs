use bcrypt::{DEFAULT_COST, hash, verify};
use tracing::error;

use crate::error::ApiError;

pub(crate) fn hash_password(password: &str) -> Result<String, ApiError> {
    hash(password, DEFAULT_COST).map_err(|e| {
        error!(error = %e, "failed to hash password");
        ApiError::PasswordHash
    })
}

pub(crate) fn verify_password(password: &str, hashed: &str) -> Result<bool, ApiError> {
    verify(password, hashed).map_err(|e| {
        error!(error = %e, "failed to verify password");
        ApiError::PasswordHash
    })
}
