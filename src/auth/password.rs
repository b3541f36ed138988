use bcrypt::{hash, verify, DEFAULT_COST};

/// Bcrypt at the default cost. Guest accounts store an empty hash, which
/// [`verify_password`] treats as a mismatch.
pub fn hash_password(password: &str) -> Result<String, anyhow::Error> {
    hash(password, DEFAULT_COST).map_err(|e| anyhow::anyhow!("Failed to hash password: {:?}", e))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, anyhow::Error> {
    // A malformed stored hash reads as a mismatch, not an error.
    Ok(verify(password, hash).unwrap_or(false))
}
