//! Shared verification for schemes stored as PHC strings
//! (`$<alg>$<params>$<salt>$<digest>`).

use password_hash::{PasswordHash, PasswordHasher as PhcHasher, SaltString};

use crate::{domain::error::DomainError, infrastructure::constant_time::digests_match};

/// Parse a stored PHC string; a record without salt or digest is malformed
pub fn parse(stored: &str) -> Result<PasswordHash<'_>, DomainError> {
    let parsed =
        PasswordHash::new(stored).map_err(|e| DomainError::MalformedHash(e.to_string()))?;
    if parsed.salt.is_none() {
        return Err(DomainError::MalformedHash("missing salt".to_string()));
    }
    if parsed.hash.is_none() {
        return Err(DomainError::MalformedHash("missing digest".to_string()));
    }
    Ok(parsed)
}

pub fn encode_salt(salt: &[u8]) -> Result<SaltString, DomainError> {
    SaltString::encode_b64(salt).map_err(|e| DomainError::HashingFailed(e.to_string()))
}

/// Recompute the digest of `plain_password` with the algorithm, version,
/// parameters and salt embedded in `parsed`, then compare digests in
/// constant time.
pub fn verify_recomputed<H: PhcHasher>(
    hasher: &H,
    plain_password: &str,
    parsed: &PasswordHash<'_>,
) -> Result<bool, DomainError> {
    let expected = parsed
        .hash
        .as_ref()
        .ok_or_else(|| DomainError::MalformedHash("missing digest".to_string()))?;
    let salt = parsed
        .salt
        .ok_or_else(|| DomainError::MalformedHash("missing salt".to_string()))?;
    let params =
        H::Params::try_from(parsed).map_err(|e| DomainError::MalformedHash(e.to_string()))?;

    let recomputed = hasher
        .hash_password_customized(
            plain_password.as_bytes(),
            Some(parsed.algorithm),
            parsed.version,
            params,
            salt,
        )
        .map_err(|e| DomainError::MalformedHash(e.to_string()))?;

    let actual = recomputed
        .hash
        .ok_or_else(|| DomainError::HashingFailed("no digest produced".to_string()))?;

    Ok(digests_match(expected.as_bytes(), actual.as_bytes()))
}
