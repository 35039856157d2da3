use rand_core::{OsRng, RngCore};

use crate::domain::error::DomainError;

/// Salt length in bytes for every scheme
pub const SALT_LEN: usize = 16;

/// Fresh salt from the operating system CSPRNG
pub fn generate() -> Result<[u8; SALT_LEN], DomainError> {
    let mut salt = [0u8; SALT_LEN];
    OsRng
        .try_fill_bytes(&mut salt)
        .map_err(|e| DomainError::UnavailablePrimitive(format!("OS random source: {}", e)))?;
    Ok(salt)
}

/// Fails when the OS random source cannot be read
pub fn probe() -> Result<(), DomainError> {
    generate().map(|_| ())
}
