use crate::domain::{
    error::DomainError,
    models::{hashed_password::HashedPassword, scheme::Scheme},
};

/// Service for hashing and verifying passwords with one scheme
pub trait PasswordHasher: Send + Sync {
    /// The scheme this hasher produces and verifies
    fn scheme(&self) -> Scheme;

    /// Hash a plain text password with a fresh salt
    fn hash(&self, plain_password: &str) -> Result<HashedPassword, DomainError>;

    /// Check that a stored value is one [`verify`](Self::verify) can work
    /// with: known algorithm, usable parameters, salt and digest.
    fn validate(&self, hashed_password: &HashedPassword) -> Result<(), DomainError>;

    /// Verify a plain text password against a hashed password.
    ///
    /// `Ok(false)` means the password did not match; a stored value this
    /// hasher cannot parse is `DomainError::MalformedHash`.
    fn verify(
        &self,
        plain_password: &str,
        hashed_password: &HashedPassword,
    ) -> Result<bool, DomainError>;
}
