use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher as Argon2Hasher},
};

use crate::{
    config::Argon2Settings,
    domain::{
        error::{ConfigError, DomainError},
        models::{hashed_password::HashedPassword, scheme::Scheme},
        services::password_service::PasswordHasher,
    },
    infrastructure::{phc, salt},
};

#[derive(Clone)]
pub struct Argon2PasswordHasher {
    params: Params,
}

impl Argon2PasswordHasher {
    pub fn new(settings: &Argon2Settings) -> Result<Self, DomainError> {
        let params = Params::new(
            settings.memory_kib,
            settings.iterations,
            settings.parallelism,
            None,
        )
        .map_err(|e| ConfigError::InvalidParams(format!("argon2: {}", e)))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    pub(crate) fn hash_with_salt(
        &self,
        plain_password: &str,
        salt: &[u8],
    ) -> Result<HashedPassword, DomainError> {
        let salt = phc::encode_salt(salt)?;

        let hash = self
            .argon2()
            .hash_password(plain_password.as_bytes(), &salt)
            .map_err(|e| DomainError::HashingFailed(e.to_string()))?
            .to_string();

        Ok(HashedPassword::new(hash))
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn scheme(&self) -> Scheme {
        Scheme::Argon2
    }

    fn hash(&self, plain_password: &str) -> Result<HashedPassword, DomainError> {
        let salt = salt::generate()?;
        self.hash_with_salt(plain_password, &salt)
    }

    fn validate(&self, hashed_password: &HashedPassword) -> Result<(), DomainError> {
        stored_params(&phc::parse(hashed_password.as_str())?).map(|_| ())
    }

    fn verify(
        &self,
        plain_password: &str,
        hashed_password: &HashedPassword,
    ) -> Result<bool, DomainError> {
        let parsed = phc::parse(hashed_password.as_str())?;
        stored_params(&parsed)?;

        // stored parameters override our own; only the algorithm family matters here
        phc::verify_recomputed(&self.argon2(), plain_password, &parsed)
    }
}

/// Cost parameters embedded in a stored argon2 record
fn stored_params(parsed: &PasswordHash<'_>) -> Result<Params, DomainError> {
    Algorithm::try_from(parsed.algorithm).map_err(|_| {
        DomainError::MalformedHash(format!(
            "expected an argon2 hash, found {}",
            parsed.algorithm
        ))
    })?;

    Params::try_from(parsed).map_err(|e| DomainError::MalformedHash(e.to_string()))
}
