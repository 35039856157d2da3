use password_hash::{Ident, PasswordHash, PasswordHasher as PhcHasher};
use pbkdf2::{Params, Pbkdf2};

use crate::{
    domain::{
        error::{ConfigError, DomainError},
        models::{hashed_password::HashedPassword, scheme::Scheme},
        services::password_service::PasswordHasher,
    },
    infrastructure::{phc, salt},
};

/// Lower bound accepted from configuration
pub const MIN_ROUNDS: u32 = 1_000;

/// SHA-512 sized digest
pub const OUTPUT_LEN: usize = 64;

const PBKDF2_SHA512: Ident<'static> = Ident::new_unwrap("pbkdf2-sha512");
const PBKDF2_SHA256: Ident<'static> = Ident::new_unwrap("pbkdf2-sha256");

/// PBKDF2-HMAC-SHA512, the scheme every build can fall back to
#[derive(Clone)]
pub struct Pbkdf2PasswordHasher {
    params: Params,
}

impl Pbkdf2PasswordHasher {
    pub fn new(rounds: u32) -> Result<Self, DomainError> {
        if rounds < MIN_ROUNDS {
            return Err(ConfigError::InvalidParams(format!(
                "pbkdf2: {} rounds is below the minimum of {}",
                rounds, MIN_ROUNDS
            ))
            .into());
        }

        Ok(Self {
            params: Params {
                rounds,
                output_length: OUTPUT_LEN,
            },
        })
    }

    pub(crate) fn hash_with_salt(
        &self,
        plain_password: &str,
        salt: &[u8],
    ) -> Result<HashedPassword, DomainError> {
        let salt = phc::encode_salt(salt)?;

        let hash = Pbkdf2
            .hash_password_customized(
                plain_password.as_bytes(),
                Some(PBKDF2_SHA512),
                None,
                self.params.clone(),
                &salt,
            )
            .map_err(|e| DomainError::HashingFailed(e.to_string()))?
            .to_string();

        Ok(HashedPassword::new(hash))
    }
}

impl PasswordHasher for Pbkdf2PasswordHasher {
    fn scheme(&self) -> Scheme {
        Scheme::Pbkdf2
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

        phc::verify_recomputed(&Pbkdf2, plain_password, &parsed)
    }
}

/// Round count and output length embedded in a stored pbkdf2 record
fn stored_params(parsed: &PasswordHash<'_>) -> Result<Params, DomainError> {
    if parsed.algorithm != PBKDF2_SHA512 && parsed.algorithm != PBKDF2_SHA256 {
        return Err(DomainError::MalformedHash(format!(
            "expected a pbkdf2 hash, found {}",
            parsed.algorithm
        )));
    }

    let params =
        Params::try_from(parsed).map_err(|e| DomainError::MalformedHash(e.to_string()))?;
    if parsed.params.get_decimal("i").is_none() || params.rounds == 0 {
        return Err(DomainError::MalformedHash(
            "pbkdf2 round count missing or zero".to_string(),
        ));
    }

    Ok(params)
}
