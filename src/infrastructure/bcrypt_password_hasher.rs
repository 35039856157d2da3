use base64::{
    Engine, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use bcrypt::{BcryptError, HashParts, Version, non_truncating_hash_with_salt};
use tracing::debug;

use crate::{
    domain::{
        error::{ConfigError, DomainError},
        models::{
            hashed_password::HashedPassword,
            scheme::{Scheme, is_bcrypt},
        },
        services::password_service::PasswordHasher,
    },
    infrastructure::{constant_time::digests_match, salt},
};

pub const MIN_COST: u32 = 4;
pub const MAX_COST: u32 = 31;

/// bcrypt keys on at most 72 bytes including the NUL terminator; anything
/// longer would be silently cut off
pub const MAX_PASSWORD_LEN: usize = 71;

// `$2b$12$` + 22 salt characters, the digest follows
const SALT_START: usize = 7;
const SALT_END: usize = 29;

// stored salts from other implementations may carry non-zero padding bits
const BCRYPT_B64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::BCRYPT,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::RequireNone)
        .with_decode_allow_trailing_bits(true),
);

#[derive(Clone)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new(cost: u32) -> Result<Self, DomainError> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(ConfigError::InvalidParams(format!(
                "bcrypt: cost {} outside {}..={}",
                cost, MIN_COST, MAX_COST
            ))
            .into());
        }
        Ok(Self { cost })
    }

    pub(crate) fn hash_with_salt(
        &self,
        plain_password: &str,
        salt: [u8; salt::SALT_LEN],
    ) -> Result<HashedPassword, DomainError> {
        let parts = bcrypt_digest(plain_password, self.cost, salt)?;
        Ok(HashedPassword::new(parts.format_for_version(Version::TwoB)))
    }
}

fn bcrypt_digest(
    plain_password: &str,
    cost: u32,
    salt: [u8; salt::SALT_LEN],
) -> Result<HashParts, DomainError> {
    non_truncating_hash_with_salt(plain_password, cost, salt).map_err(|e| match e {
        BcryptError::Truncation(len) => DomainError::Validation(format!(
            "bcrypt accepts at most {} bytes, got {}",
            MAX_PASSWORD_LEN,
            len.saturating_sub(1)
        )),
        other => DomainError::HashingFailed(other.to_string()),
    })
}

/// Cost and raw salt of a stored bcrypt hash
fn parse(stored: &str) -> Result<(u32, [u8; salt::SALT_LEN]), DomainError> {
    if !is_bcrypt(stored) {
        return Err(DomainError::MalformedHash(
            "not a bcrypt hash".to_string(),
        ));
    }

    let cost: u32 = stored[4..6]
        .parse()
        .map_err(|_| DomainError::MalformedHash("bcrypt cost is not a number".to_string()))?;
    if !(MIN_COST..=MAX_COST).contains(&cost) {
        return Err(DomainError::MalformedHash(format!(
            "bcrypt cost {} out of range",
            cost
        )));
    }

    let salt = BCRYPT_B64
        .decode(&stored[SALT_START..SALT_END])
        .map_err(|e| DomainError::MalformedHash(e.to_string()))?
        .try_into()
        .map_err(|_| DomainError::MalformedHash("bcrypt salt must be 16 bytes".to_string()))?;

    Ok((cost, salt))
}

impl PasswordHasher for BcryptPasswordHasher {
    fn scheme(&self) -> Scheme {
        Scheme::Bcrypt
    }

    fn hash(&self, plain_password: &str) -> Result<HashedPassword, DomainError> {
        self.hash_with_salt(plain_password, salt::generate()?)
    }

    fn validate(&self, hashed_password: &HashedPassword) -> Result<(), DomainError> {
        parse(hashed_password.as_str()).map(|_| ())
    }

    fn verify(
        &self,
        plain_password: &str,
        hashed_password: &HashedPassword,
    ) -> Result<bool, DomainError> {
        let stored = hashed_password.as_str();
        let (cost, salt) = parse(stored)?;

        // no record written here can come from a longer password
        if plain_password.len() > MAX_PASSWORD_LEN {
            debug!(len = plain_password.len(), "candidate too long for bcrypt");
            return Ok(false);
        }

        let recomputed =
            bcrypt_digest(plain_password, cost, salt)?.format_for_version(Version::TwoB);

        // the version prefix does not take part in the digest
        Ok(digests_match(
            &stored.as_bytes()[SALT_END..],
            &recomputed.as_bytes()[SALT_END..],
        ))
    }
}
