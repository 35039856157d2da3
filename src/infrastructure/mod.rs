use std::sync::Arc;

use crate::{
    config::HashingConfig,
    domain::{error::DomainError, services::password_service::PasswordHasher},
};

#[cfg(feature = "argon2")]
pub mod argon2_password_hasher;
#[cfg(feature = "bcrypt")]
pub mod bcrypt_password_hasher;
pub mod constant_time;
pub mod pbkdf2_password_hasher;
pub mod phc;
pub mod salt;

/// One hasher per compiled scheme, configured from `config`
pub fn compiled_hashers(
    config: &HashingConfig,
) -> Result<Vec<Arc<dyn PasswordHasher>>, DomainError> {
    let mut hashers: Vec<Arc<dyn PasswordHasher>> = Vec::new();

    #[cfg(feature = "argon2")]
    hashers.push(Arc::new(
        argon2_password_hasher::Argon2PasswordHasher::new(&config.argon2)?,
    ));

    #[cfg(feature = "bcrypt")]
    hashers.push(Arc::new(
        bcrypt_password_hasher::BcryptPasswordHasher::new(config.bcrypt_cost)?,
    ));

    hashers.push(Arc::new(pbkdf2_password_hasher::Pbkdf2PasswordHasher::new(
        config.pbkdf2_rounds,
    )?));

    Ok(hashers)
}
