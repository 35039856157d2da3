use std::fmt;

use crate::{
    domain::{error::DomainError, models::hashed_password::HashedPassword},
    usecase::password_usecase::PasswordUsecase,
};

/// A password hash read back from storage, able to check candidates.
///
/// Created by [`PasswordUsecase::inflate`]; [`deflate`](Self::deflate) or
/// `to_string()` give back the exact stored text.
#[derive(Clone)]
pub struct StoredPassword {
    hash: HashedPassword,
    usecase: PasswordUsecase,
}

impl StoredPassword {
    pub fn new(hash: HashedPassword, usecase: PasswordUsecase) -> Self {
        Self { hash, usecase }
    }

    pub fn hashed(&self) -> &HashedPassword {
        &self.hash
    }

    pub fn as_str(&self) -> &str {
        self.hash.as_str()
    }

    pub fn check_password(&self, candidate: &str) -> Result<bool, DomainError> {
        self.usecase.verify(candidate, &self.hash)
    }

    pub async fn check_password_async(&self, candidate: String) -> Result<bool, DomainError> {
        self.usecase.verify_async(candidate, self.hash.clone()).await
    }

    pub fn deflate(self) -> String {
        self.hash.into_inner()
    }
}

impl fmt::Display for StoredPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.hash, f)
    }
}

impl fmt::Debug for StoredPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StoredPassword").field(&self.hash).finish()
    }
}

impl PartialEq for StoredPassword {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for StoredPassword {}
