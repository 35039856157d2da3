//! Password hashing for persistence layers.
//!
//! A storage layer calls [`PasswordColumn::before_write`] before it writes a
//! password field and [`PasswordColumn::after_read`] after it reads one back.
//! New hashes use the strongest scheme this build supports (Argon2id, then
//! bcrypt, then PBKDF2-SHA512); stored hashes of any of those schemes verify.
//!
//! ```no_run
//! let column = hashed_password::PasswordColumn::global()?;
//!
//! let stored = column.before_write("s3cr3t!")?;
//! let loaded = column.after_read(stored);
//! assert!(loaded.check_password("s3cr3t!")?);
//! # Ok::<(), hashed_password::DomainError>(())
//! ```

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
pub mod usecase;

pub use crate::{
    config::{Argon2Settings, HashingConfig},
    domain::{
        error::{ConfigError, DomainError},
        models::{
            hashed_password::HashedPassword,
            scheme::{FALLBACK, PRIORITY, Scheme},
        },
        services::{
            algorithm_selector::{CompiledCapabilities, HostCapabilities, select, select_from},
            password_service::PasswordHasher,
        },
    },
    presentation::hooks::password_column::PasswordColumn,
    usecase::{password_usecase::PasswordUsecase, stored_password::StoredPassword},
};

/// Build the process-wide hasher now, so a missing primitive or a bad
/// configuration stops the program at startup instead of at first login.
pub fn init() -> Result<&'static PasswordUsecase, DomainError> {
    PasswordUsecase::global()
}

/// Hash with the process-wide hasher
pub fn hash(plain_password: &str) -> Result<HashedPassword, DomainError> {
    PasswordUsecase::global()?.hash(plain_password)
}

/// Verify with the process-wide hasher
pub fn verify(plain_password: &str, stored: &HashedPassword) -> Result<bool, DomainError> {
    PasswordUsecase::global()?.verify(plain_password, stored)
}
