use std::{fmt, sync::Arc};

use once_cell::sync::OnceCell;
use tracing::{debug, warn};

use crate::{
    config::HashingConfig,
    domain::{
        error::DomainError,
        models::{hashed_password::HashedPassword, scheme::Scheme},
        services::{
            algorithm_selector::{CompiledCapabilities, select, select_from},
            password_service::PasswordHasher,
        },
    },
    infrastructure::{compiled_hashers, salt},
    usecase::stored_password::StoredPassword,
};

/// Hashes new passwords with one selected scheme and verifies stored
/// hashes of any scheme it holds a hasher for.
#[derive(Clone)]
pub struct PasswordUsecase {
    inner: Arc<Inner>,
}

struct Inner {
    active: Scheme,
    hashers: Vec<Arc<dyn PasswordHasher>>,
}

static GLOBAL: OnceCell<PasswordUsecase> = OnceCell::new();

impl PasswordUsecase {
    /// Build from an explicit configuration, selecting the scheme from
    /// `config.preferred` against the compiled backends.
    pub fn new(config: &HashingConfig) -> Result<Self, DomainError> {
        let scheme = select_from(&config.preferred, &CompiledCapabilities::new());
        Self::with_scheme(config, scheme)
    }

    /// Build with a scheme chosen elsewhere
    pub fn with_scheme(config: &HashingConfig, scheme: Scheme) -> Result<Self, DomainError> {
        salt::probe()?;
        Self::with_hashers(scheme, compiled_hashers(config)?)
    }

    /// Build from hand-picked hashers; `active` must be among them
    pub fn with_hashers(
        active: Scheme,
        hashers: Vec<Arc<dyn PasswordHasher>>,
    ) -> Result<Self, DomainError> {
        if !hashers.iter().any(|hasher| hasher.scheme() == active) {
            return Err(DomainError::UnavailablePrimitive(format!(
                "no {} hasher available",
                active
            )));
        }

        Ok(Self {
            inner: Arc::new(Inner { active, hashers }),
        })
    }

    /// Process-wide instance: [`HashingConfig::global`] plus the scheme
    /// from [`select`]. Built on first use; a failure is returned to every
    /// caller until a later call succeeds.
    pub fn global() -> Result<&'static PasswordUsecase, DomainError> {
        GLOBAL.get_or_try_init(|| -> Result<PasswordUsecase, DomainError> {
            let config = HashingConfig::global()?;
            Self::with_scheme(config, select())
        })
    }

    /// Scheme used for new hashes
    pub fn scheme(&self) -> Scheme {
        self.inner.active
    }

    fn hasher_for(&self, scheme: Scheme) -> Option<&Arc<dyn PasswordHasher>> {
        self.inner
            .hashers
            .iter()
            .find(|hasher| hasher.scheme() == scheme)
    }

    /// Hash a plain text password for storage.
    ///
    /// A value that is already a hash [`verify`](Self::verify) can check is
    /// returned unchanged, so saving an untouched field twice never
    /// double-hashes it. Hash-shaped values with unusable parameters are
    /// hashed like any other password.
    pub fn hash(&self, plain_password: &str) -> Result<HashedPassword, DomainError> {
        if plain_password.is_empty() {
            return Err(DomainError::Validation(
                "password must not be empty".to_string(),
            ));
        }

        if self.is_stored_hash(plain_password) {
            return Ok(HashedPassword::new(plain_password.to_string()));
        }

        let hasher = self.hasher_for(self.inner.active).ok_or_else(|| {
            DomainError::UnavailablePrimitive(format!("no {} hasher available", self.inner.active))
        })?;

        debug!(scheme = %self.inner.active, "hashing password");
        hasher.hash(plain_password)
    }

    fn is_stored_hash(&self, value: &str) -> bool {
        let Some(scheme) = Scheme::identify(value) else {
            return false;
        };

        // a scheme this build cannot check is kept as-is rather than buried
        let Some(hasher) = self.hasher_for(scheme) else {
            debug!(%scheme, "value is a hash of a scheme not compiled in, storing it unchanged");
            return true;
        };

        match hasher.validate(&HashedPassword::new(value.to_string())) {
            Ok(()) => {
                debug!(%scheme, "value is already a password hash, storing it unchanged");
                true
            }
            Err(e) => {
                debug!(%scheme, error = %e, "hash-shaped value is not verifiable, hashing it");
                false
            }
        }
    }

    /// Check a plain text password against a stored hash.
    ///
    /// `Ok(false)` is a wrong password; an unparseable stored value is
    /// `DomainError::MalformedHash`.
    pub fn verify(
        &self,
        plain_password: &str,
        stored: &HashedPassword,
    ) -> Result<bool, DomainError> {
        let Some(scheme) = stored.scheme() else {
            warn!("stored password hash is not in a recognized format");
            return Err(DomainError::MalformedHash(
                "unrecognized hash format".to_string(),
            ));
        };

        let hasher = self.hasher_for(scheme).ok_or_else(|| {
            DomainError::UnavailablePrimitive(format!("{} support is not compiled in", scheme))
        })?;

        hasher.verify(plain_password, stored).inspect_err(|e| {
            if let DomainError::MalformedHash(reason) = e {
                warn!(%scheme, %reason, "stored password hash could not be parsed");
            }
        })
    }

    /// Wrap a raw stored value so it can check candidate passwords later
    pub fn inflate(&self, raw: impl Into<String>) -> StoredPassword {
        StoredPassword::new(HashedPassword::new(raw.into()), self.clone())
    }

    /// [`hash`](Self::hash) on the tokio blocking pool
    pub async fn hash_async(&self, plain_password: String) -> Result<HashedPassword, DomainError> {
        let usecase = self.clone();
        tokio::task::spawn_blocking(move || usecase.hash(&plain_password))
            .await
            .map_err(|_| DomainError::TaskFailed)?
    }

    /// [`verify`](Self::verify) on the tokio blocking pool
    pub async fn verify_async(
        &self,
        plain_password: String,
        stored: HashedPassword,
    ) -> Result<bool, DomainError> {
        let usecase = self.clone();
        tokio::task::spawn_blocking(move || usecase.verify(&plain_password, &stored))
            .await
            .map_err(|_| DomainError::TaskFailed)?
    }
}

impl fmt::Debug for PasswordUsecase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let schemes: Vec<Scheme> = self.inner.hashers.iter().map(|h| h.scheme()).collect();
        f.debug_struct("PasswordUsecase")
            .field("active", &self.inner.active)
            .field("hashers", &schemes)
            .finish()
    }
}
