use once_cell::sync::OnceCell;
use tracing::{info, warn};

use crate::{
    config::HashingConfig,
    domain::models::scheme::{FALLBACK, PRIORITY, Scheme},
};

/// What the running host can execute
pub trait HostCapabilities {
    fn supports(&self, scheme: Scheme) -> bool;
}

/// Reports the scheme backends compiled into this build. Configuration
/// narrows the priority list handed to [`select_from`], not this.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompiledCapabilities;

impl CompiledCapabilities {
    pub fn new() -> Self {
        Self
    }
}

impl HostCapabilities for CompiledCapabilities {
    fn supports(&self, scheme: Scheme) -> bool {
        is_compiled(scheme)
    }
}

/// Whether the backend for `scheme` is part of this build
pub fn is_compiled(scheme: Scheme) -> bool {
    match scheme {
        Scheme::Argon2 => cfg!(feature = "argon2"),
        Scheme::Bcrypt => cfg!(feature = "bcrypt"),
        Scheme::Pbkdf2 => true,
    }
}

/// First scheme of `priority` the host supports, or the fallback.
pub fn select_from<C>(priority: &[Scheme], capabilities: &C) -> Scheme
where
    C: HostCapabilities + ?Sized,
{
    priority
        .iter()
        .copied()
        .find(|scheme| capabilities.supports(*scheme))
        .unwrap_or(FALLBACK)
}

static CHOICE: OnceCell<Scheme> = OnceCell::new();

/// The scheme used for every new hash in this process.
///
/// Computed on first call from [`HashingConfig::global`] and the compiled
/// backends, then fixed. Never fails: a broken configuration is logged and
/// the built-in priority list is used instead.
pub fn select() -> Scheme {
    *CHOICE.get_or_init(|| {
        let preferred: &[Scheme] = match HashingConfig::global() {
            Ok(config) => config.preferred.as_slice(),
            Err(e) => {
                warn!(error = %e, "ignoring invalid hashing configuration");
                &PRIORITY
            }
        };

        let scheme = select_from(preferred, &CompiledCapabilities::new());
        info!(%scheme, "selected password hashing scheme");
        scheme
    })
}
