//! Hashing configuration read from the environment.
//!
//! | key                  | default                 |
//! |----------------------|-------------------------|
//! | `PASSWORD_SCHEMES`   | `argon2,bcrypt,pbkdf2`  |
//! | `ARGON2_MEMORY_KIB`  | `19456`                 |
//! | `ARGON2_ITERATIONS`  | `2`                     |
//! | `ARGON2_PARALLELISM` | `1`                     |
//! | `BCRYPT_COST`        | `12`                    |
//! | `PBKDF2_ROUNDS`      | `210000`                |

use std::str::FromStr;

use once_cell::sync::OnceCell;

use crate::domain::{
    error::ConfigError,
    models::scheme::{PRIORITY, Scheme},
};

pub const DEFAULT_ARGON2_MEMORY_KIB: u32 = 19 * 1024;
pub const DEFAULT_ARGON2_ITERATIONS: u32 = 2;
pub const DEFAULT_ARGON2_PARALLELISM: u32 = 1;
pub const DEFAULT_BCRYPT_COST: u32 = 12;
pub const DEFAULT_PBKDF2_ROUNDS: u32 = 210_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argon2Settings {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for Argon2Settings {
    fn default() -> Self {
        Self {
            memory_kib: DEFAULT_ARGON2_MEMORY_KIB,
            iterations: DEFAULT_ARGON2_ITERATIONS,
            parallelism: DEFAULT_ARGON2_PARALLELISM,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashingConfig {
    /// Priority list for new hashes, strongest first
    pub preferred: Vec<Scheme>,
    pub argon2: Argon2Settings,
    pub bcrypt_cost: u32,
    pub pbkdf2_rounds: u32,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            preferred: PRIORITY.to_vec(),
            argon2: Argon2Settings::default(),
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            pbkdf2_rounds: DEFAULT_PBKDF2_ROUNDS,
        }
    }
}

static ENV_CONFIG: OnceCell<Result<HashingConfig, ConfigError>> = OnceCell::new();

impl HashingConfig {
    /// Environment-based configuration (`.env` is honored through dotenvy)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    /// [`from_env`](Self::from_env) read once per process. Scheme selection
    /// and the process-wide hasher both see this result, error included.
    pub fn global() -> Result<&'static HashingConfig, ConfigError> {
        ENV_CONFIG
            .get_or_init(Self::from_env)
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Build from any key lookup; missing keys take their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let preferred = match lookup("PASSWORD_SCHEMES") {
            Some(value) => parse_schemes(&value)?,
            None => defaults.preferred,
        };

        Ok(Self {
            preferred,
            argon2: Argon2Settings {
                memory_kib: parse_or(&lookup, "ARGON2_MEMORY_KIB", defaults.argon2.memory_kib)?,
                iterations: parse_or(&lookup, "ARGON2_ITERATIONS", defaults.argon2.iterations)?,
                parallelism: parse_or(
                    &lookup,
                    "ARGON2_PARALLELISM",
                    defaults.argon2.parallelism,
                )?,
            },
            bcrypt_cost: parse_or(&lookup, "BCRYPT_COST", defaults.bcrypt_cost)?,
            pbkdf2_rounds: parse_or(&lookup, "PBKDF2_ROUNDS", defaults.pbkdf2_rounds)?,
        })
    }
}

fn parse_schemes(value: &str) -> Result<Vec<Scheme>, ConfigError> {
    let mut schemes = Vec::new();
    for name in value.split(',').filter(|name| !name.trim().is_empty()) {
        let scheme = Scheme::from_str(name)?;
        if !schemes.contains(&scheme) {
            schemes.push(scheme);
        }
    }

    if schemes.is_empty() {
        return Err(ConfigError::InvalidValue {
            key: "PASSWORD_SCHEMES",
            value: value.to_string(),
        });
    }
    Ok(schemes)
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = HashingConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, HashingConfig::default());
        assert_eq!(config.preferred, PRIORITY.to_vec());
    }

    #[test]
    fn test_overrides() {
        let config = HashingConfig::from_lookup(lookup_from(&[
            ("PASSWORD_SCHEMES", "bcrypt, pbkdf2,bcrypt"),
            ("ARGON2_MEMORY_KIB", "8192"),
            ("ARGON2_ITERATIONS", "3"),
            ("BCRYPT_COST", " 10 "),
            ("PBKDF2_ROUNDS", "600000"),
        ]))
        .unwrap();

        assert_eq!(config.preferred, vec![Scheme::Bcrypt, Scheme::Pbkdf2]);
        assert_eq!(config.argon2.memory_kib, 8192);
        assert_eq!(config.argon2.iterations, 3);
        assert_eq!(config.argon2.parallelism, DEFAULT_ARGON2_PARALLELISM);
        assert_eq!(config.bcrypt_cost, 10);
        assert_eq!(config.pbkdf2_rounds, 600_000);
    }

    #[test]
    fn test_unknown_scheme_is_rejected() {
        let result = HashingConfig::from_lookup(lookup_from(&[("PASSWORD_SCHEMES", "argon2,md5")]));
        assert!(matches!(result, Err(ConfigError::UnknownScheme(name)) if name == "md5"));
    }

    #[test]
    fn test_empty_scheme_list_is_rejected() {
        let result = HashingConfig::from_lookup(lookup_from(&[("PASSWORD_SCHEMES", " , ")]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { key: "PASSWORD_SCHEMES", .. })
        ));
    }

    #[test]
    fn test_global_is_read_once() {
        let first = HashingConfig::global();
        let second = HashingConfig::global();

        match (first, second) {
            (Ok(a), Ok(b)) => assert!(std::ptr::eq(a, b)),
            (Err(a), Err(b)) => assert_eq!(a, b),
            _ => panic!("configuration changed between reads"),
        }
    }

    #[test]
    fn test_bad_number_is_rejected() {
        let result = HashingConfig::from_lookup(lookup_from(&[("BCRYPT_COST", "twelve")]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { key: "BCRYPT_COST", value }) if value == "twelve"
        ));
    }
}
