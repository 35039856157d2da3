use std::{fmt, str::FromStr};

use password_hash::PasswordHash;

use crate::domain::error::ConfigError;

/// Password hashing schemes this crate knows how to produce and verify
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// Argon2id for new hashes; argon2i and argon2d records verify too
    Argon2,
    /// bcrypt in modular crypt format (`$2a$`, `$2b$`, `$2x$`, `$2y$`)
    Bcrypt,
    /// PBKDF2-HMAC-SHA512 for new hashes; pbkdf2-sha256 records verify too
    Pbkdf2,
}

/// Strongest first. Selection walks this list in order.
pub const PRIORITY: [Scheme; 3] = [Scheme::Argon2, Scheme::Bcrypt, Scheme::Pbkdf2];

/// Always compiled in, so selection can never come up empty.
pub const FALLBACK: Scheme = Scheme::Pbkdf2;

const BCRYPT_LEN: usize = 60;

impl Scheme {
    pub fn name(&self) -> &'static str {
        match self {
            Scheme::Argon2 => "argon2",
            Scheme::Bcrypt => "bcrypt",
            Scheme::Pbkdf2 => "pbkdf2",
        }
    }

    /// Recognize the scheme of a self-describing hash string.
    ///
    /// Returns `None` unless the whole value parses: a PHC string needs a
    /// known algorithm, a salt and a digest, a bcrypt string needs the exact
    /// modular crypt layout.
    pub fn identify(value: &str) -> Option<Scheme> {
        if is_bcrypt(value) {
            return Some(Scheme::Bcrypt);
        }

        let parsed = PasswordHash::new(value).ok()?;
        parsed.salt?;
        parsed.hash?;

        match parsed.algorithm.as_str() {
            "argon2id" | "argon2i" | "argon2d" => Some(Scheme::Argon2),
            "pbkdf2-sha512" | "pbkdf2-sha256" => Some(Scheme::Pbkdf2),
            _ => None,
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scheme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "argon2" | "argon2id" => Ok(Scheme::Argon2),
            "bcrypt" => Ok(Scheme::Bcrypt),
            "pbkdf2" | "pbkdf2-sha512" => Ok(Scheme::Pbkdf2),
            other => Err(ConfigError::UnknownScheme(other.to_string())),
        }
    }
}

/// `$2?$NN$` followed by 53 characters of the bcrypt base64 alphabet
pub(crate) fn is_bcrypt(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == BCRYPT_LEN
        && bytes[0] == b'$'
        && bytes[1] == b'2'
        && matches!(bytes[2], b'a' | b'b' | b'x' | b'y')
        && bytes[3] == b'$'
        && bytes[4].is_ascii_digit()
        && bytes[5].is_ascii_digit()
        && bytes[6] == b'$'
        && bytes[7..]
            .iter()
            .all(|b| b.is_ascii_alphanumeric() || *b == b'.' || *b == b'/')
}
