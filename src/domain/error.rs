use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid password: {0}")]
    Validation(String),

    #[error("Malformed password hash: {0}")]
    MalformedHash(String),

    #[error("Cryptographic primitive unavailable: {0}")]
    UnavailablePrimitive(String),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Background task failed")]
    TaskFailed,

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Unknown password scheme: {0}")]
    UnknownScheme(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("Invalid hashing parameters: {0}")]
    InvalidParams(String),
}
