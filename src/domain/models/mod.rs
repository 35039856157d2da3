pub mod hashed_password;
pub mod scheme;
