pub mod password_usecase;
pub mod stored_password;

#[cfg(test)]
mod proptests;
