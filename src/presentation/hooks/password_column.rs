use crate::{
    domain::error::DomainError,
    usecase::{password_usecase::PasswordUsecase, stored_password::StoredPassword},
};

/// Hooks a persistence layer calls around a password column
#[derive(Debug, Clone)]
pub struct PasswordColumn {
    usecase: PasswordUsecase,
}

impl PasswordColumn {
    pub fn new(usecase: PasswordUsecase) -> Self {
        Self { usecase }
    }

    /// Column bound to the process-wide hasher
    pub fn global() -> Result<Self, DomainError> {
        Ok(Self::new(PasswordUsecase::global()?.clone()))
    }

    /// Before write: the text to store in place of `value`
    pub fn before_write(&self, value: &str) -> Result<String, DomainError> {
        Ok(self.usecase.hash(value)?.into_inner())
    }

    /// After read: wrap the stored text
    pub fn after_read(&self, raw: impl Into<String>) -> StoredPassword {
        self.usecase.inflate(raw)
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, sync::Mutex};

    use rstest::*;

    use super::*;
    use crate::{
        config::{Argon2Settings, HashingConfig},
        domain::models::scheme::PRIORITY,
    };

    // mock persistence layer holding one password column per user
    struct MockUserTable {
        column: PasswordColumn,
        rows: Mutex<HashMap<String, String>>,
    }

    impl MockUserTable {
        fn save(&self, user: &str, password: &str) -> Result<(), DomainError> {
            let stored = self.column.before_write(password)?;
            self.rows.lock().unwrap().insert(user.to_string(), stored);
            Ok(())
        }

        fn load(&self, user: &str) -> Option<StoredPassword> {
            let rows = self.rows.lock().unwrap();
            rows.get(user).map(|raw| self.column.after_read(raw.clone()))
        }

        fn raw(&self, user: &str) -> Option<String> {
            self.rows.lock().unwrap().get(user).cloned()
        }
    }

    #[fixture]
    fn table() -> MockUserTable {
        let usecase = PasswordUsecase::new(&HashingConfig {
            preferred: PRIORITY.to_vec(),
            argon2: Argon2Settings {
                memory_kib: 1024,
                iterations: 1,
                parallelism: 1,
            },
            bcrypt_cost: 4,
            pbkdf2_rounds: 1_000,
        })
        .unwrap();

        MockUserTable {
            column: PasswordColumn::new(usecase),
            rows: Mutex::new(HashMap::new()),
        }
    }

    #[rstest]
    fn test_plaintext_never_reaches_storage(table: MockUserTable) {
        table.save("alice", "s3cr3t!").unwrap();

        let raw = table.raw("alice").unwrap();
        assert_ne!(raw, "s3cr3t!");
        assert!(!raw.contains("s3cr3t!"));
    }

    #[rstest]
    fn test_login_flow(table: MockUserTable) {
        table.save("alice", "s3cr3t!").unwrap();

        let stored = table.load("alice").unwrap();
        assert!(stored.check_password("s3cr3t!").unwrap());
        assert!(!stored.check_password("wrong").unwrap());
    }

    #[rstest]
    fn test_saving_an_untouched_row_again_keeps_the_hash(table: MockUserTable) {
        table.save("alice", "s3cr3t!").unwrap();
        let first = table.raw("alice").unwrap();

        // update flow: the loaded value is written back unmodified
        let loaded = table.load("alice").unwrap();
        table.save("alice", &loaded.deflate()).unwrap();

        assert_eq!(table.raw("alice").unwrap(), first);
        assert!(table.load("alice").unwrap().check_password("s3cr3t!").unwrap());
    }

    #[rstest]
    fn test_empty_password_is_not_stored(table: MockUserTable) {
        assert!(matches!(
            table.save("alice", ""),
            Err(DomainError::Validation(_))
        ));
        assert!(table.raw("alice").is_none());
    }

    #[rstest]
    fn test_corrupt_row_is_reported(table: MockUserTable) {
        table
            .rows
            .lock()
            .unwrap()
            .insert("alice".to_string(), "s3cr3t!".to_string());

        let stored = table.load("alice").unwrap();
        assert!(matches!(
            stored.check_password("s3cr3t!"),
            Err(DomainError::MalformedHash(_))
        ));
    }
}
