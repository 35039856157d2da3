//! Property tests for hashing and verification over arbitrary passwords.

use proptest::prelude::*;

use crate::{
    config::{Argon2Settings, HashingConfig},
    domain::{
        error::DomainError, models::scheme::Scheme, services::algorithm_selector::is_compiled,
    },
    usecase::password_usecase::PasswordUsecase,
};

fn fast_usecase(scheme: Scheme) -> PasswordUsecase {
    let config = HashingConfig {
        preferred: vec![scheme],
        argon2: Argon2Settings {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        },
        bcrypt_cost: 4,
        pbkdf2_rounds: 1_000,
    };
    PasswordUsecase::new(&config).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn pbkdf2_round_trip(password in "\\PC{1,120}") {
        let usecase = fast_usecase(Scheme::Pbkdf2);
        let stored = usecase.hash(&password).unwrap();

        prop_assert_ne!(stored.as_str(), password.as_str());
        prop_assert!(usecase.verify(&password, &stored).unwrap());
    }

    #[test]
    fn pbkdf2_rejects_every_other_password(
        password in "\\PC{1,120}",
        candidate in "\\PC{0,120}",
    ) {
        prop_assume!(password != candidate);

        let usecase = fast_usecase(Scheme::Pbkdf2);
        let stored = usecase.hash(&password).unwrap();
        prop_assert!(!usecase.verify(&candidate, &stored).unwrap());
    }

    #[test]
    fn hashing_a_hash_is_a_no_op(password in "\\PC{1,120}") {
        let usecase = fast_usecase(Scheme::Pbkdf2);
        let stored = usecase.hash(&password).unwrap();
        prop_assert_eq!(usecase.hash(stored.as_str()).unwrap(), stored);
    }

    #[test]
    fn every_hash_gets_a_fresh_salt(password in "\\PC{1,120}") {
        let usecase = fast_usecase(Scheme::Pbkdf2);
        let first = usecase.hash(&password).unwrap();
        let second = usecase.hash(&password).unwrap();
        prop_assert_ne!(first, second);
    }

    #[test]
    fn bcrypt_round_trip_or_refusal(password in "\\PC{1,120}") {
        if !is_compiled(Scheme::Bcrypt) {
            return Ok(());
        }

        let usecase = fast_usecase(Scheme::Bcrypt);
        match usecase.hash(&password) {
            Ok(stored) => {
                prop_assert!(password.len() <= 71);
                prop_assert!(usecase.verify(&password, &stored).unwrap());
            }
            Err(e) => {
                prop_assert!(password.len() > 71);
                prop_assert!(matches!(e, DomainError::Validation(_)));
            }
        }
    }

    #[test]
    fn bcrypt_never_matches_an_extended_password(
        password in "[ -~]{1,71}",
        suffix in "\\PC{1,40}",
    ) {
        if !is_compiled(Scheme::Bcrypt) {
            return Ok(());
        }

        let usecase = fast_usecase(Scheme::Bcrypt);
        let stored = usecase.hash(&password).unwrap();
        let extended = format!("{password}{suffix}");
        prop_assert!(!usecase.verify(&extended, &stored).unwrap());
    }
}
