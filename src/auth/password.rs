use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

#[derive(Debug, thiserror::Error)]
#[error("Password hashing failed: {0}")]
pub struct PasswordError(String);

/// Well-formed hash with the default Argon2 costs that matches no password.
/// Verified against when the email is unknown so both login failures cost the same.
pub const UNKNOWN_USER_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$K/SbYj3tutrtwkIORaJudg$icVOgr302CXsCQRazwKurLvUasQevxo/cytk4ChHmx0";

/// Hash a password with Argon2 and a fresh random salt (PHC string output).
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError(e.to_string()))
}

/// Verify a password against a stored PHC hash. Malformed hashes never verify.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_only_the_original_password() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("wrong horse", &hash));
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let a = hash_password("secret").unwrap();
        let b = hash_password("secret").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn unknown_user_hash_costs_as_much_as_a_real_one() {
        let real = hash_password("secret").unwrap();
        let real = argon2::Params::try_from(&PasswordHash::new(&real).unwrap()).unwrap();
        let dummy = argon2::Params::try_from(&PasswordHash::new(UNKNOWN_USER_HASH).unwrap()).unwrap();

        assert_eq!(
            (dummy.m_cost(), dummy.t_cost(), dummy.p_cost()),
            (real.m_cost(), real.t_cost(), real.p_cost())
        );
        assert!(!verify_password("secret", UNKNOWN_USER_HASH));
        assert!(!verify_password("", UNKNOWN_USER_HASH));
    }

    #[test]
    fn garbage_hash_does_not_verify() {
        assert!(!verify_password("secret", "not-a-phc-string"));
    }
}
