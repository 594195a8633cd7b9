//! PBKDF2-HMAC-SHA256 password hashing. Stored form is
//! `base64(salt)$base64(derived)`.

use base64::engine::general_purpose::STANDARD_NO_PAD as B64;
use base64::Engine;
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

const ITERATIONS: u32 = 100_000;
const KEY_LEN: usize = 32;

pub fn hash_password(password: &str) -> String {
    let salt = *uuid::Uuid::new_v4().as_bytes();
    let mut derived = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt, ITERATIONS, &mut derived);
    format!("{}${}", B64.encode(salt), B64.encode(derived))
}

pub fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt_b64, hash_b64)) = stored.split_once('$') else {
        return false;
    };
    let (Ok(salt), Ok(expected)) = (B64.decode(salt_b64), B64.decode(hash_b64)) else {
        return false;
    };
    let mut derived = vec![0u8; expected.len()];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt, ITERATIONS, &mut derived);
    derived == expected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_password_verifies() {
        let stored = hash_password("hunter2");
        assert!(verify_password("hunter2", &stored));
    }

    #[test]
    fn wrong_password_fails() {
        let stored = hash_password("hunter2");
        assert!(!verify_password("hunter3", &stored));
    }

    #[test]
    fn malformed_stored_hash_fails_closed() {
        assert!(!verify_password("hunter2", "not-a-hash"));
        assert!(!verify_password("hunter2", "a$b"));
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        assert_ne!(hash_password("hunter2"), hash_password("hunter2"));
    }
}
