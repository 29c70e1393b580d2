//! Password hashing and the username/password check.
//!
//! Hashes use the `pbkdf2_sha256$<iterations>$<salt>$<base64 hash>` layout.
//! Stored values in any other layout are legacy plaintext credentials.

use base64::{Engine as _, engine::general_purpose};
use constant_time_eq::constant_time_eq;
use pbkdf2::pbkdf2_hmac;
use rand::{Rng, distributions::Alphanumeric};
use sha2::Sha256;
use tracing::{debug, warn};

use crate::Database;
use crate::error::{Result, StorageError};
use crate::repository::athlete::AthleteRepository;

const SCHEME: &str = "pbkdf2_sha256";
pub const PBKDF2_ITERATIONS: u32 = 600_000;
const SALT_LEN: usize = 22;

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> String {
    hash_password_with(password, PBKDF2_ITERATIONS)
}

pub fn hash_password_with(password: &str, iterations: u32) -> String {
    let salt: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SALT_LEN)
        .map(char::from)
        .collect();

    format!(
        "{SCHEME}${iterations}${salt}${}",
        derive(password, &salt, iterations)
    )
}

fn derive(password: &str, salt: &str, iterations: u32) -> String {
    let mut output = [0u8; 32];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt.as_bytes(), iterations, &mut output);
    general_purpose::STANDARD.encode(output)
}

/// Check `password` against a stored credential in constant time.
pub fn verify_password(password: &str, stored: &str) -> bool {
    if !stored.starts_with(SCHEME) {
        warn!("Verifying a legacy plaintext credential");
        return constant_time_eq(password.as_bytes(), stored.as_bytes());
    }

    let parts: Vec<&str> = stored.split('$').collect();
    if parts.len() != 4 || parts[0] != SCHEME {
        return false;
    }

    let Ok(iterations) = parts[1].parse::<u32>() else {
        return false;
    };
    if iterations == 0 {
        return false;
    }

    let computed = derive(password, parts[2], iterations);
    constant_time_eq(computed.as_bytes(), parts[3].as_bytes())
}

/// Id of the athlete owning `username` if `password` matches.
///
/// An unknown username and a wrong password are indistinguishable to the
/// caller.
pub async fn authorize(db: &Database, username: &str, password: &str) -> Result<Option<i32>> {
    let athlete = match AthleteRepository::new(db.pool()).find_by_username(username).await {
        Ok(athlete) => athlete,
        Err(StorageError::NotFound) => {
            debug!(username, "Authorization failed: unknown username");
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    if verify_password(password, &athlete.password_hash) {
        debug!(athlete_id = athlete.athlete_id, "Authorized");
        Ok(Some(athlete.athlete_id))
    } else {
        debug!(athlete_id = athlete.athlete_id, "Authorization failed: wrong password");
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAST: u32 = 1_000;

    #[test]
    fn test_hash_round_trip() {
        let stored = hash_password_with("osoto-gari", FAST);
        assert!(stored.starts_with("pbkdf2_sha256$1000$"));
        assert!(verify_password("osoto-gari", &stored));
        assert!(!verify_password("uchi-mata", &stored));
    }

    #[test]
    fn test_salts_differ() {
        let a = hash_password_with("same", FAST);
        let b = hash_password_with("same", FAST);
        assert_ne!(a, b);
        assert!(verify_password("same", &a));
        assert!(verify_password("same", &b));
    }

    #[test]
    fn test_default_hash_never_stores_plaintext() {
        let stored = hash_password("armbar");
        assert!(!stored.contains("armbar"));
        assert_eq!(stored.split('$').count(), 4);
    }

    #[test]
    fn test_legacy_plaintext_credentials_still_verify() {
        assert!(verify_password("kimura", "kimura"));
        assert!(!verify_password("kimura", "kimura2"));
    }

    #[test]
    fn test_malformed_hashes_never_verify() {
        assert!(!verify_password("x", "pbkdf2_sha256$abc$salt$hash"));
        assert!(!verify_password("x", "pbkdf2_sha256$1000$salt"));
        assert!(!verify_password("x", "pbkdf2_sha256$0$salt$hash"));
    }
}
