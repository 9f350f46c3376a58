/**
 * Salted Password Hashing
 *
 * Passwords are stored as `bcrypt(password ‖ salt)` where `salt` is a
 * per-user random hex string kept next to the hash. bcrypt embeds its own
 * salt as well; the extra per-user value is part of the stored schema and is
 * required to verify.
 *
 * bcrypt only reads the first 72 bytes of its input, so passwords are capped
 * at [`MAX_PASSWORD_BYTES`] to keep the whole salt inside that window.
 */

use thiserror::Error;

/// Random bytes per salt (hex encoded to twice as many characters)
pub const SALT_BYTES: usize = 16;

/// Longest accepted password, in bytes
pub const MAX_PASSWORD_BYTES: usize = 72 - SALT_BYTES * 2;

/// Errors raised while hashing
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password cannot be empty")]
    EmptyPassword,
    #[error("salt cannot be empty")]
    EmptySalt,
    #[error("hashing failed: {0}")]
    Hashing(#[from] bcrypt::BcryptError),
}

/// Generate a fresh per-user salt
pub fn generate_salt() -> String {
    hex::encode(rand::random::<[u8; SALT_BYTES]>())
}

/// Hash `password` with `salt` at the given bcrypt cost
pub fn hash_password(password: &str, salt: &str, cost: u32) -> Result<String, PasswordError> {
    if password.is_empty() {
        return Err(PasswordError::EmptyPassword);
    }
    if salt.is_empty() {
        return Err(PasswordError::EmptySalt);
    }

    bcrypt::hash(salted(password, salt), cost).map_err(|e| {
        tracing::error!("Error hashing password: {}", e);
        PasswordError::Hashing(e)
    })
}

/// Check `password` against a stored salt and hash
///
/// Empty inputs never match. A malformed stored hash is logged and treated
/// as a mismatch.
pub fn verify_password(password: &str, salt: &str, hashed_password: &str) -> bool {
    if password.is_empty() || salt.is_empty() || hashed_password.is_empty() {
        return false;
    }

    match bcrypt::verify(salted(password, salt), hashed_password) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::warn!("Password verification failed: {}", e);
            false
        }
    }
}

fn salted(password: &str, salt: &str) -> String {
    let mut combined = String::with_capacity(password.len() + salt.len());
    combined.push_str(password);
    combined.push_str(salt);
    combined
}
