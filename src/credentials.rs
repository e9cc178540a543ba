use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tracing::warn;

/// Hashes `password` into an Argon2 PHC string.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

const ARGON2_IDENTS: [&str; 3] = ["argon2id", "argon2i", "argon2d"];

/// Checks `candidate` against a stored credential. Rows written before hashing
/// was introduced hold the password itself and are compared verbatim, even
/// when that password happens to look like a PHC string.
pub fn verify_password(stored: &str, candidate: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) if ARGON2_IDENTS.contains(&parsed.algorithm.as_str()) => Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok(),
        _ => {
            warn!("Comparing against a plaintext stored credential");
            stored == candidate
        }
    }
}
