use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use crate::error::AppError;

/// Stored in place of a hash for accounts that must never log in.
/// It is not a valid PHC string, so every verification fails.
pub const UNUSABLE_PASSWORD: &str = "!";

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .to_string();

    Ok(password_hash)
}

/// Runs [`hash_password`] on the blocking pool; Argon2 is deliberately slow.
pub async fn hash_password_off_thread(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
}

pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    let result = Argon2::default().verify_password(password.as_bytes(), &parsed_hash);

    match result {
        Ok(_) => Ok(true),
        Err(_) => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_salted_and_verifies() {
        let first = hash_password("secret").unwrap();
        let second = hash_password("secret").unwrap();

        assert_ne!(first, second);
        assert!(first.starts_with("$argon2"));
        assert!(verify_password("secret", &first).unwrap());
        assert!(!verify_password("Secret", &first).unwrap());
    }

    #[tokio::test]
    async fn off_thread_hash_verifies() {
        let hash = hash_password_off_thread("secret".to_string()).await.unwrap();

        assert!(verify_password("secret", &hash).unwrap());
    }

    #[test]
    fn unusable_hash_is_rejected() {
        assert!(verify_password("anything", UNUSABLE_PASSWORD).is_err());
    }
}
