//! Password value object - salted hashing of user passwords.
//!
//! The salt is supplied by the caller (application configuration) and is
//! stored alongside the hash on the user record.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::constants::{MAX_SALT_LENGTH, MIN_SALT_LENGTH};
use crate::error::{DomainError, DomainResult};

/// Hashed password in PHC string format.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash `plain_text` with Argon2 using the given salt.
    ///
    /// The same password and salt always produce the same hash.
    ///
    /// # Errors
    /// Returns a validation error if the salt is shorter than
    /// [`MIN_SALT_LENGTH`] or longer than [`MAX_SALT_LENGTH`] bytes.
    pub fn hash_with_salt(plain_text: &str, salt: &str) -> DomainResult<Self> {
        let salt = Self::salt_string(salt)?;
        let hash = Self::argon2()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| DomainError::password(format!("Password hash failed: {}", e)))?;

        Ok(Self {
            hash: hash.to_string(),
        })
    }

    /// Create a Password from an existing hash (from the store).
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this hash.
    pub fn verify(&self, plain_text: &str) -> bool {
        PasswordHash::new(&self.hash)
            .map(|parsed| {
                Self::argon2()
                    .verify_password(plain_text.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }

    fn salt_string(salt: &str) -> DomainResult<SaltString> {
        let len = salt.len();
        if !(MIN_SALT_LENGTH..=MAX_SALT_LENGTH).contains(&len) {
            return Err(DomainError::validation(format!(
                "Salt must be between {} and {} bytes",
                MIN_SALT_LENGTH, MAX_SALT_LENGTH
            )));
        }

        SaltString::encode_b64(salt.as_bytes())
            .map_err(|e| DomainError::internal(format!("Invalid salt: {}", e)))
    }

    #[inline]
    fn argon2() -> Argon2<'static> {
        Argon2::default()
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Password {}
