//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// User Types
// =============================================================================

/// Default type assigned to new users
pub const USER_TYPE_REGULAR: &str = "regular";

/// Professional account type (offer hosts)
pub const USER_TYPE_PRO: &str = "pro";

/// All valid user type values
pub const VALID_USER_TYPES: &[&str] = &[USER_TYPE_REGULAR, USER_TYPE_PRO];

/// Check if a user type value is valid
pub fn is_valid_user_type(user_type: &str) -> bool {
    VALID_USER_TYPES.contains(&user_type)
}

// =============================================================================
// Password Salt
// =============================================================================

/// Minimum salt length in bytes (Argon2 rejects shorter salts)
pub const MIN_SALT_LENGTH: usize = 8;

/// Maximum salt length in bytes (fits the 64-char PHC salt encoding)
pub const MAX_SALT_LENGTH: usize = 48;

// =============================================================================
// Storage
// =============================================================================

/// Document collection holding user records
pub const USERS_COLLECTION: &str = "users";
