//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies
//! beyond the object id type shared with the document store.

pub mod constants;
pub mod error;
pub mod password;
pub mod user;

pub use bson::oid::ObjectId;
pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use password::Password;
pub use user::{CreateUser, OfferId, UpdateUser, User, UserResponse, UserType};
