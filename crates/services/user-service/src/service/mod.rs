//! Service layer - user use cases.

mod user_service;

pub use user_service::{UserDirectory, UserService};
