//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the `User` entity, the request shapes that create and update it, and the
//! field rules those requests are checked against.

pub mod constants;
pub mod user;
pub mod validation;

pub use constants::*;
pub use user::{apply_update, CreateUserRequest, UpdateUserRequest, User, UserResponse};
pub use validation::{implied_age, violations};
