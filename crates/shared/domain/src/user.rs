//! User domain entity and related types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::UNASSIGNED_USER_ID;
use crate::validation::{validate_age_against_birth_date, validate_birth_date};

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned identifier, `UNASSIGNED_USER_ID` until persisted
    pub id: i32,
    pub name: String,
    pub age: i32,
    pub date_of_birth: NaiveDate,
}

impl User {
    /// Check if the store has assigned an id to this user
    pub fn is_persisted(&self) -> bool {
        self.id != UNASSIGNED_USER_ID
    }
}

/// Map a create request onto a user that has not been persisted yet.
impl From<CreateUserRequest> for User {
    fn from(request: CreateUserRequest) -> Self {
        Self {
            id: UNASSIGNED_USER_ID,
            name: request.name,
            age: request.age,
            date_of_birth: request.date_of_birth,
        }
    }
}

impl From<&CreateUserRequest> for User {
    fn from(request: &CreateUserRequest) -> Self {
        Self::from(request.clone())
    }
}

/// Build the updated version of `existing` from an update request.
///
/// Name, age and date of birth come from the request; the id is always the
/// existing user's. `existing` is left untouched.
pub fn apply_update(existing: &User, request: &UpdateUserRequest) -> User {
    User {
        id: existing.id,
        name: request.name.clone(),
        age: request.age,
        date_of_birth: request.date_of_birth,
    }
}

/// User creation data transfer object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[validate(schema(function = "validate_create_consistency"))]
pub struct CreateUserRequest {
    /// User display name, unique across users
    #[validate(length(min = 1, message = "Name must not be empty"))]
    #[cfg_attr(feature = "openapi", schema(example = "Alice"))]
    pub name: String,
    /// Age in full years
    #[validate(range(min = 18, max = 120, message = "Age must be between 18 and 120"))]
    #[cfg_attr(feature = "openapi", schema(example = 30))]
    pub age: i32,
    /// Calendar date of birth (YYYY-MM-DD)
    #[validate(custom(function = "validate_birth_date"))]
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = Date, example = "1994-06-04"))]
    pub date_of_birth: NaiveDate,
}

impl CreateUserRequest {
    pub fn new(name: impl Into<String>, age: i32, date_of_birth: NaiveDate) -> Self {
        Self {
            name: name.into(),
            age,
            date_of_birth,
        }
    }
}

/// User update data transfer object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[validate(schema(function = "validate_update_consistency"))]
pub struct UpdateUserRequest {
    /// Id of the user to update
    #[cfg_attr(feature = "openapi", schema(example = 1))]
    pub id: i32,
    /// New display name
    #[validate(length(min = 1, message = "Name must not be empty"))]
    #[cfg_attr(feature = "openapi", schema(example = "Alice Smith"))]
    pub name: String,
    /// New age in full years
    #[validate(range(min = 18, max = 120, message = "Age must be between 18 and 120"))]
    pub age: i32,
    /// New date of birth (YYYY-MM-DD)
    #[validate(custom(function = "validate_birth_date"))]
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = Date, example = "1994-04-05"))]
    pub date_of_birth: NaiveDate,
}

impl UpdateUserRequest {
    pub fn new(id: i32, name: impl Into<String>, age: i32, date_of_birth: NaiveDate) -> Self {
        Self {
            id,
            name: name.into(),
            age,
            date_of_birth,
        }
    }
}

fn validate_create_consistency(
    request: &CreateUserRequest,
) -> Result<(), validator::ValidationError> {
    validate_age_against_birth_date(request.age, request.date_of_birth)
}

fn validate_update_consistency(
    request: &UpdateUserRequest,
) -> Result<(), validator::ValidationError> {
    validate_age_against_birth_date(request.age, request.date_of_birth)
}

/// User response (safe to return to client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserResponse {
    /// Unique user identifier
    pub id: i32,
    /// User display name
    pub name: String,
    /// Age in full years
    pub age: i32,
    /// Date of birth
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = Date))]
    pub date_of_birth: NaiveDate,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            age: user.age,
            date_of_birth: user.date_of_birth,
        }
    }
}
