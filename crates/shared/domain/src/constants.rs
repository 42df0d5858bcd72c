//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Identity
// =============================================================================

/// Id carried by a user that has not been persisted yet
pub const UNASSIGNED_USER_ID: i32 = 0;

// =============================================================================
// Validation
// =============================================================================

/// Youngest age a user may register with
pub const MIN_AGE: i32 = 18;

/// Oldest age a user may register with
pub const MAX_AGE: i32 = 120;

/// Separator used when reporting create-request violations
pub const CREATE_VIOLATION_SEPARATOR: &str = ", ";

/// Separator used when reporting update-request violations
pub const UPDATE_VIOLATION_SEPARATOR: &str = "\n";

// =============================================================================
// Business rule messages
// =============================================================================

/// Reported when a lookup by id finds nothing
pub const USER_NOT_FOUND: &str = "User not found";

/// Reported when a name is already taken by another user
pub const NAME_ALREADY_EXISTS: &str = "Name already exists";
