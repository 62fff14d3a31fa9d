//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Patchable user fields
// =============================================================================

/// Column holding the user's name
pub const FIELD_NAME: &str = "name";

/// Column holding the inferred age
pub const FIELD_AGE: &str = "age";

/// Column holding the inferred gender
pub const FIELD_GENDER: &str = "gender";

/// Column holding the inferred nationality (ISO country code)
pub const FIELD_NATION: &str = "nation";

/// Every field a partial update may touch
pub const PATCHABLE_FIELDS: &[&str] = &[FIELD_NAME, FIELD_AGE, FIELD_GENDER, FIELD_NATION];

// =============================================================================
// Validation
// =============================================================================

/// Minimum name length requirement
pub const MIN_NAME_LENGTH: usize = 1;
