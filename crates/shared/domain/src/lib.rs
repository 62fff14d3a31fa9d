//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the user record, the partial-update allow-list and domain errors.

pub mod constants;
pub mod error;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use user::{NewUser, PatchField, User, UserPatch};
