//! Repository layer for data access.
//!
//! The only layer that touches the database connection. Every statement is
//! built with the SeaORM query builder, so values are always bound parameters.

pub mod entities;
mod friendship_repository;
mod paging;
mod user_repository;

use futures::stream::BoxStream;

use common::AppResult;
use domain::User;

pub use friendship_repository::{FriendshipRepository, FriendshipStore};
pub use paging::LIST_PAGE_SIZE;
pub use user_repository::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use friendship_repository::MockFriendshipRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;

/// Lazy, finite sequence of users read from storage.
pub type UserStream = BoxStream<'static, AppResult<User>>;
