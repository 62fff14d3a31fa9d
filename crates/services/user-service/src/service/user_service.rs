//! User service - enrichment, persistence and friendship use cases.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use common::{AppError, AppResult, OptionExt};
use domain::{User, UserPatch, MIN_NAME_LENGTH};

use crate::enrichment::DemographicsProvider;
use crate::repository::{FriendshipRepository, UserRepository, UserStream};

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Enrich `name` and store the resulting record
    async fn create_user(&self, name: String) -> AppResult<User>;

    /// Get user by ID
    async fn get_user(&self, id: i32) -> AppResult<User>;

    /// Stream all users in ID order
    async fn list_users(&self) -> AppResult<UserStream>;

    /// Apply a partial update
    async fn update_user(&self, id: i32, patch: UserPatch) -> AppResult<User>;

    /// Make two existing users friends. Adding an existing pair is a no-op.
    async fn add_friend(&self, user_id: i32, friend_id: i32) -> AppResult<()>;

    /// Stream the friends of an existing user
    async fn list_friends(&self, user_id: i32) -> AppResult<UserStream>;

    /// Check that storage is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// Concrete implementation of UserService.
pub struct UserManager {
    users: Arc<dyn UserRepository>,
    friendships: Arc<dyn FriendshipRepository>,
    demographics: Arc<dyn DemographicsProvider>,
}

impl UserManager {
    pub fn new(
        users: Arc<dyn UserRepository>,
        friendships: Arc<dyn FriendshipRepository>,
        demographics: Arc<dyn DemographicsProvider>,
    ) -> Self {
        Self {
            users,
            friendships,
            demographics,
        }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(&self, name: String) -> AppResult<User> {
        let name = name.trim();
        if name.chars().count() < MIN_NAME_LENGTH {
            return Err(AppError::validation("Name must not be empty"));
        }

        let new_user = self.demographics.enrich(name).await?;
        let user = self.users.create(new_user).await?;

        info!(id = user.id, name = %user.name, "User created");
        Ok(user)
    }

    async fn get_user(&self, id: i32) -> AppResult<User> {
        self.users.find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_users(&self) -> AppResult<UserStream> {
        Ok(self.users.stream_all())
    }

    async fn update_user(&self, id: i32, patch: UserPatch) -> AppResult<User> {
        if patch.is_empty() {
            return Err(AppError::validation("At least one field must be provided"));
        }

        let fields = patch.fields();
        let user = self.users.update(id, patch).await?;
        debug!(id, ?fields, "User updated");
        Ok(user)
    }

    async fn add_friend(&self, user_id: i32, friend_id: i32) -> AppResult<()> {
        if user_id == friend_id {
            return Err(AppError::validation("A user cannot befriend themself"));
        }

        self.users.find_by_id(user_id).await?.ok_or_not_found()?;
        self.users.find_by_id(friend_id).await?.ok_or_not_found()?;

        let inserted = self.friendships.add(user_id, friend_id).await?;
        if inserted == 0 {
            debug!(user_id, friend_id, "Users are already friends");
        } else {
            info!(user_id, friend_id, "Friendship added");
        }
        Ok(())
    }

    async fn list_friends(&self, user_id: i32) -> AppResult<UserStream> {
        self.users.find_by_id(user_id).await?.ok_or_not_found()?;
        Ok(self.friendships.stream_friends(user_id))
    }

    async fn ping(&self) -> AppResult<()> {
        self.users.ping().await
    }
}
