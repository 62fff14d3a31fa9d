//! User repository implementation.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, Condition, DatabaseConnection, EntityTrait, Set};

use super::entities::user::{ActiveModel, Entity as UserEntity};
use super::paging::{paged_users, LIST_PAGE_SIZE};
use super::UserStream;
use crate::infra;
use common::{AppError, AppResult};
use domain::{NewUser, User, UserPatch};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>>;

    /// Persist a fully enriched user and return it with its new ID
    async fn create(&self, user: NewUser) -> AppResult<User>;

    /// Write only the fields present in `patch`
    async fn update(&self, id: i32, patch: UserPatch) -> AppResult<User>;

    /// Stream all users in storage order
    fn stream_all(&self) -> UserStream;

    /// Check that the store is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::database("find user"))?;

        Ok(result.map(User::from))
    }

    async fn create(&self, user: NewUser) -> AppResult<User> {
        let active_model = ActiveModel {
            name: Set(user.name),
            age: Set(user.age),
            gender: Set(user.gender),
            nation: Set(user.nation),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(AppError::database("insert user"))?;
        Ok(User::from(model))
    }

    async fn update(&self, id: i32, patch: UserPatch) -> AppResult<User> {
        if patch.is_empty() {
            return Err(AppError::validation("At least one field must be provided"));
        }

        let user = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::database("find user"))?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = user.into();

        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        if let Some(age) = patch.age {
            active.age = Set(age);
        }
        if let Some(gender) = patch.gender {
            active.gender = Set(gender);
        }
        if let Some(nation) = patch.nation {
            active.nation = Set(nation);
        }

        let model = active
            .update(&self.db)
            .await
            .map_err(AppError::database("update user"))?;
        Ok(User::from(model))
    }

    fn stream_all(&self) -> UserStream {
        paged_users(
            self.db.clone(),
            Condition::all(),
            LIST_PAGE_SIZE,
            "list users",
        )
    }

    async fn ping(&self) -> AppResult<()> {
        infra::ping(&self.db)
            .await
            .map_err(AppError::database("ping"))
    }
}
