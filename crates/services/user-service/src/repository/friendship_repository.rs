//! Friendship repository.

use async_trait::async_trait;
use sea_orm::sea_query::{OnConflict, Query};
use sea_orm::{ColumnTrait, Condition, DatabaseConnection, EntityTrait, Set};

use super::entities::friendship::{self, ActiveModel, Entity as FriendshipEntity};
use super::entities::user;
use super::paging::{paged_users, LIST_PAGE_SIZE};
use super::UserStream;
use common::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Friendship repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait FriendshipRepository: Send + Sync {
    /// Store both directions of the friendship.
    ///
    /// Returns the number of new rows: 2 for a new pair, 0 if it already existed.
    async fn add(&self, user_id: i32, friend_id: i32) -> AppResult<u64>;

    /// Stream every user connected to `user_id`, ordered by ID
    fn stream_friends(&self, user_id: i32) -> UserStream;
}

/// Concrete implementation of FriendshipRepository
pub struct FriendshipStore {
    db: DatabaseConnection,
}

impl FriendshipStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FriendshipRepository for FriendshipStore {
    async fn add(&self, user_id: i32, friend_id: i32) -> AppResult<u64> {
        let edges = [(user_id, friend_id), (friend_id, user_id)].map(|(from, to)| ActiveModel {
            user_id: Set(from),
            friend_id: Set(to),
        });

        FriendshipEntity::insert_many(edges)
            .on_conflict(
                OnConflict::columns([friendship::Column::UserId, friendship::Column::FriendId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(AppError::database("add friendship"))
    }

    fn stream_friends(&self, user_id: i32) -> UserStream {
        let friend_ids = Query::select()
            .column(friendship::Column::FriendId)
            .from(FriendshipEntity)
            .and_where(friendship::Column::UserId.eq(user_id))
            .to_owned();

        paged_users(
            self.db.clone(),
            Condition::all().add(user::Column::Id.in_subquery(friend_ids)),
            LIST_PAGE_SIZE,
            "list friends",
        )
    }
}
