//! Keyset-paged user streams.
//!
//! Rows are pulled one page at a time as the stream is polled, ordered by id,
//! so a listing never holds the whole table in memory. The stream ends after
//! the first short page and cannot be restarted.

use futures::stream::{self, StreamExt, TryStreamExt};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

use common::{AppError, AppResult};
use domain::User;

use super::entities::user::{self, Entity as UserEntity};
use super::UserStream;

/// Rows fetched per round trip while streaming users
pub const LIST_PAGE_SIZE: u64 = 100;

struct Cursor {
    db: DatabaseConnection,
    condition: Condition,
    after: Option<i32>,
    exhausted: bool,
}

/// Lazily stream every user matching `condition` in ascending id order.
pub(crate) fn paged_users(
    db: DatabaseConnection,
    condition: Condition,
    page_size: u64,
    operation: &'static str,
) -> UserStream {
    let cursor = Cursor {
        db,
        condition,
        after: None,
        exhausted: false,
    };

    stream::try_unfold(cursor, move |cursor| next_page(cursor, page_size, operation))
        .map_ok(|users| stream::iter(users.into_iter().map(Ok::<User, AppError>)))
        .try_flatten()
        .boxed()
}

async fn next_page(
    mut cursor: Cursor,
    page_size: u64,
    operation: &'static str,
) -> AppResult<Option<(Vec<User>, Cursor)>> {
    if cursor.exhausted {
        return Ok(None);
    }

    let mut query = UserEntity::find()
        .filter(cursor.condition.clone())
        .order_by_asc(user::Column::Id)
        .limit(page_size);
    if let Some(after) = cursor.after {
        query = query.filter(user::Column::Id.gt(after));
    }

    let page = query
        .all(&cursor.db)
        .await
        .map_err(AppError::database(operation))?;

    let Some(last) = page.last() else {
        return Ok(None);
    };
    cursor.after = Some(last.id);
    cursor.exhausted = (page.len() as u64) < page_size;

    let users = page.into_iter().map(User::from).collect();
    Ok(Some((users, cursor)))
}
