//! SeaORM adapter for the users table - generic over ConnectionTrait.

use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, NotSet, Set};

use crate::entities::users;

pub mod dto;

pub use dto::UserCreate;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find_by_id(user_id).one(conn).await
}

/// Find user by ID or return a structured not-found error.
pub async fn require_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<users::Model, sea_orm::DbErr> {
    find_by_id(conn, user_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::Custom(format!("USER_NOT_FOUND:{user_id}")))
}

pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserCreate,
) -> Result<users::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let user_active = users::ActiveModel {
        id: NotSet,
        name: Set(dto.name),
        is_guest: Set(dto.is_guest),
        connection_id: NotSet,
        created_at: Set(now),
        updated_at: Set(now),
    };

    user_active.insert(conn).await
}

/// Record (or clear) the user's live connection handle.
pub async fn update_connection<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    connection_id: Option<String>,
) -> Result<users::Model, sea_orm::DbErr> {
    let user = require_user(conn, user_id).await?;
    let mut user_active: users::ActiveModel = user.into();
    user_active.connection_id = Set(connection_id);
    user_active.updated_at = Set(time::OffsetDateTime::now_utc());
    user_active.update(conn).await
}
