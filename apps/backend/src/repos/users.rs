//! User repository functions for the domain layer.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::users_sea as users_adapter;
use crate::entities::users;
use crate::errors::domain::DomainError;
use crate::infra::db_errors::map_db_err;

/// User domain model, converted from the database row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: i64,
    pub name: Option<String>,
    pub is_guest: bool,
    pub connection_id: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            is_guest: model.is_guest,
            connection_id: model.connection_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_by_id(conn, user_id)
        .await
        .map_err(map_db_err)?;
    Ok(user.map(User::from))
}

/// Find user by ID or return a domain not-found error.
pub async fn require_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<User, DomainError> {
    let user = users_adapter::require_user(conn, user_id)
        .await
        .map_err(map_db_err)?;
    Ok(User::from(user))
}

pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: users_adapter::UserCreate,
) -> Result<User, DomainError> {
    let user = users_adapter::create_user(conn, dto)
        .await
        .map_err(map_db_err)?;
    Ok(User::from(user))
}

pub async fn update_connection<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    connection_id: Option<String>,
) -> Result<User, DomainError> {
    let user = users_adapter::update_connection(conn, user_id, connection_id)
        .await
        .map_err(map_db_err)?;
    Ok(User::from(user))
}
