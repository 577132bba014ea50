//! User service: guest creation and lookups at the HTTP boundary.

use rand::Rng;
use sea_orm::ConnectionTrait;

use crate::adapters::users_sea::UserCreate;
use crate::error::AppError;
use crate::repos::users as users_repo;
use crate::repos::users::User;

const GUEST_SUFFIX_LEN: usize = 6;
const GUEST_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

fn guest_name() -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..GUEST_SUFFIX_LEN)
        .map(|_| GUEST_ALPHABET[rng.random_range(0..GUEST_ALPHABET.len())] as char)
        .collect();
    format!("Guest_{suffix}")
}

/// Create a user. Without a name, a guest identity with a generated display
/// name is created instead.
pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: Option<String>,
) -> Result<User, AppError> {
    let name = name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
    let (name, is_guest) = match name {
        Some(name) => (name, false),
        None => (guest_name(), true),
    };

    let user = users_repo::create_user(
        conn,
        UserCreate {
            name: Some(name),
            is_guest,
        },
    )
    .await?;
    Ok(user)
}

pub async fn find_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<User, AppError> {
    Ok(users_repo::require_user(conn, user_id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guest_names_carry_prefix_and_suffix() {
        let name = guest_name();
        assert!(name.starts_with("Guest_"));
        assert_eq!(name.len(), "Guest_".len() + GUEST_SUFFIX_LEN);
    }
}
