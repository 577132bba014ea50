//! DTOs for users_sea adapter.

/// DTO for creating a user.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub name: Option<String>,
    pub is_guest: bool,
}
