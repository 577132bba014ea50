//! Application state construction.

use crate::config::db::DbProfile;
use crate::error::AppError;
use crate::infra::db::connect_db;
use crate::state::app_state::AppState;

/// Connect the database for a profile and assemble the shared state.
pub async fn build_state(profile: DbProfile) -> Result<AppState, AppError> {
    let db = connect_db(profile).await?;
    Ok(AppState::new(db))
}
