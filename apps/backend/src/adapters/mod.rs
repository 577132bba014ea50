//! SeaORM adapters - the durable-store gateway.
//!
//! Functions here are generic over `ConnectionTrait` and return `DbErr`;
//! the repos layer maps to `DomainError` via `infra::db_errors::map_db_err`.

pub mod matches_sea;
pub mod plays_sea;
pub mod results_sea;
pub mod rooms_sea;
pub mod users_sea;
