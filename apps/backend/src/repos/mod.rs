//! Repository functions for the domain layer.
//!
//! These wrap the SeaORM adapters, translate `DbErr` into `DomainError`, and
//! expose domain models instead of database rows.

pub mod matches;
pub mod plays;
pub mod results;
pub mod rooms;
pub mod users;
