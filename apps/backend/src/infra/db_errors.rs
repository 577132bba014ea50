//! SeaORM -> DomainError translation helpers.
//!
//! Adapters convert `sea_orm::DbErr` into `crate::errors::domain::DomainError`
//! here, and higher layers then map `DomainError` to `AppError` via `From`.

use tracing::warn;

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Map PostgreSQL constraint names to domain-specific conflict errors.
fn map_constraint_to_conflict(error_msg: &str) -> Option<(ConflictKind, &'static str)> {
    if error_msg.contains("rooms_invite_code_key") {
        return Some((
            ConflictKind::InviteCodeConflict,
            "Invite code already exists",
        ));
    }
    if error_msg.contains("plays_match_player_round_key") {
        return Some((
            ConflictKind::DuplicatePlay,
            "Player already made a play for this round",
        ));
    }
    None
}

/// Parse structured `"<ENTITY>_NOT_FOUND:<id>"` sentinels emitted by adapters.
fn map_not_found_sentinel(msg: &str) -> Option<DomainError> {
    for (prefix, kind, entity) in [
        ("ROOM_NOT_FOUND:", NotFoundKind::Room, "Room"),
        ("MATCH_NOT_FOUND:", NotFoundKind::Match, "Match"),
        ("USER_NOT_FOUND:", NotFoundKind::User, "User"),
    ] {
        if let Some(id_str) = msg.strip_prefix(prefix) {
            let detail = match id_str.parse::<i64>() {
                Ok(id) => format!("{entity} {id} not found"),
                Err(_) => format!("{entity} not found"),
            };
            return Some(DomainError::not_found(kind, detail));
        }
    }
    None
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();

    match &e {
        sea_orm::DbErr::RecordNotFound(_) => {
            return DomainError::not_found(NotFoundKind::Other("Record".into()), "Record not found");
        }
        sea_orm::DbErr::Custom(msg) => {
            if let Some(not_found) = map_not_found_sentinel(msg) {
                return not_found;
            }
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(error = %error_msg, "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    // Unique violations (SQLSTATE 23505)
    if mentions_sqlstate(&error_msg, "23505") || error_msg.contains("duplicate key") {
        if let Some((kind, detail)) = map_constraint_to_conflict(&error_msg) {
            return DomainError::conflict(kind, detail);
        }
        return DomainError::conflict(
            ConflictKind::Other("UniqueViolation".into()),
            "Unique constraint violation",
        );
    }

    // Foreign key violations (SQLSTATE 23503)
    if mentions_sqlstate(&error_msg, "23503") {
        return DomainError::conflict(
            ConflictKind::Other("FkViolation".into()),
            "Foreign key constraint violation",
        );
    }

    // Check violations (SQLSTATE 23514)
    if mentions_sqlstate(&error_msg, "23514") {
        return DomainError::validation("Check constraint violation");
    }

    if error_msg.to_lowercase().contains("timed out") || error_msg.to_lowercase().contains("timeout")
    {
        return DomainError::infra(InfraErrorKind::Timeout, "Database operation timed out");
    }

    warn!(error = %error_msg, "Unmapped database error");
    DomainError::infra(InfraErrorKind::Other("Db".into()), "Database error")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_not_found_maps_to_generic_not_found() {
        let err = map_db_err(sea_orm::DbErr::RecordNotFound("rooms".into()));
        assert!(matches!(err, DomainError::NotFound(_, _)));
    }

    #[test]
    fn room_sentinel_maps_to_room_not_found() {
        let err = map_db_err(sea_orm::DbErr::Custom("ROOM_NOT_FOUND:42".into()));
        assert_eq!(
            err,
            DomainError::not_found(NotFoundKind::Room, "Room 42 not found")
        );
    }

    #[test]
    fn match_sentinel_maps_to_match_not_found() {
        let err = map_db_err(sea_orm::DbErr::Custom("MATCH_NOT_FOUND:7".into()));
        assert_eq!(
            err,
            DomainError::not_found(NotFoundKind::Match, "Match 7 not found")
        );
    }

    #[test]
    fn duplicate_play_constraint_maps_to_conflict() {
        let err = map_db_err(sea_orm::DbErr::Custom(
            "error: duplicate key value violates unique constraint \"plays_match_player_round_key\""
                .into(),
        ));
        assert_eq!(
            err,
            DomainError::conflict(
                ConflictKind::DuplicatePlay,
                "Player already made a play for this round"
            )
        );
    }

    #[test]
    fn invite_code_constraint_maps_to_conflict() {
        let err = map_db_err(sea_orm::DbErr::Custom(
            "duplicate key value violates unique constraint \"rooms_invite_code_key\"".into(),
        ));
        assert_eq!(
            err,
            DomainError::conflict(ConflictKind::InviteCodeConflict, "Invite code already exists")
        );
    }
}
