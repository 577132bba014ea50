//! Room coordination: creation with unique invite codes and the join/leave
//! validation rules.

use sea_orm::ConnectionTrait;

use crate::adapters::rooms_sea::RoomCreate;
use crate::entities::rooms::{GameMode, RoomStatus};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::errors::ErrorCode;
use crate::repos::rooms as rooms_repo;
use crate::repos::rooms::Room;
use crate::repos::users as users_repo;
use crate::utils::invite_code::generate_invite_code;

const INVITE_CODE_ATTEMPTS: usize = 5;

/// Create a room for a user. The invite code is generated here and retried on
/// a unique-constraint collision; the database is the arbiter of uniqueness.
pub async fn create_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    created_by: i64,
    game_mode: GameMode,
) -> Result<Room, AppError> {
    users_repo::require_user(conn, created_by).await?;

    for _ in 0..INVITE_CODE_ATTEMPTS {
        let result = rooms_repo::create_room(
            conn,
            RoomCreate {
                invite_code: generate_invite_code(),
                created_by,
                game_mode,
            },
        )
        .await;

        match result {
            Ok(room) => return Ok(room),
            Err(DomainError::Conflict(ConflictKind::InviteCodeConflict, _)) => continue,
            Err(err) => return Err(err.into()),
        }
    }

    Err(AppError::internal(format!(
        "could not allocate a unique invite code after {INVITE_CODE_ATTEMPTS} attempts"
    )))
}

pub async fn find_by_invite_code<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    invite_code: &str,
) -> Result<Room, AppError> {
    rooms_repo::find_by_invite_code(conn, invite_code)
        .await?
        .ok_or_else(|| {
            AppError::not_found(
                ErrorCode::RoomNotFound,
                format!("Room with invite code {invite_code} not found"),
            )
        })
}

/// How a validated join request relates to the room's current membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// The user becomes a new member of the room.
    NewMember,
    /// The user is already a member; joining again is idempotent.
    Rejoin,
}

/// Validate a join against the room's membership and status. No side effects.
pub fn validate_join(room: &Room, user_id: i64) -> Result<JoinKind, AppError> {
    if room.player_ids.contains(&user_id) {
        return Ok(JoinKind::Rejoin);
    }
    match room.status {
        RoomStatus::Finished => Err(AppError::invalid_state(
            ErrorCode::InvalidRoomState,
            format!("Room {} is retired and accepts no new players", room.id),
        )),
        RoomStatus::Playing => Err(AppError::conflict(
            ErrorCode::GameInProgress,
            format!("Room {} has a game in progress", room.id),
        )),
        _ if room.player_ids.len() >= 2 => Err(AppError::conflict(
            ErrorCode::RoomFull,
            format!("Room {} is full", room.id),
        )),
        _ => Ok(JoinKind::NewMember),
    }
}

/// The room status after a membership change with `count` players present.
pub fn status_for_player_count(count: usize) -> RoomStatus {
    match count {
        0 => RoomStatus::Finished,
        2 => RoomStatus::Ready,
        _ => RoomStatus::Waiting,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    fn room(status: RoomStatus, player_ids: Vec<i64>) -> Room {
        Room {
            id: 1,
            invite_code: "ABC123".into(),
            created_by: 10,
            game_mode: GameMode::Classic,
            status,
            player_ids,
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn member_rejoin_is_idempotent() {
        let room = room(RoomStatus::Waiting, vec![10]);
        assert_eq!(validate_join(&room, 10).unwrap(), JoinKind::Rejoin);
    }

    #[test]
    fn second_player_joins_waiting_room() {
        let room = room(RoomStatus::Waiting, vec![10]);
        assert_eq!(validate_join(&room, 20).unwrap(), JoinKind::NewMember);
    }

    #[test]
    fn third_player_is_rejected_with_room_full() {
        let room = room(RoomStatus::Ready, vec![10, 20]);
        let err = validate_join(&room, 30).unwrap_err();
        assert_eq!(err.code(), ErrorCode::RoomFull);
    }

    #[test]
    fn member_can_rejoin_even_when_room_is_full() {
        let room = room(RoomStatus::Ready, vec![10, 20]);
        assert_eq!(validate_join(&room, 20).unwrap(), JoinKind::Rejoin);
    }

    #[test]
    fn new_player_cannot_join_a_playing_room() {
        let room = room(RoomStatus::Playing, vec![10, 20]);
        let err = validate_join(&room, 30).unwrap_err();
        assert_eq!(err.code(), ErrorCode::GameInProgress);
    }

    #[test]
    fn retired_rooms_accept_no_joins() {
        let room = room(RoomStatus::Finished, vec![]);
        let err = validate_join(&room, 30).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidRoomState);
    }

    #[test]
    fn status_tracks_player_count() {
        assert_eq!(status_for_player_count(0), RoomStatus::Finished);
        assert_eq!(status_for_player_count(1), RoomStatus::Waiting);
        assert_eq!(status_for_player_count(2), RoomStatus::Ready);
    }
}
