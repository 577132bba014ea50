//! Wire protocol for the realtime game surface.
//!
//! Inbound and outbound messages are tagged JSON (`"type"` discriminator,
//! kebab-case). Outbound snapshots merge the durable room row with the live
//! readiness flags so clients never have to join the two themselves.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::plays::Choice;
use crate::entities::rooms::{GameMode, RoomStatus};
use crate::error::AppError;
use crate::repos::matches::Match;
use crate::repos::plays::Play;
use crate::repos::results::RoundResult;

/// Client-to-server commands.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientMsg {
    JoinRoom { room_id: i64, user_id: i64 },
    LeaveRoom { room_id: i64, user_id: i64 },
    PlayerReady { room_id: i64, user_id: i64 },
    MakePlay { room_id: i64, user_id: i64, choice: Choice },
    Rematch { room_id: i64, user_id: i64 },
}

impl ClientMsg {
    /// The room this command targets; every command is room-scoped.
    pub fn room_id(&self) -> i64 {
        match self {
            ClientMsg::JoinRoom { room_id, .. }
            | ClientMsg::LeaveRoom { room_id, .. }
            | ClientMsg::PlayerReady { room_id, .. }
            | ClientMsg::MakePlay { room_id, .. }
            | ClientMsg::Rematch { room_id, .. } => *room_id,
        }
    }
}

/// One room member as presented on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSnapshot {
    pub user_id: i64,
    pub name: Option<String>,
    pub ready: bool,
}

/// A room as presented on the wire: durable fields plus live readiness and
/// the active match pointer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomSnapshot {
    pub id: i64,
    pub invite_code: String,
    pub game_mode: GameMode,
    pub status: RoomStatus,
    pub match_id: Option<i64>,
    pub players: Vec<PlayerSnapshot>,
}

/// Server-to-client events.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerMsg {
    Connected {
        session_id: Uuid,
    },
    RoomJoined {
        room: RoomSnapshot,
    },
    PlayerJoined {
        player: PlayerSnapshot,
    },
    PlayerLeft {
        user_id: i64,
    },
    RoomUpdated {
        room: RoomSnapshot,
    },
    GameStarted {
        #[serde(rename = "match")]
        game_match: Match,
    },
    /// Announces that a play landed without revealing the choice; the choice
    /// stays hidden until the round resolves.
    PlayMade {
        player_id: i64,
        round_no: i16,
    },
    MatchFinished {
        #[serde(rename = "match")]
        game_match: Match,
        result: RoundResult,
        plays: Vec<Play>,
    },
    RematchStarted {
        room_id: i64,
    },
    GameError {
        message: String,
        code: String,
    },
}

impl ServerMsg {
    /// The error event for a rejected command; sent only to the originating
    /// connection. Infrastructure failures collapse to a generic code.
    pub fn game_error(err: &AppError) -> Self {
        ServerMsg::GameError {
            message: err.detail(),
            code: err.game_code().as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn client_msg_parses_kebab_case_tags() {
        let msg: ClientMsg =
            serde_json::from_str(r#"{"type":"join-room","room_id":7,"user_id":10}"#).unwrap();
        assert_eq!(
            msg,
            ClientMsg::JoinRoom {
                room_id: 7,
                user_id: 10
            }
        );

        let msg: ClientMsg = serde_json::from_str(
            r#"{"type":"make-play","room_id":7,"user_id":10,"choice":"LIZARD"}"#,
        )
        .unwrap();
        assert_eq!(
            msg,
            ClientMsg::MakePlay {
                room_id: 7,
                user_id: 10,
                choice: Choice::Lizard
            }
        );
        assert_eq!(msg.room_id(), 7);
    }

    #[test]
    fn unknown_tags_are_rejected() {
        assert!(serde_json::from_str::<ClientMsg>(r#"{"type":"spectate","room_id":7}"#).is_err());
    }

    #[test]
    fn server_msg_serializes_with_kebab_case_tags() {
        let json = serde_json::to_value(ServerMsg::PlayerLeft { user_id: 10 }).unwrap();
        assert_eq!(json["type"], "player-left");
        assert_eq!(json["user_id"], 10);

        let json = serde_json::to_value(ServerMsg::RematchStarted { room_id: 7 }).unwrap();
        assert_eq!(json["type"], "rematch-started");
    }

    #[test]
    fn game_error_carries_stable_code() {
        let err = AppError::conflict(ErrorCode::RoomFull, "Room 7 is full");
        let json = serde_json::to_value(ServerMsg::game_error(&err)).unwrap();
        assert_eq!(json["type"], "game-error");
        assert_eq!(json["code"], "ROOM_FULL");
        assert_eq!(json["message"], "Room 7 is full");
    }

    #[test]
    fn infra_failures_surface_a_generic_code() {
        let err = AppError::db("connection reset");
        let json = serde_json::to_value(ServerMsg::game_error(&err)).unwrap();
        assert_eq!(json["code"], "INTERNAL");
    }
}
