//! Command dispatcher for the realtime game surface.
//!
//! Every inbound command is processed under its room's lock: validate, write
//! the durable store, mutate live state, broadcast. Live state is never
//! advanced past what was durably committed, so a failed write leaves the
//! in-memory view untouched. A rejected command produces a `game-error` for
//! the originating connection only; other rooms and connections are
//! unaffected.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tracing::{info, warn};
use uuid::Uuid;

use crate::entities::plays::Choice;
use crate::entities::rooms::RoomStatus;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::rooms as rooms_repo;
use crate::repos::rooms::Room;
use crate::repos::users as users_repo;
use crate::services::live_rooms::LiveRooms;
use crate::services::matches as matches_service;
use crate::services::matches::RoundCheck;
use crate::services::rooms as rooms_service;
use crate::services::rooms::JoinKind;
use crate::ws::hub::GameHub;
use crate::ws::protocol::{ClientMsg, PlayerSnapshot, RoomSnapshot, ServerMsg};

pub struct GameFlow {
    db: DatabaseConnection,
    hub: Arc<GameHub>,
    live: Arc<LiveRooms>,
}

impl GameFlow {
    pub fn new(db: DatabaseConnection, hub: Arc<GameHub>, live: Arc<LiveRooms>) -> Self {
        Self { db, hub, live }
    }

    /// Single entry point for inbound commands. Serializes on the room lock
    /// for the whole operation; on failure, only the originating connection
    /// hears about it.
    pub async fn dispatch(&self, conn_id: Uuid, msg: ClientMsg) {
        let room_id = msg.room_id();

        // Existence check before taking the room lock: commands naming bogus
        // room ids must not allocate lock-map entries. Handlers re-fetch the
        // room under the lock before acting on it.
        match rooms_repo::find_by_id(&self.db, room_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                let err = AppError::not_found(
                    ErrorCode::RoomNotFound,
                    format!("Room {room_id} not found"),
                );
                self.hub.emit_to_conn(conn_id, ServerMsg::game_error(&err));
                return;
            }
            Err(err) => {
                let err = AppError::from(err);
                warn!(conn_id = %conn_id, room_id, error = %err, "room lookup failed");
                self.hub.emit_to_conn(conn_id, ServerMsg::game_error(&err));
                return;
            }
        }

        let lock = self.live.lock(room_id);
        let _guard = lock.lock().await;

        let outcome = match msg {
            ClientMsg::JoinRoom { room_id, user_id } => {
                self.join(conn_id, room_id, user_id).await
            }
            ClientMsg::LeaveRoom { room_id, user_id } => self.leave(room_id, user_id).await,
            ClientMsg::PlayerReady { room_id, user_id } => self.ready(room_id, user_id).await,
            ClientMsg::MakePlay {
                room_id,
                user_id,
                choice,
            } => self.play(room_id, user_id, choice).await,
            ClientMsg::Rematch { room_id, user_id } => self.rematch(room_id, user_id).await,
        };

        if let Err(err) = outcome {
            warn!(conn_id = %conn_id, room_id, error = %err, "command rejected");
            self.hub.emit_to_conn(conn_id, ServerMsg::game_error(&err));
        }
    }

    /// Disconnect cleanup. The connection's registry entry is removed
    /// unconditionally; if the connection was bound to a room, a leave is
    /// synthesized and queued like any other command on that room's lock.
    pub async fn disconnect(&self, conn_id: Uuid) {
        let binding = self.hub.lookup(conn_id);
        self.hub.unregister(conn_id);

        let Some((user_id, room_id)) = binding else {
            return;
        };

        if let Some(room_id) = room_id {
            self.dispatch(conn_id, ClientMsg::LeaveRoom { room_id, user_id })
                .await;
        }

        if let Err(err) = users_repo::update_connection(&self.db, user_id, None).await {
            warn!(conn_id = %conn_id, user_id, error = %err, "failed to clear connection handle");
        }
    }

    async fn join(&self, conn_id: Uuid, room_id: i64, user_id: i64) -> Result<(), AppError> {
        let room = rooms_repo::require_room(&self.db, room_id).await?;
        let kind = rooms_service::validate_join(&room, user_id)?;
        let user = users_repo::require_user(&self.db, user_id).await?;

        let room = match kind {
            JoinKind::NewMember => {
                let mut player_ids = room.player_ids.clone();
                player_ids.push(user_id);
                let status = rooms_service::status_for_player_count(player_ids.len());
                rooms_repo::update_players(&self.db, room_id, player_ids, status).await?
            }
            JoinKind::Rejoin => room,
        };

        users_repo::update_connection(&self.db, user_id, Some(conn_id.to_string())).await?;

        self.live.upsert_player(room_id, user_id, user.name.clone());
        self.hub.bind(conn_id, user_id, room_id);
        self.hub.subscribe(conn_id, room_id);

        let snapshot = self.room_snapshot(&room);
        self.hub.emit_to_conn(
            conn_id,
            ServerMsg::RoomJoined {
                room: snapshot.clone(),
            },
        );

        if kind == JoinKind::NewMember {
            let player = PlayerSnapshot {
                user_id,
                name: user.name,
                ready: false,
            };
            self.hub
                .emit_to_room_excl(room_id, ServerMsg::PlayerJoined { player }, conn_id);
            self.hub
                .emit_to_room_excl(room_id, ServerMsg::RoomUpdated { room: snapshot }, conn_id);
        }

        info!(room_id, user_id, ?kind, "player joined room");
        Ok(())
    }

    async fn leave(&self, room_id: i64, user_id: i64) -> Result<(), AppError> {
        let room = rooms_repo::require_room(&self.db, room_id).await?;
        if !room.player_ids.contains(&user_id) {
            return Ok(());
        }

        let remaining: Vec<i64> = room
            .player_ids
            .iter()
            .copied()
            .filter(|&id| id != user_id)
            .collect();

        if remaining.is_empty() {
            // Retire the room: durable FINISHED first, then the live state
            // and its lock go away. No one is left to notify.
            rooms_repo::update_players(&self.db, room_id, remaining, RoomStatus::Finished).await?;
            self.hub.unsubscribe_user(room_id, user_id);
            self.live.retire(room_id);
            info!(room_id, user_id, "last player left, room retired");
            return Ok(());
        }

        // An in-progress match is abandoned, not finished: the remaining
        // player gets no match-finished, the room reverts to WAITING and
        // readiness is cleared.
        let room = rooms_repo::update_players(&self.db, room_id, remaining, RoomStatus::Waiting)
            .await?;
        self.live.remove_player(room_id, user_id);
        self.live.clear_ready(room_id);
        self.live.end_match(room_id);
        self.hub.unsubscribe_user(room_id, user_id);

        let snapshot = self.room_snapshot(&room);
        self.hub.emit_to_room(room_id, ServerMsg::PlayerLeft { user_id });
        self.hub
            .emit_to_room(room_id, ServerMsg::RoomUpdated { room: snapshot });

        info!(room_id, user_id, "player left room");
        Ok(())
    }

    async fn ready(&self, room_id: i64, user_id: i64) -> Result<(), AppError> {
        // A stray ready while a match is running must not re-open the start
        // gate: exactly one match may be active per room.
        if self.live.active_match(room_id).is_some() {
            return Err(AppError::conflict(
                ErrorCode::GameInProgress,
                format!("Room {room_id} already has a match in progress"),
            ));
        }

        let room = rooms_repo::require_room(&self.db, room_id).await?;
        if !room.player_ids.contains(&user_id) {
            return Err(AppError::invalid(
                ErrorCode::ValidationError,
                format!("User {user_id} is not a member of room {room_id}"),
            ));
        }

        self.live.set_ready(room_id, user_id);

        let room = if room.player_ids.len() == 2 && self.live.all_ready(room_id) {
            let game_match = matches_service::start_match(&self.db, &room).await?;
            let room = rooms_repo::update_status(&self.db, room_id, RoomStatus::Playing).await?;
            self.live.begin_match(room_id, game_match.id);
            self.live.clear_ready(room_id);
            info!(room_id, match_id = game_match.id, "match started");
            self.hub
                .emit_to_room(room_id, ServerMsg::GameStarted { game_match });
            room
        } else {
            room
        };

        let snapshot = self.room_snapshot(&room);
        self.hub
            .emit_to_room(room_id, ServerMsg::RoomUpdated { room: snapshot });
        Ok(())
    }

    async fn play(&self, room_id: i64, user_id: i64, choice: Choice) -> Result<(), AppError> {
        let match_id = self.live.active_match(room_id).ok_or_else(|| {
            AppError::invalid_state(
                ErrorCode::NoActiveMatch,
                format!("Room {room_id} has no active match"),
            )
        })?;

        let play = matches_service::submit_play(&self.db, match_id, user_id, choice).await?;
        self.hub.emit_to_room(
            room_id,
            ServerMsg::PlayMade {
                player_id: user_id,
                round_no: play.round_no,
            },
        );

        match matches_service::check_round_complete(&self.db, match_id).await? {
            RoundCheck::Incomplete => Ok(()),
            RoundCheck::Complete {
                game_match,
                result,
                plays,
            } => {
                // The room is immediately available for a rematch or fresh
                // readiness handshake.
                rooms_repo::update_status(&self.db, room_id, RoomStatus::Waiting).await?;
                self.live.end_match(room_id);
                self.live.clear_ready(room_id);
                info!(room_id, match_id, is_draw = result.is_draw, "match finished");
                self.hub.emit_to_room(
                    room_id,
                    ServerMsg::MatchFinished {
                        game_match,
                        result,
                        plays,
                    },
                );
                Ok(())
            }
        }
    }

    async fn rematch(&self, room_id: i64, user_id: i64) -> Result<(), AppError> {
        let room = rooms_repo::require_room(&self.db, room_id).await?;
        if !room.player_ids.contains(&user_id) {
            return Err(AppError::invalid(
                ErrorCode::ValidationError,
                format!("User {user_id} is not a member of room {room_id}"),
            ));
        }
        if self.live.active_match(room_id).is_some() {
            return Err(AppError::conflict(
                ErrorCode::GameInProgress,
                format!("Room {room_id} already has a match in progress"),
            ));
        }

        // No readiness handshake on rematch; both flags reset as part of the
        // new match starting.
        let game_match = matches_service::start_match(&self.db, &room).await?;
        let room = rooms_repo::update_status(&self.db, room_id, RoomStatus::Playing).await?;
        self.live.clear_ready(room_id);
        self.live.begin_match(room_id, game_match.id);

        info!(room_id, match_id = game_match.id, "rematch started");
        self.hub
            .emit_to_room(room_id, ServerMsg::RematchStarted { room_id });
        self.hub
            .emit_to_room(room_id, ServerMsg::GameStarted { game_match });
        let snapshot = self.room_snapshot(&room);
        self.hub
            .emit_to_room(room_id, ServerMsg::RoomUpdated { room: snapshot });
        Ok(())
    }

    /// Merge the durable room row with live readiness and the active match.
    fn room_snapshot(&self, room: &Room) -> RoomSnapshot {
        let live = self.live.snapshot(room.id).unwrap_or_default();
        let players = room
            .player_ids
            .iter()
            .map(|&user_id| {
                let live_player = live.players.iter().find(|p| p.user_id == user_id);
                PlayerSnapshot {
                    user_id,
                    name: live_player.and_then(|p| p.name.clone()),
                    ready: live_player.map(|p| p.ready).unwrap_or(false),
                }
            })
            .collect();

        RoomSnapshot {
            id: room.id,
            invite_code: room.invite_code.clone(),
            game_mode: room.game_mode,
            status: room.status,
            match_id: live.match_id,
            players,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flow_with_live(live: Arc<LiveRooms>) -> GameFlow {
        GameFlow::new(
            DatabaseConnection::default(),
            Arc::new(GameHub::new()),
            live,
        )
    }

    #[tokio::test]
    async fn ready_is_rejected_while_a_match_is_running() {
        let live = Arc::new(LiveRooms::new());
        live.upsert_player(1, 10, None);
        live.upsert_player(1, 20, None);
        live.begin_match(1, 77);

        let flow = flow_with_live(live.clone());
        let err = flow.ready(1, 10).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::GameInProgress);

        // The running match is untouched.
        assert_eq!(live.active_match(1), Some(77));
    }
}
