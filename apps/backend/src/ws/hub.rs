//! Connection hub: registry of live connections, their identity bindings and
//! room subscriptions, plus event fan-out.
//!
//! The hub carries no game logic. Delivery goes through each session actor's
//! mailbox, so events emitted in sequence for one room arrive at every
//! subscriber in that same sequence.

use std::collections::HashSet;

use actix::prelude::{Message, Recipient};
use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

use crate::ws::protocol::ServerMsg;

/// Envelope delivered to session actors.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct RoomEvent(pub ServerMsg);

struct ConnEntry {
    recipient: Recipient<RoomEvent>,
    user_id: Option<i64>,
    room_id: Option<i64>,
}

/// Registry and broadcaster for live websocket connections.
#[derive(Default)]
pub struct GameHub {
    conns: DashMap<Uuid, ConnEntry>,
    rooms: DashMap<i64, HashSet<Uuid>>,
}

impl GameHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, conn_id: Uuid, recipient: Recipient<RoomEvent>) {
        self.conns.insert(
            conn_id,
            ConnEntry {
                recipient,
                user_id: None,
                room_id: None,
            },
        );
        debug!(conn_id = %conn_id, "connection registered");
    }

    /// Remove a connection and any room subscription it holds. Unconditional:
    /// called on every disconnect regardless of cleanup outcome elsewhere.
    pub fn unregister(&self, conn_id: Uuid) {
        if let Some((_, entry)) = self.conns.remove(&conn_id) {
            if let Some(room_id) = entry.room_id {
                if let Some(mut members) = self.rooms.get_mut(&room_id) {
                    members.remove(&conn_id);
                }
            }
        }
        debug!(conn_id = %conn_id, "connection unregistered");
    }

    /// Bind a connection to a user identity and room.
    pub fn bind(&self, conn_id: Uuid, user_id: i64, room_id: i64) {
        if let Some(mut entry) = self.conns.get_mut(&conn_id) {
            entry.user_id = Some(user_id);
            entry.room_id = Some(room_id);
        }
    }

    /// The identity and room a connection is bound to, if any.
    pub fn lookup(&self, conn_id: Uuid) -> Option<(i64, Option<i64>)> {
        let entry = self.conns.get(&conn_id)?;
        entry.user_id.map(|user_id| (user_id, entry.room_id))
    }

    pub fn subscribe(&self, conn_id: Uuid, room_id: i64) {
        self.rooms.entry(room_id).or_default().insert(conn_id);
    }

    /// Drop every connection of a user from a room's channel and clear the
    /// room half of their bindings.
    pub fn unsubscribe_user(&self, room_id: i64, user_id: i64) {
        let conn_ids: Vec<Uuid> = self
            .conns
            .iter()
            .filter(|entry| entry.user_id == Some(user_id) && entry.room_id == Some(room_id))
            .map(|entry| *entry.key())
            .collect();

        for conn_id in conn_ids {
            if let Some(mut members) = self.rooms.get_mut(&room_id) {
                members.remove(&conn_id);
            }
            if let Some(mut entry) = self.conns.get_mut(&conn_id) {
                entry.room_id = None;
            }
        }
    }

    pub fn emit_to_conn(&self, conn_id: Uuid, msg: ServerMsg) {
        if let Some(entry) = self.conns.get(&conn_id) {
            entry.recipient.do_send(RoomEvent(msg));
        }
    }

    pub fn emit_to_room(&self, room_id: i64, msg: ServerMsg) {
        for conn_id in self.room_members(room_id) {
            self.emit_to_conn(conn_id, msg.clone());
        }
    }

    /// Room broadcast scoped to "others": the excluded connection is usually
    /// the one whose command triggered the event.
    pub fn emit_to_room_excl(&self, room_id: i64, msg: ServerMsg, excl: Uuid) {
        for conn_id in self.room_members(room_id) {
            if conn_id != excl {
                self.emit_to_conn(conn_id, msg.clone());
            }
        }
    }

    // Collect before sending so no map guard is held across do_send.
    fn room_members(&self, room_id: i64) -> Vec<Uuid> {
        self.rooms
            .get(&room_id)
            .map(|members| members.iter().copied().collect())
            .unwrap_or_default()
    }
}
