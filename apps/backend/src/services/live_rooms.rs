//! In-memory registry of live rooms: membership mirror, readiness flags and
//! the per-room serialization locks.
//!
//! Readiness and the active-match pointer exist only here; the durable rows
//! never carry them. All mutation happens under the room's lock, held by the
//! dispatcher for the whole of one logical operation, so the accessors below
//! never observe a half-applied transition.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

/// A player as seen by the live registry.
#[derive(Debug, Clone, PartialEq)]
pub struct LivePlayer {
    pub user_id: i64,
    pub name: Option<String>,
    pub ready: bool,
}

/// Live state of one room.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LiveRoom {
    pub match_id: Option<i64>,
    pub players: Vec<LivePlayer>,
}

/// Registry of live rooms plus the room-keyed locks that serialize state
/// transitions.
#[derive(Default)]
pub struct LiveRooms {
    rooms: DashMap<i64, LiveRoom>,
    locks: DashMap<i64, Arc<Mutex<()>>>,
}

impl LiveRooms {
    pub fn new() -> Self {
        Self::default()
    }

    /// The serialization lock for a room. At most one state transition per
    /// room is in flight while a caller holds the guard.
    pub fn lock(&self, room_id: i64) -> Arc<Mutex<()>> {
        self.locks
            .entry(room_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Add a player to the room's live state. Re-adding an existing member
    /// refreshes the name but keeps the readiness flag.
    pub fn upsert_player(&self, room_id: i64, user_id: i64, name: Option<String>) {
        let mut room = self.rooms.entry(room_id).or_default();
        match room.players.iter_mut().find(|p| p.user_id == user_id) {
            Some(player) => player.name = name,
            None => room.players.push(LivePlayer {
                user_id,
                name,
                ready: false,
            }),
        }
    }

    /// Remove a player; returns how many players remain.
    pub fn remove_player(&self, room_id: i64, user_id: i64) -> usize {
        match self.rooms.get_mut(&room_id) {
            Some(mut room) => {
                room.players.retain(|p| p.user_id != user_id);
                room.players.len()
            }
            None => 0,
        }
    }

    pub fn set_ready(&self, room_id: i64, user_id: i64) {
        if let Some(mut room) = self.rooms.get_mut(&room_id) {
            if let Some(player) = room.players.iter_mut().find(|p| p.user_id == user_id) {
                player.ready = true;
            }
        }
    }

    /// True when the room holds exactly two players and both are ready.
    pub fn all_ready(&self, room_id: i64) -> bool {
        self.rooms
            .get(&room_id)
            .map(|room| room.players.len() == 2 && room.players.iter().all(|p| p.ready))
            .unwrap_or(false)
    }

    pub fn clear_ready(&self, room_id: i64) {
        if let Some(mut room) = self.rooms.get_mut(&room_id) {
            for player in room.players.iter_mut() {
                player.ready = false;
            }
        }
    }

    pub fn begin_match(&self, room_id: i64, match_id: i64) {
        if let Some(mut room) = self.rooms.get_mut(&room_id) {
            room.match_id = Some(match_id);
        }
    }

    pub fn end_match(&self, room_id: i64) {
        if let Some(mut room) = self.rooms.get_mut(&room_id) {
            room.match_id = None;
        }
    }

    pub fn active_match(&self, room_id: i64) -> Option<i64> {
        self.rooms.get(&room_id).and_then(|room| room.match_id)
    }

    /// Drop the room's live state and its lock. Called when the last player
    /// leaves; the durable row is already FINISHED by then.
    pub fn retire(&self, room_id: i64) {
        self.rooms.remove(&room_id);
        self.locks.remove(&room_id);
    }

    pub fn snapshot(&self, room_id: i64) -> Option<LiveRoom> {
        self.rooms.get(&room_id).map(|room| room.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_is_idempotent_and_preserves_readiness() {
        let live = LiveRooms::new();
        live.upsert_player(1, 10, Some("Ana".into()));
        live.set_ready(1, 10);
        live.upsert_player(1, 10, Some("Ana B.".into()));

        let room = live.snapshot(1).unwrap();
        assert_eq!(room.players.len(), 1);
        assert!(room.players[0].ready);
        assert_eq!(room.players[0].name.as_deref(), Some("Ana B."));
    }

    #[test]
    fn all_ready_requires_two_ready_players() {
        let live = LiveRooms::new();
        live.upsert_player(1, 10, None);
        live.set_ready(1, 10);
        assert!(!live.all_ready(1));

        live.upsert_player(1, 20, None);
        assert!(!live.all_ready(1));

        live.set_ready(1, 20);
        assert!(live.all_ready(1));

        live.clear_ready(1);
        assert!(!live.all_ready(1));
    }

    #[test]
    fn remove_player_reports_remaining_count() {
        let live = LiveRooms::new();
        live.upsert_player(1, 10, None);
        live.upsert_player(1, 20, None);
        assert_eq!(live.remove_player(1, 10), 1);
        assert_eq!(live.remove_player(1, 20), 0);
        assert_eq!(live.remove_player(99, 10), 0);
    }

    #[test]
    fn retire_drops_live_state() {
        let live = LiveRooms::new();
        live.upsert_player(1, 10, None);
        live.begin_match(1, 7);
        assert_eq!(live.active_match(1), Some(7));

        live.retire(1);
        assert!(live.snapshot(1).is_none());
        assert_eq!(live.active_match(1), None);
    }

    #[test]
    fn match_pointer_follows_begin_and_end() {
        let live = LiveRooms::new();
        live.upsert_player(1, 10, None);
        assert_eq!(live.active_match(1), None);
        live.begin_match(1, 42);
        assert_eq!(live.active_match(1), Some(42));
        live.end_match(1);
        assert_eq!(live.active_match(1), None);
    }

    #[test]
    fn starting_a_match_closes_the_readiness_gate() {
        let live = LiveRooms::new();
        live.upsert_player(1, 10, None);
        live.upsert_player(1, 20, None);
        live.set_ready(1, 10);
        live.set_ready(1, 20);
        assert!(live.all_ready(1));

        // The dispatcher's start sequence: record the match, clear the flags.
        live.begin_match(1, 77);
        live.clear_ready(1);

        assert_eq!(live.active_match(1), Some(77));
        assert!(
            !live.all_ready(1),
            "start gate must be closed while a match is running"
        );

        // A stray ready from one player must not re-open the gate alone.
        live.set_ready(1, 10);
        assert!(!live.all_ready(1));
    }

    #[test]
    fn locks_are_shared_per_room_and_dropped_on_retire() {
        let live = LiveRooms::new();
        let first = live.lock(1);
        let second = live.lock(1);
        assert!(Arc::ptr_eq(&first, &second));
        assert!(!Arc::ptr_eq(&first, &live.lock(2)));

        live.retire(1);
        let fresh = live.lock(1);
        assert!(!Arc::ptr_eq(&first, &fresh));
    }
}
