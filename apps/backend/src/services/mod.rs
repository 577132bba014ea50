//! Service layer: room coordination, match engine, live registries and the
//! realtime command dispatcher.

pub mod game_flow;
pub mod live_rooms;
pub mod matches;
pub mod rooms;
pub mod users;
