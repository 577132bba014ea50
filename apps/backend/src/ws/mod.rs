//! Realtime layer: wire protocol, connection hub and the session actor.

pub mod hub;
pub mod protocol;
pub mod session;
