//! Pure game logic: no IO, no connection state.

pub mod rounds;
pub mod rules;
