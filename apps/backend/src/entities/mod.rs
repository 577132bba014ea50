pub mod matches;
pub mod plays;
pub mod results;
pub mod rooms;
pub mod users;
