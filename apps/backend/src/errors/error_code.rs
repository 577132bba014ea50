//! Error codes for the Jokenpo backend.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses and `game-error` events.

use core::fmt;

/// Centralized error codes for the Jokenpo backend.
///
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string that is part
/// of the client contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// Choice is not allowed for the match's game mode
    InvalidChoice,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    /// Room not found
    RoomNotFound,
    /// Match not found
    MatchNotFound,
    /// User not found
    UserNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// Room already holds two players
    RoomFull,
    /// Room has a match in progress
    GameInProgress,
    /// Player already made a play for this round
    DuplicatePlay,
    /// Invite code already exists
    InviteCodeConflict,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // Invalid State
    /// Room is not in a state that allows the action
    InvalidRoomState,
    /// No active match for this room
    NoActiveMatch,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Database timeout
    DbTimeout,

    // Database Constraint Violations
    /// Unique constraint violation (SQLSTATE 23505; generic 409)
    UniqueViolation,
    /// Foreign key constraint violation (SQLSTATE 23503; generic 409)
    FkViolation,
    /// Check constraint violation (SQLSTATE 23514; generic 400)
    CheckViolation,
    /// Record not found (generic 404 for DB-driven not-found)
    RecordNotFound,

    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
    /// Data corruption detected
    DataCorruption,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            // Request Validation
            Self::InvalidChoice => "INVALID_CHOICE",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            // Resource Not Found
            Self::RoomNotFound => "ROOM_NOT_FOUND",
            Self::MatchNotFound => "MATCH_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            // Business Logic Conflicts
            Self::RoomFull => "ROOM_FULL",
            Self::GameInProgress => "GAME_IN_PROGRESS",
            Self::DuplicatePlay => "DUPLICATE_PLAY",
            Self::InviteCodeConflict => "INVITE_CODE_CONFLICT",
            Self::Conflict => "CONFLICT",

            // Invalid State
            Self::InvalidRoomState => "INVALID_ROOM_STATE",
            Self::NoActiveMatch => "NO_ACTIVE_MATCH",

            // System Errors
            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",

            // Database Constraint Violations
            Self::UniqueViolation => "UNIQUE_VIOLATION",
            Self::FkViolation => "FK_VIOLATION",
            Self::CheckViolation => "CHECK_VIOLATION",
            Self::RecordNotFound => "RECORD_NOT_FOUND",

            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_strings() {
        // The wire contract: these exact strings reach clients.
        assert_eq!(ErrorCode::RoomFull.as_str(), "ROOM_FULL");
        assert_eq!(ErrorCode::RoomNotFound.as_str(), "ROOM_NOT_FOUND");
        assert_eq!(ErrorCode::MatchNotFound.as_str(), "MATCH_NOT_FOUND");
        assert_eq!(ErrorCode::UserNotFound.as_str(), "USER_NOT_FOUND");
        assert_eq!(ErrorCode::NoActiveMatch.as_str(), "NO_ACTIVE_MATCH");
        assert_eq!(ErrorCode::DuplicatePlay.as_str(), "DUPLICATE_PLAY");
        assert_eq!(ErrorCode::InvalidChoice.as_str(), "INVALID_CHOICE");
        assert_eq!(ErrorCode::InvalidRoomState.as_str(), "INVALID_ROOM_STATE");
        assert_eq!(ErrorCode::GameInProgress.as_str(), "GAME_IN_PROGRESS");
        assert_eq!(
            ErrorCode::InviteCodeConflict.as_str(),
            "INVITE_CODE_CONFLICT"
        );
        assert_eq!(ErrorCode::UniqueViolation.as_str(), "UNIQUE_VIOLATION");
        assert_eq!(ErrorCode::FkViolation.as_str(), "FK_VIOLATION");
        assert_eq!(ErrorCode::CheckViolation.as_str(), "CHECK_VIOLATION");
        assert_eq!(ErrorCode::RecordNotFound.as_str(), "RECORD_NOT_FOUND");
        assert_eq!(ErrorCode::DbError.as_str(), "DB_ERROR");
        assert_eq!(ErrorCode::DbUnavailable.as_str(), "DB_UNAVAILABLE");
        assert_eq!(ErrorCode::Internal.as_str(), "INTERNAL");
        assert_eq!(ErrorCode::ConfigError.as_str(), "CONFIG_ERROR");
    }

    #[test]
    fn test_display_trait() {
        assert_eq!(format!("{}", ErrorCode::RoomFull), "ROOM_FULL");
        assert_eq!(format!("{}", ErrorCode::NoActiveMatch), "NO_ACTIVE_MATCH");
        assert_eq!(format!("{}", ErrorCode::DuplicatePlay), "DUPLICATE_PLAY");
    }
}
