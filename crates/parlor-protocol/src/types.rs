//! Identifier newtypes and the fixed match vocabulary.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A unique identifier for one live connection.
///
/// Newtype over `u64` so a connection id can't be confused with any other
/// counter. `#[serde(transparent)]` keeps the JSON representation a plain
/// number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(pub u64);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// A room's identifier: either a caller-supplied code (`"ABCDE"`) or a
/// generated one (`"room_x3k2f"`).
///
/// Unlike [`ClientId`] this wraps a `String`, because peer-to-peer rooms
/// are addressed by a code the players exchange out of band.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    /// Wraps a room code.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// One of the two fixed match positions.
///
/// The first entrant of a room always takes `Red`; the second takes
/// `Black`. Wire tokens are the lowercase colour names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seat {
    Red,
    Black,
}

impl Seat {
    /// Parses a wire token. Anything outside `"red"`/`"black"` is rejected.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "red" => Some(Self::Red),
            "black" => Some(Self::Black),
            _ => None,
        }
    }

    /// Returns the wire token for this seat.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Black => "black",
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a room is discovered: LAN lobby listing or a shared p2p code.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Listed in the lobby for anyone on the server to join.
    #[default]
    Lan,

    /// Joined via an explicit room code.
    P2p,
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lan => f.write_str("lan"),
            Self::P2p => f.write_str("p2p"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_id_serializes_as_plain_number() {
        // `#[serde(transparent)]` means ClientId(42) → `42`, not `{"0":42}`.
        let json = serde_json::to_string(&ClientId(42)).unwrap();
        assert_eq!(json, "42");
    }

    #[test]
    fn test_client_id_display() {
        assert_eq!(ClientId(7).to_string(), "conn-7");
    }

    #[test]
    fn test_room_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&RoomId::new("ABCDE")).unwrap();
        assert_eq!(json, "\"ABCDE\"");
    }

    #[test]
    fn test_room_id_round_trip() {
        let id: RoomId = serde_json::from_str("\"room_x3k2f\"").unwrap();
        assert_eq!(id.as_str(), "room_x3k2f");
    }

    #[test]
    fn test_seat_tokens() {
        assert_eq!(Seat::from_token("red"), Some(Seat::Red));
        assert_eq!(Seat::from_token("black"), Some(Seat::Black));
        assert_eq!(Seat::from_token("white"), None);
        assert_eq!(Seat::from_token(""), None);
        assert_eq!(Seat::from_token("RED"), None, "tokens are case-sensitive");
    }

    #[test]
    fn test_seat_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Seat::Red).unwrap(), "\"red\"");
        assert_eq!(serde_json::to_string(&Seat::Black).unwrap(), "\"black\"");
    }

    #[test]
    fn test_game_mode_default_is_lan() {
        assert_eq!(GameMode::default(), GameMode::Lan);
    }

    #[test]
    fn test_game_mode_wire_tokens() {
        assert_eq!(serde_json::to_string(&GameMode::Lan).unwrap(), "\"lan\"");
        assert_eq!(serde_json::to_string(&GameMode::P2p).unwrap(), "\"p2p\"");
        let mode: GameMode = serde_json::from_str("\"p2p\"").unwrap();
        assert_eq!(mode, GameMode::P2p);
    }
}
