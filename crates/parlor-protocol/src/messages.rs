//! The named events that travel on the wire, and the snapshot structs
//! they carry.
//!
//! `#[serde(tag = "type", rename_all = "camelCase")]` produces internally
//! tagged JSON — `{ "type": "createGame", "mode": "p2p", ... }` — which is
//! what the browser client emits and expects. Field names are camelCase
//! for the same reason.

use serde::{Deserialize, Serialize};

use crate::{ClientId, GameMode, RoomId, Seat};

/// An inbound event from a client.
///
/// Optional fields default the way the service defaults them: a missing
/// `username` becomes `"Player"`, a missing `mode` becomes `lan`, a
/// missing `gameType` becomes the server's default game label.
///
/// `winner` stays a raw `String` rather than a [`Seat`]: an out-of-range
/// token must be a no-op at the state machine, not a decode failure that
/// drops the whole message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
    /// Create a room and join it as host.
    #[serde(rename_all = "camelCase")]
    CreateGame {
        game_type: Option<String>,
        mode: Option<GameMode>,
        room_code: Option<String>,
        username: Option<String>,
    },

    /// Join an existing room.
    #[serde(rename_all = "camelCase")]
    JoinGame {
        room_id: RoomId,
        username: Option<String>,
    },

    /// Flip the requester's ready flag.
    #[serde(rename_all = "camelCase")]
    ToggleReady { room_id: RoomId },

    /// Leave the room.
    #[serde(rename_all = "camelCase")]
    LeaveRoom { room_id: RoomId },

    /// Reset the room to its pre-match state, keeping membership.
    #[serde(rename_all = "camelCase")]
    RequestRematch { room_id: RoomId },

    /// Record the match outcome. The winner token is client-reported.
    #[serde(rename_all = "camelCase")]
    ReportWinner { room_id: RoomId, winner: String },
}

/// An outbound event from the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    /// The full list of live rooms. Pushed to every connection whenever
    /// membership changes anywhere.
    AvailableGames { rooms: Vec<RoomSnapshot> },

    /// Acknowledgement to the connection that just joined a room.
    RoomJoined { room: RoomSnapshot },

    /// The room's current membership and readiness, to its members.
    MatchLobbyUpdate { room: RoomSnapshot },

    /// The room's current match progress, to its members.
    GameStateUpdate { state: GameSnapshot },

    /// A human-readable failure, to the connection whose request failed.
    Error { message: String },
}

/// A read-only view of one room, suitable for lobby display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSnapshot {
    pub room_id: RoomId,
    /// `None` only while the room is being torn down.
    pub host_id: Option<ClientId>,
    pub mode: GameMode,
    pub game_type: String,
    pub max_players: usize,
    /// Seat occupants in join order — the first entry is the red seat.
    pub players: Vec<SeatSnapshot>,
}

/// One seat occupant in a [`RoomSnapshot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatSnapshot {
    pub player_id: ClientId,
    pub name: String,
    pub is_ready: bool,
}

/// A read-only view of a room's match progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    /// Connection holding the red seat, once the match has started.
    pub red: Option<ClientId>,
    /// Connection holding the black seat, once the match has started.
    pub black: Option<ClientId>,
    pub turn: Option<Seat>,
    pub turn_name: Option<String>,
    pub game_over: bool,
    pub winner: Option<Seat>,
    /// Display name of the winner, resolved at snapshot time.
    pub winner_name: Option<String>,
}

#[cfg(test)]
mod tests {
    //! The browser client parses these messages by their `type` tag and
    //! camelCase fields. These tests pin the exact JSON shapes, because a
    //! mismatch means the client silently ignores the event.

    use super::*;

    #[test]
    fn test_create_game_deserializes_from_client_json() {
        let json = r#"{
            "type": "createGame",
            "gameType": "Checkers",
            "mode": "p2p",
            "roomCode": "ABCDE",
            "username": "alice"
        }"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        assert_eq!(
            msg,
            ClientMessage::CreateGame {
                game_type: Some("Checkers".into()),
                mode: Some(GameMode::P2p),
                room_code: Some("ABCDE".into()),
                username: Some("alice".into()),
            }
        );
    }

    #[test]
    fn test_create_game_all_fields_optional() {
        // A bare create request is valid; the server fills in defaults.
        let msg: ClientMessage =
            serde_json::from_str(r#"{"type": "createGame"}"#).unwrap();
        assert_eq!(
            msg,
            ClientMessage::CreateGame {
                game_type: None,
                mode: None,
                room_code: None,
                username: None,
            }
        );
    }

    #[test]
    fn test_join_game_json_format() {
        let json = r#"{"type": "joinGame", "roomId": "ABCDE"}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        assert_eq!(
            msg,
            ClientMessage::JoinGame {
                room_id: RoomId::new("ABCDE"),
                username: None,
            }
        );
    }

    #[test]
    fn test_report_winner_keeps_raw_token() {
        // An out-of-range winner token must still decode — rejecting it is
        // the state machine's job, not the parser's.
        let json =
            r#"{"type": "reportWinner", "roomId": "r1", "winner": "purple"}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        assert_eq!(
            msg,
            ClientMessage::ReportWinner {
                room_id: RoomId::new("r1"),
                winner: "purple".into(),
            }
        );
    }

    #[test]
    fn test_unknown_event_type_returns_error() {
        let json = r#"{"type": "castFireball", "roomId": "r1"}"#;
        let result: Result<ClientMessage, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_error_message_json_format() {
        let msg = ServerMessage::Error {
            message: "Room is full or does not exist.".into(),
        };
        let json: serde_json::Value = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "error");
        assert_eq!(json["message"], "Room is full or does not exist.");
    }

    #[test]
    fn test_room_snapshot_json_format() {
        let msg = ServerMessage::MatchLobbyUpdate {
            room: RoomSnapshot {
                room_id: RoomId::new("ABCDE"),
                host_id: Some(ClientId(1)),
                mode: GameMode::P2p,
                game_type: "Checkers".into(),
                max_players: 2,
                players: vec![SeatSnapshot {
                    player_id: ClientId(1),
                    name: "alice".into(),
                    is_ready: false,
                }],
            },
        };
        let json: serde_json::Value = serde_json::to_value(&msg).unwrap();

        assert_eq!(json["type"], "matchLobbyUpdate");
        assert_eq!(json["room"]["roomId"], "ABCDE");
        assert_eq!(json["room"]["hostId"], 1);
        assert_eq!(json["room"]["maxPlayers"], 2);
        assert_eq!(json["room"]["players"][0]["playerId"], 1);
        assert_eq!(json["room"]["players"][0]["isReady"], false);
    }

    #[test]
    fn test_game_snapshot_json_format() {
        let msg = ServerMessage::GameStateUpdate {
            state: GameSnapshot {
                red: Some(ClientId(1)),
                black: Some(ClientId(2)),
                turn: Some(Seat::Red),
                turn_name: Some("alice".into()),
                game_over: false,
                winner: None,
                winner_name: None,
            },
        };
        let json: serde_json::Value = serde_json::to_value(&msg).unwrap();

        assert_eq!(json["type"], "gameStateUpdate");
        assert_eq!(json["state"]["turn"], "red");
        assert_eq!(json["state"]["turnName"], "alice");
        assert_eq!(json["state"]["gameOver"], false);
        assert!(json["state"]["winner"].is_null());
    }

    #[test]
    fn test_available_games_round_trip() {
        let msg = ServerMessage::AvailableGames {
            rooms: vec![RoomSnapshot {
                room_id: RoomId::new("room_a1b2c"),
                host_id: Some(ClientId(3)),
                mode: GameMode::Lan,
                game_type: "Checkers".into(),
                max_players: 2,
                players: vec![],
            }],
        };
        let bytes = serde_json::to_vec(&msg).unwrap();
        let decoded: ServerMessage = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(msg, decoded);
    }
}
