//! The room registry: creates, tracks, and deletes rooms, and allocates
//! collision-safe room codes.

use std::collections::HashMap;

use parlor_protocol::{GameMode, RoomId, RoomSnapshot};
use rand::Rng;

use crate::room::DEFAULT_GAME_TYPE;
use crate::{Room, RoomError};

/// Alphabet for generated room codes, matching the base-36 lowercase
/// codes clients are used to typing.
const CODE_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Length of the random part of a generated code.
const CODE_LEN: usize = 5;

/// The collection of live rooms, keyed by room id.
///
/// Like the player registry, this is a plain map owned by the session
/// coordinator task; no interior locking.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: HashMap<RoomId, Room>,
}

impl RoomRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a room and returns its id. Membership starts empty; the
    /// caller joins the creator next, which also assigns the host.
    ///
    /// A non-empty requested code is honoured verbatim for peer-to-peer
    /// rooms. Generated ids are retried until they don't collide with a
    /// live room.
    ///
    /// # Errors
    /// [`RoomError::CodeTaken`] when a requested code already names a
    /// live room — the caller picked that code, so we refuse rather than
    /// silently handing them a different room.
    pub fn create(
        &mut self,
        game_type: Option<String>,
        mode: Option<GameMode>,
        requested: Option<&str>,
    ) -> Result<RoomId, RoomError> {
        let mode = mode.unwrap_or_default();
        let game_type = game_type
            .filter(|label| !label.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_GAME_TYPE.to_string());

        let requested = requested.map(str::trim).filter(|code| !code.is_empty());
        let id = match requested {
            Some(code) if mode == GameMode::P2p => {
                let id = RoomId::new(code);
                if self.rooms.contains_key(&id) {
                    return Err(RoomError::CodeTaken(id));
                }
                id
            }
            _ => self.generate_code(),
        };

        tracing::info!(room_id = %id, %mode, game_type, "room created");
        self.rooms
            .insert(id.clone(), Room::new(id.clone(), game_type, mode));
        Ok(id)
    }

    /// Generates a room id that no live room is using.
    fn generate_code(&self) -> RoomId {
        let mut rng = rand::rng();
        loop {
            let suffix: String = (0..CODE_LEN)
                .map(|_| {
                    CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())]
                        as char
                })
                .collect();
            let id = RoomId::new(format!("room_{suffix}"));
            if !self.rooms.contains_key(&id) {
                return id;
            }
        }
    }

    /// Looks up a room.
    pub fn get(&self, id: &RoomId) -> Option<&Room> {
        self.rooms.get(id)
    }

    /// Looks up a room mutably.
    pub fn get_mut(&mut self, id: &RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(id)
    }

    /// Returns `true` if a room with this id is live.
    pub fn contains(&self, id: &RoomId) -> bool {
        self.rooms.contains_key(id)
    }

    /// Deletes a room. Called as soon as its membership reaches zero.
    pub fn remove(&mut self, id: &RoomId) -> Option<Room> {
        let room = self.rooms.remove(id);
        if room.is_some() {
            tracing::info!(room_id = %id, "room deleted");
        }
        room
    }

    /// Produces read-only snapshots of every live room, for the lobby.
    pub fn snapshots(&self) -> Vec<RoomSnapshot> {
        self.rooms.values().map(Room::snapshot).collect()
    }

    /// Returns the number of live rooms.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Returns `true` if no rooms are live.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_defaults_mode_and_game_type() {
        let mut reg = RoomRegistry::new();

        let id = reg.create(None, None, None).unwrap();

        let snap = reg.get(&id).unwrap().snapshot();
        assert_eq!(snap.mode, GameMode::Lan);
        assert_eq!(snap.game_type, DEFAULT_GAME_TYPE);
        assert!(snap.players.is_empty());
        assert!(snap.host_id.is_none());
    }

    #[test]
    fn test_create_generated_code_has_expected_shape() {
        let mut reg = RoomRegistry::new();

        let id = reg.create(None, None, None).unwrap();

        let code = id.as_str();
        assert!(code.starts_with("room_"), "got {code}");
        assert_eq!(code.len(), "room_".len() + CODE_LEN);
    }

    #[test]
    fn test_create_p2p_uses_requested_code_verbatim() {
        let mut reg = RoomRegistry::new();

        let id = reg
            .create(None, Some(GameMode::P2p), Some("ABCDE"))
            .unwrap();

        assert_eq!(id, RoomId::new("ABCDE"));
        assert!(reg.contains(&id));
    }

    #[test]
    fn test_create_p2p_taken_code_rejected() {
        let mut reg = RoomRegistry::new();
        reg.create(None, Some(GameMode::P2p), Some("ABCDE")).unwrap();

        let result = reg.create(None, Some(GameMode::P2p), Some("ABCDE"));

        assert!(matches!(result, Err(RoomError::CodeTaken(_))));
        assert_eq!(reg.len(), 1, "existing room must not be overwritten");
    }

    #[test]
    fn test_create_lan_ignores_requested_code() {
        // Codes are a p2p affordance; LAN rooms always get generated ids.
        let mut reg = RoomRegistry::new();

        let id = reg
            .create(None, Some(GameMode::Lan), Some("ABCDE"))
            .unwrap();

        assert_ne!(id, RoomId::new("ABCDE"));
    }

    #[test]
    fn test_create_blank_requested_code_generates() {
        let mut reg = RoomRegistry::new();

        let id = reg.create(None, Some(GameMode::P2p), Some("  ")).unwrap();

        assert!(id.as_str().starts_with("room_"));
    }

    #[test]
    fn test_create_many_rooms_unique_ids() {
        let mut reg = RoomRegistry::new();

        for _ in 0..100 {
            reg.create(None, None, None).unwrap();
        }

        // HashMap keys are unique by construction; all 100 must be live.
        assert_eq!(reg.len(), 100);
    }

    #[test]
    fn test_remove_deletes_room() {
        let mut reg = RoomRegistry::new();
        let id = reg.create(None, None, None).unwrap();

        assert!(reg.remove(&id).is_some());
        assert!(!reg.contains(&id));
        assert!(reg.remove(&id).is_none());
    }

    #[test]
    fn test_snapshots_cover_every_live_room() {
        let mut reg = RoomRegistry::new();
        let a = reg.create(None, None, None).unwrap();
        let b = reg.create(None, None, None).unwrap();

        let snaps = reg.snapshots();

        assert_eq!(snaps.len(), 2);
        assert!(snaps.iter().any(|s| s.room_id == a));
        assert!(snaps.iter().any(|s| s.room_id == b));
    }
}
