//! The player registry: identity for every live connection.
//!
//! # Concurrency note
//!
//! `PlayerRegistry` is NOT thread-safe by itself — it uses a plain
//! `HashMap`, not a concurrent one. This is intentional: the registry is
//! owned by the session coordinator task and only ever touched from
//! there. Keeping it simple here avoids hidden locking overhead.

use std::collections::HashMap;

use parlor_protocol::{ClientId, RoomId};

/// The display name used when a client supplies none, or only whitespace.
pub const DEFAULT_NAME: &str = "Player";

/// Identity for one live connection.
#[derive(Debug, Clone)]
pub struct PlayerConnection {
    /// The connection this identity belongs to.
    pub id: ClientId,

    /// Display name. Never empty: blank input falls back to
    /// [`DEFAULT_NAME`].
    pub username: String,

    /// The room this connection currently occupies a seat in, if any.
    pub room: Option<RoomId>,
}

/// Tracks the identity of every live connection.
///
/// Entries are created on connect, updated when a create/join request
/// carries a username, and removed on disconnect.
#[derive(Debug, Default)]
pub struct PlayerRegistry {
    players: HashMap<ClientId, PlayerConnection>,
}

impl PlayerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a fresh default identity for a connection.
    ///
    /// Idempotent: a connection that is already registered keeps its
    /// current name and room.
    pub fn register(&mut self, id: ClientId) {
        self.players.entry(id).or_insert_with(|| {
            tracing::debug!(%id, "player registered");
            PlayerConnection {
                id,
                username: DEFAULT_NAME.to_string(),
                room: None,
            }
        });
    }

    /// Stores a display name for a connection. The room marker is left
    /// alone — it only moves when a join actually lands or a seat is
    /// vacated, so a rejected join can't orphan the seat the connection
    /// still holds.
    ///
    /// The raw input is trimmed; empty or missing input falls back to
    /// [`DEFAULT_NAME`]. Registers the connection if it wasn't known —
    /// identity updates arrive on create/join requests, which may race a
    /// connect we never saw complete.
    pub fn set_identity(&mut self, id: ClientId, raw_name: Option<&str>) {
        let username = normalize_username(raw_name);
        let entry =
            self.players.entry(id).or_insert_with(|| PlayerConnection {
                id,
                username: DEFAULT_NAME.to_string(),
                room: None,
            });
        entry.username = username;
    }

    /// Marks a connection as seated in `room`. No-op if unregistered.
    pub fn set_room(&mut self, id: ClientId, room: RoomId) {
        if let Some(player) = self.players.get_mut(&id) {
            player.room = Some(room);
        }
    }

    /// Clears a connection's room marker. No-op if unregistered.
    pub fn clear_room(&mut self, id: ClientId) {
        if let Some(player) = self.players.get_mut(&id) {
            player.room = None;
        }
    }

    /// Removes a connection's identity. Safe no-op if absent.
    pub fn forget(&mut self, id: ClientId) {
        if self.players.remove(&id).is_some() {
            tracing::debug!(%id, "player forgotten");
        }
    }

    /// Looks up a connection's identity.
    pub fn get(&self, id: ClientId) -> Option<&PlayerConnection> {
        self.players.get(&id)
    }

    /// Returns the room a connection is currently marked as occupying.
    pub fn room_of(&self, id: ClientId) -> Option<&RoomId> {
        self.players.get(&id).and_then(|p| p.room.as_ref())
    }

    /// Returns a connection's display name, if registered.
    pub fn name_of(&self, id: ClientId) -> Option<&str> {
        self.players.get(&id).map(|p| p.username.as_str())
    }

    /// Returns the number of registered connections.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Returns `true` if no connections are registered.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

/// Trims the supplied name, falling back to [`DEFAULT_NAME`] when the
/// input is missing or blank after trimming.
fn normalize_username(raw: Option<&str>) -> String {
    match raw {
        Some(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                DEFAULT_NAME.to_string()
            } else {
                trimmed.to_string()
            }
        }
        None => DEFAULT_NAME.to_string(),
    }
}
