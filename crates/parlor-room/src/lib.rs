//! Room lifecycle management for Parlor.
//!
//! This is the core of the service: the per-room state machine
//! (membership, readiness, match start, winner, rematch) and the
//! registry of all live rooms.
//!
//! # Key types
//!
//! - [`Room`] — one match's shared container and its lifecycle operations
//! - [`GameState`] — the in-match progress (seat assignment, turn, outcome)
//! - [`RoomPhase`] — the derived lifecycle state
//! - [`RoomRegistry`] — creates, looks up, and deletes rooms; allocates
//!   collision-safe room codes
//! - [`RoomError`] — what room operations can reject
//!
//! Nothing here is async or locked: every room mutation happens on the
//! session coordinator task, which processes one inbound event to
//! completion before the next. That single-consumer discipline is the
//! whole concurrency story.

mod error;
mod game;
mod registry;
mod room;

pub use error::RoomError;
pub use game::GameState;
pub use registry::RoomRegistry;
pub use room::{Room, RoomPhase, RoomPlayer, DEFAULT_GAME_TYPE, SEAT_LIMIT};
