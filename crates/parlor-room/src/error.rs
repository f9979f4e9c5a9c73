//! Error types for the room layer.

use parlor_protocol::{ClientId, RoomId};

/// Errors that room operations can reject with.
///
/// Only failures that get reported back to a requester are errors;
/// actions addressed at rooms or members that no longer exist are
/// handled as no-ops by the caller and never reach these variants.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// Both seats are taken.
    #[error("room {0} is full")]
    Full(RoomId),

    /// A caller-supplied room code already names a live room.
    #[error("room code {0} is already in use")]
    CodeTaken(RoomId),

    /// The acting connection does not occupy a seat in the room.
    #[error("{0} is not seated in room {1}")]
    NotSeated(ClientId, RoomId),
}
