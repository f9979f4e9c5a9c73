//! Wire protocol for Parlor.
//!
//! This crate defines the "language" that clients and the server speak:
//!
//! - **Identifiers** ([`ClientId`], [`RoomId`]) and the fixed match
//!   vocabulary ([`Seat`], [`GameMode`]).
//! - **Messages** ([`ClientMessage`], [`ServerMessage`]) — the named
//!   events that travel on the wire.
//! - **Snapshots** ([`RoomSnapshot`], [`SeatSnapshot`], [`GameSnapshot`]) —
//!   read-only views of server state pushed to clients.
//!
//! The protocol layer doesn't know about connections or rooms — it only
//! defines shapes. Everything serializes as JSON with camelCase tags and
//! fields, matching what the browser client already speaks.

mod messages;
mod types;

pub use messages::{
    ClientMessage, GameSnapshot, RoomSnapshot, SeatSnapshot, ServerMessage,
};
pub use types::{ClientId, GameMode, RoomId, Seat};
