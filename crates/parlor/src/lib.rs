//! Matchmaking and session lifecycle for two-player turn-based games.
//!
//! Clients speak JSON over WebSocket: create or join a room, ready up,
//! play out a match, report its winner, and ask for a rematch. Every
//! mutation flows through one [`Coordinator`] task, so room and player
//! state never needs a lock.

mod connections;
mod coordinator;
mod handler;
mod server;

pub use coordinator::{Coordinator, SessionEvent};
pub use server::ParlorServer;
