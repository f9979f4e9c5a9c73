//! WebSocket connection plumbing for Parlor.
//!
//! The session core treats the transport as a given collaborator: it
//! hands each accepted connection a [`ClientId`] and two halves — a
//! sink for outbound text frames and a stream of inbound ones. Framing,
//! ping/pong, and close handshakes stay in here.

mod error;
mod websocket;

pub use error::TransportError;
pub use websocket::{WsConnection, WsListener, WsReceiver, WsSender};
