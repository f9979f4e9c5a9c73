//! Outbound delivery: one queue per live connection.

use std::collections::HashMap;

use parlor_protocol::{ClientId, ServerMessage};
use tokio::sync::mpsc;

/// Maps each live connection to the sending side of its outbound queue.
///
/// Owned by the session coordinator task; the receiving side of each
/// queue lives in that connection's writer task. Delivery is
/// fire-and-forget — a closed queue means the connection is already
/// going away and its `Disconnected` event will clean up here.
#[derive(Debug, Default)]
pub(crate) struct ConnectionTable {
    senders: HashMap<ClientId, mpsc::UnboundedSender<ServerMessage>>,
}

impl ConnectionTable {
    /// Registers a connection's outbound queue.
    pub(crate) fn insert(
        &mut self,
        id: ClientId,
        sender: mpsc::UnboundedSender<ServerMessage>,
    ) {
        self.senders.insert(id, sender);
    }

    /// Drops a connection's outbound queue.
    pub(crate) fn remove(&mut self, id: ClientId) {
        self.senders.remove(&id);
    }

    /// Sends one message to one connection.
    pub(crate) fn send(&self, id: ClientId, msg: ServerMessage) {
        if let Some(sender) = self.senders.get(&id) {
            let _ = sender.send(msg);
        }
    }

    /// Sends one message to a set of connections.
    pub(crate) fn send_many(&self, ids: &[ClientId], msg: &ServerMessage) {
        for id in ids {
            self.send(*id, msg.clone());
        }
    }

    /// Sends one message to every live connection.
    pub(crate) fn broadcast(&self, msg: &ServerMessage) {
        for sender in self.senders.values() {
            let _ = sender.send(msg.clone());
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.senders.len()
    }
}
