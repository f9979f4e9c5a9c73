//! The accept loop that wires transport, handler, and coordinator
//! together.

use parlor_transport::{TransportError, WsListener};
use tokio::sync::mpsc;

use crate::coordinator::Coordinator;
use crate::handler;

/// The matchmaking server: listens for WebSocket clients and runs one
/// coordinator task over all of them.
pub struct ParlorServer {
    listener: WsListener,
}

impl ParlorServer {
    /// Binds the server to the given address without accepting yet.
    pub async fn bind(addr: &str) -> Result<Self, TransportError> {
        let listener = WsListener::bind(addr).await?;
        Ok(Self { listener })
    }

    /// Returns the bound address, useful when binding to port 0.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts connections forever, one handler task per connection.
    ///
    /// A failed accept is logged and the loop keeps going; the listener
    /// itself staying healthy is the only thing this task depends on.
    pub async fn run(mut self) {
        let (events, queue) = mpsc::unbounded_channel();
        tokio::spawn(Coordinator::new().run(queue));

        loop {
            match self.listener.accept().await {
                Ok(conn) => {
                    tokio::spawn(handler::drive_connection(conn, events.clone()));
                }
                Err(err) => {
                    tracing::error!(%err, "accept failed");
                }
            }
        }
    }
}
