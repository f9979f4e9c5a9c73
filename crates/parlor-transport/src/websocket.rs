//! WebSocket listener and connections via `tokio-tungstenite`.
//!
//! Connections are split into send and receive halves at accept time:
//! outbound broadcasts arrive from the coordinator on their own task
//! while the receive loop blocks on the next inbound frame, so the two
//! directions must not share a lock.

use std::sync::atomic::{AtomicU64, Ordering};

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use parlor_protocol::ClientId;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;

use crate::TransportError;

/// Counter for assigning unique connection ids.
static NEXT_CLIENT_ID: AtomicU64 = AtomicU64::new(1);

type WsStream = tokio_tungstenite::WebSocketStream<TcpStream>;

/// Listens for incoming WebSocket connections.
pub struct WsListener {
    listener: TcpListener,
}

impl WsListener {
    /// Binds the listener to the given address.
    pub async fn bind(addr: &str) -> Result<Self, TransportError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(TransportError::BindFailed)?;
        tracing::info!(addr, "WebSocket listener bound");
        Ok(Self { listener })
    }

    /// Returns the local address the listener is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.listener.local_addr()
    }

    /// Waits for the next incoming connection and upgrades it.
    pub async fn accept(&mut self) -> Result<WsConnection, TransportError> {
        let (stream, addr) = self
            .listener
            .accept()
            .await
            .map_err(TransportError::AcceptFailed)?;

        let ws = tokio_tungstenite::accept_async(stream)
            .await
            .map_err(|e| {
                TransportError::AcceptFailed(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    e,
                ))
            })?;

        let id = ClientId(NEXT_CLIENT_ID.fetch_add(1, Ordering::Relaxed));
        tracing::debug!(%id, %addr, "accepted WebSocket connection");

        Ok(WsConnection { id, ws })
    }
}

/// One accepted connection, not yet split.
pub struct WsConnection {
    id: ClientId,
    ws: WsStream,
}

impl WsConnection {
    /// Returns the id assigned to this connection.
    pub fn id(&self) -> ClientId {
        self.id
    }

    /// Splits the connection into independent send and receive halves.
    pub fn split(self) -> (WsSender, WsReceiver) {
        let (sink, stream) = self.ws.split();
        (
            WsSender { id: self.id, sink },
            WsReceiver {
                id: self.id,
                stream,
            },
        )
    }
}

/// The outbound half of a connection.
pub struct WsSender {
    id: ClientId,
    sink: SplitSink<WsStream, Message>,
}

impl WsSender {
    /// Sends one text frame.
    pub async fn send_text(&mut self, text: &str) -> Result<(), TransportError> {
        self.sink
            .send(Message::Text(text.into()))
            .await
            .map_err(|e| {
                TransportError::SendFailed(std::io::Error::new(
                    std::io::ErrorKind::BrokenPipe,
                    e,
                ))
            })
    }

    /// Returns the connection id this half belongs to.
    pub fn id(&self) -> ClientId {
        self.id
    }
}

/// The inbound half of a connection.
pub struct WsReceiver {
    id: ClientId,
    stream: SplitStream<WsStream>,
}

impl WsReceiver {
    /// Receives the next text frame.
    ///
    /// Returns `Ok(None)` when the peer closed the connection. Control
    /// frames and binary frames are skipped — the protocol is JSON text.
    pub async fn next_text(&mut self) -> Result<Option<String>, TransportError> {
        loop {
            match self.stream.next().await {
                Some(Ok(Message::Text(text))) => {
                    return Ok(Some(text.as_str().to_string()));
                }
                Some(Ok(Message::Close(_))) | None => return Ok(None),
                Some(Ok(other)) => {
                    tracing::trace!(id = %self.id, ?other, "skipping non-text frame");
                }
                Some(Err(e)) => {
                    return Err(TransportError::ReceiveFailed(
                        std::io::Error::new(
                            std::io::ErrorKind::ConnectionReset,
                            e,
                        ),
                    ));
                }
            }
        }
    }

    /// Returns the connection id this half belongs to.
    pub fn id(&self) -> ClientId {
        self.id
    }
}
