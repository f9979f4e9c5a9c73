//! Per-connection task: pumps frames between one socket and the
//! coordinator.

use parlor_protocol::{ClientMessage, ServerMessage};
use parlor_transport::WsConnection;
use tokio::sync::mpsc;

use crate::coordinator::SessionEvent;

/// Drives one accepted connection until it closes.
///
/// The connection is split in two: a writer task drains this
/// connection's outbound queue onto the socket, while this task reads
/// inbound frames and forwards decoded requests to the coordinator.
/// Frames that don't decode as a request are logged and skipped — one
/// malformed message must not kill the session.
pub(crate) async fn drive_connection(
    conn: WsConnection,
    events: mpsc::UnboundedSender<SessionEvent>,
) {
    let id = conn.id();
    let (mut ws_tx, mut ws_rx) = conn.split();

    let (out_tx, mut out_rx) = mpsc::unbounded_channel::<ServerMessage>();
    if events
        .send(SessionEvent::Connected { id, sender: out_tx })
        .is_err()
    {
        return;
    }

    let writer = tokio::spawn(async move {
        while let Some(msg) = out_rx.recv().await {
            match serde_json::to_string(&msg) {
                Ok(json) => {
                    if ws_tx.send_text(&json).await.is_err() {
                        break;
                    }
                }
                Err(err) => {
                    tracing::error!(%err, "dropping unencodable outbound message");
                }
            }
        }
    });

    loop {
        match ws_rx.next_text().await {
            Ok(Some(text)) => {
                match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(msg) => {
                        if events.send(SessionEvent::Inbound { id, msg }).is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        tracing::debug!(%id, %err, "skipping undecodable frame");
                    }
                }
            }
            Ok(None) => break,
            Err(err) => {
                tracing::debug!(%id, %err, "receive failed");
                break;
            }
        }
    }

    let _ = events.send(SessionEvent::Disconnected { id });
    writer.abort();
}
