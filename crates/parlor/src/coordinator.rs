//! The session coordinator: one task owning every piece of shared state.
//!
//! All lobby and room state lives behind a single mpsc queue. Connection
//! tasks push [`SessionEvent`]s; the coordinator applies them one at a
//! time, to completion, before looking at the next. That ordering is the
//! whole concurrency story — the registries it owns are plain maps with
//! no locks, and no event ever observes another event half-applied.

use parlor_protocol::{
    ClientId, ClientMessage, RoomId, Seat, ServerMessage,
};
use parlor_room::{Room, RoomError, RoomRegistry};
use parlor_session::{PlayerRegistry, DEFAULT_NAME};
use tokio::sync::mpsc;

use crate::connections::ConnectionTable;

/// The one rejection string the browser client knows how to display for
/// a failed join.
const JOIN_REJECTED: &str = "Room is full or does not exist.";

/// What connection tasks feed the coordinator.
#[derive(Debug)]
pub enum SessionEvent {
    /// A connection finished its WebSocket handshake.
    Connected {
        id: ClientId,
        sender: mpsc::UnboundedSender<ServerMessage>,
    },

    /// A connection sent a well-formed request.
    Inbound { id: ClientId, msg: ClientMessage },

    /// A connection's socket closed, cleanly or not.
    Disconnected { id: ClientId },
}

/// Owns the player registry, the room registry, and the outbound queues,
/// and applies session events to them.
#[derive(Debug, Default)]
pub struct Coordinator {
    players: PlayerRegistry,
    rooms: RoomRegistry,
    connections: ConnectionTable,
}

impl Coordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains the event queue until every sender is gone.
    pub async fn run(mut self, mut events: mpsc::UnboundedReceiver<SessionEvent>) {
        tracing::info!("session coordinator started");
        while let Some(event) = events.recv().await {
            self.handle(event);
        }
        tracing::info!("session coordinator stopped");
    }

    /// Applies one event to completion.
    ///
    /// Synchronous on purpose: tests drive the coordinator through here
    /// without a transport, and the run loop stays a trivial wrapper.
    pub fn handle(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Connected { id, sender } => self.connected(id, sender),
            SessionEvent::Inbound { id, msg } => self.inbound(id, msg),
            SessionEvent::Disconnected { id } => self.disconnected(id),
        }
    }

    fn connected(
        &mut self,
        id: ClientId,
        sender: mpsc::UnboundedSender<ServerMessage>,
    ) {
        self.connections.insert(id, sender);
        self.players.register(id);
        tracing::info!(%id, connections = self.connections.len(), "client connected");
        self.broadcast_lobby();
    }

    fn inbound(&mut self, id: ClientId, msg: ClientMessage) {
        tracing::debug!(%id, ?msg, "handling request");
        match msg {
            ClientMessage::CreateGame {
                game_type,
                mode,
                room_code,
                username,
            } => self.create_game(id, game_type, mode, room_code, username),
            ClientMessage::JoinGame { room_id, username } => {
                self.join_game(id, room_id, username)
            }
            ClientMessage::ToggleReady { room_id } => {
                self.toggle_ready(id, room_id)
            }
            ClientMessage::LeaveRoom { room_id } => self.leave_room(id, room_id),
            ClientMessage::RequestRematch { room_id } => {
                self.request_rematch(id, room_id)
            }
            ClientMessage::ReportWinner { room_id, winner } => {
                self.report_winner(id, room_id, &winner)
            }
        }
    }

    fn disconnected(&mut self, id: ClientId) {
        let room_id = self.players.room_of(id).cloned();
        if let Some(room_id) = room_id {
            self.vacate_seat(id, &room_id);
        }
        self.players.forget(id);
        self.connections.remove(id);
        tracing::info!(%id, connections = self.connections.len(), "client disconnected");
        // Exactly one lobby push per membership change, seat or no seat.
        self.broadcast_lobby();
    }

    fn create_game(
        &mut self,
        id: ClientId,
        game_type: Option<String>,
        mode: Option<parlor_protocol::GameMode>,
        room_code: Option<String>,
        username: Option<String>,
    ) {
        self.players.set_identity(id, username.as_deref());

        let room_id =
            match self.rooms.create(game_type, mode, room_code.as_deref()) {
                Ok(room_id) => room_id,
                Err(err) => {
                    tracing::warn!(%id, %err, "create rejected");
                    self.connections.send(
                        id,
                        ServerMessage::Error {
                            message: err.to_string(),
                        },
                    );
                    return;
                }
            };

        self.seat_in_room(id, room_id);
    }

    fn join_game(
        &mut self,
        id: ClientId,
        room_id: RoomId,
        username: Option<String>,
    ) {
        self.players.set_identity(id, username.as_deref());
        self.seat_in_room(id, room_id);
    }

    /// Seats a connection in a room and fans out the three updates a
    /// successful join produces: the ack to the joiner, the membership
    /// update to the room, and the lobby push to everyone.
    fn seat_in_room(&mut self, id: ClientId, room_id: RoomId) {
        let name = self
            .players
            .name_of(id)
            .unwrap_or(DEFAULT_NAME)
            .to_string();

        let Some(room) = self.rooms.get_mut(&room_id) else {
            tracing::warn!(%id, %room_id, "join rejected: no such room");
            self.connections.send(
                id,
                ServerMessage::Error {
                    message: JOIN_REJECTED.to_string(),
                },
            );
            return;
        };

        if let Err(err) = room.join(id, &name) {
            tracing::warn!(%id, %room_id, %err, "join rejected");
            self.connections.send(
                id,
                ServerMessage::Error {
                    message: JOIN_REJECTED.to_string(),
                },
            );
            return;
        }

        let snapshot = room.snapshot();
        let members = member_ids(room);

        self.players.set_room(id, room_id);
        self.connections.send(
            id,
            ServerMessage::RoomJoined {
                room: snapshot.clone(),
            },
        );
        self.connections
            .send_many(&members, &ServerMessage::MatchLobbyUpdate { room: snapshot });
        self.broadcast_lobby();
    }

    fn toggle_ready(&mut self, id: ClientId, room_id: RoomId) {
        // A stale room id is a harmless race with teardown.
        let Some(room) = self.rooms.get_mut(&room_id) else {
            tracing::debug!(%id, %room_id, "toggle for a room that is gone");
            return;
        };

        let all_ready = match room.toggle_ready(id) {
            Ok(all_ready) => all_ready,
            Err(err) => {
                tracing::warn!(%id, %room_id, %err, "toggle rejected");
                self.connections.send(
                    id,
                    ServerMessage::Error {
                        message: err.to_string(),
                    },
                );
                return;
            }
        };

        let started = all_ready && room.start();
        let snapshot = room.snapshot();
        let members = member_ids(room);
        let game = started.then(|| {
            room.game_snapshot(|id| {
                self.players.name_of(id).map(str::to_string)
            })
        });

        self.connections
            .send_many(&members, &ServerMessage::MatchLobbyUpdate { room: snapshot });
        if let Some(state) = game {
            self.connections
                .send_many(&members, &ServerMessage::GameStateUpdate { state });
        }
    }

    fn leave_room(&mut self, id: ClientId, room_id: RoomId) {
        self.players.clear_room(id);
        self.vacate_seat(id, &room_id);
        self.broadcast_lobby();
    }

    fn request_rematch(&mut self, id: ClientId, room_id: RoomId) {
        let Some(room) = self.rooms.get_mut(&room_id) else {
            tracing::debug!(%id, %room_id, "rematch for a room that is gone");
            return;
        };

        room.rematch();
        let snapshot = room.snapshot();
        let members = member_ids(room);
        let state = room.game_snapshot(|id| {
            self.players.name_of(id).map(str::to_string)
        });

        self.connections
            .send_many(&members, &ServerMessage::MatchLobbyUpdate { room: snapshot });
        self.connections
            .send_many(&members, &ServerMessage::GameStateUpdate { state });
    }

    fn report_winner(&mut self, id: ClientId, room_id: RoomId, winner: &str) {
        // Anything outside the two seat colours is dropped here.
        let Some(seat) = Seat::from_token(winner) else {
            tracing::debug!(%id, %room_id, winner, "ignoring unknown winner token");
            return;
        };

        let Some(room) = self.rooms.get_mut(&room_id) else {
            tracing::debug!(%id, %room_id, "winner report for a room that is gone");
            return;
        };

        if !room.is_member(id) {
            let err = RoomError::NotSeated(id, room_id.clone());
            tracing::warn!(%id, %room_id, "winner report from outside the room");
            self.connections.send(
                id,
                ServerMessage::Error {
                    message: err.to_string(),
                },
            );
            return;
        }

        if !room.report_winner(seat) {
            return;
        }

        let members = member_ids(room);
        let state = room.game_snapshot(|id| {
            self.players.name_of(id).map(str::to_string)
        });
        self.connections
            .send_many(&members, &ServerMessage::GameStateUpdate { state });
    }

    /// Pulls a connection out of a room, deleting the room if that left
    /// it empty and otherwise telling the remaining members. Does NOT
    /// push the lobby — each caller does that exactly once itself.
    fn vacate_seat(&mut self, id: ClientId, room_id: &RoomId) {
        let Some(room) = self.rooms.get_mut(room_id) else {
            return;
        };
        if !room.remove(id) {
            return;
        }

        if room.is_empty() {
            self.rooms.remove(room_id);
            return;
        }

        let snapshot = room.snapshot();
        let members = member_ids(room);
        self.connections
            .send_many(&members, &ServerMessage::MatchLobbyUpdate { room: snapshot });
    }

    /// Pushes the current room list to every live connection.
    fn broadcast_lobby(&self) {
        self.connections.broadcast(&ServerMessage::AvailableGames {
            rooms: self.rooms.snapshots(),
        });
    }
}

fn member_ids(room: &Room) -> Vec<ClientId> {
    room.seats().iter().map(|p| p.id).collect()
}
