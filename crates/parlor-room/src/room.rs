//! One room: membership, readiness, and the match lifecycle.

use parlor_protocol::{
    ClientId, GameMode, GameSnapshot, RoomId, RoomSnapshot, Seat,
    SeatSnapshot,
};

use crate::{GameState, RoomError};

/// Every room has exactly two seats.
pub const SEAT_LIMIT: usize = 2;

/// Game label used when a create request doesn't carry one.
pub const DEFAULT_GAME_TYPE: &str = "Checkers";

/// Last-resort display name when neither the registry nor the room's own
/// seat snapshot can name a connection.
const FALLBACK_NAME: &str = "Player";

/// The derived lifecycle state of a room.
///
/// ```text
/// Forming ──(both seated, both ready)──→ InProgress ──(winner)──→ GameOver
///    ↑                                                               │
///    └──────────────────────────(rematch)────────────────────────────┘
/// ```
///
/// There is no stored state field: the phase follows from membership and
/// [`GameState`], so it can never disagree with them. The ready-check
/// moment (both seats filled and ready) is transient — the same event
/// that completes it also starts the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomPhase {
    /// Fewer than two seats filled, or not everyone is ready.
    Forming,
    /// Seats are assigned and the match is underway.
    InProgress,
    /// A winner has been recorded.
    GameOver,
}

/// A seat occupant: per-room identity plus the ready flag.
#[derive(Debug, Clone)]
pub struct RoomPlayer {
    /// The occupant's connection.
    pub id: ClientId,

    /// Display name snapshot taken at join time.
    pub name: String,

    /// Whether this occupant has signalled readiness.
    pub ready: bool,
}

/// One match's shared container: membership plus match state.
///
/// Seats are kept in a `Vec` in join order. That order is load-bearing:
/// the first entrant always takes the red seat when the match starts,
/// and host reassignment falls back to the earliest-joined remaining
/// occupant, deterministically.
#[derive(Debug)]
pub struct Room {
    id: RoomId,
    host: Option<ClientId>,
    mode: GameMode,
    game_type: String,
    seats: Vec<RoomPlayer>,
    game: GameState,
}

impl Room {
    /// Creates an empty room. The first join assigns the host.
    pub(crate) fn new(id: RoomId, game_type: String, mode: GameMode) -> Self {
        Self {
            id,
            host: None,
            mode,
            game_type,
            seats: Vec::with_capacity(SEAT_LIMIT),
            game: GameState::new(),
        }
    }

    /// Returns the room's id.
    pub fn id(&self) -> &RoomId {
        &self.id
    }

    /// Returns the current host, `None` only while the room is emptying.
    pub fn host(&self) -> Option<ClientId> {
        self.host
    }

    /// Returns the seat occupants in join order.
    pub fn seats(&self) -> &[RoomPlayer] {
        &self.seats
    }

    /// Returns the number of occupied seats.
    pub fn occupancy(&self) -> usize {
        self.seats.len()
    }

    /// Returns `true` if no seats are occupied.
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// Returns `true` if the connection occupies a seat here.
    pub fn is_member(&self, id: ClientId) -> bool {
        self.seats.iter().any(|p| p.id == id)
    }

    /// Returns the derived lifecycle phase.
    pub fn phase(&self) -> RoomPhase {
        if self.game.game_over() {
            RoomPhase::GameOver
        } else if self.game.started() {
            RoomPhase::InProgress
        } else {
            RoomPhase::Forming
        }
    }

    /// Returns the match state.
    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Seats a connection, not ready, and assigns the host if unset.
    ///
    /// Re-joining a room you already occupy refreshes the name snapshot
    /// and nothing else.
    ///
    /// # Errors
    /// [`RoomError::Full`] when both seats are already taken.
    pub fn join(&mut self, id: ClientId, name: &str) -> Result<(), RoomError> {
        if let Some(seated) = self.seats.iter_mut().find(|p| p.id == id) {
            seated.name = name.to_string();
            return Ok(());
        }
        if self.seats.len() >= SEAT_LIMIT {
            return Err(RoomError::Full(self.id.clone()));
        }

        self.seats.push(RoomPlayer {
            id,
            name: name.to_string(),
            ready: false,
        });
        if self.host.is_none() {
            self.host = Some(id);
        }

        tracing::info!(
            room_id = %self.id,
            %id,
            occupancy = self.seats.len(),
            "player seated"
        );
        Ok(())
    }

    /// Flips an occupant's ready flag.
    ///
    /// Returns `true` when the flip left the room fully seated with
    /// every occupant ready — the caller should start the match.
    ///
    /// # Errors
    /// [`RoomError::NotSeated`] when the connection has no seat here.
    pub fn toggle_ready(&mut self, id: ClientId) -> Result<bool, RoomError> {
        let seat = self
            .seats
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| RoomError::NotSeated(id, self.id.clone()))?;

        seat.ready = !seat.ready;
        Ok(self.ready_check())
    }

    /// The gating condition for match start: both seats filled, all ready.
    pub fn ready_check(&self) -> bool {
        self.seats.len() == SEAT_LIMIT && self.seats.iter().all(|p| p.ready)
    }

    /// Starts the match: first entrant takes red, second takes black,
    /// red opens.
    ///
    /// No-op (returns `false`) with fewer than two occupants.
    pub fn start(&mut self) -> bool {
        let [red, black, ..] = self.seats.as_slice() else {
            return false;
        };

        let red_name = red.name.clone();
        let (red, black) = (red.id, black.id);
        self.game.start(red, black, red_name);

        tracing::info!(room_id = %self.id, %red, %black, "match started");
        true
    }

    /// Removes an occupant: vacates the seat, clears any colour slot
    /// they held, and reassigns the host to the earliest-joined remaining
    /// occupant. Returns `false` if they weren't seated.
    ///
    /// The caller is responsible for deleting the room once it is empty.
    pub fn remove(&mut self, id: ClientId) -> bool {
        let Some(index) = self.seats.iter().position(|p| p.id == id) else {
            return false;
        };

        self.seats.remove(index);
        self.game.clear_seats_of(id);
        if self.host == Some(id) {
            self.host = self.seats.first().map(|p| p.id);
        }

        tracing::info!(
            room_id = %self.id,
            %id,
            occupancy = self.seats.len(),
            "player left room"
        );
        true
    }

    /// Records the match outcome for a seat that is currently assigned.
    ///
    /// Returns whether anything changed. Membership of the reporting
    /// connection is the coordinator's check; colour validity is this
    /// one's.
    pub fn report_winner(&mut self, seat: Seat) -> bool {
        let recorded = self.game.record_winner(seat);
        if recorded {
            tracing::info!(room_id = %self.id, winner = %seat, "winner recorded");
        }
        recorded
    }

    /// Returns the room to its pre-match state with the same membership:
    /// every ready flag cleared, match state back to its empty form.
    ///
    /// Does not auto-restart — a fresh ready-check is required.
    pub fn rematch(&mut self) {
        for seat in &mut self.seats {
            seat.ready = false;
        }
        self.game.reset();
        tracing::info!(room_id = %self.id, "rematch requested");
    }

    /// Produces the read-only view pushed to lobbies and room members.
    pub fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            room_id: self.id.clone(),
            host_id: self.host,
            mode: self.mode,
            game_type: self.game_type.clone(),
            max_players: SEAT_LIMIT,
            players: self
                .seats
                .iter()
                .map(|p| SeatSnapshot {
                    player_id: p.id,
                    name: p.name.clone(),
                    is_ready: p.ready,
                })
                .collect(),
        }
    }

    /// Produces the match-progress view pushed to room members.
    ///
    /// `resolve` looks up a connection's live display name (the player
    /// registry). The winner's name falls back from there to the room's
    /// own seat snapshot, then to `"Player"`, so it is never empty.
    pub fn game_snapshot(
        &self,
        resolve: impl Fn(ClientId) -> Option<String>,
    ) -> GameSnapshot {
        let winner = self.game.winner().filter(|_| self.game.game_over());
        let winner_name = winner.map(|seat| {
            self.game
                .seat_holder(seat)
                .and_then(|id| {
                    resolve(id).or_else(|| {
                        self.seats
                            .iter()
                            .find(|p| p.id == id)
                            .map(|p| p.name.clone())
                    })
                })
                .unwrap_or_else(|| FALLBACK_NAME.to_string())
        });

        GameSnapshot {
            red: self.game.seat_holder(Seat::Red),
            black: self.game.seat_holder(Seat::Black),
            turn: self.game.turn(),
            turn_name: self.game.turn_name().map(str::to_string),
            game_over: self.game.game_over(),
            winner,
            winner_name,
        }
    }
}
