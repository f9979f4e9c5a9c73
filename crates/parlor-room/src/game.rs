//! Match progress for one room: seat assignment, turn, and outcome.

use parlor_protocol::{ClientId, Seat};

/// The in-match state of a room.
///
/// Created empty alongside the room and reset to empty on rematch. Seats
/// are assigned only when the ready-check passes and the match starts.
/// Turn cycling is driven by the clients' own move exchange — the server
/// records the opening turn and the final outcome, nothing in between.
#[derive(Debug, Clone, Default)]
pub struct GameState {
    red: Option<ClientId>,
    black: Option<ClientId>,
    turn: Option<Seat>,
    turn_name: Option<String>,
    game_over: bool,
    winner: Option<Seat>,
}

impl GameState {
    /// Creates the initial, unstarted state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the state to its initial empty form.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Assigns the seats and opens the match: red moves first.
    ///
    /// Any previous outcome is cleared, so a restart after a dangling
    /// match yields a clean slate.
    pub fn start(&mut self, red: ClientId, black: ClientId, red_name: String) {
        self.red = Some(red);
        self.black = Some(black);
        self.turn = Some(Seat::Red);
        self.turn_name = Some(red_name);
        self.game_over = false;
        self.winner = None;
    }

    /// Returns `true` once both seats have been assigned.
    pub fn started(&self) -> bool {
        self.red.is_some() && self.black.is_some()
    }

    /// Returns the connection currently assigned to a seat.
    pub fn seat_holder(&self, seat: Seat) -> Option<ClientId> {
        match seat {
            Seat::Red => self.red,
            Seat::Black => self.black,
        }
    }

    /// Clears any seat assignment referencing a departed connection.
    ///
    /// The match is left dangling on purpose: the seat shows as vacant
    /// but turn and outcome are untouched. There is no forfeiture rule.
    pub fn clear_seats_of(&mut self, id: ClientId) {
        if self.red == Some(id) {
            self.red = None;
        }
        if self.black == Some(id) {
            self.black = None;
        }
    }

    /// Records the match outcome for `seat`.
    ///
    /// Only a seat that is currently assigned can win; reporting an
    /// unassigned colour changes nothing. Returns whether the outcome
    /// was recorded.
    pub fn record_winner(&mut self, seat: Seat) -> bool {
        if self.seat_holder(seat).is_none() {
            return false;
        }
        self.game_over = true;
        self.winner = Some(seat);
        true
    }

    /// Returns `true` once an outcome has been recorded.
    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Returns the winning seat, if the match is over.
    pub fn winner(&self) -> Option<Seat> {
        self.winner
    }

    /// Returns whose turn it is, if the match has started.
    pub fn turn(&self) -> Option<Seat> {
        self.turn
    }

    /// Returns the display name recorded for the current turn.
    pub fn turn_name(&self) -> Option<&str> {
        self.turn_name.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cid(id: u64) -> ClientId {
        ClientId(id)
    }

    #[test]
    fn test_new_state_is_unstarted() {
        let game = GameState::new();
        assert!(!game.started());
        assert!(!game.game_over());
        assert!(game.turn().is_none());
        assert!(game.winner().is_none());
    }

    #[test]
    fn test_start_assigns_seats_and_red_opens() {
        let mut game = GameState::new();

        game.start(cid(1), cid(2), "alice".into());

        assert!(game.started());
        assert_eq!(game.seat_holder(Seat::Red), Some(cid(1)));
        assert_eq!(game.seat_holder(Seat::Black), Some(cid(2)));
        assert_eq!(game.turn(), Some(Seat::Red));
        assert_eq!(game.turn_name(), Some("alice"));
    }

    #[test]
    fn test_start_clears_previous_outcome() {
        let mut game = GameState::new();
        game.start(cid(1), cid(2), "alice".into());
        assert!(game.record_winner(Seat::Black));

        game.start(cid(1), cid(2), "alice".into());

        assert!(!game.game_over());
        assert!(game.winner().is_none());
    }

    #[test]
    fn test_record_winner_requires_assigned_seat() {
        let mut game = GameState::new();

        // Unstarted match: neither colour is assigned.
        assert!(!game.record_winner(Seat::Red));
        assert!(!game.game_over());

        game.start(cid(1), cid(2), "alice".into());
        assert!(game.record_winner(Seat::Black));
        assert!(game.game_over());
        assert_eq!(game.winner(), Some(Seat::Black));
    }

    #[test]
    fn test_record_winner_rejects_cleared_seat() {
        // A departed occupant leaves their colour vacant; the vacant
        // colour can no longer be reported as the winner.
        let mut game = GameState::new();
        game.start(cid(1), cid(2), "alice".into());
        game.clear_seats_of(cid(2));

        assert!(!game.record_winner(Seat::Black));
        assert!(game.record_winner(Seat::Red));
    }

    #[test]
    fn test_clear_seats_of_leaves_match_dangling() {
        let mut game = GameState::new();
        game.start(cid(1), cid(2), "alice".into());

        game.clear_seats_of(cid(1));

        assert_eq!(game.seat_holder(Seat::Red), None);
        assert_eq!(game.seat_holder(Seat::Black), Some(cid(2)));
        // No forfeiture: turn and outcome are untouched.
        assert_eq!(game.turn(), Some(Seat::Red));
        assert!(!game.game_over());
    }

    #[test]
    fn test_reset_returns_to_initial_form() {
        let mut game = GameState::new();
        game.start(cid(1), cid(2), "alice".into());
        game.record_winner(Seat::Red);

        game.reset();

        assert!(!game.started());
        assert!(game.turn().is_none());
        assert!(game.turn_name().is_none());
        assert!(!game.game_over());
        assert!(game.winner().is_none());
    }
}
