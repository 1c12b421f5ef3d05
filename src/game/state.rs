//! The authoritative game state machine.
//!
//! `GameState` owns the player roster, validates and applies moves,
//! computes legal-move sets and win conditions, and drives the turn
//! rotation (evader first, then pursuers in registration order). The
//! immutable board graph and round schedule are shared by `Arc` with every
//! speculative clone the search produces; all mutable player state is
//! deep-copied into clones.

use std::rc::Rc;
use std::sync::Arc;

use im::Vector;
use rustc_hash::FxHashSet;

use crate::board::{Graph, Location, RoundSchedule};
use crate::core::{Colour, DoubleMove, Move, PlayerConfig, PlayerState, TicketKind, TicketMove};

use super::error::{ConfigError, MoveError, ObserverError};
use super::observer::Observer;
use super::view::GameView;

/// Index of the evader in the player roster.
const EVADER: usize = 0;

/// The authoritative rules engine for one game.
pub struct GameState {
    graph: Arc<Graph>,
    schedule: Arc<RoundSchedule>,
    /// Evader at index 0, pursuers in registration order.
    players: Vec<PlayerState>,
    /// Snapshot-iterated on every notification pass, so observers may
    /// register and unregister between turns.
    observers: Vector<Rc<dyn Observer>>,
    current_index: usize,
    current_round: usize,
    /// Last evaluated game-over result; win conditions are otherwise
    /// recomputed on demand.
    game_over: bool,
}

impl std::fmt::Debug for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameState")
            .field("players", &self.players)
            .field("observers", &self.observers.len())
            .field("current_index", &self.current_index)
            .field("current_round", &self.current_round)
            .field("game_over", &self.game_over)
            .finish()
    }
}

impl GameState {
    /// Validate a configuration and create a new game.
    ///
    /// The turn pointer starts at the evader and the round counter at 0.
    pub fn new_game(
        schedule: Arc<RoundSchedule>,
        graph: Arc<Graph>,
        evader: PlayerConfig,
        pursuers: Vec<PlayerConfig>,
    ) -> Result<Self, ConfigError> {
        if schedule.is_empty() {
            return Err(ConfigError::EmptySchedule);
        }
        if graph.is_empty() {
            return Err(ConfigError::EmptyGraph);
        }
        if pursuers.is_empty() {
            return Err(ConfigError::NoPursuers);
        }
        if !evader.colour.is_evader() {
            return Err(ConfigError::EvaderColour(evader.colour));
        }

        let mut colours = FxHashSet::default();
        let mut locations = FxHashSet::default();
        colours.insert(evader.colour);
        locations.insert(evader.location);
        for pursuer in &pursuers {
            if !colours.insert(pursuer.colour) {
                return Err(ConfigError::DuplicateColour(pursuer.colour));
            }
            if !locations.insert(pursuer.location) {
                return Err(ConfigError::DuplicateLocation(pursuer.location));
            }
        }

        for config in std::iter::once(&evader).chain(&pursuers) {
            for kind in TicketKind::ALL {
                if !config.tickets.contains_key(&kind) {
                    return Err(ConfigError::MissingTicket {
                        colour: config.colour,
                        kind,
                    });
                }
            }
        }
        for pursuer in &pursuers {
            for kind in [TicketKind::Secret, TicketKind::Double] {
                if pursuer.tickets.get(&kind).copied().unwrap_or(0) > 0 {
                    return Err(ConfigError::ForbiddenTicket {
                        colour: pursuer.colour,
                        kind,
                    });
                }
            }
        }

        let players: Vec<PlayerState> = std::iter::once(&evader)
            .chain(&pursuers)
            .map(PlayerState::from_config)
            .collect();

        tracing::info!(
            pursuers = pursuers.len(),
            rounds = schedule.len(),
            locations = graph.location_count(),
            "new game"
        );

        let mut state = Self {
            graph,
            schedule,
            players,
            observers: Vector::new(),
            current_index: EVADER,
            current_round: 0,
            game_over: false,
        };
        state.game_over = state.compute_game_over();
        Ok(state)
    }

    /// Build a speculative state for search: given player roster, round
    /// counter restarted at 0, no observers. Skips configuration
    /// validation; callers supply rosters derived from an already-valid
    /// game (which may legitimately include a captured evader).
    pub(crate) fn speculative(
        graph: Arc<Graph>,
        schedule: Arc<RoundSchedule>,
        players: Vec<PlayerState>,
    ) -> Self {
        let mut state = Self {
            graph,
            schedule,
            players,
            observers: Vector::new(),
            current_index: EVADER,
            current_round: 0,
            game_over: false,
        };
        state.game_over = state.compute_game_over();
        state
    }

    // === Accessors ===

    /// The board graph.
    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// The reveal schedule.
    #[must_use]
    pub fn schedule(&self) -> &RoundSchedule {
        &self.schedule
    }

    pub(crate) fn graph_handle(&self) -> Arc<Graph> {
        Arc::clone(&self.graph)
    }

    pub(crate) fn schedule_handle(&self) -> Arc<RoundSchedule> {
        Arc::clone(&self.schedule)
    }

    /// All colours in turn order, evader first.
    pub fn colours(&self) -> impl Iterator<Item = Colour> + '_ {
        self.players.iter().map(PlayerState::colour)
    }

    /// Number of completed rounds (evader moves).
    #[must_use]
    pub fn current_round(&self) -> usize {
        self.current_round
    }

    /// The colour whose move is awaited.
    #[must_use]
    pub fn current_colour(&self) -> Colour {
        self.players[self.current_index].colour()
    }

    /// Is the next awaited move the evader's (a fresh rotation)?
    #[must_use]
    pub fn at_rotation_start(&self) -> bool {
        self.current_index == EVADER
    }

    /// A player's true location, oracle access that ignores the reveal
    /// policy. The public equivalent is [`GameView::location`].
    #[must_use]
    pub fn true_location(&self, colour: Colour) -> Option<Location> {
        self.player(colour).map(PlayerState::location)
    }

    pub(crate) fn player(&self, colour: Colour) -> Option<&PlayerState> {
        self.players.iter().find(|p| p.colour() == colour)
    }

    pub(crate) fn players_snapshot(&self) -> Vec<PlayerState> {
        self.players.clone()
    }

    pub(crate) fn pursuers(&self) -> impl Iterator<Item = &PlayerState> {
        self.players.iter().skip(1)
    }

    /// A read-only view applying the visibility policy.
    #[must_use]
    pub fn view(&self) -> GameView<'_> {
        GameView::new(self)
    }

    // === Observers ===

    /// Register an observer. Duplicate registration is an error.
    pub fn register_observer(&mut self, observer: Rc<dyn Observer>) -> Result<(), ObserverError> {
        if self.observers.iter().any(|o| Rc::ptr_eq(o, &observer)) {
            return Err(ObserverError::AlreadyRegistered);
        }
        self.observers.push_back(observer);
        Ok(())
    }

    /// Unregister a previously registered observer.
    pub fn unregister_observer(&mut self, observer: &Rc<dyn Observer>) -> Result<(), ObserverError> {
        let index = self
            .observers
            .iter()
            .position(|o| Rc::ptr_eq(o, observer))
            .ok_or(ObserverError::NotRegistered)?;
        self.observers.remove(index);
        Ok(())
    }

    fn notify(&self, f: impl Fn(&dyn Observer, &GameView<'_>)) {
        let snapshot = self.observers.clone();
        let view = GameView::new(self);
        for observer in snapshot.iter() {
            f(observer.as_ref(), &view);
        }
    }

    fn notify_move(&self, mv: &Move) {
        self.notify(|observer, view| observer.on_move_made(view, mv));
    }

    // === Legal moves ===

    /// The legal-move set for a colour, computed fresh.
    ///
    /// Pursuers get single moves whose ticket they hold and whose
    /// destination no other pursuer occupies, or `{Pass}` when stuck. The
    /// evader gets single moves from its true location (it may run through
    /// pursuer locations; doing so is immediate capture) plus, holding a
    /// double ticket with at least one round to spare, every affordable
    /// two-leg combination.
    #[must_use]
    pub fn legal_moves(&self, colour: Colour) -> FxHashSet<Move> {
        let mut moves = FxHashSet::default();
        let Some(player) = self.player(colour) else {
            return moves;
        };

        let firsts = self.single_moves(colour, player.location());
        moves.extend(firsts.iter().map(|tm| Move::Single(*tm)));

        if colour.is_evader() {
            let round_to_spare = self.current_round + 1 < self.schedule.len();
            if player.has_ticket(TicketKind::Double) && round_to_spare {
                for first in &firsts {
                    for second in self.single_moves(colour, first.destination) {
                        let affordable = if first.ticket == second.ticket {
                            player.has_tickets(first.ticket, 2)
                        } else {
                            player.has_ticket(first.ticket) && player.has_ticket(second.ticket)
                        };
                        if affordable {
                            moves.insert(Move::double(colour, *first, second));
                        }
                    }
                }
            }
        } else if moves.is_empty() {
            moves.insert(Move::pass(colour));
        }

        moves
    }

    /// Single ticket moves available to `colour` from `from`.
    ///
    /// The evader additionally gets a secret variant of each reachable
    /// edge while it holds secret tickets.
    fn single_moves(&self, colour: Colour, from: Location) -> FxHashSet<TicketMove> {
        let mut moves = FxHashSet::default();
        let Some(player) = self.player(colour) else {
            return moves;
        };
        for &(transport, destination) in self.graph.neighbors(from) {
            let ticket = TicketKind::for_transport(transport);
            if !player.has_ticket(ticket) {
                continue;
            }
            if !colour.is_evader() && self.pursuer_at(destination) {
                continue;
            }
            moves.insert(TicketMove::new(colour, ticket, destination));
            if colour.is_evader() && player.has_ticket(TicketKind::Secret) {
                moves.insert(TicketMove::new(colour, TicketKind::Secret, destination));
            }
        }
        moves
    }

    fn pursuer_at(&self, location: Location) -> bool {
        self.pursuers().any(|p| p.location() == location)
    }

    // === Turn application ===

    /// Validate and apply one move, advancing the turn pointer.
    ///
    /// Fails without touching the state if the game has concluded, the
    /// colour is out of turn, or the move is not in the mover's legal set.
    /// Applying the last move of a rotation fires `on_rotation_complete`;
    /// a move that settles the game fires `on_game_over` instead, and a
    /// capture mid-rotation skips the remaining pursuer turns.
    ///
    /// Win conditions are settled at rotation boundaries (and on capture):
    /// when the round counter hits the schedule limit mid-rotation the
    /// remaining pursuers still take their turns and may capture before
    /// the result is declared.
    pub fn advance_turn(&mut self, mv: &Move) -> Result<(), MoveError> {
        if self.game_over {
            return Err(MoveError::GameOver);
        }
        let colour = mv.colour();
        if colour != self.current_colour() {
            return Err(MoveError::OutOfTurn(colour));
        }
        if !self.legal_moves(colour).contains(mv) {
            return Err(MoveError::Illegal(colour));
        }

        tracing::debug!(round = self.current_round, mv = %mv, "applying move");

        match mv {
            Move::Pass(_) => self.notify_move(mv),
            Move::Single(tm) if colour.is_evader() => self.apply_evader_single(tm),
            Move::Single(tm) => self.apply_pursuer_move(tm),
            Move::Double(dm) => self.apply_double_move(dm),
        }

        self.current_index += 1;
        let rotation_done = self.current_index >= self.players.len();
        if rotation_done || self.evader_captured() {
            self.game_over = self.compute_game_over();
            if self.game_over {
                let winners = self.winners();
                tracing::info!(winners = ?winners, round = self.current_round, "game over");
                self.notify(|observer, view| observer.on_game_over(view, &winners));
            } else {
                self.notify(|observer, view| observer.on_rotation_complete(view));
            }
            self.current_index = EVADER;
        }
        Ok(())
    }

    fn apply_pursuer_move(&mut self, tm: &TicketMove) {
        // the move was validated, so the colour is in the roster
        let Some(index) = self.players.iter().position(|p| p.colour() == tm.colour) else {
            return;
        };
        self.players[index].remove_ticket(tm.ticket);
        self.players[index].set_location(tm.destination);
        // spent pursuer tickets recycle to the evader
        self.players[EVADER].add_ticket(tm.ticket);
        self.notify_move(&Move::Single(*tm));
    }

    fn apply_evader_single(&mut self, tm: &TicketMove) {
        self.apply_evader_leg(tm.ticket, tm.destination);
        self.complete_round(tm.ticket);
    }

    fn apply_double_move(&mut self, dm: &DoubleMove) {
        self.apply_evader_leg(dm.first.ticket, dm.first.destination);
        {
            let evader = &mut self.players[EVADER];
            evader.remove_ticket(dm.second.ticket);
            evader.remove_ticket(TicketKind::Double);
        }

        // Announce the compound move before its legs, with both
        // destinations masked per the reveal schedule.
        let masked_first = self.masked_location();
        let masked_second = if self.schedule.is_reveal(self.current_round + 1) {
            dm.second.destination
        } else {
            masked_first
        };
        let announced = Move::double(
            dm.colour,
            TicketMove::new(dm.colour, dm.first.ticket, masked_first),
            TicketMove::new(dm.colour, dm.second.ticket, masked_second),
        );
        self.notify_move(&announced);

        self.complete_round(dm.first.ticket);

        let reveal = self.schedule.is_reveal(self.current_round);
        let evader = &mut self.players[EVADER];
        evader.set_location(dm.second.destination);
        if reveal {
            evader.reveal();
        }
        self.complete_round(dm.second.ticket);
    }

    /// Spend the ticket, move the evader, and publish the new location if
    /// the round being played is a reveal round.
    fn apply_evader_leg(&mut self, ticket: TicketKind, destination: Location) {
        let reveal = self.schedule.is_reveal(self.current_round);
        let evader = &mut self.players[EVADER];
        evader.remove_ticket(ticket);
        evader.set_location(destination);
        if reveal {
            evader.reveal();
        }
    }

    /// Close out one round of the evader's move: bump the counter, then
    /// report the round start and the masked move.
    fn complete_round(&mut self, ticket: TicketKind) {
        self.current_round += 1;
        let round = self.current_round;
        self.notify(|observer, view| observer.on_round_started(view, round));
        let masked = Move::single(Colour::EVADER, ticket, self.masked_location());
        self.notify(|observer, view| observer.on_move_made(view, &masked));
    }

    /// The publicly visible evader location.
    fn masked_location(&self) -> Location {
        self.players[EVADER]
            .last_revealed()
            .unwrap_or(Location::UNKNOWN)
    }

    // === Win conditions ===

    /// Does a win condition hold?
    ///
    /// Recomputed on demand; a previously declared `true` short-circuits.
    /// Mid-rotation this can run ahead of the machine: the result is only
    /// declared (and further moves rejected) at the rotation boundary.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over || self.compute_game_over()
    }

    /// Has the machine entered its terminal state?
    pub(crate) fn concluded(&self) -> bool {
        self.game_over
    }

    fn compute_game_over(&self) -> bool {
        self.current_round == self.schedule.len()
            || self.pursuers_stuck()
            || self.evader_stuck()
            || self.evader_captured()
    }

    /// The winning colour set; empty while the game is live.
    ///
    /// Capture and a stuck evader beat the round limit: pursuers win even
    /// when both conditions arise in the final round.
    #[must_use]
    pub fn winners(&self) -> FxHashSet<Colour> {
        let mut winners = FxHashSet::default();
        if self.evader_captured() || self.evader_stuck() {
            winners.extend(self.pursuers().map(PlayerState::colour));
        } else if self.current_round == self.schedule.len() || self.pursuers_stuck() {
            winners.insert(Colour::EVADER);
        }
        winners
    }

    fn evader_captured(&self) -> bool {
        let evader_location = self.players[EVADER].location();
        self.pursuers().any(|p| p.location() == evader_location)
    }

    fn evader_stuck(&self) -> bool {
        self.legal_moves(self.players[EVADER].colour()).is_empty()
    }

    /// Every pursuer out of single moves. Pass does not count: a side that
    /// can only pass forever has lost the chase.
    fn pursuers_stuck(&self) -> bool {
        self.pursuers()
            .all(|p| self.single_moves(p.colour(), p.location()).is_empty())
    }
}
