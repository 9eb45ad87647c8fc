//! A running game: state, dice, agents and the clock.
//!
//! `Session` is the single writer of its `GameState`. Hosts talk to it
//! through three calls:
//!
//! - `request_roll()`: a human clicked the die
//! - `request_move(piece)`: a human clicked a piece
//! - `snapshot()`: everything a renderer needs
//!
//! plus `advance(dt)` to let virtual time pass. Invalid requests are
//! ignored: they return `false`, leave the state untouched and only leave a
//! `tracing` debug line behind.
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use ludo_engine::core::{GameConfig, ScriptedDice};
//! use ludo_engine::Session;
//!
//! let mut session = Session::with_dice(GameConfig::new(), ScriptedDice::new([6]));
//!
//! assert!(session.request_roll());
//! assert!(session.snapshot().is_rolling);
//!
//! session.advance(Duration::from_millis(800));
//! let snapshot = session.snapshot();
//! assert_eq!(snapshot.dice_value.map(|d| d.value()), Some(6));
//! assert_eq!(snapshot.movable.len(), 4);
//! ```

mod snapshot;

use std::time::Duration;

use tracing::{debug, info, trace};

use crate::agent::{self, AgentMove, AgentPolicy, AgentStep, FirstEligible};
use crate::core::{Controller, Dice, GameConfig, GameRng, GameState, PieceId, Position};
use crate::rules::{self, MoveOutcome, RollOutcome, TurnError};
use crate::schedule::{ScheduledTask, SchedulerStats, TaskKind, TimerQueue};

pub use snapshot::{PieceView, SeatView, Snapshot};

/// A single game from start to finish.
pub struct Session {
    config: GameConfig,
    state: GameState,
    dice: Box<dyn Dice>,
    policy: Box<dyn AgentPolicy>,
    timers: TimerQueue,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("now", &self.timers.now())
            .field("pending", &self.timers.len())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Start a game with seeded dice and first-eligible agents.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let dice = GameRng::new(config.seed);
        Self::with_dice(config, dice)
    }

    /// Start a game with a custom dice source.
    #[must_use]
    pub fn with_dice(config: GameConfig, dice: impl Dice + 'static) -> Self {
        let mut session = Self {
            state: GameState::new(&config),
            config,
            dice: Box::new(dice),
            policy: Box::new(FirstEligible),
            timers: TimerQueue::new(),
        };
        session.schedule_agent();
        session
    }

    /// Replace the piece-selection policy used by agent seats.
    #[must_use]
    pub fn with_policy(mut self, policy: impl AgentPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    // === Reads ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The live state. Read-only; all writes go through the session.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Rendering view of the current state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_state(&self.state)
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    /// Tasks waiting on the clock (including ones that will turn out stale).
    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.timers.len()
    }

    pub fn scheduler_stats(&self) -> &SchedulerStats {
        self.timers.stats()
    }

    /// True when nothing will happen until a human acts.
    #[must_use]
    pub fn awaiting_human(&self) -> bool {
        !self.state.is_over()
            && self.state.current_controller() == Controller::Human
            && !self.state.is_rolling()
            && !self.state.forfeit_pending()
    }

    // === Input surface ===

    /// A human asks to roll. Ignored unless it is a human seat's turn, the
    /// die is idle and the game is running.
    pub fn request_roll(&mut self) -> bool {
        let result = self.human_turn().and_then(|()| self.start_roll());
        accepted("roll", result)
    }

    /// A human asks to move `piece` with the pending roll. Ignored unless
    /// the piece belongs to the current human seat and is movable.
    pub fn request_move(&mut self, piece: PieceId) -> bool {
        let result = self
            .human_turn()
            .and_then(|()| rules::apply_move(&mut self.state, piece));
        if let Ok(outcome) = result {
            self.after_move(outcome);
        }
        accepted("move", result)
    }

    /// Place a piece directly, bypassing the rules (scenario setup).
    ///
    /// Refused unless the current seat is waiting to roll; see
    /// [`GameState::place_piece`].
    pub fn place_piece(&mut self, piece: PieceId, position: Position) -> bool {
        self.state.place_piece(piece, position)
    }

    // === Time ===

    /// Let `dt` of virtual time pass, firing every task that comes due.
    ///
    /// Returns the number of tasks taken off the queue.
    pub fn advance(&mut self, dt: Duration) -> usize {
        let until = self.timers.now() + dt;
        let mut fired = 0;
        while let Some(task) = self.timers.pop_due(until) {
            self.fire(task);
            fired += 1;
        }
        self.timers.set_now(until);
        fired
    }

    /// Jump from task to task until a human must act, the game ends, the
    /// queue drains, or `max_tasks` tasks have fired.
    ///
    /// Returns the number of tasks taken off the queue.
    pub fn run_until_input(&mut self, max_tasks: usize) -> usize {
        let mut fired = 0;
        while fired < max_tasks && !self.state.is_over() && !self.awaiting_human() {
            let Some(due) = self.timers.next_due() else {
                break;
            };
            if let Some(task) = self.timers.pop_due(due) {
                self.fire(task);
                fired += 1;
            }
        }
        fired
    }

    // === Internals ===

    fn human_turn(&self) -> Result<(), TurnError> {
        if self.state.is_over() {
            return Err(TurnError::GameOver);
        }
        match self.state.current_controller() {
            Controller::Human => Ok(()),
            Controller::Agent => Err(TurnError::NotHumanTurn(self.state.current_turn())),
        }
    }

    fn start_roll(&mut self) -> Result<(), TurnError> {
        rules::begin_roll(&mut self.state)?;
        self.timers
            .schedule(TaskKind::ResolveRoll, self.state.token(), self.config.timings.roll);
        Ok(())
    }

    fn fire(&mut self, task: ScheduledTask) {
        let stale = !task.is_current(self.state.token());
        self.timers.note_fired(stale);
        if stale {
            trace!(kind = ?task.kind, "dropped stale task");
            return;
        }

        match task.kind {
            TaskKind::ResolveRoll => {
                let roll = self.dice.roll();
                match rules::resolve_roll(&mut self.state, roll) {
                    Ok(RollOutcome::NoMove) => {
                        debug!(color = %self.state.current_turn(), %roll, "no legal move");
                        self.timers.schedule(
                            TaskKind::AdvanceTurn,
                            self.state.token(),
                            self.config.timings.no_move_advance,
                        );
                    }
                    Ok(RollOutcome::CanMove(_)) => {}
                    Err(err) => debug!(%err, "roll not resolved"),
                }
            }
            TaskKind::AdvanceTurn => {
                if let Err(err) = rules::advance_turn(&mut self.state) {
                    debug!(%err, "turn not advanced");
                }
            }
            TaskKind::AgentRoll => {
                if let Err(err) = self.start_roll() {
                    debug!(%err, "agent roll refused");
                }
            }
            TaskKind::AgentMove => match agent::take_move(&mut self.state, self.policy.as_mut()) {
                Ok(AgentMove::Moved(outcome)) => self.after_move(outcome),
                Ok(AgentMove::Advanced) => debug!("agent had no movable piece"),
                Err(err) => debug!(%err, "agent move refused"),
            },
        }

        self.schedule_agent();
    }

    fn after_move(&mut self, outcome: MoveOutcome) {
        match outcome {
            MoveOutcome::Won(color) => {
                info!(%color, turn = self.state.turn_number(), "game won");
                self.timers.clear();
            }
            MoveOutcome::ExtraTurn(color) => trace!(%color, "extra turn"),
            MoveOutcome::Passed(color) => trace!(%color, "turn passed"),
        }
        self.schedule_agent();
    }

    /// Queue the current agent seat's next step, if it has one.
    fn schedule_agent(&mut self) {
        let Some(step) = agent::next_step(&self.state) else {
            return;
        };
        let kind = match step {
            AgentStep::Roll => TaskKind::AgentRoll,
            AgentStep::Move => TaskKind::AgentMove,
        };
        self.timers
            .schedule(kind, self.state.token(), self.config.timings.agent_decision);
    }
}

fn accepted<T>(request: &str, result: Result<T, TurnError>) -> bool {
    match result {
        Ok(_) => true,
        Err(err) => {
            debug!(request, %err, "request ignored");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Color, Phase, ScriptedDice, Timings};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_default_session_starts() {
        let session = Session::new(GameConfig::new());
        let snapshot = session.snapshot();

        assert_eq!(snapshot.log, vec!["Game started. Red's turn."]);
        assert!(session.awaiting_human());
    }

    #[test]
    fn test_stale_task_dropped() {
        let mut session = Session::with_dice(GameConfig::new(), ScriptedDice::new([6]));
        let old = session.state().token();
        assert!(session.request_roll());
        assert_ne!(session.state().token(), old);

        session
            .timers
            .schedule(TaskKind::AdvanceTurn, old, ms(100));
        let state = session.state().clone();
        let before = session.snapshot();

        assert_eq!(session.advance(ms(100)), 1);

        assert_eq!(session.scheduler_stats().stale, 1);
        assert_eq!(session.snapshot(), before);
        assert_eq!(session.state().history(), state.history());
        assert_eq!(session.state().log(), state.log());
        assert_eq!(session.state().current_turn(), Color::Red);
        assert!(session.state().is_rolling());

        // The live roll still lands on time.
        session.advance(ms(700));
        assert_eq!(session.state().phase(), Phase::Moving);
        assert_eq!(session.scheduler_stats().stale, 1);
    }

    #[test]
    fn test_place_piece_refused_while_moving() {
        let mut session = Session::with_dice(GameConfig::new(), ScriptedDice::new([6]));
        assert!(session.place_piece(PieceId::new(Color::Red, 1), Position::new(3).unwrap()));

        session.request_roll();
        session.advance(ms(800));
        assert!(!session.place_piece(PieceId::new(Color::Red, 0), Position::HOME));
        assert_eq!(session.snapshot().movable.len(), 4);
    }

    #[test]
    fn test_roll_resolves_after_delay() {
        let mut session = Session::with_dice(GameConfig::new(), ScriptedDice::new([6]));

        assert!(session.request_roll());
        assert!(!session.request_roll());

        session.advance(ms(799));
        assert!(session.state().is_rolling());
        assert_eq!(session.state().dice_value(), None);

        session.advance(ms(1));
        assert!(!session.state().is_rolling());
        assert_eq!(session.state().phase(), Phase::Moving);
    }

    #[test]
    fn test_agent_seat_ignores_human_requests() {
        let mut session = Session::new(GameConfig::all_agents());
        assert!(!session.request_roll());
        assert!(!session.request_move(PieceId::new(Color::Red, 0)));
    }

    #[test]
    fn test_agent_schedules_itself() {
        let session = Session::new(GameConfig::all_agents());
        assert_eq!(session.pending_tasks(), 1);
    }

    #[test]
    fn test_instant_timings_fire_in_one_advance() {
        let config = GameConfig::new().with_timings(Timings::instant());
        let mut session = Session::with_dice(config, ScriptedDice::new([6]));

        session.request_roll();
        session.advance(Duration::ZERO);

        assert_eq!(session.state().phase(), Phase::Moving);
    }
}
