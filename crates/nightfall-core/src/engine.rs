//! Engine: the external interface of the night cycle.
//!
//! The [`Engine`] owns the role registry and configuration and drives a
//! [`GameState`] through its cycle:
//!
//! 1. **SETUP**: seat players, deal roles, reveal them
//! 2. **NIGHT**: `begin_night`, then `next_turn` / `record_turn_result` until
//!    no turn is left
//! 3. **RESOLVE**: `resolve_night` applies the accumulated effects
//! 4. **DAY**: `continue_to_day` checks for a winner and restores temporary
//!    effects; eliminations go through `eliminate_player`
//!
//! Every operation validates the phase first and leaves the state unchanged
//! when it returns an error.
//!
//! # Example
//!
//! ```
//! use nightfall_core::action::TurnOutcome;
//! use nightfall_core::engine::Engine;
//! use nightfall_core::role::RoleId;
//!
//! let engine = Engine::standard();
//! let mut game = engine.new_game(["Ada", "Brin", "Cole", "Dana"]);
//! let pool: Vec<RoleId> = ["werewolf", "seer", "villager", "villager"]
//!     .into_iter()
//!     .map(RoleId::from_static)
//!     .collect();
//! engine.deal_roles(&mut game, &pool, 42).unwrap();
//!
//! engine.begin_night(&mut game).unwrap();
//! while engine.next_turn(&mut game).is_some() {
//!     engine.record_turn_result(&mut game, TurnOutcome::Skipped).unwrap();
//! }
//! let summary = engine.resolve_night(&mut game).unwrap();
//! assert!(summary.died.is_empty());
//! ```

use tracing::{debug, info};

use crate::action::{TurnOutcome, TurnRecord};
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::game::{GameState, Phase};
use crate::grouping::AliasTable;
use crate::night::{NightContext, NightTurn};
use crate::player::{PlayerId, Roster};
use crate::resolver::{ActionResolver, DayOutcome, DayTransition, NightResolver, NightSummary};
use crate::role::{RoleDeclaration, RoleId, RoleRegistry};
use crate::scheduler::TurnScheduler;
use crate::setup;
use crate::win::{WinEvaluator, Winner};

/// Rules engine over a role registry.
#[derive(Debug, Clone)]
pub struct Engine {
    registry: RoleRegistry,
    config: EngineConfig,
}

impl Engine {
    /// Creates an engine over `registry`.
    #[must_use]
    pub fn new(registry: RoleRegistry, config: EngineConfig) -> Self {
        Self { registry, config }
    }

    /// Engine over the built-in roles with the default configuration.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(RoleRegistry::standard(), EngineConfig::default())
    }

    /// The role registry.
    #[must_use]
    pub fn registry(&self) -> &RoleRegistry {
        &self.registry
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // =========================================================================
    // Setup
    // =========================================================================

    /// Seats one player per name, all holding the fallback role until roles
    /// are dealt.
    #[must_use]
    pub fn new_game<I, S>(&self, names: I) -> GameState
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut roster = Roster::new();
        match self.registry.declaration(&self.config.fallback_role) {
            Some(fallback) => {
                for name in names {
                    roster.seat(name, fallback);
                }
            }
            None => {
                let placeholder =
                    RoleDeclaration::new(self.config.fallback_role.clone(), "unassigned");
                for name in names {
                    roster.seat(name, &placeholder);
                }
            }
        }
        GameState::new(roster)
    }

    /// Deals `pool` to the table with a seeded shuffle.
    ///
    /// # Errors
    ///
    /// Only allowed during [`Phase::Setup`].
    pub fn deal_roles(&self, state: &mut GameState, pool: &[RoleId], seed: u64) -> EngineResult<()> {
        require_phase(state, "deal_roles", &[Phase::Setup])?;
        setup::deal(state, &self.registry, pool, seed, &self.config.fallback_role);
        Ok(())
    }

    /// Gives one player a specific role.
    ///
    /// # Errors
    ///
    /// Only allowed during [`Phase::Setup`]; the player and role must exist.
    pub fn assign_role(
        &self,
        state: &mut GameState,
        player: PlayerId,
        role: &RoleId,
    ) -> EngineResult<()> {
        require_phase(state, "assign_role", &[Phase::Setup])?;
        let declaration = self
            .registry
            .declaration(role)
            .ok_or_else(|| EngineError::UnknownRole(role.clone()))?;
        let target = state
            .players
            .get_mut(player)
            .ok_or(EngineError::UnknownPlayer(player))?;
        target.assign_role(declaration);
        Ok(())
    }

    /// Next player to be shown their role, in seat order.
    ///
    /// # Errors
    ///
    /// Only allowed during [`Phase::Setup`].
    pub fn advance_reveal(&self, state: &mut GameState) -> EngineResult<Option<PlayerId>> {
        require_phase(state, "advance_reveal", &[Phase::Setup])?;
        Ok(setup::next_reveal(state))
    }

    // =========================================================================
    // Night
    // =========================================================================

    /// Starts the next night.
    ///
    /// Increments the night counter, snapshots the dead, re-homes unknown
    /// roles, rebuilds the alias table and clears last night's turn log.
    ///
    /// # Errors
    ///
    /// Allowed from [`Phase::Setup`] and [`Phase::Day`]. A finished game
    /// returns [`EngineError::GameOver`].
    pub fn begin_night(&self, state: &mut GameState) -> EngineResult<()> {
        if state.is_over() {
            return Err(EngineError::GameOver);
        }
        require_phase(state, "begin_night", &[Phase::Setup, Phase::Day])?;

        state.rehome_unknown_roles(&self.registry, &self.config);
        state.night += 1;
        state.dead_at_night_start = state.players.dead_ids();
        state.context = NightContext::default();
        state.completed_turns.clear();
        state.pending_turn = None;
        state.aliases = AliasTable::rebuild(state, &self.registry);
        state.phase = Phase::Night;

        info!(night = state.night, alive = state.players.alive().count(), "night started");
        Ok(())
    }

    /// The turn awaiting a result, scheduling one if needed. `None` once
    /// every role has been called, or outside the night.
    pub fn next_turn(&self, state: &mut GameState) -> Option<NightTurn> {
        if state.phase != Phase::Night {
            return None;
        }
        TurnScheduler::new(&self.registry).next_turn(state)
    }

    /// Records the outcome of the pending turn.
    ///
    /// # Errors
    ///
    /// Only allowed during [`Phase::Night`] with a turn pending.
    pub fn record_turn_result(
        &self,
        state: &mut GameState,
        outcome: TurnOutcome,
    ) -> EngineResult<TurnRecord> {
        require_phase(state, "record_turn_result", &[Phase::Night])?;
        ActionResolver::new(&self.registry).record(state, outcome)
    }

    /// Applies the night's effects.
    ///
    /// # Errors
    ///
    /// Only allowed during [`Phase::Night`] once every turn is recorded;
    /// otherwise [`EngineError::TurnPending`] names the waiting role.
    pub fn resolve_night(&self, state: &mut GameState) -> EngineResult<NightSummary> {
        require_phase(state, "resolve_night", &[Phase::Night])?;
        if let Some(turn) = &state.pending_turn {
            return Err(EngineError::TurnPending(turn.role_id.clone()));
        }
        if let Some(turn) = TurnScheduler::new(&self.registry).next_turn(state) {
            return Err(EngineError::TurnPending(turn.role_id));
        }

        let summary = NightResolver::new().resolve(state);
        state.summaries.push(summary.clone());
        state.phase = Phase::NightResolved;
        debug!(
            night = summary.night,
            died = summary.died.len(),
            saved = summary.saved.len(),
            "night resolved"
        );
        Ok(summary)
    }

    // =========================================================================
    // Day
    // =========================================================================

    /// Checks for a winner and moves into the next day.
    ///
    /// # Errors
    ///
    /// Only allowed during [`Phase::NightResolved`].
    pub fn continue_to_day(&self, state: &mut GameState) -> EngineResult<DayOutcome> {
        require_phase(state, "continue_to_day", &[Phase::NightResolved])?;
        Ok(DayTransition::new(&self.registry, &self.config).advance(state))
    }

    /// Evaluates victory without changing the state.
    #[must_use]
    pub fn evaluate_winner(&self, state: &GameState) -> Winner {
        WinEvaluator::new(&self.registry, &self.config).evaluate(state)
    }

    /// Eliminates a player outside the night, then checks for a winner.
    ///
    /// # Errors
    ///
    /// Fails if the game is over, the phase is not [`Phase::Day`], or the
    /// player is unknown or already dead.
    pub fn eliminate_player(&self, state: &mut GameState, player: PlayerId) -> EngineResult<Winner> {
        if state.is_over() {
            return Err(EngineError::GameOver);
        }
        require_phase(state, "eliminate_player", &[Phase::Day])?;
        match state.players.get(player) {
            None => return Err(EngineError::UnknownPlayer(player)),
            Some(target) if !target.is_alive() => return Err(EngineError::PlayerDead(player)),
            Some(_) => {}
        }
        state.players.set_alive(player, false);
        info!(player = %player, day = state.day, "player eliminated");

        let winner = WinEvaluator::new(&self.registry, &self.config).evaluate_elimination(state, player);
        if winner.is_decided() {
            info!(winner = ?winner, "game over");
            state.phase = Phase::GameOver;
            state.winner = Some(winner.clone());
        }
        Ok(winner)
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Serializes the state to JSON.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Serialization`] if serialization fails.
    pub fn save(&self, state: &GameState) -> EngineResult<String> {
        Ok(serde_json::to_string(state)?)
    }

    /// Restores a state from JSON and reconciles it with this engine's
    /// registry.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Serialization`] for malformed input.
    pub fn load(&self, json: &str) -> EngineResult<GameState> {
        let mut state: GameState = serde_json::from_str(json)?;
        state.reconcile(&self.registry, &self.config);
        Ok(state)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::standard()
    }
}

fn require_phase(state: &GameState, operation: &'static str, allowed: &[Phase]) -> EngineResult<()> {
    if allowed.contains(&state.phase) {
        Ok(())
    } else {
        Err(EngineError::InvalidPhase {
            operation,
            phase: state.phase,
        })
    }
}
