//! Resolver for a single recorded turn.
//!
//! # Processing Order
//!
//! 1. `Skipped` and `Blocked` outcomes are logged as such
//! 2. The constraint gate is re-run; a late block wins over the payload
//! 3. The payload is sanitized, then checked for meaningful content
//! 4. A used turn is counted in the ledger for every actor under their limit
//!    and handed to the role's `resolve` hook
//! 5. The role is marked called and the turn is appended to the log

use tracing::{debug, warn};

use crate::action::{HistoryEntry, NightAction, TurnOutcome, TurnPayload, TurnRecord, TurnStatus};
use crate::constraint::{BlockReason, ConstraintEvaluator};
use crate::error::{EngineError, EngineResult};
use crate::game::GameState;
use crate::night::NightTurn;
use crate::player::RoleCapabilities;
use crate::role::{NightScope, RoleRegistry};

/// Applies the result of the pending night turn.
#[derive(Debug, Clone, Copy)]
pub struct ActionResolver<'a> {
    registry: &'a RoleRegistry,
}

impl<'a> ActionResolver<'a> {
    /// Creates a resolver over `registry`.
    #[must_use]
    pub fn new(registry: &'a RoleRegistry) -> Self {
        Self { registry }
    }

    /// Records `outcome` for the pending turn.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoPendingTurn`] if no turn is awaiting a result.
    pub fn record(&self, state: &mut GameState, outcome: TurnOutcome) -> EngineResult<TurnRecord> {
        let turn = state.pending_turn.take().ok_or(EngineError::NoPendingTurn)?;

        let status = match outcome {
            TurnOutcome::Skipped => TurnStatus::Skipped,
            TurnOutcome::Blocked => TurnStatus::Blocked(BlockReason::Blocked),
            TurnOutcome::Acted(payload) => self.apply(state, &turn, payload),
        };

        state.context.mark_called(turn.role_id.clone());
        let record = TurnRecord {
            role_id: turn.role_id,
            actor_ids: turn.actor_ids,
            status,
        };
        debug!(night = state.night, role = %record.role_id, status = %record.status, "turn recorded");
        state.completed_turns.push(record.clone());
        Ok(record)
    }

    fn apply(&self, state: &mut GameState, turn: &NightTurn, mut payload: TurnPayload) -> TurnStatus {
        let Some(role) = self.registry.get(&turn.role_id).cloned() else {
            warn!(role = %turn.role_id, "role vanished from the registry; turn skipped");
            return TurnStatus::Skipped;
        };
        let declaration = role.declaration();

        let actors: Vec<_> = turn
            .actor_ids
            .iter()
            .filter_map(|id| state.players.get(*id))
            .collect();
        if let Some(reason) =
            ConstraintEvaluator::new(&state.ledger, state.night).evaluate(declaration, &actors)
        {
            return TurnStatus::Blocked(reason);
        }

        let capabilities = actors
            .iter()
            .filter(|p| p.role_id() == &turn.role_id)
            .fold(declaration.capabilities, |caps, p| caps | p.state().capabilities);
        sanitize(state, turn, capabilities, &mut payload);
        if !payload.is_meaningful() {
            return TurnStatus::Skipped;
        }

        // Actors already at their limit act along with the group but are not
        // counted again.
        for id in &turn.actor_ids {
            if let Some(player) = state.players.get(*id) {
                let uses = state.ledger.uses(player.role_id(), *id);
                if !player.state().usage.limit.is_reached(uses) {
                    state.ledger.record(player.role_id(), *id);
                }
            }
        }

        let action = NightAction {
            night: state.night,
            role_id: turn.role_id.clone(),
            actor_ids: turn.actor_ids.clone(),
            payload,
        };
        let mut scope = NightScope::new(
            state.night,
            &mut state.players,
            &mut state.context,
            self.registry,
        );
        let entry = match role.resolve(&mut scope, &action) {
            Ok(Some(entry)) => entry,
            Ok(None) => HistoryEntry::generic(&action),
            Err(err) => {
                warn!(role = %action.role_id, error = %err, "resolve failed");
                HistoryEntry::generic(&action)
            }
        };
        state.history.push(entry);
        TurnStatus::Used
    }
}

/// Drops targets that are unknown, dead or the actors themselves, unless the
/// role's capabilities allow them.
fn sanitize(
    state: &GameState,
    turn: &NightTurn,
    capabilities: RoleCapabilities,
    payload: &mut TurnPayload,
) {
    payload.retain_targets(|id| {
        let Some(player) = state.players.get(id) else {
            warn!(role = %turn.role_id, target = %id, "unknown target dropped");
            return false;
        };
        if !player.is_alive() && !capabilities.contains(RoleCapabilities::CAN_TARGET_DEAD) {
            debug!(role = %turn.role_id, target = %id, "dead target dropped");
            return false;
        }
        if turn.actor_ids.contains(&id) && !capabilities.contains(RoleCapabilities::CAN_TARGET_SELF)
        {
            debug!(role = %turn.role_id, target = %id, "self target dropped");
            return false;
        }
        true
    });
}
