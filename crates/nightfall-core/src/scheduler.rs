//! Night turn scheduling.
//!
//! The scheduler hands out one turn at a time. Every step recomputes the set
//! of roles still in play, because a resolved turn may have transformed a
//! player into a role that has not acted yet tonight.
//!
//! # Ordering
//!
//! Candidates are sorted by priority (ascending, `Unordered` last) and then
//! by role id. A role's priority is taken from its direct holders' role
//! state, falling back to the declaration.
//!
//! # Passive roles
//!
//! Roles whose declared night mode is `Never` are never handed out. When the
//! scheduler reaches one, it runs the role's passive effect for each living
//! actor, marks the role called, logs a [`TurnStatus::Passive`] record so the
//! role's `restore` still runs at daybreak, and moves on.

use tracing::{debug, warn};

use crate::action::{TurnRecord, TurnStatus};
use crate::constraint::ConstraintEvaluator;
use crate::game::GameState;
use crate::night::NightTurn;
use crate::player::{NightMode, PlayerId};
use crate::role::{NightScope, RoleId, RoleRegistry};

/// Picks the next night turn.
#[derive(Debug, Clone, Copy)]
pub struct TurnScheduler<'a> {
    registry: &'a RoleRegistry,
}

impl<'a> TurnScheduler<'a> {
    /// Creates a scheduler over `registry`.
    #[must_use]
    pub fn new(registry: &'a RoleRegistry) -> Self {
        Self { registry }
    }

    /// Returns the turn awaiting a result, scheduling a new one if none is
    /// pending. `None` means every role has been called tonight.
    ///
    /// Calling this again before the turn's result is recorded returns the
    /// same turn.
    pub fn next_turn(&self, state: &mut GameState) -> Option<NightTurn> {
        if let Some(turn) = &state.pending_turn {
            return Some(turn.clone());
        }

        loop {
            let (role_id, actor_ids) = self.pick(state)?;
            let declaration = self.registry.declaration(&role_id)?;

            if declaration.night_mode == NightMode::Never {
                self.run_passive(state, &role_id, &actor_ids);
                state.context.mark_called(role_id.clone());
                state.completed_turns.push(TurnRecord {
                    role_id,
                    actor_ids,
                    status: TurnStatus::Passive,
                });
                continue;
            }

            let actors: Vec<_> = actor_ids
                .iter()
                .filter_map(|id| state.players.get(*id))
                .collect();
            let blocked =
                ConstraintEvaluator::new(&state.ledger, state.night).evaluate(declaration, &actors);

            let turn = NightTurn {
                role_id,
                actor_ids,
                required: declaration.usage.required,
                blocked,
            };
            debug!(
                night = state.night,
                role = %turn.role_id,
                actors = turn.actor_ids.len(),
                blocked = ?turn.blocked,
                "turn scheduled"
            );
            state.pending_turn = Some(turn.clone());
            return Some(turn);
        }
    }

    /// Returns true if no turn is pending and no role is left to call.
    ///
    /// Unlike [`TurnScheduler::next_turn`] this does not run passive effects.
    #[must_use]
    pub fn is_exhausted(&self, state: &GameState) -> bool {
        state.pending_turn.is_none() && self.pick(state).is_none()
    }

    /// The uncalled, registered role with the lowest (priority, id) that has
    /// at least one actor, with its actors. Roles that only exist as the
    /// `from` side of an alias pair are candidates too, so aliased players
    /// still act when no direct holder is left.
    fn pick(&self, state: &GameState) -> Option<(RoleId, Vec<PlayerId>)> {
        let mut candidates = state.players.role_ids();
        candidates.extend(state.aliases.pairs().iter().map(|pair| pair.from.clone()));

        candidates
            .into_iter()
            .filter(|id| !state.context.is_called(id))
            .filter_map(|id| {
                let declaration = self.registry.declaration(&id)?;
                let actors = state.aliases.actors_for(&id, &state.players);
                if actors.is_empty() {
                    return None;
                }
                let priority = actors
                    .iter()
                    .filter(|p| p.role_id() == &id)
                    .map(|p| p.state().priority)
                    .min()
                    .unwrap_or(declaration.priority);
                let ids = actors.iter().map(|p| p.id()).collect();
                Some(((priority, id), ids))
            })
            .min_by(|(a, _), (b, _)| a.cmp(b))
            .map(|((_, id), ids)| (id, ids))
    }

    fn run_passive(&self, state: &mut GameState, role_id: &RoleId, actor_ids: &[PlayerId]) {
        let Some(role) = self.registry.get(role_id).cloned() else {
            return;
        };
        let living: Vec<PlayerId> = actor_ids
            .iter()
            .copied()
            .filter(|id| state.players.get(*id).is_some_and(|p| p.is_alive()))
            .collect();

        let mut scope = NightScope::new(
            state.night,
            &mut state.players,
            &mut state.context,
            self.registry,
        );
        for player in living {
            if let Err(err) = role.passive_effect(&mut scope, player) {
                warn!(role = %role_id, player = %player, error = %err, "passive effect failed");
            }
        }
        debug!(role = %role_id, "passive role called");
    }
}
