//! Day transition.
//!
//! Victory is checked before anything else; a decided game never reaches the
//! restore step. Otherwise every role that had a turn tonight gets its
//! `restore` hook called, last turn first, so effects unwind in the reverse
//! of the order they were applied.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::game::{GameState, Phase};
use crate::role::{DayScope, RoleRegistry};
use crate::win::{WinEvaluator, Winner};

/// What happened at daybreak.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayOutcome {
    /// The game goes on with this day.
    Continue {
        /// The new day number.
        day: u32,
    },
    /// A winner was declared.
    GameOver(Winner),
}

/// Moves a resolved night into the next day.
#[derive(Debug, Clone, Copy)]
pub struct DayTransition<'a> {
    registry: &'a RoleRegistry,
    config: &'a EngineConfig,
}

impl<'a> DayTransition<'a> {
    /// Creates a transition over `registry` and `config`.
    #[must_use]
    pub fn new(registry: &'a RoleRegistry, config: &'a EngineConfig) -> Self {
        Self { registry, config }
    }

    /// Checks for a winner, then restores and advances the day.
    pub fn advance(&self, state: &mut GameState) -> DayOutcome {
        let winner = WinEvaluator::new(self.registry, self.config).evaluate(state);
        if winner.is_decided() {
            info!(night = state.night, winner = ?winner, "game over");
            state.phase = Phase::GameOver;
            state.winner = Some(winner.clone());
            return DayOutcome::GameOver(winner);
        }

        let day = state.day + 1;
        let roles: Vec<_> = state
            .completed_turns
            .iter()
            .rev()
            .map(|record| record.role_id.clone())
            .collect();
        let mut scope = DayScope::new(day, &mut state.players, self.registry);
        for role_id in roles {
            let Some(role) = self.registry.get(&role_id) else {
                continue;
            };
            if let Err(err) = role.restore(&mut scope) {
                warn!(role = %role_id, error = %err, "restore failed");
            }
        }

        state.day = day;
        state.phase = Phase::Day;
        info!(day, "day started");
        DayOutcome::Continue { day }
    }
}
