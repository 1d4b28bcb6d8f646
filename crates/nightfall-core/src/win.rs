//! Victory evaluation.
//!
//! Evaluation runs in two passes over the living players:
//!
//! 1. **Veto**: if any living player's role reports
//!    [`check_win_constraint`](crate::role::Role::check_win_constraint), no
//!    one wins this time, whatever the other roles say.
//! 2. **Declare**: every living player's role may report
//!    [`check_win`](crate::role::Role::check_win); the player's win faction is
//!    then credited.
//!
//! An empty table is a tie.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::game::GameState;
use crate::player::{Player, PlayerId};
use crate::role::{FactionId, RoleRegistry};

/// Result of a victory evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    /// The game goes on.
    None,
    /// One faction won.
    Faction(FactionId),
    /// Several factions won together.
    Factions(Vec<FactionId>),
    /// Nobody is left alive.
    Tie,
}

impl Winner {
    /// Returns true if the game ends with this result.
    #[must_use]
    pub fn is_decided(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Factions credited with the win.
    #[must_use]
    pub fn factions(&self) -> &[FactionId] {
        match self {
            Self::Faction(faction) => std::slice::from_ref(faction),
            Self::Factions(factions) => factions,
            Self::None | Self::Tie => &[],
        }
    }
}

/// Evaluates victory against a registry and configuration.
#[derive(Debug, Clone, Copy)]
pub struct WinEvaluator<'a> {
    registry: &'a RoleRegistry,
    config: &'a EngineConfig,
}

impl<'a> WinEvaluator<'a> {
    /// Creates an evaluator.
    #[must_use]
    pub fn new(registry: &'a RoleRegistry, config: &'a EngineConfig) -> Self {
        Self { registry, config }
    }

    /// Runs the veto and declare passes.
    #[must_use]
    pub fn evaluate(&self, state: &GameState) -> Winner {
        let alive: Vec<&Player> = state.players().alive().collect();
        if alive.is_empty() {
            info!("nobody left alive; tie");
            return Winner::Tie;
        }

        for player in &alive {
            let Some(role) = self.registry.get(player.role_id()) else {
                continue;
            };
            if role.check_win_constraint(state) {
                debug!(player = %player.id(), role = %player.role_id(), "victory vetoed");
                return Winner::None;
            }
        }

        let mut declared: Vec<FactionId> = Vec::new();
        for player in &alive {
            let Some(role) = self.registry.get(player.role_id()) else {
                continue;
            };
            let faction = &player.state().win_faction;
            if role.check_win(state) && !declared.contains(faction) {
                declared.push(faction.clone());
            }
        }

        let winner = match declared.len() {
            0 => self.fallback(&alive),
            1 => Winner::Faction(declared.remove(0)),
            _ if self.config.simultaneous_wins => Winner::Factions(declared),
            _ => Winner::Faction(declared.remove(0)),
        };
        if winner.is_decided() {
            info!(winner = ?winner, "victory declared");
        }
        winner
    }

    /// Checks the eliminated player's role for an instant win before the
    /// regular evaluation. An instant win skips the veto pass.
    #[must_use]
    pub fn evaluate_elimination(&self, state: &GameState, eliminated: PlayerId) -> Winner {
        let instant = state.players().get(eliminated).and_then(|player| {
            let role = self.registry.get(player.role_id())?;
            role.wins_on_elimination(state, eliminated)
                .then(|| player.state().win_faction.clone())
        });

        match instant {
            Some(faction) => {
                info!(player = %eliminated, faction = %faction, "instant victory on elimination");
                Winner::Faction(faction)
            }
            None => self.evaluate(state),
        }
    }

    /// All living players share exactly one win faction.
    fn fallback(&self, alive: &[&Player]) -> Winner {
        if !self.config.fallback_win_check {
            return Winner::None;
        }
        let first = &alive[0].state().win_faction;
        if alive.iter().all(|p| &p.state().win_faction == first) {
            Winner::Faction(first.clone())
        } else {
            Winner::None
        }
    }
}
