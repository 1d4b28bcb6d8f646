//! End-of-night resolver.
//!
//! Consumes the night's [`NightContext`](crate::night::NightContext) and
//! applies it to the roster in one pass:
//!
//! 1. revivals bring dead targets back
//! 2. every target with at least one remaining pending kill dies, once
//! 3. saves and inspections are copied into the summary
//! 4. players dead at nightfall and alive now are reported as resurrected

use std::mem;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::game::GameState;
use crate::night::CheckRecord;
use crate::player::PlayerId;

/// Immutable outcome of one night.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightSummary {
    /// Night number.
    pub night: u32,
    /// Players who died, in id order.
    pub died: Vec<PlayerId>,
    /// Players whose pending kills were cancelled and who survived.
    pub saved: Vec<PlayerId>,
    /// Players who were dead at nightfall and are alive again.
    pub resurrected: Vec<PlayerId>,
    /// Inspection results.
    pub checks: Vec<CheckRecord>,
}

impl NightSummary {
    /// Returns true if nobody died, was saved or came back.
    #[must_use]
    pub fn is_quiet(&self) -> bool {
        self.died.is_empty() && self.saved.is_empty() && self.resurrected.is_empty()
    }
}

/// Applies accumulated night effects.
#[derive(Debug, Clone, Copy, Default)]
pub struct NightResolver;

impl NightResolver {
    /// Creates a new night resolver.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Applies the night's context and returns its summary. The context is
    /// discarded afterwards.
    pub fn resolve(&self, state: &mut GameState) -> NightSummary {
        let context = mem::take(&mut state.context);

        for revival in &context.revivals {
            let is_dead = state
                .players
                .get(revival.target)
                .is_some_and(|p| !p.is_alive());
            if is_dead {
                state.players.set_alive(revival.target, true);
                info!(night = state.night, player = %revival.target, actor = %revival.actor, "player revived");
            }
        }

        let mut died = Vec::new();
        for (target, kills) in &context.pending_kills {
            if kills.is_empty() {
                continue;
            }
            let is_alive = state.players.get(*target).is_some_and(|p| p.is_alive());
            if is_alive {
                state.players.set_alive(*target, false);
                info!(
                    night = state.night,
                    player = %target,
                    sources = ?kills.iter().map(|k| k.source.as_str()).collect::<Vec<_>>(),
                    "player died"
                );
                died.push(*target);
            }
        }

        let mut saved = Vec::new();
        for save in &context.saves {
            if !died.contains(&save.target) && !saved.contains(&save.target) {
                saved.push(save.target);
            }
        }

        let resurrected = state
            .dead_at_night_start
            .iter()
            .copied()
            .filter(|id| state.players.get(*id).is_some_and(|p| p.is_alive()))
            .collect();

        NightSummary {
            night: state.night,
            died,
            saved,
            resurrected,
            checks: context.checks,
        }
    }
}
