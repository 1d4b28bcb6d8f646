//! Eligibility gate for night turns.
//!
//! Given a role and its actor set (direct holders plus aliased players), the
//! [`ConstraintEvaluator`] decides whether the group may act tonight. Checks
//! run in a fixed order and stop at the first match:
//!
//! 1. every living actor is blocked → [`BlockReason::Blocked`]
//! 2. alive-only role, no living actor → [`BlockReason::Dead`]
//! 3. dead-only role, no dead actor → [`BlockReason::Alive`]
//! 4. limited role, every actor exhausted their own limit → [`BlockReason::UsageLimit`]
//! 5. every actor's first night is still ahead → [`BlockReason::StartNight`]
//!
//! Usage is always counted under each actor's *current* role, so a
//! transformed player is judged by the role they hold now.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ledger::UsageLedger;
use crate::player::{NightMode, Player};
use crate::role::RoleDeclaration;

/// Why a group may not act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockReason {
    /// Every living actor is blocked by an effect.
    Blocked,
    /// The role needs living actors and none is alive.
    Dead,
    /// The role needs dead actors and none is dead.
    Alive,
    /// Every actor has used up their uses.
    UsageLimit,
    /// The role's first night has not come yet for any actor.
    StartNight,
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blocked => write!(f, "blocked"),
            Self::Dead => write!(f, "dead"),
            Self::Alive => write!(f, "alive"),
            Self::UsageLimit => write!(f, "usage limit"),
            Self::StartNight => write!(f, "start night"),
        }
    }
}

/// Evaluates night eligibility against the ledger for a given night.
#[derive(Debug, Clone, Copy)]
pub struct ConstraintEvaluator<'a> {
    ledger: &'a UsageLedger,
    night: u32,
}

impl<'a> ConstraintEvaluator<'a> {
    /// Creates an evaluator for `night`.
    #[must_use]
    pub fn new(ledger: &'a UsageLedger, night: u32) -> Self {
        Self { ledger, night }
    }

    /// Returns `None` if the group may act, or the first blocking reason.
    #[must_use]
    pub fn evaluate(&self, role: &RoleDeclaration, actors: &[&Player]) -> Option<BlockReason> {
        let mut living = actors.iter().filter(|p| p.is_alive()).peekable();
        if living.peek().is_some() && living.all(|p| p.state().is_blocked()) {
            return Some(BlockReason::Blocked);
        }

        match role.night_mode {
            NightMode::AliveOnly if !actors.iter().any(|p| p.is_alive()) => {
                return Some(BlockReason::Dead);
            }
            NightMode::DeadOnly if actors.iter().all(|p| p.is_alive()) => {
                return Some(BlockReason::Alive);
            }
            _ => {}
        }

        if actors.is_empty() {
            return None;
        }

        if !role.usage.limit.is_unlimited() && actors.iter().all(|p| self.exhausted(p)) {
            return Some(BlockReason::UsageLimit);
        }

        if actors.iter().all(|p| p.state().start_night > self.night) {
            return Some(BlockReason::StartNight);
        }

        None
    }

    /// Looser check: true if at least one single actor could act on their own.
    #[must_use]
    pub fn can_any_act(&self, role: &RoleDeclaration, actors: &[&Player]) -> bool {
        actors.iter().any(|actor| {
            let life_ok = match role.night_mode {
                NightMode::Always => true,
                NightMode::AliveOnly => actor.is_alive(),
                NightMode::DeadOnly => !actor.is_alive(),
                NightMode::Never | NightMode::Blocked => false,
            };
            let usage_ok = role.usage.limit.is_unlimited() || !self.exhausted(actor);
            life_ok
                && usage_ok
                && !(actor.is_alive() && actor.state().is_blocked())
                && actor.state().start_night <= self.night
        })
    }

    /// True if the player reached the limit of the role they currently hold.
    fn exhausted(&self, player: &Player) -> bool {
        let uses = self.ledger.uses(player.role_id(), player.id());
        player.state().usage.limit.is_reached(uses)
    }
}
