//! Night accumulator and turn descriptors.
//!
//! The [`NightContext`] is the only place role hooks write night effects to.
//! Nothing in it changes a life flag; the night resolver reads it once every
//! turn is done and applies the result in one pass.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::constraint::BlockReason;
use crate::player::PlayerId;
use crate::role::{FactionId, RoleId};

// =============================================================================
// Records
// =============================================================================

/// A kill proposed during the night.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingKill {
    /// Role that proposed it.
    pub source: RoleId,
    /// Whether protective roles may remove it.
    pub cancelable: bool,
}

/// A protective action that removed at least one pending kill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveRecord {
    /// Protecting player.
    pub actor: PlayerId,
    /// Protected player.
    pub target: PlayerId,
    /// Sources of the kills that were removed.
    pub canceled_roles: Vec<RoleId>,
}

/// Result of an inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRecord {
    /// Inspecting player.
    pub actor: PlayerId,
    /// Inspected player.
    pub target: PlayerId,
    /// Faction the target appeared to belong to.
    pub faction: FactionId,
}

/// A proposed return from the dead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revival {
    /// Reviving player.
    pub actor: PlayerId,
    /// Player to bring back.
    pub target: PlayerId,
}

// =============================================================================
// Night Context
// =============================================================================

/// Everything roles accumulated during the current night.
///
/// ```
/// use nightfall_core::night::NightContext;
/// use nightfall_core::player::PlayerId;
/// use nightfall_core::role::RoleId;
///
/// let mut context = NightContext::default();
/// let victim = PlayerId::new(3);
/// context.add_kill(victim, RoleId::from_static("werewolf"), true);
///
/// let canceled = context.cancel_kills(victim, &[RoleId::from_static("werewolf")]);
/// assert_eq!(canceled, vec![RoleId::from_static("werewolf")]);
/// assert!(context.kills_on(victim).is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NightContext {
    /// Pending kills per target.
    pub pending_kills: BTreeMap<PlayerId, Vec<PendingKill>>,
    /// Protective actions.
    pub saves: Vec<SaveRecord>,
    /// Inspection results.
    pub checks: Vec<CheckRecord>,
    /// Proposed revivals.
    pub revivals: Vec<Revival>,
    /// Roles whose turn already happened tonight.
    pub called_roles: BTreeSet<RoleId>,
}

impl NightContext {
    /// Proposes a kill on `target`.
    pub fn add_kill(&mut self, target: PlayerId, source: RoleId, cancelable: bool) {
        self.pending_kills
            .entry(target)
            .or_default()
            .push(PendingKill { source, cancelable });
    }

    /// Removes cancelable kills on `target` whose source is in `sources`.
    ///
    /// An empty `sources` slice removes every cancelable kill. Returns the
    /// sources that were removed.
    pub fn cancel_kills(&mut self, target: PlayerId, sources: &[RoleId]) -> Vec<RoleId> {
        let Some(kills) = self.pending_kills.get_mut(&target) else {
            return Vec::new();
        };

        let mut canceled = Vec::new();
        kills.retain(|kill| {
            let matches = sources.is_empty() || sources.contains(&kill.source);
            if kill.cancelable && matches {
                canceled.push(kill.source.clone());
                false
            } else {
                true
            }
        });

        if kills.is_empty() {
            self.pending_kills.remove(&target);
        }
        canceled
    }

    /// Pending kills on `target`.
    #[must_use]
    pub fn kills_on(&self, target: PlayerId) -> &[PendingKill] {
        self.pending_kills.get(&target).map_or(&[], Vec::as_slice)
    }

    /// Records a save.
    pub fn add_save(&mut self, actor: PlayerId, target: PlayerId, canceled_roles: Vec<RoleId>) {
        self.saves.push(SaveRecord {
            actor,
            target,
            canceled_roles,
        });
    }

    /// Records an inspection.
    pub fn add_check(&mut self, actor: PlayerId, target: PlayerId, faction: FactionId) {
        self.checks.push(CheckRecord {
            actor,
            target,
            faction,
        });
    }

    /// Proposes bringing `target` back.
    pub fn add_revival(&mut self, actor: PlayerId, target: PlayerId) {
        self.revivals.push(Revival { actor, target });
    }

    /// Marks a role as called. Returns false if it already was.
    pub fn mark_called(&mut self, role: RoleId) -> bool {
        self.called_roles.insert(role)
    }

    /// Returns true if the role's turn already happened tonight.
    #[must_use]
    pub fn is_called(&self, role: &RoleId) -> bool {
        self.called_roles.contains(role)
    }
}

// =============================================================================
// Night Turn
// =============================================================================

/// One scheduled night turn, handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightTurn {
    /// Role whose turn it is.
    pub role_id: RoleId,
    /// Players acting together, direct holders first.
    pub actor_ids: Vec<PlayerId>,
    /// Whether the actors must act.
    pub required: bool,
    /// Set if the group cannot act; the turn is still shown so that the
    /// table cannot infer who holds the role.
    pub blocked: Option<BlockReason>,
}

impl NightTurn {
    /// Returns true if the actors may act.
    #[must_use]
    pub fn can_act(&self) -> bool {
        self.blocked.is_none()
    }
}
