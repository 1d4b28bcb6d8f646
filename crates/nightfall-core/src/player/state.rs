//! Per-player role state.
//!
//! A [`RoleState`] is copied from a [`RoleDeclaration`] when a player is
//! given a role (at reveal, or when another role transforms them). From then
//! on it diverges from the declaration: effects may block the player for a
//! night, disguise their visible faction, and so on.

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::role::{FactionId, RoleDeclaration, RoleId};

// =============================================================================
// Night Mode
// =============================================================================

/// When a role may act during the night.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NightMode {
    /// Acts whether alive or dead.
    Always,
    /// Acts only while at least one actor is alive.
    AliveOnly,
    /// Acts only once at least one actor is dead.
    DeadOnly,
    /// Never prompts; only its passive effect runs.
    Never,
    /// Temporarily prevented from acting by another role's effect.
    Blocked,
}

impl fmt::Display for NightMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Always => write!(f, "always"),
            Self::AliveOnly => write!(f, "alive-only"),
            Self::DeadOnly => write!(f, "dead-only"),
            Self::Never => write!(f, "never"),
            Self::Blocked => write!(f, "blocked"),
        }
    }
}

// =============================================================================
// Priority
// =============================================================================

/// Scheduling priority of a role.
///
/// Lower ordered values act first; `Unordered` roles act after every ordered
/// one. The derived ordering encodes exactly that.
///
/// ```
/// use nightfall_core::player::state::Priority;
///
/// assert!(Priority::Ordered(1) < Priority::Ordered(10));
/// assert!(Priority::Ordered(i32::MAX) < Priority::Unordered);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    /// Scheduled by ascending value.
    Ordered(i32),
    /// Scheduled after all ordered roles.
    Unordered,
}

// =============================================================================
// Usage Policy
// =============================================================================

/// How many times a player may use a role's power over the whole game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UseLimit {
    /// No limit.
    Unlimited,
    /// At most this many confirmed uses.
    Times(u32),
}

impl UseLimit {
    /// Returns true if `uses` confirmed uses exhaust this limit.
    #[must_use]
    pub const fn is_reached(self, uses: u32) -> bool {
        match self {
            Self::Unlimited => false,
            Self::Times(limit) => uses >= limit,
        }
    }

    /// Returns true if the limit is [`UseLimit::Unlimited`].
    #[must_use]
    pub const fn is_unlimited(self) -> bool {
        matches!(self, Self::Unlimited)
    }
}

/// Usage policy of a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UsagePolicy {
    /// The presentation layer should not offer a "skip" choice.
    pub required: bool,
    /// Use-count limit.
    pub limit: UseLimit,
}

impl UsagePolicy {
    /// Optional, unlimited use.
    pub const UNLIMITED: Self = Self {
        required: false,
        limit: UseLimit::Unlimited,
    };

    /// Required, unlimited use.
    pub const REQUIRED: Self = Self {
        required: true,
        limit: UseLimit::Unlimited,
    };

    /// Optional use, at most `times` times per game.
    #[must_use]
    pub const fn limited(times: u32) -> Self {
        Self {
            required: false,
            limit: UseLimit::Times(times),
        }
    }
}

impl Default for UsagePolicy {
    fn default() -> Self {
        Self::UNLIMITED
    }
}

// =============================================================================
// Capabilities
// =============================================================================

bitflags! {
    /// Capability flags carried by a role.
    ///
    /// These widen which targets an action may name; targets outside them
    /// are dropped before the role sees the action.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct RoleCapabilities: u8 {
        /// May target dead players.
        const CAN_TARGET_DEAD = 1 << 0;
        /// May target the acting player themself.
        const CAN_TARGET_SELF = 1 << 1;
    }
}

// =============================================================================
// Role State
// =============================================================================

/// Mutable per-player snapshot of a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleState {
    /// Faction other roles see when they inspect this player.
    pub visible_faction: FactionId,
    /// Current night eligibility.
    pub night_mode: NightMode,
    /// Actual faction; changes only on transformation.
    pub real_faction: FactionId,
    /// Faction credited when this player's side wins.
    pub win_faction: FactionId,
    /// Scheduling priority.
    pub priority: Priority,
    /// Usage policy.
    pub usage: UsagePolicy,
    /// Earliest night on which the player may act.
    pub start_night: u32,
    /// Target capabilities.
    pub capabilities: RoleCapabilities,
    /// Roles this player's power interacts with (e.g. kills a protector cancels).
    pub affected_roles: Vec<RoleId>,
}

impl RoleState {
    /// Snapshots a declaration.
    #[must_use]
    pub fn from_declaration(declaration: &RoleDeclaration) -> Self {
        Self {
            visible_faction: declaration.visible_faction.clone(),
            night_mode: declaration.night_mode,
            real_faction: declaration.faction.clone(),
            win_faction: declaration.win_faction.clone(),
            priority: declaration.priority,
            usage: declaration.usage,
            start_night: declaration.start_night,
            capabilities: declaration.capabilities,
            affected_roles: declaration.affected_roles.clone(),
        }
    }

    /// Returns true if this player is blocked from acting.
    #[must_use]
    pub fn is_blocked(&self) -> bool {
        self.night_mode == NightMode::Blocked
    }

    /// Puts the night mode back to the declared value.
    pub fn reset_night_mode(&mut self, declaration: &RoleDeclaration) {
        self.night_mode = declaration.night_mode;
    }

    /// Puts the visible faction back to the declared value.
    pub fn reset_visible_faction(&mut self, declaration: &RoleDeclaration) {
        self.visible_faction = declaration.visible_faction.clone();
    }

    /// Returns true if the player may name dead players as targets.
    #[must_use]
    pub fn can_target_dead(&self) -> bool {
        self.capabilities.contains(RoleCapabilities::CAN_TARGET_DEAD)
    }

    /// Returns true if the player may name themself as a target.
    #[must_use]
    pub fn can_target_self(&self) -> bool {
        self.capabilities.contains(RoleCapabilities::CAN_TARGET_SELF)
    }
}
