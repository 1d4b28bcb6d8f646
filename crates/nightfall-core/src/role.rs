//! Role plugin system.
//!
//! Every role is a plugin: a [`RoleDeclaration`] describing its static data
//! plus a set of optional behavior hooks on the [`Role`] trait. The engine
//! never matches on concrete roles; it only calls hooks through the
//! [`RoleRegistry`].
//!
//! # Hooks
//!
//! | Hook | When | Access |
//! |------|------|--------|
//! | [`Role::resolve`] | a turn was recorded as used | [`NightScope`] |
//! | [`Role::passive_effect`] | a `Never` role is reached by the scheduler | [`NightScope`] |
//! | [`Role::restore`] | day transition, reverse scheduling order | [`DayScope`] |
//! | [`Role::check_win_constraint`] | win evaluation, veto pass | `&GameState` |
//! | [`Role::check_win`] | win evaluation, declare pass | `&GameState` |
//! | [`Role::groups`] | night start | `&GameState` |
//! | [`Role::wins_on_elimination`] | explicit elimination | `&GameState` |
//!
//! Hooks that mutate receive a scope rather than the whole state. Neither
//! scope can change a life flag, so a role can only *propose* a death by
//! adding a pending kill to the [`NightContext`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use nightfall_core::role::{Role, RoleDeclaration, RoleId, RoleRegistry};
//!
//! struct Villager {
//!     declaration: RoleDeclaration,
//! }
//!
//! impl Role for Villager {
//!     fn declaration(&self) -> &RoleDeclaration {
//!         &self.declaration
//!     }
//! }
//!
//! let mut registry = RoleRegistry::new();
//! registry.register(Arc::new(Villager {
//!     declaration: RoleDeclaration::new("villager", "village"),
//! }));
//!
//! assert!(registry.contains(&RoleId::from_static("villager")));
//! ```

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::action::{HistoryEntry, NightAction};
use crate::error::RoleError;
use crate::game::GameState;
use crate::night::NightContext;
use crate::player::{
    NightMode, Player, PlayerId, Priority, RoleCapabilities, RoleState, Roster, UsagePolicy,
};

// =============================================================================
// Identifiers
// =============================================================================

/// Unique identifier for a role.
///
/// Role ids order lexicographically; the scheduler uses that order to break
/// priority ties.
///
/// ```
/// use nightfall_core::role::RoleId;
///
/// const SEER: RoleId = RoleId::from_static("seer");
/// assert_eq!(SEER.as_str(), "seer");
/// assert!(RoleId::from_static("doctor") < SEER);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(Cow<'static, str>);

impl RoleId {
    /// Creates a role id from a static string.
    #[must_use]
    pub const fn from_static(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }

    /// Creates a role id from any string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(Cow::Owned(id.into()))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for RoleId {
    fn from(id: &'static str) -> Self {
        Self::from_static(id)
    }
}

impl From<String> for RoleId {
    fn from(id: String) -> Self {
        Self(Cow::Owned(id))
    }
}

/// Identifier for a faction.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactionId(Cow<'static, str>);

impl FactionId {
    /// Creates a faction id from a static string.
    #[must_use]
    pub const fn from_static(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }

    /// Creates a faction id from any string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(Cow::Owned(id.into()))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for FactionId {
    fn from(id: &'static str) -> Self {
        Self::from_static(id)
    }
}

impl From<String> for FactionId {
    fn from(id: String) -> Self {
        Self(Cow::Owned(id))
    }
}

// =============================================================================
// Role Declaration
// =============================================================================

/// Static data of a role.
///
/// Built with a small builder; unspecified fields default to an unordered,
/// never-acting, unlimited role whose visible and win factions equal its
/// real faction.
///
/// ```
/// use nightfall_core::role::RoleDeclaration;
/// use nightfall_core::player::{NightMode, Priority, UsagePolicy};
///
/// let witch = RoleDeclaration::new("witch", "village")
///     .with_priority(Priority::Ordered(40))
///     .with_night_mode(NightMode::AliveOnly)
///     .with_usage(UsagePolicy::limited(2));
///
/// assert_eq!(witch.win_faction.as_str(), "village");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDeclaration {
    /// Unique role id.
    pub id: RoleId,
    /// Real faction.
    pub faction: FactionId,
    /// Faction shown to inspecting roles.
    pub visible_faction: FactionId,
    /// Faction credited on victory.
    pub win_faction: FactionId,
    /// Scheduling priority.
    pub priority: Priority,
    /// Night eligibility.
    pub night_mode: NightMode,
    /// Usage policy.
    pub usage: UsagePolicy,
    /// Earliest night the role may act.
    pub start_night: u32,
    /// Target capabilities.
    pub capabilities: RoleCapabilities,
    /// Roles this role's power interacts with.
    pub affected_roles: Vec<RoleId>,
}

impl RoleDeclaration {
    /// Creates a declaration with defaults for every optional field.
    #[must_use]
    pub fn new(id: impl Into<RoleId>, faction: impl Into<FactionId>) -> Self {
        let faction = faction.into();
        Self {
            id: id.into(),
            visible_faction: faction.clone(),
            win_faction: faction.clone(),
            faction,
            priority: Priority::Unordered,
            night_mode: NightMode::Never,
            usage: UsagePolicy::UNLIMITED,
            start_night: 1,
            capabilities: RoleCapabilities::empty(),
            affected_roles: Vec::new(),
        }
    }

    /// Sets the scheduling priority.
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the night mode.
    #[must_use]
    pub fn with_night_mode(mut self, mode: NightMode) -> Self {
        self.night_mode = mode;
        self
    }

    /// Sets the usage policy.
    #[must_use]
    pub fn with_usage(mut self, usage: UsagePolicy) -> Self {
        self.usage = usage;
        self
    }

    /// Sets the earliest night.
    #[must_use]
    pub fn with_start_night(mut self, night: u32) -> Self {
        self.start_night = night;
        self
    }

    /// Sets the faction shown to inspecting roles.
    #[must_use]
    pub fn with_visible_faction(mut self, faction: impl Into<FactionId>) -> Self {
        self.visible_faction = faction.into();
        self
    }

    /// Sets the faction credited on victory.
    #[must_use]
    pub fn with_win_faction(mut self, faction: impl Into<FactionId>) -> Self {
        self.win_faction = faction.into();
        self
    }

    /// Sets the capability flags.
    #[must_use]
    pub fn with_capabilities(mut self, capabilities: RoleCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Sets the affected roles.
    #[must_use]
    pub fn with_affected_roles(mut self, roles: Vec<RoleId>) -> Self {
        self.affected_roles = roles;
        self
    }
}

// =============================================================================
// Grouping
// =============================================================================

/// Alias pair: living holders of `to` also act during `from`'s turn.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Grouping {
    /// Role whose turn is extended.
    pub from: RoleId,
    /// Role whose living holders join that turn.
    pub to: RoleId,
}

impl Grouping {
    /// Creates an alias pair.
    #[must_use]
    pub fn new(from: impl Into<RoleId>, to: impl Into<RoleId>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

// =============================================================================
// Scopes
// =============================================================================

/// Replaces a player's role, snapshotting the new declaration.
fn transform_player(
    players: &mut Roster,
    registry: &RoleRegistry,
    id: PlayerId,
    role: &RoleId,
) -> Result<(), RoleError> {
    let declaration = registry
        .declaration(role)
        .ok_or_else(|| RoleError::UnknownRole(role.clone()))?;
    let player = players.get_mut(id).ok_or(RoleError::InvalidTarget(id))?;
    info!(player = %id, from = %player.role_id(), to = %role, "player transformed");
    player.assign_role(declaration);
    Ok(())
}

/// Access granted to night hooks ([`Role::resolve`], [`Role::passive_effect`]).
pub struct NightScope<'a> {
    night: u32,
    players: &'a mut Roster,
    context: &'a mut NightContext,
    registry: &'a RoleRegistry,
}

impl<'a> NightScope<'a> {
    pub(crate) fn new(
        night: u32,
        players: &'a mut Roster,
        context: &'a mut NightContext,
        registry: &'a RoleRegistry,
    ) -> Self {
        Self {
            night,
            players,
            context,
            registry,
        }
    }

    /// The current night number.
    #[must_use]
    pub fn night(&self) -> u32 {
        self.night
    }

    /// Read access to the roster.
    #[must_use]
    pub fn players(&self) -> &Roster {
        &*self.players
    }

    /// Looks up a player.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    /// The role registry.
    #[must_use]
    pub fn registry(&self) -> &RoleRegistry {
        self.registry
    }

    /// The night's accumulator.
    #[must_use]
    pub fn context(&self) -> &NightContext {
        &*self.context
    }

    /// The night's accumulator, for adding kills, saves and checks.
    pub fn context_mut(&mut self) -> &mut NightContext {
        &mut *self.context
    }

    /// Mutable access to one player's role state.
    pub fn role_state_mut(&mut self, id: PlayerId) -> Option<&mut RoleState> {
        self.players.get_mut(id).map(Player::state_mut)
    }

    /// Transforms a player into another role.
    ///
    /// # Errors
    ///
    /// Fails if the role is not registered or the player does not exist.
    pub fn transform(&mut self, id: PlayerId, role: &RoleId) -> Result<(), RoleError> {
        transform_player(self.players, self.registry, id, role)
    }
}

/// Access granted to [`Role::restore`] during the day transition.
pub struct DayScope<'a> {
    day: u32,
    players: &'a mut Roster,
    registry: &'a RoleRegistry,
}

impl<'a> DayScope<'a> {
    pub(crate) fn new(day: u32, players: &'a mut Roster, registry: &'a RoleRegistry) -> Self {
        Self {
            day,
            players,
            registry,
        }
    }

    /// The day that is about to start.
    #[must_use]
    pub fn day(&self) -> u32 {
        self.day
    }

    /// Read access to the roster.
    #[must_use]
    pub fn players(&self) -> &Roster {
        &*self.players
    }

    /// The role registry.
    #[must_use]
    pub fn registry(&self) -> &RoleRegistry {
        self.registry
    }

    /// Applies `f` to every player's role state together with the declaration
    /// of the role they currently hold. Players whose role is unregistered are
    /// skipped.
    pub fn for_each_state(&mut self, mut f: impl FnMut(&mut RoleState, &RoleDeclaration)) {
        let registry = self.registry;
        for player in self.players.iter_mut() {
            if let Some(declaration) = registry.declaration(player.role_id()) {
                f(player.state_mut(), declaration);
            }
        }
    }

    /// Transforms a player into another role.
    ///
    /// # Errors
    ///
    /// Fails if the role is not registered or the player does not exist.
    pub fn transform(&mut self, id: PlayerId, role: &RoleId) -> Result<(), RoleError> {
        transform_player(self.players, self.registry, id, role)
    }
}

// =============================================================================
// Role Trait
// =============================================================================

/// Behavior of one role.
///
/// Only [`Role::declaration`] is required; every hook defaults to doing
/// nothing, so a plain role is a one-method impl.
///
/// # Implementation Guidelines
///
/// 1. `resolve` and `passive_effect` only accumulate into the
///    [`NightContext`]. Cancelling someone else's kill is done here, by
///    removing entries from the target's pending list.
/// 2. `restore` undoes temporary effects the role applied during the night.
/// 3. Predicates (`check_win`, `check_win_constraint`, `groups`) must not
///    depend on anything but the state they are given.
pub trait Role: Send + Sync {
    /// Returns the role's static data.
    fn declaration(&self) -> &RoleDeclaration;

    /// Applies a used turn. A returned entry replaces the generic history
    /// record synthesized from the action.
    ///
    /// # Errors
    ///
    /// A [`RoleError`] is logged by the engine; the night continues.
    fn resolve(
        &self,
        _scope: &mut NightScope<'_>,
        _action: &NightAction,
    ) -> Result<Option<HistoryEntry>, RoleError> {
        Ok(None)
    }

    /// Effect applied to each living holder of a role that never prompts.
    ///
    /// # Errors
    ///
    /// A [`RoleError`] is logged by the engine; scheduling continues.
    fn passive_effect(
        &self,
        _scope: &mut NightScope<'_>,
        _player: PlayerId,
    ) -> Result<(), RoleError> {
        Ok(())
    }

    /// Undoes temporary effects before the day starts.
    ///
    /// # Errors
    ///
    /// A [`RoleError`] is logged by the engine; restoration continues.
    fn restore(&self, _scope: &mut DayScope<'_>) -> Result<(), RoleError> {
        Ok(())
    }

    /// Declares that this role's win faction has won.
    fn check_win(&self, _state: &GameState) -> bool {
        false
    }

    /// Vetoes every victory in the current evaluation.
    fn check_win_constraint(&self, _state: &GameState) -> bool {
        false
    }

    /// Alias pairs this role contributes to the night's grouping table.
    fn groups(&self, _state: &GameState) -> Vec<Grouping> {
        Vec::new()
    }

    /// Declares an instant victory when `player`, holding this role, is
    /// eliminated outside the night.
    ///
    /// Checked before the veto pass: an elimination win stands even while a
    /// living role's [`Role::check_win_constraint`] would block other wins.
    fn wins_on_elimination(&self, _state: &GameState, _player: PlayerId) -> bool {
        false
    }
}

// =============================================================================
// Role Registry
// =============================================================================

/// Registry of roles keyed by id.
#[derive(Default, Clone)]
pub struct RoleRegistry {
    roles: HashMap<RoleId, Arc<dyn Role>>,
}

impl RoleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            roles: HashMap::new(),
        }
    }

    /// Registers a role under its declared id, replacing any previous entry.
    pub fn register(&mut self, role: Arc<dyn Role>) {
        let id = role.declaration().id.clone();
        if self.roles.insert(id.clone(), role).is_some() {
            warn!(role = %id, "role registered twice; keeping the latest");
        }
    }

    /// Looks up a role.
    #[must_use]
    pub fn get(&self, id: &RoleId) -> Option<&Arc<dyn Role>> {
        self.roles.get(id)
    }

    /// Looks up a role's declaration.
    #[must_use]
    pub fn declaration(&self, id: &RoleId) -> Option<&RoleDeclaration> {
        self.roles.get(id).map(|role| role.declaration())
    }

    /// Returns true if the id is registered.
    #[must_use]
    pub fn contains(&self, id: &RoleId) -> bool {
        self.roles.contains_key(id)
    }

    /// Number of registered roles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Returns true if no role is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Registered ids, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<RoleId> {
        let mut ids: Vec<_> = self.roles.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Creates a registry holding every built-in role.
    ///
    /// ```
    /// use nightfall_core::role::{RoleId, RoleRegistry};
    ///
    /// let registry = RoleRegistry::standard();
    /// assert!(registry.contains(&RoleId::from_static("werewolf")));
    /// assert!(registry.contains(&RoleId::from_static("villager")));
    /// ```
    #[must_use]
    pub fn standard() -> Self {
        use crate::roles::{
            Disguiser, Doctor, Escort, Ghost, Infector, Seer, SerialKiller, Shaman, Tanner,
            Villager, Werewolf, Witch, WolfCub,
        };

        let mut registry = Self::new();
        registry.register(Arc::new(Villager::new()));
        registry.register(Arc::new(Werewolf::new()));
        registry.register(Arc::new(WolfCub::new()));
        registry.register(Arc::new(Escort::new()));
        registry.register(Arc::new(Disguiser::new()));
        registry.register(Arc::new(SerialKiller::new()));
        registry.register(Arc::new(Infector::new()));
        registry.register(Arc::new(Doctor::new()));
        registry.register(Arc::new(Seer::new()));
        registry.register(Arc::new(Shaman::new()));
        registry.register(Arc::new(Witch::new()));
        registry.register(Arc::new(Ghost::new()));
        registry.register(Arc::new(Tanner::new()));
        registry
    }
}

impl fmt::Debug for RoleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoleRegistry")
            .field("roles", &self.ids())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
