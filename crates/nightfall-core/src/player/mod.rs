//! Players and the roster.
//!
//! - [`PlayerId`]: stable identifier, ordered by seat
//! - [`Player`]: identity, life flag, current role and its [`RoleState`]
//! - [`Roster`]: the ordered player list shared by every engine call
//!
//! # Life flags
//!
//! A player's life flag can only be changed from inside this crate, by the
//! night resolver or an explicit elimination. Role hooks receive the roster
//! through scopes that expose role state but never the life flag.
//!
//! # Example
//!
//! ```
//! use nightfall_core::player::{PlayerId, Roster};
//! use nightfall_core::role::RoleDeclaration;
//!
//! let villager = RoleDeclaration::new("villager", "village");
//! let roster = Roster::from_names(["Ada", "Brin", "Cole"], &villager);
//!
//! assert_eq!(roster.len(), 3);
//! assert_eq!(roster.get(PlayerId::new(1)).unwrap().name(), "Brin");
//! assert!(roster.iter().all(|p| p.is_alive()));
//! ```

pub mod state;

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::role::{RoleDeclaration, RoleId};

pub use state::{NightMode, Priority, RoleCapabilities, RoleState, UsagePolicy, UseLimit};

/// Unique identifier for a player.
///
/// Ids are assigned by seat order and never reused within a game.
///
/// ```
/// use nightfall_core::player::PlayerId;
///
/// assert!(PlayerId::new(1) < PlayerId::new(2));
/// assert_eq!(PlayerId::new(4).as_u32(), 4);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(u32);

impl PlayerId {
    /// Creates a new `PlayerId` from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw value of this identifier.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlayerId({})", self.0)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for PlayerId {
    fn from(id: u32) -> Self {
        Self::new(id)
    }
}

// =============================================================================
// Player
// =============================================================================

/// A seat at the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    role_id: RoleId,
    alive: bool,
    state: RoleState,
}

impl Player {
    /// Creates a living player holding the declared role.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>, role: &RoleDeclaration) -> Self {
        Self {
            id,
            name: name.into(),
            role_id: role.id.clone(),
            alive: true,
            state: RoleState::from_declaration(role),
        }
    }

    /// Returns the player's id.
    #[must_use]
    pub const fn id(&self) -> PlayerId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the player's current role.
    #[must_use]
    pub fn role_id(&self) -> &RoleId {
        &self.role_id
    }

    /// Returns true if the player is alive.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    /// Returns the player's role state.
    #[must_use]
    pub const fn state(&self) -> &RoleState {
        &self.state
    }

    /// Returns the player's role state for modification.
    pub fn state_mut(&mut self) -> &mut RoleState {
        &mut self.state
    }

    /// Gives the player a new role, snapshotting its declaration.
    pub(crate) fn assign_role(&mut self, role: &RoleDeclaration) {
        self.role_id = role.id.clone();
        self.state = RoleState::from_declaration(role);
    }

    pub(crate) fn set_alive(&mut self, alive: bool) {
        self.alive = alive;
    }
}

// =============================================================================
// Roster
// =============================================================================

/// Ordered list of players.
///
/// Iteration always follows seat order, which every engine pass relies on
/// for deterministic output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    /// Creates an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seats one player per name, all holding `role`.
    #[must_use]
    pub fn from_names<I, S>(names: I, role: &RoleDeclaration) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut roster = Self::new();
        for name in names {
            roster.seat(name, role);
        }
        roster
    }

    /// Seats a new living player and returns their id.
    pub fn seat(&mut self, name: impl Into<String>, role: &RoleDeclaration) -> PlayerId {
        let next = self.players.iter().map(|p| p.id.as_u32() + 1).max().unwrap_or(0);
        let id = PlayerId::new(next);
        self.players.push(Player::new(id, name, role));
        id
    }

    /// Returns the number of players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Returns true if nobody is seated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Looks up a player.
    #[must_use]
    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Returns true if the id belongs to a seated player.
    #[must_use]
    pub fn contains(&self, id: PlayerId) -> bool {
        self.get(id).is_some()
    }

    /// Iterates players in seat order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.iter_mut()
    }

    /// Iterates living players in seat order.
    pub fn alive(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.alive)
    }

    /// Ids of every dead player, in seat order.
    #[must_use]
    pub fn dead_ids(&self) -> Vec<PlayerId> {
        self.players.iter().filter(|p| !p.alive).map(|p| p.id).collect()
    }

    /// Players currently holding `role`, alive or dead.
    pub fn holders<'a, 'r>(&'a self, role: &'r RoleId) -> impl Iterator<Item = &'a Player> + 'r
    where
        'a: 'r,
    {
        self.players.iter().filter(move |p| &p.role_id == role)
    }

    /// Distinct role ids currently held by any player.
    #[must_use]
    pub fn role_ids(&self) -> BTreeSet<RoleId> {
        self.players.iter().map(|p| p.role_id.clone()).collect()
    }

    /// Sets a player's life flag. Returns false if the player is unknown.
    pub(crate) fn set_alive(&mut self, id: PlayerId, alive: bool) -> bool {
        match self.get_mut(id) {
            Some(player) => {
                player.set_alive(alive);
                true
            }
            None => false,
        }
    }
}
