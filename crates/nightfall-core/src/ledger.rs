//! Usage ledger.
//!
//! One entry is appended per confirmed use, keyed by the role the player held
//! when they used it. Counting by (role, player) means a player who is
//! transformed into a new role starts that role with a fresh count.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::player::PlayerId;
use crate::role::RoleId;

/// Record of confirmed power uses.
///
/// ```
/// use nightfall_core::ledger::UsageLedger;
/// use nightfall_core::player::PlayerId;
/// use nightfall_core::role::RoleId;
///
/// let witch = RoleId::from_static("witch");
/// let mut ledger = UsageLedger::new();
/// ledger.record(&witch, PlayerId::new(2));
/// ledger.record(&witch, PlayerId::new(2));
///
/// assert_eq!(ledger.uses(&witch, PlayerId::new(2)), 2);
/// assert_eq!(ledger.uses(&witch, PlayerId::new(3)), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UsageLedger {
    entries: BTreeMap<RoleId, Vec<PlayerId>>,
}

impl UsageLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one use of `role` by `player`.
    pub fn record(&mut self, role: &RoleId, player: PlayerId) {
        self.entries.entry(role.clone()).or_default().push(player);
    }

    /// Number of times `player` used `role`.
    #[must_use]
    pub fn uses(&self, role: &RoleId, player: PlayerId) -> u32 {
        let count = self
            .entries
            .get(role)
            .map_or(0, |players| players.iter().filter(|p| **p == player).count());
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Every recorded use of `role`, in order.
    #[must_use]
    pub fn entries(&self, role: &RoleId) -> &[PlayerId] {
        self.entries.get(role).map_or(&[], Vec::as_slice)
    }

    /// Total number of recorded uses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.values().all(Vec::is_empty)
    }
}
