//! Seer: learns a player's faction.

use crate::action::{HistoryEntry, NightAction};
use crate::error::RoleError;
use crate::player::{NightMode, Priority};
use crate::role::{NightScope, Role, RoleDeclaration};

use super::{require_actor, require_target, SEER, VILLAGE_FACTION};

/// Seer.
///
/// Sees the target's *visible* faction, so a disguise applied earlier in
/// the night fools the seer.
pub struct Seer {
    declaration: RoleDeclaration,
}

impl Seer {
    /// Creates the seer role.
    #[must_use]
    pub fn new() -> Self {
        Self {
            declaration: RoleDeclaration::new(SEER, VILLAGE_FACTION)
                .with_priority(Priority::Ordered(30))
                .with_night_mode(NightMode::AliveOnly),
        }
    }
}

impl Default for Seer {
    fn default() -> Self {
        Self::new()
    }
}

impl Role for Seer {
    fn declaration(&self) -> &RoleDeclaration {
        &self.declaration
    }

    fn resolve(
        &self,
        scope: &mut NightScope<'_>,
        action: &NightAction,
    ) -> Result<Option<HistoryEntry>, RoleError> {
        let actor = require_actor(action)?;
        let target = require_target(action)?;
        let faction = scope
            .player(target)
            .map(|p| p.state().visible_faction.clone())
            .ok_or(RoleError::InvalidTarget(target))?;
        scope.context_mut().add_check(actor, target, faction);
        Ok(Some(HistoryEntry::new(action, "inspected")))
    }
}
