//! Disguiser: dresses a player up as a villager.

use crate::action::{HistoryEntry, NightAction};
use crate::error::RoleError;
use crate::player::{NightMode, Priority};
use crate::role::{DayScope, NightScope, Role, RoleDeclaration};

use super::{require_target, DISGUISER, VILLAGE_FACTION, WEREWOLF_FACTION};

/// Disguiser.
///
/// A werewolf who appears as a villager and can lend that appearance to one
/// player per night. Inspections later tonight see the disguise. All
/// disguises come off at daybreak.
pub struct Disguiser {
    declaration: RoleDeclaration,
}

impl Disguiser {
    /// Creates the disguiser role.
    #[must_use]
    pub fn new() -> Self {
        Self {
            declaration: RoleDeclaration::new(DISGUISER, WEREWOLF_FACTION)
                .with_visible_faction(VILLAGE_FACTION)
                .with_priority(Priority::Ordered(5))
                .with_night_mode(NightMode::AliveOnly),
        }
    }
}

impl Default for Disguiser {
    fn default() -> Self {
        Self::new()
    }
}

impl Role for Disguiser {
    fn declaration(&self) -> &RoleDeclaration {
        &self.declaration
    }

    fn resolve(
        &self,
        scope: &mut NightScope<'_>,
        action: &NightAction,
    ) -> Result<Option<HistoryEntry>, RoleError> {
        let target = require_target(action)?;
        let state = scope
            .role_state_mut(target)
            .ok_or(RoleError::InvalidTarget(target))?;
        state.visible_faction = VILLAGE_FACTION;
        Ok(Some(HistoryEntry::new(action, "disguised")))
    }

    fn restore(&self, scope: &mut DayScope<'_>) -> Result<(), RoleError> {
        scope.for_each_state(|state, declaration| state.reset_visible_faction(declaration));
        Ok(())
    }
}
