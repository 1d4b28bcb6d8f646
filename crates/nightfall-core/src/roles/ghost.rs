//! Ghost: inspects from beyond the grave.

use crate::action::{HistoryEntry, NightAction};
use crate::error::RoleError;
use crate::player::{NightMode, Priority, RoleCapabilities, UsagePolicy};
use crate::role::{NightScope, Role, RoleDeclaration};

use super::{require_actor, require_target, GHOST, VILLAGE_FACTION};

/// Ghost.
///
/// Wakes only once dead, a single time, and learns the target's real
/// faction; disguises do not fool the dead.
pub struct Ghost {
    declaration: RoleDeclaration,
}

impl Ghost {
    /// Creates the ghost role.
    #[must_use]
    pub fn new() -> Self {
        Self {
            declaration: RoleDeclaration::new(GHOST, VILLAGE_FACTION)
                .with_priority(Priority::Ordered(50))
                .with_night_mode(NightMode::DeadOnly)
                .with_usage(UsagePolicy::limited(1))
                .with_capabilities(RoleCapabilities::CAN_TARGET_DEAD),
        }
    }
}

impl Default for Ghost {
    fn default() -> Self {
        Self::new()
    }
}

impl Role for Ghost {
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
            .map(|p| p.state().real_faction.clone())
            .ok_or(RoleError::InvalidTarget(target))?;
        scope.context_mut().add_check(actor, target, faction);
        Ok(Some(HistoryEntry::new(action, "haunted")))
    }
}
