//! Doctor: protects one player from attacks.

use crate::action::{HistoryEntry, NightAction};
use crate::error::RoleError;
use crate::player::{NightMode, Priority};
use crate::role::{NightScope, Role, RoleDeclaration};

use super::{require_actor, require_target, DOCTOR, SERIAL_KILLER, VILLAGE_FACTION, WEREWOLF};

/// Doctor.
///
/// Cancels pending kills on the target whose source is one of the roles the
/// doctor guards against. Kills proposed after the doctor's turn are not
/// affected, and non-cancelable kills never are.
pub struct Doctor {
    declaration: RoleDeclaration,
}

impl Doctor {
    /// Creates the doctor role.
    #[must_use]
    pub fn new() -> Self {
        Self {
            declaration: RoleDeclaration::new(DOCTOR, VILLAGE_FACTION)
                .with_priority(Priority::Ordered(20))
                .with_night_mode(NightMode::AliveOnly)
                .with_affected_roles(vec![WEREWOLF, SERIAL_KILLER]),
        }
    }
}

impl Default for Doctor {
    fn default() -> Self {
        Self::new()
    }
}

impl Role for Doctor {
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
        let canceled = scope
            .context_mut()
            .cancel_kills(target, &self.declaration.affected_roles);
        if !canceled.is_empty() {
            scope.context_mut().add_save(actor, target, canceled);
        }
        Ok(Some(HistoryEntry::new(action, "protected")))
    }
}
