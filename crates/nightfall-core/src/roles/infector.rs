//! Infector: turns the pack's victim into a wolf.

use crate::action::{HistoryEntry, NightAction};
use crate::error::RoleError;
use crate::player::{NightMode, Priority, UsagePolicy};
use crate::role::{NightScope, Role, RoleDeclaration};

use super::{require_target, INFECTOR, WEREWOLF, WEREWOLF_FACTION};

/// Infector.
///
/// Once per game, instead of letting the werewolves' victim die, the
/// infector cancels the pack's kill and transforms the victim into a
/// werewolf. The new wolf starts with a fresh role state and usage count.
pub struct Infector {
    declaration: RoleDeclaration,
}

impl Infector {
    /// Creates the infector role.
    #[must_use]
    pub fn new() -> Self {
        Self {
            declaration: RoleDeclaration::new(INFECTOR, WEREWOLF_FACTION)
                .with_priority(Priority::Ordered(12))
                .with_night_mode(NightMode::AliveOnly)
                .with_usage(UsagePolicy::limited(1))
                .with_affected_roles(vec![WEREWOLF]),
        }
    }
}

impl Default for Infector {
    fn default() -> Self {
        Self::new()
    }
}

impl Role for Infector {
    fn declaration(&self) -> &RoleDeclaration {
        &self.declaration
    }

    fn resolve(
        &self,
        scope: &mut NightScope<'_>,
        action: &NightAction,
    ) -> Result<Option<HistoryEntry>, RoleError> {
        let target = require_target(action)?;
        let already_wolf = scope
            .player(target)
            .is_some_and(|p| p.state().real_faction == WEREWOLF_FACTION);
        if already_wolf {
            return Err(RoleError::InvalidTarget(target));
        }

        scope
            .context_mut()
            .cancel_kills(target, &self.declaration.affected_roles);
        scope.transform(target, &WEREWOLF)?;
        Ok(Some(HistoryEntry::new(action, "infected")))
    }
}
