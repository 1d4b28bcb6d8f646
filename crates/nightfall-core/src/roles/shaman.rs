//! Shaman: calls a dead player back.

use crate::action::{HistoryEntry, NightAction};
use crate::error::RoleError;
use crate::player::{NightMode, Priority, RoleCapabilities, UsagePolicy};
use crate::role::{NightScope, Role, RoleDeclaration};

use super::{require_actor, require_target, SHAMAN, VILLAGE_FACTION};

/// Shaman.
///
/// Once per game, proposes a revival of a dead player. The night resolver
/// applies it before the night's kills.
pub struct Shaman {
    declaration: RoleDeclaration,
}

impl Shaman {
    /// Creates the shaman role.
    #[must_use]
    pub fn new() -> Self {
        Self {
            declaration: RoleDeclaration::new(SHAMAN, VILLAGE_FACTION)
                .with_priority(Priority::Ordered(35))
                .with_night_mode(NightMode::AliveOnly)
                .with_usage(UsagePolicy::limited(1))
                .with_capabilities(RoleCapabilities::CAN_TARGET_DEAD),
        }
    }
}

impl Default for Shaman {
    fn default() -> Self {
        Self::new()
    }
}

impl Role for Shaman {
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
        if scope.player(target).map_or(true, |p| p.is_alive()) {
            return Err(RoleError::InvalidTarget(target));
        }
        scope.context_mut().add_revival(actor, target);
        Ok(Some(HistoryEntry::new(action, "summoned")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerId;
    use crate::roles::test_support::{act, at, table};
    use crate::roles::VILLAGER;

    #[test]
    fn revives_dead_player() {
        let (registry, mut state) = table(&[SHAMAN, VILLAGER]);
        state.players.set_alive(PlayerId::new(1), false);
        act(&registry, &mut state, &SHAMAN, 0, at(1)).unwrap();
        assert_eq!(state.context.revivals.len(), 1);
        assert!(!state.players.get(PlayerId::new(1)).unwrap().is_alive());
    }

    #[test]
    fn living_target_is_rejected() {
        let (registry, mut state) = table(&[SHAMAN, VILLAGER]);
        let err = act(&registry, &mut state, &SHAMAN, 0, at(1)).unwrap_err();
        assert_eq!(err, RoleError::InvalidTarget(PlayerId::new(1)));
    }
}
