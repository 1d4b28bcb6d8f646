//! Escort: keeps one player busy for the night.

use crate::action::{HistoryEntry, NightAction};
use crate::error::RoleError;
use crate::player::{NightMode, Priority};
use crate::role::{DayScope, NightScope, Role, RoleDeclaration};

use super::{require_target, ESCORT, VILLAGE_FACTION};

/// Escort.
///
/// Acts first. The target's night mode becomes `Blocked`, so any turn they
/// take later tonight is blocked by the constraint gate. The block is lifted
/// at daybreak.
pub struct Escort {
    declaration: RoleDeclaration,
}

impl Escort {
    /// Creates the escort role.
    #[must_use]
    pub fn new() -> Self {
        Self {
            declaration: RoleDeclaration::new(ESCORT, VILLAGE_FACTION)
                .with_priority(Priority::Ordered(1))
                .with_night_mode(NightMode::AliveOnly),
        }
    }
}

impl Default for Escort {
    fn default() -> Self {
        Self::new()
    }
}

impl Role for Escort {
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
        state.night_mode = NightMode::Blocked;
        Ok(Some(HistoryEntry::new(action, "visited")))
    }

    fn restore(&self, scope: &mut DayScope<'_>) -> Result<(), RoleError> {
        scope.for_each_state(|state, declaration| {
            if state.is_blocked() {
                state.reset_night_mode(declaration);
            }
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerId;
    use crate::roles::test_support::{act, at, restore, table};
    use crate::roles::SEER;

    #[test]
    fn blocks_until_daybreak() {
        let (registry, mut state) = table(&[ESCORT, SEER]);
        act(&registry, &mut state, &ESCORT, 0, at(1)).unwrap();
        assert!(state.players.get(PlayerId::new(1)).unwrap().state().is_blocked());

        restore(&registry, &mut state, &ESCORT);
        let seer = state.players.get(PlayerId::new(1)).unwrap();
        assert_eq!(seer.state().night_mode, NightMode::AliveOnly);
    }
}
