//! Serial killer: plays alone.

use crate::action::{HistoryEntry, NightAction};
use crate::error::RoleError;
use crate::game::GameState;
use crate::player::{NightMode, Priority};
use crate::role::{NightScope, Role, RoleDeclaration};

use super::{require_target, SERIAL_KILLER, SERIAL_KILLER_FACTION};

/// Serial killer.
///
/// Kills from the second night on. While alive with more than one other
/// player around, nobody else may win; once only one other player is left,
/// the serial killer wins.
pub struct SerialKiller {
    declaration: RoleDeclaration,
}

impl SerialKiller {
    /// Creates the serial killer role.
    #[must_use]
    pub fn new() -> Self {
        Self {
            declaration: RoleDeclaration::new(SERIAL_KILLER, SERIAL_KILLER_FACTION)
                .with_priority(Priority::Ordered(15))
                .with_night_mode(NightMode::AliveOnly)
                .with_start_night(2),
        }
    }
}

impl Default for SerialKiller {
    fn default() -> Self {
        Self::new()
    }
}

impl Role for SerialKiller {
    fn declaration(&self) -> &RoleDeclaration {
        &self.declaration
    }

    fn resolve(
        &self,
        scope: &mut NightScope<'_>,
        action: &NightAction,
    ) -> Result<Option<HistoryEntry>, RoleError> {
        let target = require_target(action)?;
        scope
            .context_mut()
            .add_kill(target, self.declaration.id.clone(), true);
        Ok(Some(HistoryEntry::new(action, "stabbed")))
    }

    fn check_win_constraint(&self, state: &GameState) -> bool {
        state.players().alive().count() > 2
    }

    fn check_win(&self, state: &GameState) -> bool {
        state.players().alive().count() <= 2
    }
}
