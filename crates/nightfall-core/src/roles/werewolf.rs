//! Werewolf: the pack's nightly kill.

use crate::action::{HistoryEntry, NightAction};
use crate::error::RoleError;
use crate::game::GameState;
use crate::player::{NightMode, Priority};
use crate::role::{NightScope, Role, RoleDeclaration};

use super::{require_target, werewolves_win, WEREWOLF, WEREWOLF_FACTION};

/// Werewolf.
///
/// Wolves (and anyone aliased into their turn) choose one victim together.
/// The kill is cancelable, so a doctor or a witch can still prevent it.
pub struct Werewolf {
    declaration: RoleDeclaration,
}

impl Werewolf {
    /// Creates the werewolf role.
    #[must_use]
    pub fn new() -> Self {
        Self {
            declaration: RoleDeclaration::new(WEREWOLF, WEREWOLF_FACTION)
                .with_priority(Priority::Ordered(10))
                .with_night_mode(NightMode::AliveOnly),
        }
    }
}

impl Default for Werewolf {
    fn default() -> Self {
        Self::new()
    }
}

impl Role for Werewolf {
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
        Ok(Some(HistoryEntry::new(action, "attacked")))
    }

    fn check_win(&self, state: &GameState) -> bool {
        werewolves_win(state)
    }
}
