//! Villager: no night power.

use crate::game::GameState;
use crate::role::{Role, RoleDeclaration};

use super::{alive_in, SERIAL_KILLER_FACTION, VILLAGER, VILLAGE_FACTION, WEREWOLF_FACTION};

/// Plain villager.
///
/// Never wakes at night. The village wins once no werewolf and no serial
/// killer is left alive.
///
/// ```
/// use nightfall_core::roles::Villager;
/// use nightfall_core::role::Role;
///
/// assert_eq!(Villager::new().declaration().id.as_str(), "villager");
/// ```
pub struct Villager {
    declaration: RoleDeclaration,
}

impl Villager {
    /// Creates the villager role.
    #[must_use]
    pub fn new() -> Self {
        Self {
            declaration: RoleDeclaration::new(VILLAGER, VILLAGE_FACTION),
        }
    }
}

impl Default for Villager {
    fn default() -> Self {
        Self::new()
    }
}

impl Role for Villager {
    fn declaration(&self) -> &RoleDeclaration {
        &self.declaration
    }

    fn check_win(&self, state: &GameState) -> bool {
        alive_in(state, &WEREWOLF_FACTION) == 0 && alive_in(state, &SERIAL_KILLER_FACTION) == 0
    }
}
