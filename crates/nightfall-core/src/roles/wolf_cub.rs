//! Wolf cub: wakes with the pack.

use crate::game::GameState;
use crate::role::{Grouping, Role, RoleDeclaration};

use super::{werewolves_win, WEREWOLF, WEREWOLF_FACTION, WOLF_CUB};

/// Young werewolf without a turn of its own. Living cubs join the werewolf
/// turn through an alias pair.
pub struct WolfCub {
    declaration: RoleDeclaration,
}

impl WolfCub {
    /// Creates the wolf cub role.
    #[must_use]
    pub fn new() -> Self {
        Self {
            declaration: RoleDeclaration::new(WOLF_CUB, WEREWOLF_FACTION),
        }
    }
}

impl Default for WolfCub {
    fn default() -> Self {
        Self::new()
    }
}

impl Role for WolfCub {
    fn declaration(&self) -> &RoleDeclaration {
        &self.declaration
    }

    fn groups(&self, _state: &GameState) -> Vec<Grouping> {
        vec![Grouping::new(WEREWOLF, WOLF_CUB)]
    }

    fn check_win(&self, state: &GameState) -> bool {
        werewolves_win(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::AliasTable;
    use crate::player::PlayerId;
    use crate::roles::test_support::table;
    use crate::roles::VILLAGER;

    #[test]
    fn cub_joins_werewolf_turn() {
        let (registry, state) = table(&[WOLF_CUB, WEREWOLF, VILLAGER]);
        let aliases = AliasTable::rebuild(&state, &registry);
        let actors: Vec<_> = aliases
            .actors_for(&WEREWOLF, state.players())
            .iter()
            .map(|p| p.id())
            .collect();
        assert_eq!(actors, vec![PlayerId::new(1), PlayerId::new(0)]);
    }

    #[test]
    fn lone_cub_forms_the_werewolf_turn() {
        let (registry, state) = table(&[WOLF_CUB, VILLAGER]);
        let aliases = AliasTable::rebuild(&state, &registry);
        assert_eq!(aliases.actors_for(&WEREWOLF, state.players()).len(), 1);
    }
}
