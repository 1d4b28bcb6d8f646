//! Role aliasing.
//!
//! Some roles act during another role's turn: a wolf cub wakes up with the
//! werewolves. Roles declare this through [`Role::groups`](crate::role::Role::groups),
//! and the [`AliasTable`] collects those pairs at the start of every night.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::game::GameState;
use crate::player::{Player, Roster};
use crate::role::{Grouping, RoleId, RoleRegistry};

/// The night's alias pairs.
///
/// ```
/// use nightfall_core::grouping::AliasTable;
/// use nightfall_core::role::Grouping;
///
/// let table = AliasTable::from_pairs(vec![
///     Grouping::new("werewolf", "wolf_cub"),
///     Grouping::new("werewolf", "wolf_cub"),
/// ]);
/// assert_eq!(table.pairs().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasTable {
    pairs: Vec<Grouping>,
}

impl AliasTable {
    /// Builds a table from pairs, dropping repeats.
    #[must_use]
    pub fn from_pairs(pairs: impl IntoIterator<Item = Grouping>) -> Self {
        let mut table = Self::default();
        for pair in pairs {
            if !table.pairs.contains(&pair) {
                table.pairs.push(pair);
            }
        }
        table
    }

    /// Rebuilds the table from every role currently held by any player,
    /// alive or dead.
    #[must_use]
    pub fn rebuild(state: &GameState, registry: &RoleRegistry) -> Self {
        let pairs = state
            .players
            .role_ids()
            .into_iter()
            .filter_map(|id| registry.get(&id))
            .flat_map(|role| role.groups(state));
        let table = Self::from_pairs(pairs);
        debug!(pairs = table.pairs.len(), "alias table rebuilt");
        table
    }

    /// The alias pairs.
    #[must_use]
    pub fn pairs(&self) -> &[Grouping] {
        &self.pairs
    }

    /// Roles whose living holders join `role`'s turn.
    pub fn aliases_of<'a>(&'a self, role: &'a RoleId) -> impl Iterator<Item = &'a RoleId> + 'a {
        self.pairs
            .iter()
            .filter(move |pair| &pair.from == role)
            .map(|pair| &pair.to)
    }

    /// Everyone who acts during `role`'s turn: direct holders in any life
    /// state, then living holders of aliased roles.
    #[must_use]
    pub fn actors_for<'a>(&self, role: &RoleId, roster: &'a Roster) -> Vec<&'a Player> {
        let mut actors: Vec<&Player> = roster.holders(role).collect();
        for alias in self.aliases_of(role) {
            for player in roster.holders(alias).filter(|p| p.is_alive()) {
                if !actors.iter().any(|a| a.id() == player.id()) {
                    actors.push(player);
                }
            }
        }
        actors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerId;
    use crate::role::RoleDeclaration;

    fn roster() -> Roster {
        let wolf = RoleDeclaration::new("werewolf", "werewolves");
        let cub = RoleDeclaration::new("wolf_cub", "werewolves");
        let villager = RoleDeclaration::new("villager", "village");

        let mut roster = Roster::new();
        roster.seat("cub", &cub);
        roster.seat("wolf", &wolf);
        roster.seat("villager", &villager);
        roster
    }

    fn ids(players: &[&Player]) -> Vec<PlayerId> {
        players.iter().map(|p| p.id()).collect()
    }

    #[test]
    fn direct_holders_come_first() {
        let roster = roster();
        let table = AliasTable::from_pairs(vec![Grouping::new("werewolf", "wolf_cub")]);
        let actors = table.actors_for(&RoleId::from_static("werewolf"), &roster);
        assert_eq!(ids(&actors), vec![PlayerId::new(1), PlayerId::new(0)]);
    }

    #[test]
    fn dead_aliased_players_are_left_out() {
        let mut roster = roster();
        roster.set_alive(PlayerId::new(0), false);
        let table = AliasTable::from_pairs(vec![Grouping::new("werewolf", "wolf_cub")]);
        let actors = table.actors_for(&RoleId::from_static("werewolf"), &roster);
        assert_eq!(ids(&actors), vec![PlayerId::new(1)]);
    }

    #[test]
    fn dead_direct_holders_are_kept() {
        let mut roster = roster();
        roster.set_alive(PlayerId::new(1), false);
        let table = AliasTable::default();
        let actors = table.actors_for(&RoleId::from_static("werewolf"), &roster);
        assert_eq!(ids(&actors), vec![PlayerId::new(1)]);
    }

    #[test]
    fn without_pairs_only_holders_act() {
        let roster = roster();
        let table = AliasTable::default();
        let actors = table.actors_for(&RoleId::from_static("wolf_cub"), &roster);
        assert_eq!(ids(&actors), vec![PlayerId::new(0)]);
    }

    #[test]
    fn actors_outlive_the_table_and_role_id() {
        let roster = roster();
        let actors = {
            let role = RoleId::new("werewolf".to_string());
            let table = AliasTable::from_pairs(vec![Grouping::new("werewolf", "wolf_cub")]);
            table.actors_for(&role, &roster)
        };
        assert_eq!(ids(&actors), vec![PlayerId::new(1), PlayerId::new(0)]);
    }

    #[test]
    fn aliasing_is_idempotent() {
        let roster = roster();
        let table = AliasTable::from_pairs(vec![
            Grouping::new("werewolf", "wolf_cub"),
            Grouping::new("werewolf", "wolf_cub"),
        ]);
        let actors = table.actors_for(&RoleId::from_static("werewolf"), &roster);
        assert_eq!(actors.len(), 2);
    }
}
