//! Role dealing and reveal order.
//!
//! Dealing is seeded: the same pool, player count and seed always give the
//! same assignment, which keeps replays and tests reproducible.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use crate::game::GameState;
use crate::player::PlayerId;
use crate::role::{RoleId, RoleRegistry};

/// Fits a role pool to the table.
///
/// A short pool is padded with `fallback`, a long one is truncated, and
/// unregistered ids are replaced by `fallback`.
#[must_use]
pub fn fit_pool(
    pool: &[RoleId],
    players: usize,
    registry: &RoleRegistry,
    fallback: &RoleId,
) -> Vec<RoleId> {
    if pool.len() < players {
        warn!(pool = pool.len(), players, fallback = %fallback, "role pool too small; padding");
    } else if pool.len() > players {
        warn!(pool = pool.len(), players, "role pool too large; truncating");
    }

    pool.iter()
        .take(players)
        .map(|id| {
            if registry.contains(id) {
                id.clone()
            } else {
                warn!(role = %id, fallback = %fallback, "unknown role in pool; replaced");
                fallback.clone()
            }
        })
        .chain(std::iter::repeat(fallback.clone()))
        .take(players)
        .collect()
}

/// Shuffles a pool with a seeded `ChaCha8` generator.
///
/// ```
/// use nightfall_core::role::RoleId;
/// use nightfall_core::setup::shuffle_pool;
///
/// let pool: Vec<RoleId> = ["seer", "werewolf", "villager", "doctor"]
///     .into_iter()
///     .map(RoleId::from_static)
///     .collect();
///
/// let mut a = pool.clone();
/// let mut b = pool.clone();
/// shuffle_pool(&mut a, 7);
/// shuffle_pool(&mut b, 7);
/// assert_eq!(a, b);
/// ```
pub fn shuffle_pool(pool: &mut [RoleId], seed: u64) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    pool.shuffle(&mut rng);
}

/// Deals a fitted, shuffled pool to the roster in seat order.
pub(crate) fn deal(
    state: &mut GameState,
    registry: &RoleRegistry,
    pool: &[RoleId],
    seed: u64,
    fallback: &RoleId,
) {
    let mut fitted = fit_pool(pool, state.players.len(), registry, fallback);
    shuffle_pool(&mut fitted, seed);

    for (player, role) in state.players.iter_mut().zip(&fitted) {
        match registry.declaration(role) {
            Some(declaration) => player.assign_role(declaration),
            None => warn!(player = %player.id(), role = %role, "role not registered; not dealt"),
        }
    }
    state.reveal_cursor = 0;
    info!(players = state.players.len(), seed, "roles dealt");
}

/// Next player whose role should be revealed to them, in seat order.
pub(crate) fn next_reveal(state: &mut GameState) -> Option<PlayerId> {
    let id = state.players.iter().nth(state.reveal_cursor).map(|p| p.id())?;
    state.reveal_cursor += 1;
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Roster;
    use crate::roles::{DOCTOR, SEER, VILLAGER, WEREWOLF};

    fn seated(n: usize) -> GameState {
        let registry = RoleRegistry::standard();
        let villager = registry.declaration(&VILLAGER).unwrap();
        GameState::new(Roster::from_names((0..n).map(|i| format!("p{i}")), villager))
    }

    mod pool_tests {
        use super::*;

        #[test]
        fn pads_short_pool() {
            let registry = RoleRegistry::standard();
            let fitted = fit_pool(&[WEREWOLF], 3, &registry, &VILLAGER);
            assert_eq!(fitted, vec![WEREWOLF, VILLAGER, VILLAGER]);
        }

        #[test]
        fn truncates_long_pool() {
            let registry = RoleRegistry::standard();
            let fitted = fit_pool(&[WEREWOLF, SEER, DOCTOR], 2, &registry, &VILLAGER);
            assert_eq!(fitted, vec![WEREWOLF, SEER]);
        }

        #[test]
        fn replaces_unknown_roles() {
            let registry = RoleRegistry::standard();
            let fitted = fit_pool(&[RoleId::from_static("jester"), SEER], 2, &registry, &VILLAGER);
            assert_eq!(fitted, vec![VILLAGER, SEER]);
        }
    }

    mod deal_tests {
        use super::*;

        #[test]
        fn same_seed_same_deal() {
            let registry = RoleRegistry::standard();
            let pool = [WEREWOLF, SEER, DOCTOR, VILLAGER, VILLAGER];

            let mut a = seated(5);
            let mut b = seated(5);
            deal(&mut a, &registry, &pool, 99, &VILLAGER);
            deal(&mut b, &registry, &pool, 99, &VILLAGER);
            assert_eq!(a, b);

            let mut dealt: Vec<_> = a.players().iter().map(|p| p.role_id().clone()).collect();
            dealt.sort();
            let mut expected = pool.to_vec();
            expected.sort();
            assert_eq!(dealt, expected);
        }

        #[test]
        fn dealt_roles_carry_their_state() {
            let registry = RoleRegistry::standard();
            let mut state = seated(1);
            deal(&mut state, &registry, &[WEREWOLF], 1, &VILLAGER);
            let player = state.players().get(PlayerId::new(0)).unwrap();
            assert_eq!(player.state().real_faction.as_str(), "werewolves");
        }
    }

    #[test]
    fn reveal_walks_seats_once() {
        let mut state = seated(2);
        assert_eq!(next_reveal(&mut state), Some(PlayerId::new(0)));
        assert_eq!(next_reveal(&mut state), Some(PlayerId::new(1)));
        assert_eq!(next_reveal(&mut state), None);
    }
}
