//! Fixtures shared by the built-in role tests.

use crate::action::{HistoryEntry, NightAction, TurnPayload};
use crate::error::RoleError;
use crate::game::GameState;
use crate::player::{PlayerId, Roster};
use crate::role::{DayScope, NightScope, RoleId, RoleRegistry};

/// Seats one player per role id, in order, with the standard registry.
pub(super) fn table(seats: &[RoleId]) -> (RoleRegistry, GameState) {
    let registry = RoleRegistry::standard();
    let mut roster = Roster::new();
    for (i, id) in seats.iter().enumerate() {
        let declaration = registry.declaration(id).expect("role is built in");
        roster.seat(format!("p{i}"), declaration);
    }
    let mut state = GameState::new(roster);
    state.night = 1;
    (registry, state)
}

/// Runs `role`'s resolve hook for `actor` with `payload`.
pub(super) fn act(
    registry: &RoleRegistry,
    state: &mut GameState,
    role: &RoleId,
    actor: u32,
    payload: TurnPayload,
) -> Result<Option<HistoryEntry>, RoleError> {
    let action = NightAction {
        night: state.night,
        role_id: role.clone(),
        actor_ids: vec![PlayerId::new(actor)],
        payload,
    };
    let hook = registry.get(role).expect("role is built in").clone();
    let mut scope = NightScope::new(state.night, &mut state.players, &mut state.context, registry);
    hook.resolve(&mut scope, &action)
}

/// Payload with a single target.
pub(super) fn at(target: u32) -> TurnPayload {
    TurnPayload::default().with_target(PlayerId::new(target))
}

/// Runs `role`'s restore hook.
pub(super) fn restore(registry: &RoleRegistry, state: &mut GameState, role: &RoleId) {
    let hook = registry.get(role).expect("role is built in").clone();
    let mut scope = DayScope::new(state.day + 1, &mut state.players, registry);
    hook.restore(&mut scope).expect("restore succeeds");
}
