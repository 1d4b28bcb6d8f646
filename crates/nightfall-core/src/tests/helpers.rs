//! Test helper functions for setting up tables and driving nights.

use std::sync::Arc;

use crate::action::{HistoryEntry, NightAction, TurnOutcome, TurnPayload};
use crate::config::EngineConfig;
use crate::engine::Engine;
use crate::error::RoleError;
use crate::game::GameState;
use crate::night::NightTurn;
use crate::player::{NightMode, PlayerId, Priority};
use crate::resolver::NightSummary;
use crate::role::{NightScope, Role, RoleDeclaration, RoleId, RoleRegistry};
use crate::roles::SHAMAN;

// =============================================================================
// Test roles
// =============================================================================

/// Role id of [`Alchemist`].
pub const ALCHEMIST: RoleId = RoleId::from_static("alchemist");

/// Test role that acts before everyone and turns its target into a shaman.
pub struct Alchemist {
    declaration: RoleDeclaration,
}

impl Alchemist {
    pub fn new() -> Self {
        Self {
            declaration: RoleDeclaration::new(ALCHEMIST, "village")
                .with_priority(Priority::Ordered(0))
                .with_night_mode(NightMode::AliveOnly),
        }
    }
}

impl Role for Alchemist {
    fn declaration(&self) -> &RoleDeclaration {
        &self.declaration
    }

    fn resolve(
        &self,
        scope: &mut NightScope<'_>,
        action: &NightAction,
    ) -> Result<Option<HistoryEntry>, RoleError> {
        let target = action
            .target()
            .ok_or_else(|| RoleError::MissingTarget(action.role_id.clone()))?;
        scope.transform(target, &SHAMAN)?;
        Ok(Some(HistoryEntry::new(action, "transmuted")))
    }
}

// =============================================================================
// Table setup
// =============================================================================

/// Engine over the built-in roles plus the test roles.
pub fn test_engine() -> Engine {
    let mut registry = RoleRegistry::standard();
    registry.register(Arc::new(Alchemist::new()));
    Engine::new(registry, EngineConfig::default())
}

/// Seats one player per role, in order, and leaves the game in setup.
pub fn seat(engine: &Engine, roles: &[RoleId]) -> GameState {
    let mut state = engine.new_game((0..roles.len()).map(|i| format!("p{i}")));
    for (i, role) in roles.iter().enumerate() {
        engine
            .assign_role(&mut state, pid(i), role)
            .expect("role is registered");
    }
    state
}

/// Player id from a seat index.
pub fn pid(seat: usize) -> PlayerId {
    PlayerId::new(u32::try_from(seat).expect("seat fits in u32"))
}

/// Life flags in seat order.
pub fn life_flags(state: &GameState) -> Vec<bool> {
    state.players().iter().map(|p| p.is_alive()).collect()
}

// =============================================================================
// Night drivers
// =============================================================================

/// Answers every turn of the current night with `answer` and resolves it.
///
/// Asserts after each recorded turn that no life flag changed.
pub fn play_night(
    engine: &Engine,
    state: &mut GameState,
    mut answer: impl FnMut(&NightTurn, &GameState) -> TurnOutcome,
) -> NightSummary {
    engine.begin_night(state).expect("night can start");
    let before = life_flags(state);

    while let Some(turn) = engine.next_turn(state) {
        let outcome = answer(&turn, &*state);
        engine
            .record_turn_result(state, outcome)
            .expect("turn is pending");
        assert_eq!(life_flags(state), before, "life flag changed during {}", turn.role_id);
    }

    engine.resolve_night(state).expect("night resolves")
}

/// Answer that acts with `payload` on `role`'s turn and skips every other turn.
pub fn only(
    role: RoleId,
    payload: TurnPayload,
) -> impl FnMut(&NightTurn, &GameState) -> TurnOutcome {
    move |turn: &NightTurn, _: &GameState| {
        if turn.role_id == role {
            TurnOutcome::Acted(payload.clone())
        } else {
            TurnOutcome::Skipped
        }
    }
}

/// Payload with a single target.
pub fn target(seat: usize) -> TurnPayload {
    TurnPayload::default().with_target(pid(seat))
}
