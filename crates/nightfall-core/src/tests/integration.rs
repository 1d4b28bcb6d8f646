//! Scripted nights driven through the public engine interface.

use super::*;
use crate::action::{TurnOutcome, TurnStatus};
use crate::constraint::BlockReason;
use crate::error::EngineError;
use crate::game::{GameState, Phase};
use crate::night::NightTurn;
use crate::resolver::DayOutcome;
use crate::role::RoleId;
use crate::roles::{
    DOCTOR, ESCORT, GHOST, INFECTOR, SEER, SERIAL_KILLER, SHAMAN, VILLAGER, VILLAGE_FACTION,
    WEREWOLF, WEREWOLF_FACTION, WITCH, WOLF_CUB,
};
use crate::win::Winner;

/// `lead` followed by villagers up to `size` seats.
fn table_of(lead: &[RoleId], size: usize) -> Vec<RoleId> {
    let mut roles = lead.to_vec();
    roles.resize(size, VILLAGER);
    roles
}

// =============================================================================
// Kills and protection
// =============================================================================

#[test]
fn protected_target_survives() {
    let engine = test_engine();
    let mut state = seat(&engine, &table_of(&[WEREWOLF, DOCTOR], 10));

    let summary = play_night(&engine, &mut state, |turn, _| match turn.role_id.as_str() {
        "werewolf" | "doctor" => TurnOutcome::Acted(target(5)),
        _ => TurnOutcome::Skipped,
    });

    assert!(state.players().get(pid(5)).unwrap().is_alive());
    assert!(summary.died.is_empty());
    assert_eq!(summary.saved, vec![pid(5)]);
}

#[test]
fn unprotected_target_dies() {
    let engine = test_engine();
    let mut state = seat(&engine, &table_of(&[WEREWOLF, DOCTOR], 10));

    let summary = play_night(&engine, &mut state, only(WEREWOLF, target(5)));

    assert!(!state.players().get(pid(5)).unwrap().is_alive());
    assert_eq!(summary.died, vec![pid(5)]);
    assert!(summary.saved.is_empty());
}

#[test]
fn double_attack_kills_once() {
    let engine = test_engine();
    let mut state = seat(&engine, &table_of(&[WEREWOLF, WITCH], 6));

    let summary = play_night(&engine, &mut state, |turn, _| match turn.role_id.as_str() {
        "werewolf" => TurnOutcome::Acted(target(3)),
        "witch" => TurnOutcome::Acted(target(3).with_choice("poison")),
        _ => TurnOutcome::Skipped,
    });

    assert_eq!(summary.died, vec![pid(3)]);
}

#[test]
fn witch_heal_saves_wolf_victim() {
    let engine = test_engine();
    let mut state = seat(&engine, &table_of(&[WEREWOLF, WITCH], 6));

    let summary = play_night(&engine, &mut state, |turn, _| match turn.role_id.as_str() {
        "werewolf" => TurnOutcome::Acted(target(4)),
        "witch" => TurnOutcome::Acted(target(4).with_choice("heal")),
        _ => TurnOutcome::Skipped,
    });

    assert!(summary.died.is_empty());
    assert_eq!(summary.saved, vec![pid(4)]);
}

#[test]
fn shaman_revival_is_reported() {
    let engine = test_engine();
    let mut state = seat(&engine, &table_of(&[WEREWOLF, SHAMAN], 6));

    play_night(&engine, &mut state, only(WEREWOLF, target(4)));
    assert!(matches!(
        engine.continue_to_day(&mut state).unwrap(),
        DayOutcome::Continue { day: 1 }
    ));

    let summary = play_night(&engine, &mut state, only(SHAMAN, target(4)));
    assert_eq!(summary.resurrected, vec![pid(4)]);
    assert!(state.players().get(pid(4)).unwrap().is_alive());
}

// =============================================================================
// Scheduling
// =============================================================================

#[test]
fn turns_follow_priority() {
    let engine = test_engine();
    let mut state = seat(&engine, &[SEER, DOCTOR, WEREWOLF, ESCORT, VILLAGER]);

    let mut order = Vec::new();
    play_night(&engine, &mut state, |turn, _| {
        order.push(turn.role_id.clone());
        TurnOutcome::Skipped
    });

    assert_eq!(order, vec![ESCORT, WEREWOLF, DOCTOR, SEER]);
}

#[test]
fn escort_block_lasts_one_night() {
    let engine = test_engine();
    let mut state = seat(&engine, &table_of(&[ESCORT, SEER, WEREWOLF], 6));

    let mut seer_turns: Vec<NightTurn> = Vec::new();
    let mut answer = |turn: &NightTurn, _: &GameState| {
        if turn.role_id == SEER {
            seer_turns.push(turn.clone());
        }
        if turn.role_id == ESCORT && seer_turns.is_empty() {
            TurnOutcome::Acted(target(1))
        } else {
            TurnOutcome::Skipped
        }
    };

    play_night(&engine, &mut state, &mut answer);
    engine.continue_to_day(&mut state).unwrap();
    play_night(&engine, &mut state, &mut answer);

    assert_eq!(seer_turns.len(), 2);
    assert_eq!(seer_turns[0].blocked, Some(BlockReason::Blocked));
    assert_eq!(seer_turns[1].blocked, None);
}

#[test]
fn cub_wakes_with_the_pack() {
    let engine = test_engine();
    let mut state = seat(&engine, &table_of(&[WEREWOLF, WOLF_CUB], 6));

    engine.begin_night(&mut state).unwrap();
    let turn = engine.next_turn(&mut state).unwrap();
    assert_eq!(turn.role_id, WEREWOLF);
    assert_eq!(turn.actor_ids, vec![pid(0), pid(1)]);
}

#[test]
fn lone_cub_still_gets_the_pack_turn() {
    let engine = test_engine();
    let mut state = seat(&engine, &table_of(&[WOLF_CUB], 5));

    let mut turns = Vec::new();
    let summary = play_night(&engine, &mut state, |turn, _| {
        turns.push((turn.role_id.clone(), turn.actor_ids.clone()));
        if turn.role_id == WEREWOLF {
            TurnOutcome::Acted(target(3))
        } else {
            TurnOutcome::Skipped
        }
    });

    assert_eq!(turns, vec![(WEREWOLF, vec![pid(0)])]);
    assert_eq!(summary.died, vec![pid(3)]);
    assert!(state
        .completed_turns()
        .iter()
        .any(|t| t.role_id == WOLF_CUB && t.status == TurnStatus::Passive));
}

#[test]
fn late_and_dead_only_roles_are_blocked() {
    let engine = test_engine();
    let mut state = seat(&engine, &table_of(&[SERIAL_KILLER, GHOST, WEREWOLF], 6));

    let mut blocked = Vec::new();
    play_night(&engine, &mut state, |turn, _| {
        if let Some(reason) = turn.blocked {
            blocked.push((turn.role_id.clone(), reason));
        }
        TurnOutcome::Skipped
    });

    assert!(blocked.contains(&(SERIAL_KILLER, BlockReason::StartNight)));
    assert!(blocked.contains(&(GHOST, BlockReason::Alive)));
}

#[test]
fn acting_on_a_blocked_turn_is_recorded_as_blocked() {
    let engine = test_engine();
    let mut state = seat(&engine, &table_of(&[GHOST], 4));

    engine.begin_night(&mut state).unwrap();
    let turn = engine.next_turn(&mut state).unwrap();
    assert_eq!(turn.blocked, Some(BlockReason::Alive));

    let record = engine
        .record_turn_result(&mut state, TurnOutcome::Acted(target(2)))
        .unwrap();
    assert_eq!(record.status, TurnStatus::Blocked(BlockReason::Alive));
    assert!(state.history().is_empty());
}

// =============================================================================
// Usage limits and transformation
// =============================================================================

#[test]
fn limited_role_is_blocked_after_its_use() {
    let engine = test_engine();
    let mut state = seat(&engine, &table_of(&[WEREWOLF, INFECTOR], 10));

    play_night(&engine, &mut state, |turn, _| match turn.role_id.as_str() {
        "werewolf" | "infector" => TurnOutcome::Acted(target(2)),
        _ => TurnOutcome::Skipped,
    });
    assert_eq!(state.ledger().uses(&INFECTOR, pid(1)), 1);
    assert_eq!(state.players().get(pid(2)).unwrap().role_id(), &WEREWOLF);
    engine.continue_to_day(&mut state).unwrap();

    let mut infector_turn = None;
    play_night(&engine, &mut state, |turn, _| {
        if turn.role_id == INFECTOR {
            infector_turn = Some(turn.clone());
        }
        TurnOutcome::Skipped
    });

    let turn = infector_turn.expect("infector is still called");
    assert_eq!(turn.blocked, Some(BlockReason::UsageLimit));
    assert!(!turn.can_act());
}

#[test]
fn transformed_player_acts_under_new_role() {
    let engine = test_engine();
    // p1 has spent the infector's single use, p2 the shaman's.
    let mut state = seat(
        &engine,
        &table_of(&[ALCHEMIST, INFECTOR, SHAMAN, VILLAGER, WEREWOLF], 8),
    );
    state.ledger.record(&INFECTOR, pid(1));
    state.ledger.record(&SHAMAN, pid(2));
    state.players.set_alive(pid(3), false);

    let mut shaman_turn = None;
    let summary = play_night(&engine, &mut state, |turn, _| match turn.role_id.as_str() {
        "alchemist" => TurnOutcome::Acted(target(1)),
        "shaman" => {
            shaman_turn = Some(turn.clone());
            TurnOutcome::Acted(target(3))
        }
        _ => TurnOutcome::Skipped,
    });

    let turn = shaman_turn.expect("shaman is called");
    assert_eq!(turn.actor_ids, vec![pid(1), pid(2)]);
    assert_eq!(turn.blocked, None);
    assert!(!state
        .completed_turns()
        .iter()
        .any(|t| t.role_id == INFECTOR));
    assert_eq!(state.ledger().uses(&SHAMAN, pid(1)), 1);
    assert_eq!(state.ledger().uses(&SHAMAN, pid(2)), 1);
    assert_eq!(summary.resurrected, vec![pid(3)]);
}

// =============================================================================
// Victory
// =============================================================================

#[test]
fn nobody_alive_is_a_tie() {
    let engine = test_engine();
    let mut state = seat(&engine, &table_of(&[WEREWOLF], 4));
    for i in 0..4 {
        state.players.set_alive(pid(i), false);
    }
    assert_eq!(engine.evaluate_winner(&state), Winner::Tie);
}

#[test]
fn serial_killer_vetoes_the_pack() {
    let engine = test_engine();
    let mut state = seat(&engine, &[WEREWOLF, WEREWOLF, SERIAL_KILLER, VILLAGER]);
    assert_eq!(engine.evaluate_winner(&state), Winner::None);

    state.players.set_alive(pid(2), false);
    assert_eq!(
        engine.evaluate_winner(&state),
        Winner::Faction(WEREWOLF_FACTION)
    );
}

#[test]
fn pack_wins_at_parity() {
    let engine = test_engine();
    let mut state = seat(&engine, &[WEREWOLF, VILLAGER, VILLAGER]);

    play_night(&engine, &mut state, only(WEREWOLF, target(1)));
    let outcome = engine.continue_to_day(&mut state).unwrap();

    assert_eq!(outcome, DayOutcome::GameOver(Winner::Faction(WEREWOLF_FACTION)));
    assert_eq!(state.phase(), Phase::GameOver);
    assert!(matches!(engine.begin_night(&mut state), Err(EngineError::GameOver)));
}

#[test]
fn village_wins_after_the_vote() {
    let engine = test_engine();
    let mut state = seat(&engine, &table_of(&[WEREWOLF, SEER], 5));

    let summary = play_night(&engine, &mut state, only(SEER, target(0)));
    assert_eq!(summary.checks.len(), 1);
    assert_eq!(summary.checks[0].faction, WEREWOLF_FACTION);

    engine.continue_to_day(&mut state).unwrap();
    let winner = engine.eliminate_player(&mut state, pid(0)).unwrap();
    assert_eq!(winner, Winner::Faction(VILLAGE_FACTION));
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn saved_mid_night_game_finishes_the_same() {
    let engine = test_engine();
    let roles = table_of(&[WEREWOLF, DOCTOR, SEER], 7);
    let answer = |turn: &NightTurn, _: &GameState| match turn.role_id.as_str() {
        "werewolf" => TurnOutcome::Acted(target(4)),
        "seer" => TurnOutcome::Acted(target(0)),
        _ => TurnOutcome::Skipped,
    };

    let mut straight = seat(&engine, &roles);
    let expected = play_night(&engine, &mut straight, answer);

    let mut interrupted = seat(&engine, &roles);
    engine.begin_night(&mut interrupted).unwrap();
    let first = engine.next_turn(&mut interrupted).unwrap();
    let outcome = answer(&first, &interrupted);
    engine.record_turn_result(&mut interrupted, outcome).unwrap();
    engine.next_turn(&mut interrupted).unwrap();

    let json = engine.save(&interrupted).unwrap();
    let mut restored = engine.load(&json).unwrap();
    assert_eq!(restored, interrupted);

    while let Some(turn) = engine.next_turn(&mut restored) {
        let outcome = answer(&turn, &restored);
        engine.record_turn_result(&mut restored, outcome).unwrap();
    }
    let summary = engine.resolve_night(&mut restored).unwrap();

    assert_eq!(summary, expected);
    assert_eq!(restored.players(), straight.players());
}

#[test]
fn load_rehomes_roles_missing_from_the_registry() {
    let engine = test_engine();
    let state = seat(&engine, &table_of(&[ALCHEMIST, WEREWOLF], 4));
    let json = engine.save(&state).unwrap();

    let standard = crate::engine::Engine::standard();
    let loaded = standard.load(&json).unwrap();
    assert_eq!(loaded.players().get(pid(0)).unwrap().role_id(), &VILLAGER);
    assert_eq!(loaded.players().get(pid(1)).unwrap().role_id(), &WEREWOLF);
}
