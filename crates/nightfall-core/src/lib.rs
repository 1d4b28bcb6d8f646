//! # Nightfall Core
//!
//! Night-cycle rules engine for hidden-role elimination games.
//!
//! The crate schedules per-night role turns, gates them with eligibility
//! constraints, accumulates their effects and resolves those effects into
//! deaths, saves and inspections. Victory is evaluated with a veto pass
//! followed by a declare pass.
//!
//! ## Architecture
//!
//! Every role is a plugin behind the [`Role`](role::Role) trait; the engine
//! never matches on concrete roles.
//!
//! - **Roles**: declarations plus optional hooks, held in a [`RoleRegistry`]
//! - **Scheduler**: one turn at a time, recomputed after every result
//! - **Resolvers**: per-turn, end-of-night and day transition
//!
//! Rendering, input collection and persistence are left to the embedding
//! application; the engine speaks in [`NightTurn`]s, [`TurnOutcome`]s and a
//! JSON snapshot of the [`GameState`].
//!
//! ## Usage
//!
//! ```
//! use nightfall_core::{Engine, TurnOutcome, TurnPayload};
//! use nightfall_core::player::PlayerId;
//! use nightfall_core::role::RoleId;
//!
//! let engine = Engine::standard();
//! let mut game = engine.new_game(["Ada", "Brin", "Cole"]);
//! engine.assign_role(&mut game, PlayerId::new(0), &RoleId::from_static("werewolf")).unwrap();
//!
//! engine.begin_night(&mut game).unwrap();
//! let turn = engine.next_turn(&mut game).unwrap();
//! assert_eq!(turn.role_id.as_str(), "werewolf");
//!
//! let attack = TurnPayload::default().with_target(PlayerId::new(2));
//! engine.record_turn_result(&mut game, TurnOutcome::Acted(attack)).unwrap();
//! assert!(engine.next_turn(&mut game).is_none());
//!
//! let summary = engine.resolve_night(&mut game).unwrap();
//! assert_eq!(summary.died, vec![PlayerId::new(2)]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod action;
pub mod config;
pub mod constraint;
pub mod engine;
pub mod error;
pub mod game;
pub mod grouping;
pub mod ledger;
pub mod night;
pub mod player;
pub mod resolver;
pub mod role;
pub mod roles;
pub mod scheduler;
pub mod setup;
pub mod win;

pub use action::{TurnOutcome, TurnPayload, TurnRecord, TurnStatus};
pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{EngineError, EngineResult, RoleError};
pub use game::{GameState, Phase};
pub use night::{NightContext, NightTurn};
pub use resolver::{DayOutcome, NightSummary};
pub use role::{Role, RoleRegistry};
pub use win::Winner;

#[cfg(test)]
mod tests;
