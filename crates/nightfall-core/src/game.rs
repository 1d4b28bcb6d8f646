//! Game state tree.
//!
//! [`GameState`] holds everything that survives between engine calls. It is
//! plain data: every rule lives in the [`Engine`](crate::engine::Engine) and
//! its resolvers, which take the state by `&mut` and leave it consistent
//! after each call.
//!
//! # Phases
//!
//! ```text
//! Setup ─begin_night─▶ Night ─resolve_night─▶ NightResolved ─continue_to_day─▶ Day
//!                        ▲                                        │              │
//!                        └──────────────────begin_night───────────┼──────────────┘
//!                                                                  ▼
//!                                                               GameOver
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::action::{HistoryEntry, TurnRecord};
use crate::config::EngineConfig;
use crate::grouping::AliasTable;
use crate::ledger::UsageLedger;
use crate::night::{NightContext, NightTurn};
use crate::player::{PlayerId, Roster};
use crate::resolver::NightSummary;
use crate::role::RoleRegistry;
use crate::win::Winner;

/// Where the game is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Players are seated and roles are being dealt.
    Setup,
    /// Night turns are being scheduled and recorded.
    Night,
    /// The night's effects were applied; waiting for the day transition.
    NightResolved,
    /// Daytime discussion and elimination.
    Day,
    /// A winner was declared.
    GameOver,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Setup => write!(f, "Setup"),
            Self::Night => write!(f, "Night"),
            Self::NightResolved => write!(f, "NightResolved"),
            Self::Day => write!(f, "Day"),
            Self::GameOver => write!(f, "GameOver"),
        }
    }
}

/// Complete, serializable state of one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) players: Roster,
    pub(crate) night: u32,
    pub(crate) day: u32,
    pub(crate) phase: Phase,
    #[serde(default)]
    pub(crate) aliases: AliasTable,
    #[serde(default)]
    pub(crate) context: NightContext,
    #[serde(default)]
    pub(crate) pending_turn: Option<NightTurn>,
    #[serde(default)]
    pub(crate) completed_turns: Vec<TurnRecord>,
    #[serde(default)]
    pub(crate) ledger: UsageLedger,
    #[serde(default)]
    pub(crate) history: Vec<HistoryEntry>,
    #[serde(default)]
    pub(crate) dead_at_night_start: Vec<PlayerId>,
    #[serde(default)]
    pub(crate) summaries: Vec<NightSummary>,
    #[serde(default)]
    pub(crate) winner: Option<Winner>,
    #[serde(default)]
    pub(crate) reveal_cursor: usize,
}

impl GameState {
    /// Creates a game in the setup phase.
    #[must_use]
    pub fn new(players: Roster) -> Self {
        Self {
            players,
            night: 0,
            day: 0,
            phase: Phase::Setup,
            aliases: AliasTable::default(),
            context: NightContext::default(),
            pending_turn: None,
            completed_turns: Vec::new(),
            ledger: UsageLedger::new(),
            history: Vec::new(),
            dead_at_night_start: Vec::new(),
            summaries: Vec::new(),
            winner: None,
            reveal_cursor: 0,
        }
    }

    /// The roster.
    #[must_use]
    pub fn players(&self) -> &Roster {
        &self.players
    }

    /// Current night number; 0 before the first night.
    #[must_use]
    pub fn night(&self) -> u32 {
        self.night
    }

    /// Current day number; 0 before the first day.
    #[must_use]
    pub fn day(&self) -> u32 {
        self.day
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The night's alias pairs.
    #[must_use]
    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// The night's accumulator.
    #[must_use]
    pub fn context(&self) -> &NightContext {
        &self.context
    }

    /// The turn awaiting a result, if any.
    #[must_use]
    pub fn pending_turn(&self) -> Option<&NightTurn> {
        self.pending_turn.as_ref()
    }

    /// Turns completed tonight, in scheduling order.
    #[must_use]
    pub fn completed_turns(&self) -> &[TurnRecord] {
        &self.completed_turns
    }

    /// The usage ledger.
    #[must_use]
    pub fn ledger(&self) -> &UsageLedger {
        &self.ledger
    }

    /// Every used turn of the game.
    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Summaries of every resolved night.
    #[must_use]
    pub fn summaries(&self) -> &[NightSummary] {
        &self.summaries
    }

    /// Summary of the last resolved night.
    #[must_use]
    pub fn last_summary(&self) -> Option<&NightSummary> {
        self.summaries.last()
    }

    /// The declared winner, once the game is over.
    #[must_use]
    pub fn winner(&self) -> Option<&Winner> {
        self.winner.as_ref()
    }

    /// Returns true once a winner is declared.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Gives every player whose role is not registered the fallback role.
    pub(crate) fn rehome_unknown_roles(&mut self, registry: &RoleRegistry, config: &EngineConfig) {
        let Some(fallback) = registry.declaration(&config.fallback_role) else {
            warn!(role = %config.fallback_role, "fallback role is not registered");
            return;
        };
        for player in self.players.iter_mut() {
            if !registry.contains(player.role_id()) {
                warn!(
                    player = %player.id(),
                    role = %player.role_id(),
                    fallback = %fallback.id,
                    "unknown role; player reassigned"
                );
                player.assign_role(fallback);
            }
        }
    }

    /// Repairs a deserialized state.
    ///
    /// Every role in tonight's turn log is marked called, a pending turn whose
    /// role was already called is dropped, and unknown roles are re-homed.
    pub fn reconcile(&mut self, registry: &RoleRegistry, config: &EngineConfig) {
        for record in &self.completed_turns {
            if self.context.mark_called(record.role_id.clone()) {
                warn!(role = %record.role_id, "called role missing from saved state; restored");
            }
        }

        if let Some(turn) = &self.pending_turn {
            if self.context.is_called(&turn.role_id) {
                warn!(role = %turn.role_id, "pending turn was already called; dropped");
                self.pending_turn = None;
            }
        }

        self.rehome_unknown_roles(registry, config);
    }
}
