//! Error types for the night-cycle engine.
//!
//! Two families of errors exist:
//!
//! - [`EngineError`]: the caller asked the engine for something the current
//!   game state does not allow (wrong phase, no pending turn, ...). The state
//!   is left untouched when one of these is returned.
//! - [`RoleError`]: a role hook failed. These never escape the engine; they
//!   are logged and the night keeps going for every other role.

use thiserror::Error;

use crate::game::Phase;
use crate::player::PlayerId;
use crate::role::RoleId;

/// Errors returned by [`Engine`](crate::engine::Engine) operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The operation is not valid in the current phase.
    #[error("operation `{operation}` is not allowed during phase {phase}")]
    InvalidPhase {
        /// The operation that was attempted.
        operation: &'static str,
        /// The phase the game was in.
        phase: Phase,
    },

    /// A turn result was recorded but no turn is waiting for one.
    #[error("no night turn is awaiting a result")]
    NoPendingTurn,

    /// The night cannot be resolved while a turn is still awaiting a result.
    #[error("turn for role `{0}` is still awaiting a result")]
    TurnPending(RoleId),

    /// The game already has a winner.
    #[error("the game is over")]
    GameOver,

    /// A player id does not exist in the roster.
    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),

    /// The player is already dead.
    #[error("player {0} is already dead")]
    PlayerDead(PlayerId),

    /// A role id does not exist in the registry.
    #[error("unknown role `{0}`")]
    UnknownRole(RoleId),

    /// Game state could not be serialized or deserialized.
    #[error("state serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors raised by role hooks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoleError {
    /// The action names a target the role cannot use.
    #[error("invalid target {0}")]
    InvalidTarget(PlayerId),

    /// The action is missing a target the role requires.
    #[error("role `{0}` needs a target")]
    MissingTarget(RoleId),

    /// A transformation named a role that is not registered.
    #[error("unknown role `{0}`")]
    UnknownRole(RoleId),

    /// Any other hook failure.
    #[error("{0}")]
    Failed(String),
}
