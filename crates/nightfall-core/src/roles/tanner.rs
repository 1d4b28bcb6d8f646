//! Tanner: wants to be eliminated.

use crate::game::GameState;
use crate::player::PlayerId;
use crate::role::{Role, RoleDeclaration};

use super::{TANNER, TANNER_FACTION};

/// Tanner. Wins alone, instantly, when eliminated by the table.
pub struct Tanner {
    declaration: RoleDeclaration,
}

impl Tanner {
    /// Creates the tanner role.
    #[must_use]
    pub fn new() -> Self {
        Self {
            declaration: RoleDeclaration::new(TANNER, TANNER_FACTION),
        }
    }
}

impl Default for Tanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Role for Tanner {
    fn declaration(&self) -> &RoleDeclaration {
        &self.declaration
    }

    fn wins_on_elimination(&self, _state: &GameState, _player: PlayerId) -> bool {
        true
    }
}
