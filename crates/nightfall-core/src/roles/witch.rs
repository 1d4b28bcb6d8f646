//! Witch: a healing potion and a poison.

use crate::action::{HistoryEntry, NightAction};
use crate::error::RoleError;
use crate::player::{NightMode, Priority, UsagePolicy};
use crate::role::{NightScope, Role, RoleDeclaration};

use super::{require_actor, require_target, VILLAGE_FACTION, WITCH};

/// Healing potion choice.
pub const HEAL: &str = "heal";
/// Poison potion choice.
pub const POISON: &str = "poison";

/// Witch.
///
/// Acts late, after every attacker. `heal` removes every cancelable kill on
/// the target; `poison` adds a kill nobody can cancel. Two potions per game.
pub struct Witch {
    declaration: RoleDeclaration,
}

impl Witch {
    /// Creates the witch role.
    #[must_use]
    pub fn new() -> Self {
        Self {
            declaration: RoleDeclaration::new(WITCH, VILLAGE_FACTION)
                .with_priority(Priority::Ordered(40))
                .with_night_mode(NightMode::AliveOnly)
                .with_usage(UsagePolicy::limited(2)),
        }
    }
}

impl Default for Witch {
    fn default() -> Self {
        Self::new()
    }
}

impl Role for Witch {
    fn declaration(&self) -> &RoleDeclaration {
        &self.declaration
    }

    fn resolve(
        &self,
        scope: &mut NightScope<'_>,
        action: &NightAction,
    ) -> Result<Option<HistoryEntry>, RoleError> {
        let actor = require_actor(action)?;
        let target = require_target(action)?;
        match action.choice() {
            Some(HEAL) => {
                let canceled = scope.context_mut().cancel_kills(target, &[]);
                if !canceled.is_empty() {
                    scope.context_mut().add_save(actor, target, canceled);
                }
                Ok(Some(HistoryEntry::new(action, "healed")))
            }
            Some(POISON) => {
                scope
                    .context_mut()
                    .add_kill(target, self.declaration.id.clone(), false);
                Ok(Some(HistoryEntry::new(action, "poisoned")))
            }
            Some(other) => Err(RoleError::Failed(format!("unknown potion `{other}`"))),
            None => Err(RoleError::Failed("no potion chosen".into())),
        }
    }
}
