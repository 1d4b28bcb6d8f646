//! Built-in roles.
//!
//! Each role is a [`Role`](crate::role::Role) plugin registered by
//! [`RoleRegistry::standard()`](crate::role::RoleRegistry::standard):
//!
//! - [`Villager`]: no power; the fallback role
//! - [`Werewolf`], [`WolfCub`]: the pack's nightly kill; cubs wake with wolves
//! - [`Escort`]: blocks a player for the night
//! - [`Disguiser`]: makes a player look like a villager to inspections
//! - [`SerialKiller`]: solo killer that vetoes every other victory
//! - [`Infector`]: turns the wolves' victim into a wolf, once
//! - [`Doctor`]: cancels kills from the roles it guards against
//! - [`Seer`], [`Ghost`]: inspections, from the living and from the dead
//! - [`Shaman`]: brings a dead player back, once
//! - [`Witch`]: a healing and a poison potion
//! - [`Tanner`]: wins by being eliminated
//!
//! Roles only propose effects through the night context; the night resolver
//! applies them.

mod disguiser;
mod doctor;
mod escort;
mod ghost;
mod infector;
mod seer;
mod serial_killer;
mod shaman;
mod tanner;
mod villager;
mod werewolf;
mod witch;
mod wolf_cub;

pub use disguiser::Disguiser;
pub use doctor::Doctor;
pub use escort::Escort;
pub use ghost::Ghost;
pub use infector::Infector;
pub use seer::Seer;
pub use serial_killer::SerialKiller;
pub use shaman::Shaman;
pub use tanner::Tanner;
pub use villager::Villager;
pub use werewolf::Werewolf;
pub use witch::Witch;
pub use wolf_cub::WolfCub;

use crate::action::NightAction;
use crate::error::RoleError;
use crate::game::GameState;
use crate::player::PlayerId;
use crate::role::{FactionId, RoleId};

// =============================================================================
// Identifiers
// =============================================================================

/// Villager role id.
pub const VILLAGER: RoleId = RoleId::from_static("villager");
/// Werewolf role id.
pub const WEREWOLF: RoleId = RoleId::from_static("werewolf");
/// Wolf cub role id.
pub const WOLF_CUB: RoleId = RoleId::from_static("wolf_cub");
/// Escort role id.
pub const ESCORT: RoleId = RoleId::from_static("escort");
/// Disguiser role id.
pub const DISGUISER: RoleId = RoleId::from_static("disguiser");
/// Serial killer role id.
pub const SERIAL_KILLER: RoleId = RoleId::from_static("serial_killer");
/// Infector role id.
pub const INFECTOR: RoleId = RoleId::from_static("infector");
/// Doctor role id.
pub const DOCTOR: RoleId = RoleId::from_static("doctor");
/// Seer role id.
pub const SEER: RoleId = RoleId::from_static("seer");
/// Shaman role id.
pub const SHAMAN: RoleId = RoleId::from_static("shaman");
/// Witch role id.
pub const WITCH: RoleId = RoleId::from_static("witch");
/// Ghost role id.
pub const GHOST: RoleId = RoleId::from_static("ghost");
/// Tanner role id.
pub const TANNER: RoleId = RoleId::from_static("tanner");

/// The village.
pub const VILLAGE_FACTION: FactionId = FactionId::from_static("village");
/// The pack.
pub const WEREWOLF_FACTION: FactionId = FactionId::from_static("werewolves");
/// The serial killer plays alone.
pub const SERIAL_KILLER_FACTION: FactionId = FactionId::from_static("serial_killer");
/// The tanner plays alone.
pub const TANNER_FACTION: FactionId = FactionId::from_static("tanner");

// =============================================================================
// Shared helpers
// =============================================================================

/// Number of living players whose real faction is `faction`.
fn alive_in(state: &GameState, faction: &FactionId) -> usize {
    state
        .players()
        .alive()
        .filter(|p| &p.state().real_faction == faction)
        .count()
}

/// The pack wins once it is at least as large as everyone else and no solo
/// killer is left to stop it.
fn werewolves_win(state: &GameState) -> bool {
    let wolves = alive_in(state, &WEREWOLF_FACTION);
    let others = state.players().alive().count() - wolves;
    wolves > 0 && wolves >= others && alive_in(state, &SERIAL_KILLER_FACTION) == 0
}

/// The target of an action, or a [`RoleError::MissingTarget`].
fn require_target(action: &NightAction) -> Result<PlayerId, RoleError> {
    action
        .target()
        .ok_or_else(|| RoleError::MissingTarget(action.role_id.clone()))
}

/// The acting player, or a [`RoleError::Failed`].
fn require_actor(action: &NightAction) -> Result<PlayerId, RoleError> {
    action
        .actor()
        .ok_or_else(|| RoleError::Failed(format!("turn for `{}` has no actor", action.role_id)))
}

#[cfg(test)]
mod test_support;
