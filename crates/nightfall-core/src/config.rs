//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::role::RoleId;

/// Configuration for an [`Engine`](crate::engine::Engine).
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```
/// use nightfall_core::config::EngineConfig;
///
/// let config = EngineConfig::from_json(r#"{ "simultaneous_wins": false }"#).unwrap();
/// assert!(!config.simultaneous_wins);
/// assert_eq!(config.fallback_role.as_str(), "villager");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Role given to players whose role is missing from the registry, and
    /// used to pad a role pool that is smaller than the player list.
    pub fallback_role: RoleId,
    /// When several factions declare victory in the same evaluation, return
    /// all of them. When false only the first declared faction wins.
    pub simultaneous_wins: bool,
    /// Declare a winner when every alive player shares one win faction even
    /// if no role's `check_win` fired.
    pub fallback_win_check: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fallback_role: RoleId::from_static("villager"),
            simultaneous_wins: true,
            fallback_win_check: true,
        }
    }
}

impl EngineConfig {
    /// Parses a configuration from JSON, filling missing fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Serialization`](crate::error::EngineError::Serialization)
    /// if the document is not valid JSON for this type.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
