//! Turn results, night actions and history records.
//!
//! The presentation layer answers a [`NightTurn`](crate::night::NightTurn)
//! with a [`TurnOutcome`]. The discriminant makes "skipped" and "blocked"
//! explicit; an `Acted` payload is still checked for meaningful content, so
//! an empty form submitted by the UI counts as a skip.
//!
//! # Example
//!
//! ```
//! use nightfall_core::action::{TurnOutcome, TurnPayload};
//! use nightfall_core::player::PlayerId;
//!
//! let outcome = TurnOutcome::Acted(TurnPayload::default().with_target(PlayerId::new(3)));
//! assert!(outcome.payload().unwrap().is_meaningful());
//!
//! assert!(!TurnPayload::default().is_meaningful());
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constraint::BlockReason;
use crate::player::PlayerId;
use crate::role::RoleId;

// =============================================================================
// Turn Payload
// =============================================================================

/// What the acting players chose.
///
/// Every field is optional. Role-specific data that fits none of the typed
/// fields goes into `discoveries`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurnPayload {
    /// Explicit "used" marker. `Some(false)` forces a skip.
    pub used: Option<bool>,
    /// Single target.
    pub target: Option<PlayerId>,
    /// Multiple targets.
    pub targets: Vec<PlayerId>,
    /// Free-form choice (e.g. which potion).
    pub choice: Option<String>,
    /// Named action (e.g. "infect").
    pub action: Option<String>,
    /// A role the actor declared or guessed.
    pub declared_role: Option<RoleId>,
    /// Role-specific fields.
    pub discoveries: BTreeMap<String, serde_json::Value>,
}

impl TurnPayload {
    /// Sets the single target.
    #[must_use]
    pub fn with_target(mut self, target: PlayerId) -> Self {
        self.target = Some(target);
        self
    }

    /// Sets the target list.
    #[must_use]
    pub fn with_targets(mut self, targets: Vec<PlayerId>) -> Self {
        self.targets = targets;
        self
    }

    /// Sets the choice.
    #[must_use]
    pub fn with_choice(mut self, choice: impl Into<String>) -> Self {
        self.choice = Some(choice.into());
        self
    }

    /// Sets the named action.
    #[must_use]
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Sets the declared role.
    #[must_use]
    pub fn with_declared_role(mut self, role: impl Into<RoleId>) -> Self {
        self.declared_role = Some(role.into());
        self
    }

    /// Adds a role-specific field.
    #[must_use]
    pub fn with_discovery(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.discoveries.insert(key.into(), value);
        self
    }

    /// Sets the explicit used marker.
    #[must_use]
    pub fn with_used(mut self, used: bool) -> Self {
        self.used = Some(used);
        self
    }

    /// Every named target: `target` first, then `targets`, without repeats.
    #[must_use]
    pub fn all_targets(&self) -> Vec<PlayerId> {
        let mut out = Vec::with_capacity(self.targets.len() + 1);
        for id in self.target.iter().chain(self.targets.iter()) {
            if !out.contains(id) {
                out.push(*id);
            }
        }
        out
    }

    /// Keeps only the targets for which `keep` returns true.
    pub fn retain_targets(&mut self, mut keep: impl FnMut(PlayerId) -> bool) {
        if let Some(target) = self.target {
            if !keep(target) {
                self.target = None;
            }
        }
        self.targets.retain(|id| keep(*id));
    }

    /// Returns true if the payload carries anything that means the power was
    /// used.
    #[must_use]
    pub fn is_meaningful(&self) -> bool {
        match self.used {
            Some(used) => used,
            None => {
                self.target.is_some()
                    || !self.targets.is_empty()
                    || self.choice.as_deref().is_some_and(|c| !c.is_empty())
                    || self.action.as_deref().is_some_and(|a| !a.is_empty())
                    || self.declared_role.is_some()
                    || !self.discoveries.is_empty()
            }
        }
    }
}

// =============================================================================
// Turn Outcome
// =============================================================================

/// Result recorded for a night turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "payload", rename_all = "snake_case")]
pub enum TurnOutcome {
    /// The actors chose not to act.
    Skipped,
    /// The presentation layer reports the actors could not act.
    Blocked,
    /// The actors made a choice.
    Acted(TurnPayload),
}

impl TurnOutcome {
    /// Returns the payload of an `Acted` outcome.
    #[must_use]
    pub fn payload(&self) -> Option<&TurnPayload> {
        match self {
            Self::Acted(payload) => Some(payload),
            Self::Skipped | Self::Blocked => None,
        }
    }
}

// =============================================================================
// Night Action
// =============================================================================

/// A used turn, as handed to [`Role::resolve`](crate::role::Role::resolve).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NightAction {
    /// Night number.
    pub night: u32,
    /// Role whose turn this was.
    pub role_id: RoleId,
    /// Players who acted.
    pub actor_ids: Vec<PlayerId>,
    /// Sanitized payload.
    pub payload: TurnPayload,
}

impl NightAction {
    /// The first target, if any.
    #[must_use]
    pub fn target(&self) -> Option<PlayerId> {
        self.payload.all_targets().first().copied()
    }

    /// Every target.
    #[must_use]
    pub fn targets(&self) -> Vec<PlayerId> {
        self.payload.all_targets()
    }

    /// The first actor, if any.
    #[must_use]
    pub fn actor(&self) -> Option<PlayerId> {
        self.actor_ids.first().copied()
    }

    /// The payload choice, if any.
    #[must_use]
    pub fn choice(&self) -> Option<&str> {
        self.payload.choice.as_deref()
    }
}

/// One line of the game history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Night number.
    pub night: u32,
    /// Role that acted.
    pub role_id: RoleId,
    /// Players who acted.
    pub actor_ids: Vec<PlayerId>,
    /// Players the action touched.
    pub targets: Vec<PlayerId>,
    /// Short description.
    pub note: String,
}

impl HistoryEntry {
    /// Builds an entry for an action with a custom note.
    #[must_use]
    pub fn new(action: &NightAction, note: impl Into<String>) -> Self {
        Self {
            night: action.night,
            role_id: action.role_id.clone(),
            actor_ids: action.actor_ids.clone(),
            targets: action.targets(),
            note: note.into(),
        }
    }

    /// The generic entry used when a role returns none of its own.
    #[must_use]
    pub fn generic(action: &NightAction) -> Self {
        let note = match (action.choice(), action.payload.action.as_deref()) {
            (Some(choice), _) => format!("used ({choice})"),
            (None, Some(named)) => format!("used ({named})"),
            (None, None) => "used".to_string(),
        };
        Self::new(action, note)
    }
}

// =============================================================================
// Turn Status
// =============================================================================

/// How a turn ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnStatus {
    /// The power was used and the role's `resolve` ran.
    Used,
    /// The actors did not act.
    Skipped,
    /// The actors could not act.
    Blocked(BlockReason),
    /// The role never prompts; its passive effect ran instead.
    Passive,
}

impl fmt::Display for TurnStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Used => write!(f, "used"),
            Self::Skipped => write!(f, "skipped"),
            Self::Blocked(reason) => write!(f, "blocked ({reason})"),
            Self::Passive => write!(f, "passive"),
        }
    }
}

/// Entry of the completed-turns log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Role whose turn this was.
    pub role_id: RoleId,
    /// Players who were scheduled.
    pub actor_ids: Vec<PlayerId>,
    /// How the turn ended.
    pub status: TurnStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(payload: TurnPayload) -> NightAction {
        NightAction {
            night: 2,
            role_id: RoleId::from_static("witch"),
            actor_ids: vec![PlayerId::new(4)],
            payload,
        }
    }

    mod payload_tests {
        use super::*;

        #[test]
        fn empty_payload_is_not_meaningful() {
            assert!(!TurnPayload::default().is_meaningful());
        }

        #[test]
        fn each_marker_is_meaningful() {
            let p = PlayerId::new(1);
            assert!(TurnPayload::default().with_target(p).is_meaningful());
            assert!(TurnPayload::default().with_targets(vec![p]).is_meaningful());
            assert!(TurnPayload::default().with_choice("heal").is_meaningful());
            assert!(TurnPayload::default().with_action("infect").is_meaningful());
            assert!(TurnPayload::default().with_declared_role("seer").is_meaningful());
            assert!(TurnPayload::default()
                .with_discovery("clue", serde_json::json!(true))
                .is_meaningful());
            assert!(TurnPayload::default().with_used(true).is_meaningful());
        }

        #[test]
        fn empty_strings_do_not_count() {
            assert!(!TurnPayload::default().with_choice("").is_meaningful());
            assert!(!TurnPayload::default().with_action("").is_meaningful());
        }

        #[test]
        fn explicit_unused_wins_over_markers() {
            let payload = TurnPayload::default()
                .with_target(PlayerId::new(1))
                .with_used(false);
            assert!(!payload.is_meaningful());
        }

        #[test]
        fn all_targets_dedupes_in_order() {
            let payload = TurnPayload::default()
                .with_target(PlayerId::new(2))
                .with_targets(vec![PlayerId::new(5), PlayerId::new(2), PlayerId::new(1)]);
            assert_eq!(
                payload.all_targets(),
                vec![PlayerId::new(2), PlayerId::new(5), PlayerId::new(1)]
            );
        }

        #[test]
        fn retain_targets_drops_both_forms() {
            let mut payload = TurnPayload::default()
                .with_target(PlayerId::new(9))
                .with_targets(vec![PlayerId::new(9), PlayerId::new(1)]);
            payload.retain_targets(|id| id != PlayerId::new(9));
            assert_eq!(payload.target, None);
            assert_eq!(payload.targets, vec![PlayerId::new(1)]);
        }

        #[test]
        fn deserializes_partial_document() {
            let payload: TurnPayload = serde_json::from_str(r#"{ "target": 3 }"#).unwrap();
            assert_eq!(payload.target, Some(PlayerId::new(3)));
            assert!(payload.targets.is_empty());
        }
    }

    mod outcome_tests {
        use super::*;

        #[test]
        fn tagged_json_shape() {
            let json = serde_json::to_value(TurnOutcome::Skipped).unwrap();
            assert_eq!(json, serde_json::json!({ "outcome": "skipped" }));

            let acted = TurnOutcome::Acted(TurnPayload::default().with_target(PlayerId::new(1)));
            let json = serde_json::to_value(&acted).unwrap();
            assert_eq!(json["outcome"], "acted");
            assert_eq!(json["payload"]["target"], 1);
        }

        #[test]
        fn payload_accessor() {
            assert!(TurnOutcome::Blocked.payload().is_none());
            assert!(TurnOutcome::Acted(TurnPayload::default()).payload().is_some());
        }
    }

    mod history_tests {
        use super::*;

        #[test]
        fn generic_entry_mentions_choice() {
            let entry = HistoryEntry::generic(&action(
                TurnPayload::default()
                    .with_choice("poison")
                    .with_target(PlayerId::new(1)),
            ));
            assert_eq!(entry.note, "used (poison)");
            assert_eq!(entry.targets, vec![PlayerId::new(1)]);
            assert_eq!(entry.night, 2);
        }

        #[test]
        fn generic_entry_without_choice() {
            let entry = HistoryEntry::generic(&action(TurnPayload::default().with_used(true)));
            assert_eq!(entry.note, "used");
            assert!(entry.targets.is_empty());
        }
    }

    #[test]
    fn turn_status_display() {
        assert_eq!(TurnStatus::Used.to_string(), "used");
        assert_eq!(
            TurnStatus::Blocked(BlockReason::UsageLimit).to_string(),
            "blocked (usage limit)"
        );
    }
}
