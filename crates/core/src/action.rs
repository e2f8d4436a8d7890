//! The per-trial action stream.
//!
//! Every discrete user or system event inside a trial is appended here as
//! an [`Action`]: a label, an optional context (which entities were
//! involved, which slot they came from / went to), and a timestamp.
//! Appends are total -- recording never fails and never re-orders.
//!
//! Key invariant: `action_index` always equals the action's position in
//! its owning slice. The recorder buffers actions until the ledger drains
//! them into a [`FoundItem`](crate::ledger::FoundItem); each drained slice
//! restarts indexing at 0, and the concatenation of all slices in commit
//! order reproduces the full stream.

use serde::{Deserialize, Serialize};

use crate::entity::EntityId;

/// Milliseconds since the trial epoch.
pub type Millis = f64;

/// One atomic, timestamped event within a trial. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    /// Position of this action within its owning slice.
    pub action_index: u32,
    /// What happened, e.g. `"PLACE_SLOT"`, `"ENTER"`, or a letter key.
    pub label: String,
    /// Entities involved in the event, if any.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub involved_ids: Vec<EntityId>,
    /// Slot the moved entity left, for placement-style events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_slot: Option<String>,
    /// Slot the moved entity entered, for placement-style events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_slot: Option<String>,
    pub timestamp: Millis,
}

/// Append-only buffer of the actions accumulated since the last commit.
#[derive(Debug, Default)]
pub struct ActionRecorder {
    pending: Vec<Action>,
}

impl ActionRecorder {
    pub fn new() -> Self {
        ActionRecorder::default()
    }

    /// Append a plain action with the next contiguous index.
    pub fn record(&mut self, label: impl Into<String>, at: Millis) -> &Action {
        self.record_event(label, Vec::new(), None, None, at)
    }

    /// Append an action carrying entity/slot context.
    pub fn record_event(
        &mut self,
        label: impl Into<String>,
        involved_ids: Vec<EntityId>,
        from_slot: Option<&str>,
        to_slot: Option<&str>,
        at: Millis,
    ) -> &Action {
        let action = Action {
            action_index: self.pending.len() as u32,
            label: label.into(),
            involved_ids,
            from_slot: from_slot.map(str::to_owned),
            to_slot: to_slot.map(str::to_owned),
            timestamp: at,
        };
        self.pending.push(action);
        self.pending.last().expect("just pushed")
    }

    /// Take the accumulated slice, resetting the index scope to 0.
    pub fn drain(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> &[Action] {
        &self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_contiguous_from_zero() {
        let mut rec = ActionRecorder::new();
        for (i, label) in ["A", "B", "ENTER"].iter().enumerate() {
            let action = rec.record(*label, i as f64 * 100.0);
            assert_eq!(action.action_index, i as u32);
        }
        for (i, action) in rec.pending().iter().enumerate() {
            assert_eq!(action.action_index, i as u32);
        }
    }

    #[test]
    fn drain_resets_the_index_scope() {
        let mut rec = ActionRecorder::new();
        rec.record("A", 0.0);
        rec.record("ENTER", 10.0);
        let first = rec.drain();
        assert_eq!(first.len(), 2);
        assert!(rec.is_empty());

        let action = rec.record("B", 20.0);
        assert_eq!(action.action_index, 0);
    }

    #[test]
    fn context_fields_are_omitted_when_absent() {
        let mut rec = ActionRecorder::new();
        rec.record("HELP", 5.0);
        let json = serde_json::to_value(&rec.pending()[0]).unwrap();
        assert!(json.get("involvedIds").is_none());
        assert!(json.get("fromSlot").is_none());

        rec.record_event("PLACE_SLOT", vec![3], Some("hand"), Some("defenseA"), 6.0);
        let json = serde_json::to_value(&rec.pending()[1]).unwrap();
        assert_eq!(json["involvedIds"][0], 3);
        assert_eq!(json["fromSlot"], "hand");
        assert_eq!(json["toSlot"], "defenseA");
    }
}
