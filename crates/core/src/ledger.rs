//! Round ledger: rounds of found/resolved items plus their action slices.
//!
//! A trial's work is grouped into an ordered sequence of rounds. Each
//! round holds the configuration of one sub-puzzle instance (a letter
//! set, a numbers-and-target pair, a match setup) and an ordered list of
//! [`FoundItem`]s, each carrying the slice of the action stream that led
//! to it.
//!
//! Round and trial closure are explicit state, not inference: once a
//! round is superseded or the trial is sealed, nothing can be appended to
//! it. For the benefit of the downstream flattener a closed round still
//! ends with a payload-less terminal item whenever it closed without a
//! final successful resolution, so trailing actions are never lost.

use serde::{Deserialize, Serialize};

use crate::action::{Action, ActionRecorder, Millis};
use crate::error::TrialError;

/// One resolved (payload present) or explicitly abandoned (payload
/// `None`) attempt within a round.
///
/// The `actions` slice is disjoint from every other item's slice, and
/// concatenating all slices of a round in item order reproduces the
/// round's full action stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoundItem<P> {
    pub item_index: u32,
    /// `None` marks the terminal sentinel that carries actions which did
    /// not lead to a successful resolution.
    pub payload: Option<P>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submit_time: Option<Millis>,
    pub actions: Vec<Action>,
}

/// One sub-puzzle instance within a trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round<C, P> {
    pub round_index: u32,
    /// Round-specific configuration (letters, numbers + target, ...).
    pub config: C,
    pub start_time: Millis,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<Millis>,
    pub found: Vec<FoundItem<P>>,
}

/// Owns the rounds of one trial and the recorder feeding them.
///
/// All mutations are append-only and total; the only failure mode is
/// calling a mutation after [`close_trial`](RoundLedger::close_trial),
/// which is an invariant violation (asserted in debug builds, surfaced
/// as [`TrialError`] in release builds).
#[derive(Debug)]
pub struct RoundLedger<C, P> {
    rounds: Vec<Round<C, P>>,
    recorder: ActionRecorder,
    closed: bool,
}

impl<C, P> Default for RoundLedger<C, P> {
    fn default() -> Self {
        RoundLedger {
            rounds: Vec::new(),
            recorder: ActionRecorder::new(),
            closed: false,
        }
    }
}

impl<C, P> RoundLedger<C, P> {
    pub fn new() -> Self {
        RoundLedger::default()
    }

    /// Append an action to the current slice. Total; never fails.
    pub fn record(&mut self, label: impl Into<String>, at: Millis) -> &Action {
        debug_assert!(!self.closed, "record after close_trial");
        self.recorder.record(label, at)
    }

    /// Append an action carrying entity/slot context.
    pub fn record_event(
        &mut self,
        label: impl Into<String>,
        involved_ids: Vec<crate::entity::EntityId>,
        from_slot: Option<&str>,
        to_slot: Option<&str>,
        at: Millis,
    ) -> &Action {
        debug_assert!(!self.closed, "record after close_trial");
        self.recorder
            .record_event(label, involved_ids, from_slot, to_slot, at)
    }

    /// Close the current round (if any) and open the next one.
    pub fn open_round(&mut self, config: C, at: Millis) -> Result<(), TrialError> {
        if self.closed {
            debug_assert!(false, "open_round after close_trial");
            return Err(TrialError::TrialClosed);
        }
        self.seal_current_round(at);
        self.rounds.push(Round {
            round_index: self.rounds.len() as u32,
            config,
            start_time: at,
            end_time: None,
            found: Vec::new(),
        });
        Ok(())
    }

    /// Commit the accumulated action slice as a resolved item of the
    /// current round.
    pub fn commit(&mut self, payload: P, submit_time: Millis) -> Result<&FoundItem<P>, TrialError> {
        if self.closed {
            debug_assert!(false, "commit after close_trial");
            return Err(TrialError::TrialClosed);
        }
        let actions = self.recorder.drain();
        let round = self.rounds.last_mut().ok_or(TrialError::NoActiveRound)?;
        round.found.push(FoundItem {
            item_index: round.found.len() as u32,
            payload: Some(payload),
            submit_time: Some(submit_time),
            actions,
        });
        Ok(round.found.last().expect("just pushed"))
    }

    /// Seal the ledger: close the current round and refuse all further
    /// mutation. Uncommitted actions end up in the terminal sentinel.
    pub fn close_trial(&mut self, at: Millis) -> Result<(), TrialError> {
        if self.closed {
            return Err(TrialError::TrialClosed);
        }
        self.seal_current_round(at);
        self.closed = true;
        Ok(())
    }

    /// Close out the round at the tail of `rounds`, attaching the
    /// trailing sentinel when the round did not end on a successful
    /// resolution.
    fn seal_current_round(&mut self, at: Millis) {
        let Some(round) = self.rounds.last_mut() else {
            return;
        };
        if round.end_time.is_some() {
            return;
        }
        let trailing = self.recorder.drain();
        if !trailing.is_empty() || round.found.is_empty() {
            round.found.push(FoundItem {
                item_index: round.found.len() as u32,
                payload: None,
                submit_time: None,
                actions: trailing,
            });
        }
        round.end_time = Some(at);
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn rounds(&self) -> &[Round<C, P>] {
        &self.rounds
    }

    pub fn current_round(&self) -> Option<&Round<C, P>> {
        self.rounds.last().filter(|r| r.end_time.is_none())
    }

    /// Number of uncommitted actions in the current slice.
    pub fn pending_actions(&self) -> usize {
        self.recorder.pending().len()
    }

    /// Consume the ledger, yielding the rounds by value for the result
    /// object.
    pub fn into_rounds(self) -> Vec<Round<C, P>> {
        debug_assert!(self.closed, "exporting an unsealed ledger");
        self.rounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger() -> RoundLedger<&'static str, String> {
        let mut ledger = RoundLedger::new();
        ledger.open_round("round-0", 0.0).unwrap();
        ledger
    }

    #[test]
    fn commit_drains_the_slice_into_the_item() {
        let mut ledger = ledger();
        ledger.record("C", 1.0);
        ledger.record("A", 2.0);
        ledger.record("T", 3.0);
        ledger.record("ENTER", 4.0);
        let item = ledger.commit("CAT".to_string(), 4.0).unwrap();
        assert_eq!(item.item_index, 0);
        assert_eq!(item.actions.len(), 4);
        assert_eq!(ledger.pending_actions(), 0);
    }

    #[test]
    fn slices_concatenate_to_the_full_round_stream() {
        let mut ledger = ledger();
        ledger.record("C", 1.0);
        ledger.record("ENTER", 2.0);
        ledger.commit("C".to_string(), 2.0).unwrap();
        ledger.record("D", 3.0);
        ledger.record("ENTER", 4.0);
        ledger.commit("D".to_string(), 4.0).unwrap();
        ledger.record("E", 5.0);
        ledger.close_trial(6.0).unwrap();

        let rounds = ledger.into_rounds();
        let labels: Vec<&str> = rounds[0]
            .found
            .iter()
            .flat_map(|item| item.actions.iter().map(|a| a.label.as_str()))
            .collect();
        assert_eq!(labels, ["C", "ENTER", "D", "ENTER", "E"]);
        // Each slice restarts its index scope at zero.
        for item in &rounds[0].found {
            for (i, action) in item.actions.iter().enumerate() {
                assert_eq!(action.action_index, i as u32);
            }
        }
    }

    #[test]
    fn closing_without_resolution_appends_exactly_one_sentinel() {
        let mut ledger = ledger();
        ledger.record("C", 1.0);
        ledger.close_trial(2.0).unwrap();

        let rounds = ledger.into_rounds();
        let sentinels: Vec<_> = rounds[0]
            .found
            .iter()
            .filter(|item| item.payload.is_none())
            .collect();
        assert_eq!(sentinels.len(), 1);
        assert_eq!(sentinels[0].actions.len(), 1);
        assert_eq!(sentinels[0].submit_time, None);
    }

    #[test]
    fn round_ending_on_a_resolution_gets_no_sentinel() {
        let mut ledger = ledger();
        ledger.record("ENTER", 1.0);
        ledger.commit("CAT".to_string(), 1.0).unwrap();
        ledger.open_round("round-1", 2.0).unwrap();
        ledger.close_trial(3.0).unwrap();

        let rounds = ledger.into_rounds();
        assert_eq!(rounds[0].found.len(), 1);
        assert!(rounds[0].found[0].payload.is_some());
        assert_eq!(rounds[0].end_time, Some(2.0));
        // The empty follow-up round still closes with a sentinel.
        assert_eq!(rounds[1].found.len(), 1);
        assert!(rounds[1].found[0].payload.is_none());
    }

    #[test]
    fn commit_without_a_round_is_an_error() {
        let mut ledger: RoundLedger<&'static str, String> = RoundLedger::new();
        assert_eq!(
            ledger.commit("CAT".to_string(), 0.0).unwrap_err(),
            TrialError::NoActiveRound
        );
    }

    #[test]
    fn close_trial_is_not_reentrant() {
        let mut ledger = ledger();
        ledger.close_trial(1.0).unwrap();
        assert_eq!(ledger.close_trial(2.0).unwrap_err(), TrialError::TrialClosed);
    }
}
