//! The matchmaking trial: pair generated singles on blind dates.
//!
//! The participant never sees the compatibility score; the judge runs
//! at match time and the score lands in the couple database for
//! analysis. The whole trial is one round whose found items are the
//! couples, with every hand/slot manipulation attached to the couple it
//! led to.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use parlor_core::{
    CoupleRecord, EntityId, Millis, Person, Round, RoundLedger, TrialConfig, TrialError,
};

use crate::clock::{ClockSignal, TrialClock};
use crate::judge::{judge_couple, news_message};
use crate::people::PersonGenerator;
use crate::trial::TRIAL_END_LABEL;

pub const MAX_HAND_SIZE: usize = 5;

/// Round configuration. The matchmaking trial has a single implicit
/// round, so there is nothing to configure per round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DatingRound {}

/// The found item of the round: one arranged couple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoupleFind {
    pub couple_index: u32,
    pub partner1_id: EntityId,
    pub partner2_id: EntityId,
}

/// The two date slots on the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchSlot {
    Slot1,
    Slot2,
}

impl MatchSlot {
    fn place_label(&self) -> &'static str {
        match self {
            MatchSlot::Slot1 => "PLACE_SLOT1",
            MatchSlot::Slot2 => "PLACE_SLOT2",
        }
    }

    fn remove_label(&self) -> &'static str {
        match self {
            MatchSlot::Slot1 => "REMOVE_SLOT1",
            MatchSlot::Slot2 => "REMOVE_SLOT2",
        }
    }
}

/// Why an input was turned away. Advisory only; the model is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatingRejection {
    /// The clock phase does not accept play input right now.
    InputDisabled,
    /// The slot already holds a person.
    SlotOccupied,
    /// The slot holds nobody.
    SlotEmpty,
    /// The referenced person is not in the hand.
    UnknownPerson,
    /// A date needs both slots filled.
    SlotsNotFilled,
}

/// The completed trial, by value, for the export collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatingTrialResult {
    pub rounds: Vec<Round<DatingRound, CoupleFind>>,
    /// Every person ever generated, exchanged or not.
    pub people_database: Vec<Person>,
    pub couple_database: Vec<CoupleRecord>,
    pub ended_at: Millis,
}

pub struct DatingTrial {
    clock: TrialClock,
    ledger: RoundLedger<DatingRound, CoupleFind>,
    generator: PersonGenerator,
    rng: StdRng,
    hand: Vec<Person>,
    slot1: Option<Person>,
    slot2: Option<Person>,
    people_database: Vec<Person>,
    couple_database: Vec<CoupleRecord>,
}

impl DatingTrial {
    pub fn new(config: TrialConfig, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut generator = PersonGenerator::new();
        let hand: Vec<Person> = (0..MAX_HAND_SIZE)
            .map(|_| generator.generate(&mut rng))
            .collect();

        let mut trial = DatingTrial {
            clock: TrialClock::new(&config),
            ledger: RoundLedger::new(),
            generator,
            people_database: hand.clone(),
            couple_database: Vec::new(),
            hand,
            slot1: None,
            slot2: None,
            rng,
        };
        trial
            .ledger
            .open_round(DatingRound {}, 0.0)
            .expect("fresh ledger");
        let ids: Vec<EntityId> = trial.hand.iter().map(|p| p.id).collect();
        trial
            .ledger
            .record_event("INITIAL_HAND", ids, None, None, 0.0);
        trial
    }

    pub fn clock(&self) -> &TrialClock {
        &self.clock
    }

    pub fn hand(&self) -> &[Person] {
        &self.hand
    }

    pub fn slots(&self) -> (Option<&Person>, Option<&Person>) {
        (self.slot1.as_ref(), self.slot2.as_ref())
    }

    pub fn couples(&self) -> &[CoupleRecord] {
        &self.couple_database
    }

    pub fn tick(&mut self) -> ClockSignal {
        self.clock.tick()
    }

    pub fn popup_continue(&mut self) -> ClockSignal {
        self.clock.choose_continue()
    }

    pub fn popup_end(&mut self) -> ClockSignal {
        self.clock.choose_end()
    }

    fn gate(&self) -> Result<(), DatingRejection> {
        if self.clock.input_allowed() {
            Ok(())
        } else {
            Err(DatingRejection::InputDisabled)
        }
    }

    fn slot(&mut self, slot: MatchSlot) -> &mut Option<Person> {
        match slot {
            MatchSlot::Slot1 => &mut self.slot1,
            MatchSlot::Slot2 => &mut self.slot2,
        }
    }

    /// Drag a hand card onto a date slot.
    pub fn place(
        &mut self,
        person_id: EntityId,
        slot: MatchSlot,
        at: Millis,
    ) -> Result<(), DatingRejection> {
        self.gate()?;
        if self.slot(slot).is_some() {
            return Err(DatingRejection::SlotOccupied);
        }
        let index = self
            .hand
            .iter()
            .position(|p| p.id == person_id)
            .ok_or(DatingRejection::UnknownPerson)?;
        self.ledger
            .record_event(slot.place_label(), vec![person_id], None, None, at);
        let person = self.hand.remove(index);
        *self.slot(slot) = Some(person);
        Ok(())
    }

    /// Click a slotted card to take it back into the hand.
    pub fn remove_slot(&mut self, slot: MatchSlot, at: Millis) -> Result<(), DatingRejection> {
        self.gate()?;
        let person = self.slot(slot).take().ok_or(DatingRejection::SlotEmpty)?;
        self.ledger
            .record_event(slot.remove_label(), vec![person.id], None, None, at);
        self.hand.push(person);
        Ok(())
    }

    /// Send a hand card home and draw a replacement.
    pub fn exchange(&mut self, person_id: EntityId, at: Millis) -> Result<(), DatingRejection> {
        self.gate()?;
        let index = self
            .hand
            .iter()
            .position(|p| p.id == person_id)
            .ok_or(DatingRejection::UnknownPerson)?;
        self.ledger
            .record_event("EXCHANGE", vec![person_id], None, None, at);
        self.hand.remove(index);
        let replacement = self.generator.generate(&mut self.rng);
        self.people_database.push(replacement.clone());
        self.hand.push(replacement);
        Ok(())
    }

    /// Replace the whole hand, leaving slotted persons in place.
    pub fn new_hand(&mut self, at: Millis) -> Result<(), DatingRejection> {
        self.gate()?;
        self.ledger.record("NEW_HAND", at);
        let in_slots = usize::from(self.slot1.is_some()) + usize::from(self.slot2.is_some());
        let new_size = MAX_HAND_SIZE - in_slots;
        self.hand.clear();
        for _ in 0..new_size {
            let person = self.generator.generate(&mut self.rng);
            self.people_database.push(person.clone());
            self.hand.push(person);
        }
        Ok(())
    }

    /// Send the two slotted persons on their blind date. The judge
    /// scores them now; the participant finds out never.
    pub fn make_match(&mut self, at: Millis) -> Result<&CoupleRecord, DatingRejection> {
        self.gate()?;
        let (Some(person1), Some(person2)) = (self.slot1.as_ref(), self.slot2.as_ref()) else {
            return Err(DatingRejection::SlotsNotFilled);
        };
        let score = judge_couple(person1, person2);
        let couple_index = self.couple_database.len() as u32;
        let record = CoupleRecord {
            couple_index,
            partner1_id: person1.id,
            partner2_id: person2.id,
            assigned_score: score,
            timestamp: at,
        };
        tracing::debug!(
            couple_index,
            partner1 = record.partner1_id,
            partner2 = record.partner2_id,
            score,
            "couple matched"
        );

        self.ledger.record_event(
            "MATCH",
            vec![record.partner1_id, record.partner2_id],
            None,
            None,
            at,
        );
        self.ledger
            .commit(
                CoupleFind {
                    couple_index,
                    partner1_id: record.partner1_id,
                    partner2_id: record.partner2_id,
                },
                at,
            )
            .expect("round is open while the trial runs");
        self.couple_database.push(record);
        self.slot1 = None;
        self.slot2 = None;

        // Two fresh singles join the hand, capped at the hand size.
        for _ in 0..2 {
            if self.hand.len() >= MAX_HAND_SIZE {
                break;
            }
            let person = self.generator.generate(&mut self.rng);
            self.people_database.push(person.clone());
            self.hand.push(person);
        }

        self.clock.grace_move_done();
        Ok(self.couple_database.last().expect("just pushed"))
    }

    /// Take both slotted persons back into the hand.
    pub fn clear_slots(&mut self, at: Millis) -> Result<(), DatingRejection> {
        self.gate()?;
        self.ledger.record("CLEAR_SLOTS", at);
        if let Some(person) = self.slot1.take() {
            self.hand.push(person);
        }
        if let Some(person) = self.slot2.take() {
            self.hand.push(person);
        }
        Ok(())
    }

    /// A gossip line about one of the recent couples, for the ticker in
    /// the corner. Not an action; presentation only.
    pub fn news(&mut self) -> Option<String> {
        news_message(&self.couple_database, &self.people_database, &mut self.rng)
    }

    /// The help overlay was opened.
    pub fn help(&mut self, at: Millis) {
        self.ledger.record("HELP", at);
    }

    /// Flush the trial. Consumes the controller, so the flush cannot
    /// run twice.
    pub fn finish(mut self, at: Millis) -> Result<DatingTrialResult, TrialError> {
        self.clock.end_now();
        self.clock.fire_end();
        self.ledger.record(TRIAL_END_LABEL, at);
        self.ledger.close_trial(at)?;
        tracing::info!(
            couples = self.couple_database.len(),
            people = self.people_database.len(),
            "dating trial finished"
        );
        Ok(DatingTrialResult {
            rounds: self.ledger.into_rounds(),
            people_database: self.people_database,
            couple_database: self.couple_database,
            ended_at: at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(limit: u32, graceful: bool) -> TrialConfig {
        TrialConfig {
            time_limit_seconds: limit,
            allow_graceful_extension: graceful,
            ..TrialConfig::default()
        }
    }

    fn place_pair(trial: &mut DatingTrial, at: Millis) -> (EntityId, EntityId) {
        let first = trial.hand()[0].id;
        let second = trial.hand()[1].id;
        trial.place(first, MatchSlot::Slot1, at).unwrap();
        trial.place(second, MatchSlot::Slot2, at).unwrap();
        (first, second)
    }

    #[test]
    fn a_match_commits_the_couple_and_refills_the_hand() {
        let mut trial = DatingTrial::new(config(60, false), 9);
        let (first, second) = place_pair(&mut trial, 1.0);
        let record = trial.make_match(2.0).unwrap();
        assert_eq!(record.partner1_id, first);
        assert_eq!(record.partner2_id, second);
        assert_eq!(trial.hand().len(), MAX_HAND_SIZE);
        assert_eq!(trial.slots(), (None, None));

        let result = trial.finish(3.0).unwrap();
        assert_eq!(result.couple_database.len(), 1);
        assert_eq!(result.rounds.len(), 1);
        let find = result.rounds[0].found[0].payload.as_ref().unwrap();
        assert_eq!(find.partner1_id, first);
        // The judge's verdict matches a recomputation.
        let p1 = result.people_database.iter().find(|p| p.id == first).unwrap();
        let p2 = result.people_database.iter().find(|p| p.id == second).unwrap();
        assert_eq!(result.couple_database[0].assigned_score, judge_couple(p1, p2));
    }

    #[test]
    fn occupied_slots_reject_placement() {
        let mut trial = DatingTrial::new(config(60, false), 9);
        let first = trial.hand()[0].id;
        let second = trial.hand()[1].id;
        trial.place(first, MatchSlot::Slot1, 1.0).unwrap();
        assert_eq!(
            trial.place(second, MatchSlot::Slot1, 2.0).unwrap_err(),
            DatingRejection::SlotOccupied
        );
        // The rejection left the model unchanged.
        assert_eq!(trial.hand().len(), MAX_HAND_SIZE - 1);
        assert!(trial.hand().iter().any(|p| p.id == second));
    }

    #[test]
    fn match_requires_both_slots() {
        let mut trial = DatingTrial::new(config(60, false), 9);
        assert_eq!(
            trial.make_match(1.0).unwrap_err(),
            DatingRejection::SlotsNotFilled
        );
        let first = trial.hand()[0].id;
        trial.place(first, MatchSlot::Slot1, 2.0).unwrap();
        assert_eq!(
            trial.make_match(3.0).unwrap_err(),
            DatingRejection::SlotsNotFilled
        );
    }

    #[test]
    fn exchange_and_new_hand_keep_every_generated_person() {
        let mut trial = DatingTrial::new(config(60, false), 9);
        let gone = trial.hand()[0].id;
        trial.exchange(gone, 1.0).unwrap();
        assert_eq!(trial.hand().len(), MAX_HAND_SIZE);
        assert!(!trial.hand().iter().any(|p| p.id == gone));

        let first = trial.hand()[0].id;
        trial.place(first, MatchSlot::Slot1, 2.0).unwrap();
        trial.new_hand(3.0).unwrap();
        // One slot filled, so the fresh hand holds one fewer card.
        assert_eq!(trial.hand().len(), MAX_HAND_SIZE - 1);

        let result = trial.finish(4.0).unwrap();
        // 5 initial + 1 exchange + 4 new hand.
        assert_eq!(result.people_database.len(), 10);
        assert!(result.people_database.iter().any(|p| p.id == gone));
    }

    #[test]
    fn couple_actions_slice_per_match() {
        let mut trial = DatingTrial::new(config(60, false), 9);
        place_pair(&mut trial, 1.0);
        trial.make_match(2.0).unwrap();
        place_pair(&mut trial, 3.0);
        trial.make_match(4.0).unwrap();

        let result = trial.finish(5.0).unwrap();
        let found = &result.rounds[0].found;
        assert_eq!(found.len(), 3); // two couples + trial-end sentinel
        let first_labels: Vec<_> = found[0].actions.iter().map(|a| a.label.as_str()).collect();
        assert_eq!(
            first_labels,
            ["INITIAL_HAND", "PLACE_SLOT1", "PLACE_SLOT2", "MATCH"]
        );
        let second_labels: Vec<_> = found[1].actions.iter().map(|a| a.label.as_str()).collect();
        assert_eq!(second_labels, ["PLACE_SLOT1", "PLACE_SLOT2", "MATCH"]);
        assert_eq!(found[2].actions.len(), 1);
        assert_eq!(found[2].actions[0].label, TRIAL_END_LABEL);
    }

    #[test]
    fn news_lines_mention_matched_partners() {
        let mut trial = DatingTrial::new(config(60, false), 9);
        assert!(trial.news().is_none());
        place_pair(&mut trial, 1.0);
        let record = trial.make_match(2.0).unwrap();
        let (id1, id2) = (record.partner1_id, record.partner2_id);
        let names: Vec<String> = trial
            .people_database
            .iter()
            .filter(|p| p.id == id1 || p.id == id2)
            .map(|p| p.name.clone())
            .collect();
        let line = trial.news().unwrap();
        assert!(names.iter().any(|name| line.contains(name)), "line {line}");
    }

    #[test]
    fn grace_move_is_one_match() {
        let mut trial = DatingTrial::new(config(1, true), 9);
        place_pair(&mut trial, 0.5);
        assert_eq!(trial.tick(), ClockSignal::PopupOpened);
        assert_eq!(
            trial.make_match(1.0).unwrap_err(),
            DatingRejection::InputDisabled
        );
        trial.popup_continue();
        trial.make_match(2.0).unwrap();
        assert!(trial.clock().is_ended());
        assert_eq!(
            trial.new_hand(3.0).unwrap_err(),
            DatingRejection::InputDisabled
        );
    }
}
