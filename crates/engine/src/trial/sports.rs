//! The management trial: draft players, fill two lineups, simulate.
//!
//! One round is one match: the round's action slice is every hand and
//! field manipulation that led up to kickoff, the found item is the
//! simulated outcome, and the round closes when the participant
//! dismisses the result. Every drafted player stays in the trial's
//! player database even after being discarded or dismissed, because
//! match records reference players by id.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use parlor_core::{
    EntityId, MatchOutcome, MatchRecord, Millis, Player, Round, RoundLedger, SlotFill,
    TrialConfig, TrialError,
};

use crate::clock::{ClockSignal, TrialClock};
use crate::football::{simulate, FieldSlot, TeamSheet};
use crate::roster::{generate_team_names, PlayerGenerator};
use crate::ticker::{generate_ticker, TickerEvent};
use crate::trial::TRIAL_END_LABEL;

pub const MAX_INITIAL_HAND: usize = 5;
pub const MAX_HAND_SIZE: usize = 6;

/// Round configuration: the club pairing for this match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRound {
    pub team_a_name: String,
    pub team_b_name: String,
}

/// The found item of a round: which match was played and how it went.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchPlay {
    pub match_index: u32,
    pub outcome: MatchOutcome,
}

/// Why an input was turned away. Advisory only; the model is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SportsRejection {
    /// The clock phase does not accept play input right now.
    InputDisabled,
    /// The hand is at capacity.
    HandFull,
    /// The referenced player is not where the event says it is.
    UnknownPlayer,
    /// Kickoff needs all eight positions filled and no open result.
    NotReady,
    /// The result modal is (or is not) open.
    NoOpenResult,
    /// Nothing on the field to clear.
    FieldEmpty,
}

/// The completed trial, by value, for the export collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SportsTrialResult {
    pub rounds: Vec<Round<MatchRound, MatchPlay>>,
    /// Every player ever generated, discarded or not.
    pub player_database: Vec<Player>,
    pub match_database: Vec<MatchRecord>,
    pub ended_at: Millis,
}

/// Whether the controller is taking lineup input or showing a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Setup,
    Result,
}

pub struct SportsTrial {
    clock: TrialClock,
    ledger: RoundLedger<MatchRound, MatchPlay>,
    generator: PlayerGenerator,
    rng: StdRng,
    hand: Vec<Player>,
    sheet: TeamSheet,
    stage: Stage,
    team_names: (String, String),
    player_database: Vec<Player>,
    match_database: Vec<MatchRecord>,
}

impl SportsTrial {
    pub fn new(config: TrialConfig, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut generator = PlayerGenerator::new();
        let hand: Vec<Player> = (0..MAX_INITIAL_HAND)
            .map(|_| generator.generate(&mut rng))
            .collect();
        let team_names = generate_team_names(&mut rng);

        let mut trial = SportsTrial {
            clock: TrialClock::new(&config),
            ledger: RoundLedger::new(),
            generator,
            player_database: hand.clone(),
            match_database: Vec::new(),
            hand,
            sheet: TeamSheet::new(),
            stage: Stage::Setup,
            team_names,
            rng,
        };
        trial
            .ledger
            .open_round(
                MatchRound {
                    team_a_name: trial.team_names.0.clone(),
                    team_b_name: trial.team_names.1.clone(),
                },
                0.0,
            )
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

    pub fn hand(&self) -> &[Player] {
        &self.hand
    }

    pub fn sheet(&self) -> &TeamSheet {
        &self.sheet
    }

    pub fn team_names(&self) -> (&str, &str) {
        (&self.team_names.0, &self.team_names.1)
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

    fn gate(&self) -> Result<(), SportsRejection> {
        if !self.clock.input_allowed() {
            return Err(SportsRejection::InputDisabled);
        }
        if self.stage == Stage::Result {
            return Err(SportsRejection::NoOpenResult);
        }
        Ok(())
    }

    /// Draw a new player from the deck into the hand.
    pub fn draft(&mut self, at: Millis) -> Result<&Player, SportsRejection> {
        self.gate()?;
        if self.hand.len() >= MAX_HAND_SIZE {
            return Err(SportsRejection::HandFull);
        }
        let player = self.generator.generate(&mut self.rng);
        self.player_database.push(player.clone());
        self.ledger
            .record_event("DRAFT_PLAYER", vec![player.id], None, None, at);
        self.hand.push(player);
        Ok(self.hand.last().expect("just pushed"))
    }

    /// Discard a hand card. The player stays in the database.
    pub fn discard(&mut self, player_id: EntityId, at: Millis) -> Result<(), SportsRejection> {
        self.gate()?;
        let index = self
            .hand
            .iter()
            .position(|p| p.id == player_id)
            .ok_or(SportsRejection::UnknownPlayer)?;
        self.ledger
            .record_event("DISCARD_PLAYER", vec![player_id], None, None, at);
        self.hand.remove(index);
        Ok(())
    }

    fn slot_of(&self, player_id: EntityId) -> Option<FieldSlot> {
        self.sheet
            .occupants()
            .find(|(_, p)| p.id == player_id)
            .map(|(slot, _)| slot)
    }

    /// Complete a drag of `player_id` onto `target`: place into an empty
    /// position, or swap with its occupant.
    pub fn place(
        &mut self,
        player_id: EntityId,
        target: FieldSlot,
        at: Millis,
    ) -> Result<(), SportsRejection> {
        self.gate()?;
        let origin = self.slot_of(player_id);
        let from_label = origin.map_or("hand", |slot| slot.as_str());

        let player = match origin {
            Some(slot) => self.sheet.take(slot).ok_or(SportsRejection::UnknownPlayer)?,
            None => {
                let index = self
                    .hand
                    .iter()
                    .position(|p| p.id == player_id)
                    .ok_or(SportsRejection::UnknownPlayer)?;
                self.hand.remove(index)
            }
        };

        match self.sheet.put(target, player) {
            None => {
                self.ledger.record_event(
                    "PLACE_SLOT",
                    vec![player_id],
                    Some(from_label),
                    Some(target.as_str()),
                    at,
                );
            }
            Some(displaced) => {
                self.ledger.record_event(
                    "MOVE_SLOT",
                    vec![player_id, displaced.id],
                    Some(from_label),
                    Some(target.as_str()),
                    at,
                );
                match origin {
                    // Position-to-position drag swaps the two players.
                    Some(slot) => {
                        self.sheet.put(slot, displaced);
                    }
                    // Hand-to-position: the displaced player joins the
                    // hand if there is room, otherwise leaves play.
                    None => {
                        if self.hand.len() < MAX_HAND_SIZE {
                            self.hand.push(displaced);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Complete a drag of a fielded player off the field: back to the
    /// hand if there is room, otherwise out of play.
    pub fn vacate(&mut self, from: FieldSlot, at: Millis) -> Result<(), SportsRejection> {
        self.gate()?;
        let player = self.sheet.take(from).ok_or(SportsRejection::UnknownPlayer)?;
        if self.hand.len() < MAX_HAND_SIZE {
            self.ledger.record_event(
                "RETURN_TO_HAND",
                vec![player.id],
                Some(from.as_str()),
                Some("hand"),
                at,
            );
            self.hand.push(player);
        } else {
            self.ledger.record_event(
                "DISMISS_FROM_SLOT",
                vec![player.id],
                Some(from.as_str()),
                None,
                at,
            );
        }
        Ok(())
    }

    /// Return every fielded player to the hand, up to capacity; the
    /// overflow leaves play.
    pub fn clear_field(&mut self, at: Millis) -> Result<(), SportsRejection> {
        self.gate()?;
        let players = self.sheet.clear();
        if players.is_empty() {
            return Err(SportsRejection::FieldEmpty);
        }
        let ids: Vec<EntityId> = players.iter().map(|p| p.id).collect();
        self.ledger
            .record_event("CLEAR_FIELD", ids, None, None, at);
        let room = MAX_HAND_SIZE.saturating_sub(self.hand.len());
        self.hand.extend(players.into_iter().take(room));
        Ok(())
    }

    /// Kick off: simulate the match over the full field, record it, and
    /// open the result display.
    pub fn start_match(
        &mut self,
        at: Millis,
    ) -> Result<(MatchOutcome, Vec<TickerEvent>), SportsRejection> {
        self.gate()?;
        if !self.sheet.is_full() {
            return Err(SportsRejection::NotReady);
        }

        let outcome = simulate(&self.sheet, &mut self.rng);
        let ticker = generate_ticker(
            &outcome,
            &self.team_names.0,
            &self.team_names.1,
            &self.sheet,
            &mut self.rng,
        );

        let ids: Vec<EntityId> = self.sheet.occupants().map(|(_, p)| p.id).collect();
        self.ledger
            .record_event("SIMULATE_MATCH", ids, None, None, at);

        let fill = |slot: FieldSlot| SlotFill {
            player_id: self.sheet.get(slot).map(|p| p.id),
            fitness: self.sheet.slot_fitness(slot),
        };
        let match_index = self.match_database.len() as u32;
        let round_index = self.ledger.rounds().len() as u32 - 1;
        self.match_database.push(MatchRecord {
            match_index,
            round_index,
            defense_a: fill(FieldSlot::DefenseA),
            mid_a1: fill(FieldSlot::MidA1),
            mid_a2: fill(FieldSlot::MidA2),
            offense_a: fill(FieldSlot::OffenseA),
            offense_b: fill(FieldSlot::OffenseB),
            mid_b1: fill(FieldSlot::MidB1),
            mid_b2: fill(FieldSlot::MidB2),
            defense_b: fill(FieldSlot::DefenseB),
            team_a_fitness: outcome.team_a_fitness,
            team_b_fitness: outcome.team_b_fitness,
            team_a_score: outcome.team_a_score,
            team_b_score: outcome.team_b_score,
            winner: outcome.winner,
            timestamp: at,
        });

        self.ledger
            .commit(MatchPlay { match_index, outcome }, at)
            .expect("round is open while the trial runs");
        self.stage = Stage::Result;
        self.clock.grace_move_done();
        Ok((outcome, ticker))
    }

    /// Dismiss the result display: the fielded players leave play, a
    /// fresh club pairing comes up, and the next round opens.
    pub fn close_result(&mut self, at: Millis) -> Result<(), SportsRejection> {
        if self.stage != Stage::Result {
            return Err(SportsRejection::NoOpenResult);
        }
        self.stage = Stage::Setup;
        self.sheet = TeamSheet::new();
        self.team_names = generate_team_names(&mut self.rng);
        self.ledger
            .open_round(
                MatchRound {
                    team_a_name: self.team_names.0.clone(),
                    team_b_name: self.team_names.1.clone(),
                },
                at,
            )
            .expect("ledger open while the trial runs");
        Ok(())
    }

    /// The help overlay was opened. Recorded, but gated only by the
    /// trial being alive.
    pub fn help(&mut self, at: Millis) {
        self.ledger.record("HELP", at);
    }

    /// Flush the trial. Consumes the controller, so the flush cannot
    /// run twice.
    pub fn finish(mut self, at: Millis) -> Result<SportsTrialResult, TrialError> {
        self.clock.end_now();
        self.clock.fire_end();
        self.ledger.record(TRIAL_END_LABEL, at);
        self.ledger.close_trial(at)?;
        tracing::info!(
            rounds = self.ledger.rounds().len(),
            matches = self.match_database.len(),
            players = self.player_database.len(),
            "sports trial finished"
        );
        Ok(SportsTrialResult {
            rounds: self.ledger.into_rounds(),
            player_database: self.player_database,
            match_database: self.match_database,
            ended_at: at,
        })
    }
}
