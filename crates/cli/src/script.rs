//! Scripted trial driving.
//!
//! A script is a JSON array of steps, each with an `at` timestamp in
//! milliseconds since the trial epoch and a tagged `event`. The driver
//! replays the steps against a controller; rejected input is logged and
//! skipped, exactly like a participant clicking a disabled button.
//!
//! ```json
//! [
//!   {"at": 1000, "event": "tick"},
//!   {"at": 1200, "event": "letter", "letter": "W"},
//!   {"at": 2500, "event": "submit"}
//! ]
//! ```

use serde::Deserialize;

use parlor_core::EntityId;
use parlor_engine::expr::Operator;
use parlor_engine::football::FieldSlot;
use parlor_engine::trial::dating::MatchSlot;
use parlor_engine::words::Dictionary;
use parlor_engine::{DatingTrial, NumbersTrial, SportsTrial, WordTrial};
use parlor_core::TrialConfig;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step<E> {
    /// Milliseconds since the trial epoch.
    pub at: f64,
    #[serde(flatten)]
    pub event: E,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WordEvent {
    Tick,
    Letter { letter: char },
    Delete,
    Clear,
    Shuffle,
    Submit,
    NewSet,
    PopupContinue,
    PopupEnd,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum NumbersEvent {
    Tick,
    Number { value: u8 },
    Operator { op: Operator },
    Delete,
    Clear,
    Submit,
    NewSet,
    PopupContinue,
    PopupEnd,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SportsEvent {
    Tick,
    Draft,
    Discard { player: EntityId },
    Place { player: EntityId, to: FieldSlot },
    Vacate { from: FieldSlot },
    ClearField,
    StartMatch,
    CloseResult,
    Help,
    PopupContinue,
    PopupEnd,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DatingEvent {
    Tick,
    Place { person: EntityId, slot: MatchSlot },
    RemoveSlot { slot: MatchSlot },
    Exchange { person: EntityId },
    NewHand,
    Match,
    ClearSlots,
    News,
    Help,
    PopupContinue,
    PopupEnd,
}

fn log_rejection<R: std::fmt::Debug>(at: f64, rejection: R) {
    tracing::warn!(at, ?rejection, "input rejected");
}

fn finish_time<E>(steps: &[Step<E>]) -> f64 {
    steps.last().map_or(0.0, |s| s.at)
}

pub fn run_word(
    config: TrialConfig,
    dictionary: Dictionary,
    seed: u64,
    steps: Vec<Step<WordEvent>>,
) -> Result<serde_json::Value, String> {
    let mut trial = WordTrial::new(config, dictionary, seed);
    let end = finish_time(&steps);
    for step in steps {
        let at = step.at;
        match step.event {
            WordEvent::Tick => {
                trial.tick();
            }
            WordEvent::Letter { letter } => {
                if let Err(r) = trial.press_letter(letter, at) {
                    log_rejection(at, r);
                }
            }
            WordEvent::Delete => {
                if let Err(r) = trial.delete(at) {
                    log_rejection(at, r);
                }
            }
            WordEvent::Clear => {
                if let Err(r) = trial.clear(at) {
                    log_rejection(at, r);
                }
            }
            WordEvent::Shuffle => {
                if let Err(r) = trial.shuffle(at) {
                    log_rejection(at, r);
                }
            }
            WordEvent::Submit => {
                if let parlor_engine::trial::word::WordSubmit::Rejected(r) = trial.submit(at) {
                    log_rejection(at, r);
                }
            }
            WordEvent::NewSet => {
                if let Err(r) = trial.new_board(at) {
                    log_rejection(at, r);
                }
            }
            WordEvent::PopupContinue => {
                trial.popup_continue();
            }
            WordEvent::PopupEnd => {
                trial.popup_end();
            }
        }
    }
    let result = trial.finish(end).map_err(|e| e.to_string())?;
    serde_json::to_value(result).map_err(|e| e.to_string())
}

pub fn run_numbers(
    config: TrialConfig,
    seed: u64,
    steps: Vec<Step<NumbersEvent>>,
) -> Result<serde_json::Value, String> {
    let mut trial = NumbersTrial::new(config, seed);
    let end = finish_time(&steps);
    for step in steps {
        let at = step.at;
        match step.event {
            NumbersEvent::Tick => {
                trial.tick();
            }
            NumbersEvent::Number { value } => {
                if let Err(r) = trial.push_number(value, at) {
                    log_rejection(at, r);
                }
            }
            NumbersEvent::Operator { op } => {
                if let Err(r) = trial.push_operator(op, at) {
                    log_rejection(at, r);
                }
            }
            NumbersEvent::Delete => {
                if let Err(r) = trial.delete(at) {
                    log_rejection(at, r);
                }
            }
            NumbersEvent::Clear => {
                if let Err(r) = trial.clear(at) {
                    log_rejection(at, r);
                }
            }
            NumbersEvent::Submit => {
                if let parlor_engine::trial::numbers::ExpressionSubmit::Rejected(r) =
                    trial.submit(at)
                {
                    log_rejection(at, r);
                }
            }
            NumbersEvent::NewSet => {
                if let Err(r) = trial.new_set(at) {
                    log_rejection(at, r);
                }
            }
            NumbersEvent::PopupContinue => {
                trial.popup_continue();
            }
            NumbersEvent::PopupEnd => {
                trial.popup_end();
            }
        }
    }
    let result = trial.finish(end).map_err(|e| e.to_string())?;
    serde_json::to_value(result).map_err(|e| e.to_string())
}

pub fn run_sports(
    config: TrialConfig,
    seed: u64,
    steps: Vec<Step<SportsEvent>>,
) -> Result<serde_json::Value, String> {
    let mut trial = SportsTrial::new(config, seed);
    let end = finish_time(&steps);
    for step in steps {
        let at = step.at;
        match step.event {
            SportsEvent::Tick => {
                trial.tick();
            }
            SportsEvent::Draft => {
                if let Err(r) = trial.draft(at) {
                    log_rejection(at, r);
                }
            }
            SportsEvent::Discard { player } => {
                if let Err(r) = trial.discard(player, at) {
                    log_rejection(at, r);
                }
            }
            SportsEvent::Place { player, to } => {
                if let Err(r) = trial.place(player, to, at) {
                    log_rejection(at, r);
                }
            }
            SportsEvent::Vacate { from } => {
                if let Err(r) = trial.vacate(from, at) {
                    log_rejection(at, r);
                }
            }
            SportsEvent::ClearField => {
                if let Err(r) = trial.clear_field(at) {
                    log_rejection(at, r);
                }
            }
            SportsEvent::StartMatch => match trial.start_match(at) {
                Ok((outcome, _ticker)) => {
                    tracing::info!(
                        score_a = outcome.team_a_score,
                        score_b = outcome.team_b_score,
                        "match played"
                    );
                }
                Err(r) => log_rejection(at, r),
            },
            SportsEvent::CloseResult => {
                if let Err(r) = trial.close_result(at) {
                    log_rejection(at, r);
                }
            }
            SportsEvent::Help => trial.help(at),
            SportsEvent::PopupContinue => {
                trial.popup_continue();
            }
            SportsEvent::PopupEnd => {
                trial.popup_end();
            }
        }
    }
    let result = trial.finish(end).map_err(|e| e.to_string())?;
    serde_json::to_value(result).map_err(|e| e.to_string())
}

pub fn run_dating(
    config: TrialConfig,
    seed: u64,
    steps: Vec<Step<DatingEvent>>,
) -> Result<serde_json::Value, String> {
    let mut trial = DatingTrial::new(config, seed);
    let end = finish_time(&steps);
    for step in steps {
        let at = step.at;
        match step.event {
            DatingEvent::Tick => {
                trial.tick();
            }
            DatingEvent::Place { person, slot } => {
                if let Err(r) = trial.place(person, slot, at) {
                    log_rejection(at, r);
                }
            }
            DatingEvent::RemoveSlot { slot } => {
                if let Err(r) = trial.remove_slot(slot, at) {
                    log_rejection(at, r);
                }
            }
            DatingEvent::Exchange { person } => {
                if let Err(r) = trial.exchange(person, at) {
                    log_rejection(at, r);
                }
            }
            DatingEvent::NewHand => {
                if let Err(r) = trial.new_hand(at) {
                    log_rejection(at, r);
                }
            }
            DatingEvent::Match => match trial.make_match(at) {
                Ok(record) => {
                    tracing::info!(couple = record.couple_index, "couple matched");
                }
                Err(r) => log_rejection(at, r),
            },
            DatingEvent::ClearSlots => {
                if let Err(r) = trial.clear_slots(at) {
                    log_rejection(at, r);
                }
            }
            DatingEvent::News => {
                if let Some(line) = trial.news() {
                    tracing::info!(line = %line, "news");
                }
            }
            DatingEvent::Help => trial.help(at),
            DatingEvent::PopupContinue => {
                trial.popup_continue();
            }
            DatingEvent::PopupEnd => {
                trial.popup_end();
            }
        }
    }
    let result = trial.finish(end).map_err(|e| e.to_string())?;
    serde_json::to_value(result).map_err(|e| e.to_string())
}
