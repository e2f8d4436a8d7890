//! The word trial: spell words from a seven-letter board.
//!
//! Every key press is an action; accepted submissions become found
//! items carrying the key presses that produced them. Correctness is
//! always recorded in the data; whether it is surfaced to the
//! participant is a config decision.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use parlor_core::{Millis, Round, RoundLedger, TrialConfig, TrialError};

use crate::clock::{ClockSignal, TrialClock};
use crate::trial::TRIAL_END_LABEL;
use crate::words::{can_build_word, draw_letters, Dictionary, MAX_WORD_LEN, MIN_WORD_LEN};

/// Round configuration: the seven-letter board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LetterRound {
    pub letters: String,
}

/// An accepted word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordFind {
    pub word: String,
    pub is_correct: bool,
}

/// Why an input was turned away. Advisory only; the model is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordRejection {
    /// The clock phase does not accept play input right now.
    InputDisabled,
    /// The pressed letter is not (or no longer) available on the board.
    LetterNotAvailable,
    /// Nothing to delete or submit.
    EmptyEntry,
    /// Submissions need at least three letters.
    TooShort,
    /// The same word was already found in this round.
    AlreadyFound,
}

/// Result of a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordSubmit {
    Accepted {
        word: String,
        /// Present only when the config says to surface correctness;
        /// the recorded data always carries it.
        correct: Option<bool>,
    },
    Rejected(WordRejection),
}

/// The completed trial, by value, for the export collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordTrialResult {
    pub rounds: Vec<Round<LetterRound, WordFind>>,
    pub ended_at: Millis,
}

pub struct WordTrial {
    config: TrialConfig,
    clock: TrialClock,
    ledger: RoundLedger<LetterRound, WordFind>,
    dictionary: Dictionary,
    rng: StdRng,
    letters: String,
    /// Current button order; SHUFFLE permutes it.
    board: Vec<char>,
    entry: String,
}

impl WordTrial {
    pub fn new(config: TrialConfig, dictionary: Dictionary, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let letters = draw_letters(&mut rng, None).to_string();
        let mut trial = WordTrial {
            clock: TrialClock::new(&config),
            config,
            ledger: RoundLedger::new(),
            dictionary,
            rng,
            board: letters.chars().collect(),
            letters,
            entry: String::new(),
        };
        trial
            .ledger
            .open_round(LetterRound { letters: trial.letters.clone() }, 0.0)
            .expect("fresh ledger");
        trial
    }

    pub fn clock(&self) -> &TrialClock {
        &self.clock
    }

    /// The word under construction.
    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Current board letters in display order.
    pub fn board(&self) -> &[char] {
        &self.board
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

    fn gate(&self) -> Result<(), WordRejection> {
        if self.clock.input_allowed() {
            Ok(())
        } else {
            Err(WordRejection::InputDisabled)
        }
    }

    /// Press one letter button.
    pub fn press_letter(&mut self, letter: char, at: Millis) -> Result<(), WordRejection> {
        self.gate()?;
        let letter = letter.to_ascii_uppercase();
        let candidate = format!("{}{}", self.entry, letter);
        if candidate.len() > MAX_WORD_LEN || !can_build_word(&candidate, &self.letters) {
            return Err(WordRejection::LetterNotAvailable);
        }
        self.ledger.record(letter.to_string(), at);
        self.entry.push(letter);
        Ok(())
    }

    /// Remove the last letter.
    pub fn delete(&mut self, at: Millis) -> Result<(), WordRejection> {
        self.gate()?;
        if self.entry.is_empty() {
            return Err(WordRejection::EmptyEntry);
        }
        self.ledger.record("DELETE", at);
        self.entry.pop();
        Ok(())
    }

    /// Start the entry over.
    pub fn clear(&mut self, at: Millis) -> Result<(), WordRejection> {
        self.gate()?;
        self.ledger.record("CLEAR", at);
        self.entry.clear();
        Ok(())
    }

    /// Permute the button order. Presentation only, but recorded.
    pub fn shuffle(&mut self, at: Millis) -> Result<(), WordRejection> {
        self.gate()?;
        self.ledger.record("SHUFFLE", at);
        self.board.shuffle(&mut self.rng);
        Ok(())
    }

    /// Submit the current entry.
    pub fn submit(&mut self, at: Millis) -> WordSubmit {
        if let Err(rejection) = self.gate() {
            return WordSubmit::Rejected(rejection);
        }
        if self.entry.is_empty() {
            return WordSubmit::Rejected(WordRejection::EmptyEntry);
        }
        if self.entry.len() < MIN_WORD_LEN {
            return WordSubmit::Rejected(WordRejection::TooShort);
        }
        let word = self.entry.clone();
        let already_found = self
            .ledger
            .current_round()
            .map(|round| {
                round
                    .found
                    .iter()
                    .filter_map(|item| item.payload.as_ref())
                    .any(|find| find.word == word)
            })
            .unwrap_or(false);
        if already_found {
            return WordSubmit::Rejected(WordRejection::AlreadyFound);
        }

        let is_correct = self.dictionary.contains(&word);
        self.ledger.record("ENTER", at);
        self.ledger
            .commit(WordFind { word: word.clone(), is_correct }, at)
            .expect("round is open while the trial runs");
        self.entry.clear();
        self.clock.grace_move_done();

        tracing::debug!(word = %word, is_correct, "word accepted");
        WordSubmit::Accepted {
            word,
            correct: self.config.show_correctness_markers.then_some(is_correct),
        }
    }

    /// Swap the board for a fresh letter set, closing the current round.
    pub fn new_board(&mut self, at: Millis) -> Result<(), WordRejection> {
        self.gate()?;
        if self.clock.in_grace() {
            // The one grace move is a submission, not a new puzzle.
            return Err(WordRejection::InputDisabled);
        }
        self.ledger.record("NEW_SET", at);
        self.entry.clear();
        self.letters = draw_letters(&mut self.rng, Some(self.letters.as_str())).to_string();
        self.board = self.letters.chars().collect();
        self.ledger
            .open_round(LetterRound { letters: self.letters.clone() }, at)
            .expect("ledger open while the trial runs");
        Ok(())
    }

    /// Flush the trial: append the synthetic end action, seal the
    /// ledger, and hand the data over. Consumes the controller, so the
    /// flush cannot run twice.
    pub fn finish(mut self, at: Millis) -> Result<WordTrialResult, TrialError> {
        self.clock.end_now();
        self.clock.fire_end();
        self.ledger.record(TRIAL_END_LABEL, at);
        self.ledger.close_trial(at)?;
        tracing::info!(rounds = self.ledger.rounds().len(), "word trial finished");
        Ok(WordTrialResult {
            rounds: self.ledger.into_rounds(),
            ended_at: at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::TimeoutPhase;

    fn dictionary() -> Dictionary {
        Dictionary::from_words(["WRATH", "OATH", "TRAY", "WHY"])
    }

    fn config(limit: u32, graceful: bool) -> TrialConfig {
        TrialConfig {
            time_limit_seconds: limit,
            allow_graceful_extension: graceful,
            ..TrialConfig::default()
        }
    }

    /// Press the letters of a word the current board can spell.
    fn type_word(trial: &mut WordTrial, word: &str, at: Millis) {
        for c in word.chars() {
            trial.press_letter(c, at).unwrap();
        }
    }

    #[test]
    fn typed_letters_attach_to_the_found_word() {
        let mut trial = WordTrial::new(config(60, false), dictionary(), 3);
        let board: String = trial.board().iter().collect();
        let word: String = board.chars().take(3).collect();
        type_word(&mut trial, &word, 10.0);
        let outcome = trial.submit(12.0);
        assert!(matches!(outcome, WordSubmit::Accepted { .. }));

        let result = trial.finish(20.0).unwrap();
        let item = &result.rounds[0].found[0];
        assert_eq!(item.payload.as_ref().unwrap().word, word);
        // Three letter presses plus ENTER.
        assert_eq!(item.actions.len(), 4);
        assert_eq!(item.actions.last().unwrap().label, "ENTER");
        assert_eq!(item.submit_time, Some(12.0));
    }

    #[test]
    fn board_letters_are_single_use_within_an_entry() {
        let mut trial = WordTrial::new(config(60, false), dictionary(), 3);
        let first = trial.board()[0];
        trial.press_letter(first, 1.0).unwrap();
        assert_eq!(
            trial.press_letter(first, 2.0).unwrap_err(),
            WordRejection::LetterNotAvailable
        );
        // Rejections leave no trace in the log.
        let result = trial.finish(3.0).unwrap();
        let labels: Vec<_> = result.rounds[0].found[0]
            .actions
            .iter()
            .map(|a| a.label.clone())
            .collect();
        assert_eq!(labels, vec![first.to_string(), TRIAL_END_LABEL.to_string()]);
    }

    #[test]
    fn duplicate_words_are_rejected_within_a_round() {
        let mut trial = WordTrial::new(config(60, false), dictionary(), 3);
        let word: String = trial.board().iter().take(3).collect();
        type_word(&mut trial, &word, 1.0);
        trial.submit(2.0);
        type_word(&mut trial, &word, 3.0);
        assert_eq!(
            trial.submit(4.0),
            WordSubmit::Rejected(WordRejection::AlreadyFound)
        );
        // A new board resets the duplicate scope.
        trial.new_board(5.0).unwrap();
        let word2: String = trial.board().iter().take(3).collect();
        type_word(&mut trial, &word2, 6.0);
        assert!(matches!(trial.submit(7.0), WordSubmit::Accepted { .. }));
    }

    #[test]
    fn correctness_is_recorded_but_surfaced_only_on_request() {
        let mut shown = WordTrial::new(
            TrialConfig {
                show_correctness_markers: true,
                ..config(60, false)
            },
            dictionary(),
            3,
        );
        let word: String = shown.board().iter().take(3).collect();
        type_word(&mut shown, &word, 1.0);
        match shown.submit(2.0) {
            WordSubmit::Accepted { correct, .. } => assert!(correct.is_some()),
            other => panic!("unexpected {other:?}"),
        }

        let mut hidden = WordTrial::new(config(60, false), dictionary(), 3);
        let word: String = hidden.board().iter().take(3).collect();
        type_word(&mut hidden, &word, 1.0);
        match hidden.submit(2.0) {
            WordSubmit::Accepted { correct, .. } => assert!(correct.is_none()),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn graceful_timeout_allows_exactly_one_submission() {
        let mut trial = WordTrial::new(config(1, true), dictionary(), 3);
        assert_eq!(trial.tick(), ClockSignal::PopupOpened);
        assert_eq!(
            trial.press_letter(trial.board()[0], 2.0).unwrap_err(),
            WordRejection::InputDisabled
        );
        trial.popup_continue();
        assert_eq!(trial.clock().phase(), TimeoutPhase::Grace);

        let word: String = trial.board().iter().take(3).collect();
        type_word(&mut trial, &word, 3.0);
        assert!(matches!(trial.submit(4.0), WordSubmit::Accepted { .. }));
        // The one move is spent.
        assert_eq!(trial.clock().phase(), TimeoutPhase::Ended);
        assert_eq!(
            trial.press_letter('A', 5.0).unwrap_err(),
            WordRejection::InputDisabled
        );
    }

    #[test]
    fn timeout_without_extension_ends_directly() {
        let mut trial = WordTrial::new(config(2, false), dictionary(), 3);
        assert_eq!(trial.tick(), ClockSignal::Running(1));
        assert_eq!(trial.tick(), ClockSignal::TrialEnded);
        assert_eq!(trial.clock().phase(), TimeoutPhase::Ended);
    }

    #[test]
    fn finish_appends_the_trial_end_sentinel() {
        let trial = WordTrial::new(config(60, false), dictionary(), 3);
        let result = trial.finish(9.0).unwrap();
        assert_eq!(result.rounds.len(), 1);
        let sentinel = result.rounds[0].found.last().unwrap();
        assert!(sentinel.payload.is_none());
        assert_eq!(sentinel.actions.last().unwrap().label, TRIAL_END_LABEL);
        assert_eq!(result.rounds[0].end_time, Some(9.0));
    }
}
