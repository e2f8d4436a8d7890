//! The numbers trial: reach a target with left-to-right arithmetic.
//!
//! The participant builds an expression token by token from the round's
//! four numbers and the four operators; numbers and operators may be
//! reused. A submission is accepted only when the expression ends on a
//! number, evaluates exactly to the target, and its exact string was
//! not already found this round -- two different expressions reaching
//! the target both count.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use parlor_core::{Millis, Round, RoundLedger, TrialConfig, TrialError};

use crate::clock::{ClockSignal, TrialClock};
use crate::expr::{self, Operator, Token};
use crate::numbers::{draw_set, NumberSet};
use crate::trial::TRIAL_END_LABEL;

/// Expressions are capped at ten numbers (19 tokens).
pub const MAX_EXPRESSION_TOKENS: usize = 19;

/// An accepted expression with its evaluated (2-decimal) result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpressionFind {
    pub expression: String,
    pub result: f64,
}

/// Why an input was turned away. Advisory only; the model is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberRejection {
    /// The clock phase does not accept play input right now.
    InputDisabled,
    /// The number is not part of this round's set.
    NumberNotInSet,
    /// A number must follow an operator and vice versa.
    OutOfTurn,
    /// The expression reached its length bound.
    TooLong,
    /// Nothing to delete or submit.
    EmptyExpression,
    /// Submissions must end on a number.
    TrailingOperator,
    /// The expression does not evaluate to the target.
    TargetMissed,
    /// The exact expression string was already found this round.
    AlreadyFound,
}

/// Result of a submission attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionSubmit {
    Accepted { expression: String, result: f64 },
    Rejected(NumberRejection),
}

/// The completed trial, by value, for the export collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumbersTrialResult {
    pub rounds: Vec<Round<NumberSet, ExpressionFind>>,
    pub ended_at: Millis,
}

pub struct NumbersTrial {
    clock: TrialClock,
    ledger: RoundLedger<NumberSet, ExpressionFind>,
    rng: StdRng,
    set: NumberSet,
    tokens: Vec<Token>,
}

impl NumbersTrial {
    pub fn new(config: TrialConfig, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let set = draw_set(&mut rng, None);
        let mut trial = NumbersTrial {
            clock: TrialClock::new(&config),
            ledger: RoundLedger::new(),
            rng,
            set,
            tokens: Vec::new(),
        };
        trial.ledger.open_round(set, 0.0).expect("fresh ledger");
        trial
    }

    pub fn clock(&self) -> &TrialClock {
        &self.clock
    }

    pub fn set(&self) -> &NumberSet {
        &self.set
    }

    /// The expression under construction, rendered.
    pub fn expression(&self) -> String {
        expr::render(&self.tokens)
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

    fn gate(&self) -> Result<(), NumberRejection> {
        if self.clock.input_allowed() {
            Ok(())
        } else {
            Err(NumberRejection::InputDisabled)
        }
    }

    /// Press one of the round's number buttons.
    pub fn push_number(&mut self, number: u8, at: Millis) -> Result<(), NumberRejection> {
        self.gate()?;
        if !self.set.numbers.contains(&number) {
            return Err(NumberRejection::NumberNotInSet);
        }
        if matches!(self.tokens.last(), Some(Token::Number(_))) {
            return Err(NumberRejection::OutOfTurn);
        }
        if self.tokens.len() >= MAX_EXPRESSION_TOKENS {
            return Err(NumberRejection::TooLong);
        }
        self.ledger.record(number.to_string(), at);
        self.tokens.push(Token::Number(number as f64));
        Ok(())
    }

    /// Press one of the operator buttons.
    pub fn push_operator(&mut self, op: Operator, at: Millis) -> Result<(), NumberRejection> {
        self.gate()?;
        if !matches!(self.tokens.last(), Some(Token::Number(_))) {
            return Err(NumberRejection::OutOfTurn);
        }
        if self.tokens.len() >= MAX_EXPRESSION_TOKENS {
            return Err(NumberRejection::TooLong);
        }
        self.ledger.record(op.symbol().to_string(), at);
        self.tokens.push(Token::Op(op));
        Ok(())
    }

    /// Undo the last token.
    pub fn delete(&mut self, at: Millis) -> Result<(), NumberRejection> {
        self.gate()?;
        if self.tokens.is_empty() {
            return Err(NumberRejection::EmptyExpression);
        }
        self.ledger.record("DELETE", at);
        self.tokens.pop();
        Ok(())
    }

    /// Drop the whole expression.
    pub fn clear(&mut self, at: Millis) -> Result<(), NumberRejection> {
        self.gate()?;
        self.ledger.record("CLEAR", at);
        self.tokens.clear();
        Ok(())
    }

    /// Submit the current expression.
    pub fn submit(&mut self, at: Millis) -> ExpressionSubmit {
        if let Err(rejection) = self.gate() {
            return ExpressionSubmit::Rejected(rejection);
        }
        if self.tokens.is_empty() {
            return ExpressionSubmit::Rejected(NumberRejection::EmptyExpression);
        }
        if !expr::ends_on_number(&self.tokens) {
            return ExpressionSubmit::Rejected(NumberRejection::TrailingOperator);
        }
        let result = expr::round2(expr::evaluate(&self.tokens));
        if result != self.set.target as f64 {
            return ExpressionSubmit::Rejected(NumberRejection::TargetMissed);
        }
        let expression = expr::render(&self.tokens);
        let already_found = self
            .ledger
            .current_round()
            .map(|round| {
                round
                    .found
                    .iter()
                    .filter_map(|item| item.payload.as_ref())
                    .any(|find| find.expression == expression)
            })
            .unwrap_or(false);
        if already_found {
            return ExpressionSubmit::Rejected(NumberRejection::AlreadyFound);
        }

        self.ledger.record("ENTER", at);
        self.ledger
            .commit(
                ExpressionFind {
                    expression: expression.clone(),
                    result,
                },
                at,
            )
            .expect("round is open while the trial runs");
        self.tokens.clear();
        self.clock.grace_move_done();

        tracing::debug!(expression = %expression, result, "expression accepted");
        ExpressionSubmit::Accepted { expression, result }
    }

    /// Swap in a fresh numbers-and-target pair, closing the round.
    pub fn new_set(&mut self, at: Millis) -> Result<(), NumberRejection> {
        self.gate()?;
        if self.clock.in_grace() {
            return Err(NumberRejection::InputDisabled);
        }
        self.ledger.record("NEW_SET", at);
        self.tokens.clear();
        self.set = draw_set(&mut self.rng, Some(&self.set));
        self.ledger
            .open_round(self.set, at)
            .expect("ledger open while the trial runs");
        Ok(())
    }

    /// Flush the trial. Consumes the controller, so the flush cannot
    /// run twice.
    pub fn finish(mut self, at: Millis) -> Result<NumbersTrialResult, TrialError> {
        self.clock.end_now();
        self.clock.fire_end();
        self.ledger.record(TRIAL_END_LABEL, at);
        self.ledger.close_trial(at)?;
        tracing::info!(rounds = self.ledger.rounds().len(), "numbers trial finished");
        Ok(NumbersTrialResult {
            rounds: self.ledger.into_rounds(),
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

    /// A trial pinned to a known set so tests can hit the target.
    fn trial() -> NumbersTrial {
        let mut trial = NumbersTrial::new(config(60, false), 5);
        trial.set = NumberSet {
            numbers: [3, 4, 1, 7],
            target: 21,
        };
        trial
    }

    #[test]
    fn reaching_the_target_commits_the_expression() {
        let mut t = trial();
        // 3 * 7 = 21, left to right.
        t.push_number(3, 1.0).unwrap();
        t.push_operator(Operator::Mul, 2.0).unwrap();
        t.push_number(7, 3.0).unwrap();
        match t.submit(4.0) {
            ExpressionSubmit::Accepted { expression, result } => {
                assert_eq!(expression, "3*7");
                assert_eq!(result, 21.0);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(t.expression(), "");
    }

    #[test]
    fn missed_target_is_rejected_and_unrecorded() {
        let mut t = trial();
        t.push_number(3, 1.0).unwrap();
        t.push_operator(Operator::Add, 2.0).unwrap();
        t.push_number(4, 3.0).unwrap();
        assert_eq!(
            t.submit(4.0),
            ExpressionSubmit::Rejected(NumberRejection::TargetMissed)
        );
        // The expression survives a rejection untouched.
        assert_eq!(t.expression(), "3+4");
    }

    #[test]
    fn trailing_operator_blocks_submission() {
        let mut t = trial();
        t.push_number(3, 1.0).unwrap();
        t.push_operator(Operator::Mul, 2.0).unwrap();
        assert_eq!(
            t.submit(3.0),
            ExpressionSubmit::Rejected(NumberRejection::TrailingOperator)
        );
        // DELETE then resubmit a complete expression.
        t.delete(4.0).unwrap();
        t.push_operator(Operator::Mul, 5.0).unwrap();
        t.push_number(7, 6.0).unwrap();
        assert!(matches!(t.submit(7.0), ExpressionSubmit::Accepted { .. }));
    }

    #[test]
    fn duplicate_string_rejected_but_same_value_differently_spelled_accepted() {
        let mut t = trial();
        for (n, op) in [(3u8, Some(Operator::Mul)), (7, None)] {
            t.push_number(n, 1.0).unwrap();
            if let Some(op) = op {
                t.push_operator(op, 1.0).unwrap();
            }
        }
        assert!(matches!(t.submit(2.0), ExpressionSubmit::Accepted { .. }));

        // The exact same string again: rejected.
        t.push_number(3, 3.0).unwrap();
        t.push_operator(Operator::Mul, 3.0).unwrap();
        t.push_number(7, 3.0).unwrap();
        assert_eq!(
            t.submit(4.0),
            ExpressionSubmit::Rejected(NumberRejection::AlreadyFound)
        );
        t.clear(5.0).unwrap();

        // A different spelling of 21: accepted.
        t.push_number(7, 6.0).unwrap();
        t.push_operator(Operator::Mul, 6.0).unwrap();
        t.push_number(3, 6.0).unwrap();
        assert!(matches!(t.submit(7.0), ExpressionSubmit::Accepted { .. }));
    }

    #[test]
    fn tokens_must_alternate() {
        let mut t = trial();
        assert_eq!(
            t.push_operator(Operator::Add, 1.0).unwrap_err(),
            NumberRejection::OutOfTurn
        );
        t.push_number(3, 2.0).unwrap();
        assert_eq!(t.push_number(4, 3.0).unwrap_err(), NumberRejection::OutOfTurn);
    }

    #[test]
    fn numbers_outside_the_set_are_rejected() {
        let mut t = trial();
        assert_eq!(
            t.push_number(9, 1.0).unwrap_err(),
            NumberRejection::NumberNotInSet
        );
    }

    #[test]
    fn expression_length_is_bounded() {
        let mut t = trial();
        t.push_number(3, 0.0).unwrap();
        for _ in 0..9 {
            t.push_operator(Operator::Add, 0.0).unwrap();
            t.push_number(1, 0.0).unwrap();
        }
        assert_eq!(t.tokens.len(), MAX_EXPRESSION_TOKENS);
        assert_eq!(
            t.push_operator(Operator::Add, 0.0).unwrap_err(),
            NumberRejection::TooLong
        );
    }

    #[test]
    fn grace_allows_exactly_one_submission() {
        let mut t = NumbersTrial::new(config(1, true), 5);
        t.set = NumberSet {
            numbers: [3, 4, 1, 7],
            target: 21,
        };
        assert_eq!(t.tick(), ClockSignal::PopupOpened);
        t.popup_continue();
        t.push_number(3, 2.0).unwrap();
        t.push_operator(Operator::Mul, 2.5).unwrap();
        t.push_number(7, 3.0).unwrap();
        assert!(matches!(t.submit(4.0), ExpressionSubmit::Accepted { .. }));
        assert!(t.clock().is_ended());
        assert_eq!(t.push_number(3, 5.0).unwrap_err(), NumberRejection::InputDisabled);
    }

    #[test]
    fn new_set_closes_the_round_and_carries_stray_actions() {
        let mut t = trial();
        let first_set = *t.set();
        t.push_number(3, 1.0).unwrap();
        t.new_set(2.0).unwrap();
        assert_ne!(*t.set(), first_set);
        assert_eq!(t.expression(), "");

        let result = t.finish(3.0).unwrap();
        assert_eq!(result.rounds.len(), 2);
        let sentinel = result.rounds[0].found.last().unwrap();
        assert!(sentinel.payload.is_none());
        let labels: Vec<_> = sentinel.actions.iter().map(|a| a.label.as_str()).collect();
        assert_eq!(labels, ["3", "NEW_SET"]);
    }
}
