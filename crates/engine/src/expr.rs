//! Left-to-right arithmetic over a token stream.
//!
//! There is deliberately no operator precedence: `5 + 5 * 7` evaluates
//! as `(5 + 5) * 7 = 70`. A trailing operator is legal in the stream
//! and simply not applied. Division uses ordinary `f64` semantics with
//! no divide-by-zero special case.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
}

impl Operator {
    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }

    pub fn apply(&self, left: f64, right: f64) -> f64 {
        match self {
            Operator::Add => left + right,
            Operator::Sub => left - right,
            Operator::Mul => left * right,
            Operator::Div => left / right,
        }
    }
}

/// One element of an expression under construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Number(f64),
    Op(Operator),
}

/// Evaluate strictly left to right. A trailing operator is ignored; an
/// empty stream evaluates to 0.
pub fn evaluate(tokens: &[Token]) -> f64 {
    let mut iter = tokens.iter();
    let mut acc = match iter.next() {
        Some(Token::Number(n)) => *n,
        _ => return 0.0,
    };
    let mut pending: Option<Operator> = None;
    for token in iter {
        match token {
            Token::Op(op) => pending = Some(*op),
            Token::Number(n) => {
                if let Some(op) = pending.take() {
                    acc = op.apply(acc, *n);
                }
            }
        }
    }
    acc
}

/// Round to 2 decimal places, half away from zero on `value * 100`.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Whether the stream ends on a number, i.e. is submittable.
pub fn ends_on_number(tokens: &[Token]) -> bool {
    matches!(tokens.last(), Some(Token::Number(_)))
}

/// Render the canonical expression string used for duplicate detection.
pub fn render(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        match token {
            Token::Number(n) => {
                if n.fract() == 0.0 {
                    out.push_str(&format!("{}", *n as i64));
                } else {
                    out.push_str(&format!("{}", n));
                }
            }
            Token::Op(op) => out.push(op.symbol()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(expr: &str) -> Vec<Token> {
        expr.chars()
            .map(|c| match c {
                '+' => Token::Op(Operator::Add),
                '-' => Token::Op(Operator::Sub),
                '*' => Token::Op(Operator::Mul),
                '/' => Token::Op(Operator::Div),
                d => Token::Number(d.to_digit(10).unwrap() as f64),
            })
            .collect()
    }

    #[test]
    fn no_precedence_strictly_left_to_right() {
        assert_eq!(evaluate(&tokens("5+5*7")), 70.0);
    }

    #[test]
    fn division_uses_float_semantics() {
        assert_eq!(evaluate(&tokens("9/2")), 4.5);
    }

    #[test]
    fn trailing_operator_is_ignored() {
        assert_eq!(evaluate(&tokens("3+")), 3.0);
        assert!(!ends_on_number(&tokens("3+")));
        assert!(ends_on_number(&tokens("3+4")));
    }

    #[test]
    fn empty_stream_evaluates_to_zero() {
        assert_eq!(evaluate(&[]), 0.0);
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        // 2.125 is exactly representable, so the midpoint is exact too.
        assert_eq!(round2(2.125), 2.13);
        assert_eq!(round2(-2.125), -2.13);
        assert_eq!(round2(1.0 / 3.0), 0.33);
    }

    #[test]
    fn render_matches_the_typed_expression() {
        assert_eq!(render(&tokens("5+5*7")), "5+5*7");
        assert_eq!(render(&tokens("9/2")), "9/2");
    }
}
