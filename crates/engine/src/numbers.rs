//! Puzzle pool for the numbers trial.
//!
//! Each set pairs four single-digit numbers with an integer target that
//! is reachable by left-to-right arithmetic over the set (numbers and
//! operators may be reused within an expression).

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One numbers-and-target puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberSet {
    pub numbers: [u8; 4],
    pub target: i32,
}

pub const NUMBER_SETS: [NumberSet; 61] = [
    NumberSet { numbers: [3, 4, 1, 7], target: 21 },
    NumberSet { numbers: [2, 5, 8, 1], target: 15 },
    NumberSet { numbers: [6, 3, 9, 2], target: 18 },
    NumberSet { numbers: [4, 7, 1, 5], target: 24 },
    NumberSet { numbers: [8, 3, 2, 6], target: 14 },
    NumberSet { numbers: [1, 9, 4, 3], target: 27 },
    NumberSet { numbers: [5, 2, 7, 8], target: 35 },
    NumberSet { numbers: [3, 6, 1, 4], target: 12 },
    NumberSet { numbers: [9, 2, 5, 7], target: 42 },
    NumberSet { numbers: [4, 8, 3, 1], target: 16 },
    NumberSet { numbers: [6, 1, 9, 2], target: 48 },
    NumberSet { numbers: [7, 4, 2, 5], target: 33 },
    NumberSet { numbers: [3, 8, 6, 1], target: 25 },
    NumberSet { numbers: [2, 7, 4, 9], target: 56 },
    NumberSet { numbers: [5, 1, 8, 3], target: 19 },
    NumberSet { numbers: [9, 6, 2, 4], target: 36 },
    NumberSet { numbers: [1, 5, 7, 8], target: 40 },
    NumberSet { numbers: [4, 3, 9, 2], target: 30 },
    NumberSet { numbers: [8, 1, 6, 5], target: 45 },
    NumberSet { numbers: [2, 9, 3, 7], target: 63 },
    NumberSet { numbers: [1, 4, 6, 8], target: 32 },
    NumberSet { numbers: [5, 2, 9, 1], target: 46 },
    NumberSet { numbers: [3, 7, 4, 6], target: 41 },
    NumberSet { numbers: [8, 1, 3, 5], target: 37 },
    NumberSet { numbers: [2, 6, 7, 9], target: 58 },
    NumberSet { numbers: [4, 1, 8, 3], target: 29 },
    NumberSet { numbers: [9, 5, 2, 4], target: 38 },
    NumberSet { numbers: [6, 3, 1, 7], target: 22 },
    NumberSet { numbers: [1, 8, 4, 2], target: 26 },
    NumberSet { numbers: [7, 3, 9, 5], target: 59 },
    NumberSet { numbers: [2, 4, 6, 1], target: 13 },
    NumberSet { numbers: [8, 7, 3, 9], target: 75 },
    NumberSet { numbers: [5, 1, 2, 6], target: 17 },
    NumberSet { numbers: [4, 9, 7, 8], target: 64 },
    NumberSet { numbers: [3, 2, 5, 1], target: 11 },
    NumberSet { numbers: [6, 8, 4, 7], target: 52 },
    NumberSet { numbers: [1, 3, 9, 2], target: 28 },
    NumberSet { numbers: [5, 7, 6, 4], target: 47 },
    NumberSet { numbers: [8, 2, 1, 9], target: 73 },
    NumberSet { numbers: [3, 6, 5, 8], target: 44 },
    NumberSet { numbers: [7, 4, 2, 3], target: 31 },
    NumberSet { numbers: [1, 9, 6, 5], target: 49 },
    NumberSet { numbers: [4, 8, 7, 1], target: 39 },
    NumberSet { numbers: [2, 3, 9, 6], target: 51 },
    NumberSet { numbers: [5, 1, 8, 7], target: 43 },
    NumberSet { numbers: [9, 4, 3, 2], target: 34 },
    NumberSet { numbers: [6, 7, 1, 8], target: 55 },
    NumberSet { numbers: [3, 5, 4, 9], target: 67 },
    NumberSet { numbers: [2, 8, 6, 1], target: 23 },
    NumberSet { numbers: [7, 9, 5, 3], target: 61 },
    NumberSet { numbers: [4, 1, 2, 8], target: 20 },
    NumberSet { numbers: [6, 3, 7, 4], target: 46 },
    NumberSet { numbers: [9, 8, 1, 5], target: 72 },
    NumberSet { numbers: [2, 5, 3, 7], target: 32 },
    NumberSet { numbers: [1, 6, 9, 4], target: 57 },
    NumberSet { numbers: [8, 3, 5, 2], target: 35 },
    NumberSet { numbers: [7, 1, 4, 6], target: 29 },
    NumberSet { numbers: [5, 9, 8, 3], target: 69 },
    NumberSet { numbers: [4, 2, 7, 1], target: 15 },
    NumberSet { numbers: [6, 5, 3, 9], target: 53 },
    NumberSet { numbers: [8, 7, 2, 4], target: 50 },
];

/// Draw a puzzle, re-rolling once if it matches the previous round's
/// set so NEW SET always changes the board.
pub fn draw_set(rng: &mut impl Rng, previous: Option<&NumberSet>) -> NumberSet {
    let mut set = *NUMBER_SETS.choose(rng).expect("pool is non-empty");
    if let Some(prev) = previous {
        while set == *prev {
            set = *NUMBER_SETS.choose(rng).expect("pool is non-empty");
        }
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn draw_never_repeats_the_previous_set() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut previous = draw_set(&mut rng, None);
        for _ in 0..200 {
            let next = draw_set(&mut rng, Some(&previous));
            assert_ne!(next, previous);
            previous = next;
        }
    }
}
