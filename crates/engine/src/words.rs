//! Letter-set pool and dictionary for the word trial.
//!
//! Each set is seven distinct letters; a valid submission spells a word
//! of length 3 to 7 using each board letter at most once. The dictionary
//! itself is supplied by the embedding (it is survey content, not engine
//! logic), so correctness checks run against whatever word list the
//! study ships.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

/// Seven-letter boards, curated so every board yields a healthy number
/// of common words.
pub const LETTER_SETS: [&str; 60] = [
    "WAHORTY", "ICFMNOR", "CEFHILY", "TABDGIR", "IEGHLTW", "RFLMNOU", "ACEHKNY", "TBEHILM",
    "OCFILMR", "AGHOPRT", "TCEHNUY", "GADILMR", "TAGHNUY", "OACHPRY", "NACEGHL", "KABCELM",
    "MAENPTY", "CAINPRT", "RCDIKOP", "KEILNTW", "TFGHIOR", "DCMNORU", "CEHKLMO", "BALORTY",
    "EACGHNX", "GDIOPRY", "NCEGLOY", "ACDILTW", "RDGHNOU", "UEFLNTV", "YACDIMN", "ACILRYZ",
    "NDHIMOT", "HFGLOTU", "OKNPRTY", "YADILPV", "RABLMNO", "RACDHUY", "FBCEINT", "DABHLOT",
    "ACIMNTY", "NBHKMOY", "LEFKMNO", "RACDILW", "MCEHINY", "TADMORY", "TCGHILY", "YACMNOR",
    "PADFLMU", "BAEHLPT", "NDORTUW", "OACFKLR", "LBCORTU", "RADHINT", "TFHLOUY", "CABEKLN",
    "OBCIKRW", "LCGHIOR", "ACFILRY", "ABILTVY",
];

pub const MIN_WORD_LEN: usize = 3;
pub const MAX_WORD_LEN: usize = 7;

/// Whether `word` can be spelled from `letters`, each board letter used
/// at most once.
pub fn can_build_word(word: &str, letters: &str) -> bool {
    let mut available: Vec<char> = letters.chars().collect();
    for c in word.chars() {
        match available.iter().position(|&l| l == c) {
            Some(i) => {
                available.swap_remove(i);
            }
            None => return false,
        }
    }
    true
}

/// The study's word list, uppercased at construction.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    words: HashSet<String>,
}

impl Dictionary {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Dictionary {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_uppercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_uppercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Draw a board, re-rolling while it matches the previous round's board.
pub fn draw_letters(rng: &mut impl Rng, previous: Option<&str>) -> &'static str {
    let mut letters = *LETTER_SETS.choose(rng).expect("pool is non-empty");
    if let Some(prev) = previous {
        while letters == prev {
            letters = *LETTER_SETS.choose(rng).expect("pool is non-empty");
        }
    }
    letters
}
