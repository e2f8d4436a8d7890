//! Pairwise compatibility scoring and couple news messages.
//!
//! Scoring: each of the four shared traits contributes 25 points when
//! the values differ by at most 1, stepping down 18/12/7/3/1/0 as the
//! difference grows. Each preference axis where both parties are
//! non-neutral adds 20 on a match and subtracts 20 on a conflict. The
//! running total is clamped to [0, 100]; only AFTER clamping, a missing
//! mutual attraction subtracts 100. The final score can therefore be
//! negative, and callers must not re-clamp -- the message buckets below
//! rely on the full range.

use rand::seq::SliceRandom;
use rand::Rng;

use parlor_core::{CoupleRecord, Person};

/// Step function over the absolute trait difference.
fn trait_score(diff: u8) -> i32 {
    match diff {
        0 | 1 => 25,
        2 => 18,
        3 => 12,
        4 => 7,
        5 => 3,
        6 => 1,
        _ => 0,
    }
}

/// Whether each party's orientation includes the other's gender.
pub fn mutually_attracted(a: &Person, b: &Person) -> bool {
    a.attracted_to(b) && b.attracted_to(a)
}

/// Score a couple. Deterministic; the same pair always scores the same.
pub fn judge_couple(a: &Person, b: &Person) -> i32 {
    let mut score: i32 = a
        .core_traits
        .values()
        .iter()
        .zip(b.core_traits.values())
        .map(|(&va, vb)| trait_score(va.abs_diff(vb)))
        .sum();

    for ((_, pa), (_, pb)) in a.misc_preferences.axes().iter().zip(b.misc_preferences.axes()) {
        if pa.is_neutral() || pb.is_neutral() {
            continue;
        }
        if *pa == pb {
            score += 20;
        } else {
            score -= 20;
        }
    }

    score = score.clamp(0, 100);

    // Applied after the clamp on purpose: a one-sided crush zeroes out
    // even a perfect trait match.
    if !mutually_attracted(a, b) {
        score -= 100;
    }

    score
}

const VERY_POSITIVE_MESSAGES: [&str; 4] = [
    "{person1} and {person2} talked until the cafe closed and nobody noticed the time!",
    "Sparks flew! {person1} and {person2} already planned a second date.",
    "{person1} and {person2} finish each other's sentences. A matchmaking triumph!",
    "Word is {person1} and {person2} danced until the band went home!",
];

const POSITIVE_MESSAGES: [&str; 4] = [
    "{person1} and {person2} shared dessert and plenty of laughs.",
    "A lovely evening for {person1} and {person2} - they swapped numbers!",
    "{person1} thought {person2} was charming. Promising start!",
    "{person1} and {person2} found out they love the same obscure band.",
];

const NEUTRAL_MESSAGES: [&str; 4] = [
    "{person1} and {person2} had a pleasant enough evening. Time will tell.",
    "Polite conversation and a friendly goodbye for {person1} and {person2}.",
    "{person1} and {person2} agreed the food was excellent. And that was that.",
    "No fireworks, no disasters: {person1} and {person2} kept it cordial.",
];

const NEGATIVE_MESSAGES: [&str; 4] = [
    "{person1} checked the clock a lot while {person2} talked about spreadsheets.",
    "An awkward silence settled early between {person1} and {person2}.",
    "{person1} and {person2} disagreed about nearly everything, starting with the menu.",
    "{person2} left before coffee. {person1} ordered it to go.",
];

const VERY_NEGATIVE_MESSAGES: [&str; 4] = [
    "Disaster date! {person1} and {person2} won't be seeing each other again.",
    "{person1} and {person2} argued so loudly the waiter brought the bill unasked.",
    "A total mismatch - {person1} and {person2} couldn't agree on a single thing.",
    "{person1} faked an emergency to escape. {person2} saw right through it.",
];

/// Pick a news line about one of the most recent couples.
///
/// The stored score gets +-20 points of noise before bucketing, so even
/// good couples have awkward moments and bad ones have some fun. Names
/// are resolved against the trial's people database.
pub fn news_message(
    couples: &[CoupleRecord],
    people: &[Person],
    rng: &mut impl Rng,
) -> Option<String> {
    const MAX_RECENT_COUPLES: usize = 5;

    if couples.is_empty() {
        return None;
    }
    let start = couples.len().saturating_sub(MAX_RECENT_COUPLES);
    let couple = couples[start..].choose(rng)?;

    let name_of = |id| {
        people
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.as_str())
            .unwrap_or("Someone")
    };

    let noisy_score = couple.assigned_score as f64 + (rng.gen::<f64>() - 0.5) * 40.0;
    let pool = if noisy_score >= 80.0 {
        &VERY_POSITIVE_MESSAGES
    } else if noisy_score >= 60.0 {
        &POSITIVE_MESSAGES
    } else if noisy_score >= 40.0 {
        &NEUTRAL_MESSAGES
    } else if noisy_score >= 20.0 {
        &NEGATIVE_MESSAGES
    } else {
        &VERY_NEGATIVE_MESSAGES
    };
    let template = pool.choose(rng).expect("pool is non-empty");

    Some(
        template
            .replace("{person1}", name_of(couple.partner1_id))
            .replace("{person2}", name_of(couple.partner2_id)),
    )
}
