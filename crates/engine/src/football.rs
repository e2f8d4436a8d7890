//! Two-team match simulation.
//!
//! Team fitness is the mean over filled positions of
//! `primary_stat * 2 + stamina`, where the primary stat is defense for
//! the back slot, passing for both mid slots, and shooting for the
//! attacker. Empty positions are excluded from the mean's denominator.
//!
//! The scoreline is fitness-driven with bounded noise: the raw goal
//! differential is `clamp(round((fitness_a - fitness_b) / 3), -5, 5)`,
//! perturbed by a weighted draw (50% 0, 1/6 each +-1, 1/12 each +-2),
//! re-clamped to +-4, and both sides share a uniform baseline of 0-2
//! goals for the losing team.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use parlor_core::{MatchOutcome, Player, PlayerRole, Winner};

/// The eight field positions, team A first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldSlot {
    DefenseA,
    MidA1,
    MidA2,
    OffenseA,
    OffenseB,
    MidB1,
    MidB2,
    DefenseB,
}

impl FieldSlot {
    pub const ALL: [FieldSlot; 8] = [
        FieldSlot::DefenseA,
        FieldSlot::MidA1,
        FieldSlot::MidA2,
        FieldSlot::OffenseA,
        FieldSlot::OffenseB,
        FieldSlot::MidB1,
        FieldSlot::MidB2,
        FieldSlot::DefenseB,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldSlot::DefenseA => "defenseA",
            FieldSlot::MidA1 => "midA1",
            FieldSlot::MidA2 => "midA2",
            FieldSlot::OffenseA => "offenseA",
            FieldSlot::OffenseB => "offenseB",
            FieldSlot::MidB1 => "midB1",
            FieldSlot::MidB2 => "midB2",
            FieldSlot::DefenseB => "defenseB",
        }
    }

    pub fn parse(s: &str) -> Option<FieldSlot> {
        FieldSlot::ALL.into_iter().find(|slot| slot.as_str() == s)
    }

    pub fn is_team_a(&self) -> bool {
        matches!(
            self,
            FieldSlot::DefenseA | FieldSlot::MidA1 | FieldSlot::MidA2 | FieldSlot::OffenseA
        )
    }

    /// Which stat the position reads as primary.
    pub fn primary_role(&self) -> PlayerRole {
        match self {
            FieldSlot::DefenseA | FieldSlot::DefenseB => PlayerRole::Defense,
            FieldSlot::MidA1 | FieldSlot::MidA2 | FieldSlot::MidB1 | FieldSlot::MidB2 => {
                PlayerRole::Mid
            }
            FieldSlot::OffenseA | FieldSlot::OffenseB => PlayerRole::Attack,
        }
    }
}

/// The field: one optional occupant per position.
#[derive(Debug, Clone, Default)]
pub struct TeamSheet {
    slots: [Option<Player>; 8],
}

impl TeamSheet {
    pub fn new() -> Self {
        TeamSheet::default()
    }

    fn index(slot: FieldSlot) -> usize {
        FieldSlot::ALL.iter().position(|s| *s == slot).expect("slot in ALL")
    }

    pub fn get(&self, slot: FieldSlot) -> Option<&Player> {
        self.slots[Self::index(slot)].as_ref()
    }

    pub fn put(&mut self, slot: FieldSlot, player: Player) -> Option<Player> {
        self.slots[Self::index(slot)].replace(player)
    }

    pub fn take(&mut self, slot: FieldSlot) -> Option<Player> {
        self.slots[Self::index(slot)].take()
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Drain every occupant off the field, in position order.
    pub fn clear(&mut self) -> Vec<Player> {
        self.slots.iter_mut().filter_map(Option::take).collect()
    }

    pub fn occupants(&self) -> impl Iterator<Item = (FieldSlot, &Player)> {
        FieldSlot::ALL
            .into_iter()
            .zip(self.slots.iter())
            .filter_map(|(slot, occ)| occ.as_ref().map(|p| (slot, p)))
    }

    /// Positional fitness contribution of one slot, 0 when empty.
    pub fn slot_fitness(&self, slot: FieldSlot) -> f64 {
        self.get(slot).map_or(0.0, |p| position_fitness(p, slot))
    }
}

/// `primary_stat * 2 + stamina` for a player standing on `slot`.
pub fn position_fitness(player: &Player, slot: FieldSlot) -> f64 {
    let primary = match slot.primary_role() {
        PlayerRole::Defense => player.stats.defense,
        PlayerRole::Mid => player.stats.passing,
        PlayerRole::Attack => player.stats.shooting,
    };
    primary * 2.0 + player.stats.stamina
}

/// Mean positional fitness over the filled positions of one team.
pub fn team_fitness(sheet: &TeamSheet, team_a: bool) -> f64 {
    let scores: Vec<f64> = FieldSlot::ALL
        .into_iter()
        .filter(|slot| slot.is_team_a() == team_a)
        .filter_map(|slot| sheet.get(slot).map(|p| position_fitness(p, slot)))
        .collect();
    if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    }
}

/// Weighted noise pool: 50% 0, ~16.7% each +-1, ~8.3% each +-2.
const NOISE_POOL: [i32; 12] = [0, 0, 0, 0, 0, 0, 1, 1, -1, -1, 2, -2];

/// Simulate a match over the current field.
pub fn simulate(sheet: &TeamSheet, rng: &mut impl Rng) -> MatchOutcome {
    let team_a_fitness = team_fitness(sheet, true);
    let team_b_fitness = team_fitness(sheet, false);

    let raw = ((team_a_fitness - team_b_fitness) / 3.0).round() as i32;
    let mut goal_diff = raw.clamp(-5, 5);
    goal_diff += NOISE_POOL.choose(rng).expect("pool is non-empty");
    goal_diff = goal_diff.clamp(-4, 4);

    let losing_team_goals = rng.gen_range(0..3u32);
    let team_a_score = losing_team_goals + goal_diff.max(0) as u32;
    let team_b_score = losing_team_goals + (-goal_diff).max(0) as u32;

    let winner = match team_a_score.cmp(&team_b_score) {
        std::cmp::Ordering::Greater => Winner::A,
        std::cmp::Ordering::Less => Winner::B,
        std::cmp::Ordering::Equal => Winner::Tie,
    };

    tracing::debug!(
        team_a_score,
        team_b_score,
        team_a_fitness,
        team_b_fitness,
        "match simulated"
    );

    MatchOutcome {
        team_a_score,
        team_b_score,
        team_a_fitness,
        team_b_fitness,
        winner,
    }
}
