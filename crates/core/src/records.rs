//! Append-only outcome databases.
//!
//! Match and couple records reference entities by id, never by value.
//! They are created once, timestamped, and never mutated; downstream
//! analysis resolves ids against the trial's entity databases.

use serde::{Deserialize, Serialize};

use crate::action::Millis;
use crate::entity::EntityId;

/// Outcome of a simulated match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    A,
    B,
    #[serde(rename = "tie")]
    Tie,
}

/// The computed result of one match simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchOutcome {
    pub team_a_score: u32,
    pub team_b_score: u32,
    pub team_a_fitness: f64,
    pub team_b_fitness: f64,
    pub winner: Winner,
}

/// Occupancy of one field position at simulation time: the player's id
/// (if the position was filled) and the positional fitness contribution
/// `primary_stat * 2 + stamina` (0 for an empty position).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotFill {
    pub player_id: Option<EntityId>,
    pub fitness: f64,
}

impl SlotFill {
    pub fn empty() -> Self {
        SlotFill {
            player_id: None,
            fitness: 0.0,
        }
    }
}

/// One simulated match, flattened to ids and scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub match_index: u32,
    pub round_index: u32,

    pub defense_a: SlotFill,
    pub mid_a1: SlotFill,
    pub mid_a2: SlotFill,
    pub offense_a: SlotFill,
    pub offense_b: SlotFill,
    pub mid_b1: SlotFill,
    pub mid_b2: SlotFill,
    pub defense_b: SlotFill,

    pub team_a_fitness: f64,
    pub team_b_fitness: f64,
    pub team_a_score: u32,
    pub team_b_score: u32,
    pub winner: Winner,

    pub timestamp: Millis,
}

/// One matched couple with the compatibility score assigned at match
/// time. The participant never sees the score; it exists for analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoupleRecord {
    pub couple_index: u32,
    pub partner1_id: EntityId,
    pub partner2_id: EntityId,
    pub assigned_score: i32,
    pub timestamp: Millis,
}
