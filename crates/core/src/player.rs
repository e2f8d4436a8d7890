//! Generated football players for the management trial.

use serde::{Deserialize, Serialize};

use crate::entity::EntityId;

/// The ten-point half-star scale all player stats are drawn from.
pub const STAR_VALUES: [f64; 10] = [0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0, 4.5, 5.0];

pub const MAX_STAR_RATING: f64 = 5.0;

/// Preferred role of a player; also determines which stat is biased high
/// at generation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerRole {
    Defense,
    Mid,
    Attack,
}

/// Star-rated attribute vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub defense: f64,
    pub passing: f64,
    pub shooting: f64,
    pub stamina: f64,
}

/// A generated player. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: EntityId,
    pub name: String,
    pub image: String,
    pub role: PlayerRole,
    pub stats: PlayerStats,
}
