//! Generated persons for the matchmaking trial.
//!
//! A person is immutable after generation: the trait and preference
//! vectors are the scientific payload downstream analysis keys on, so
//! the full snapshot is retained in the trial's people database even
//! after the person leaves the visible hand.

use serde::{Deserialize, Serialize};

use crate::entity::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// Dating orientation: which gender(s) this person is open to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookingFor {
    Male,
    Female,
    Both,
}

/// Core personality scales, 0-10, 5 is average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreTraits {
    /// 0 = traditional, 10 = very open to new experiences.
    pub openness: u8,
    /// 0 = sedentary, 10 = very athletic.
    pub sportiness: u8,
    /// 0 = introverted, 10 = very social.
    pub social: u8,
    /// 0 = glamorous, 10 = natural/low-maintenance.
    pub natural: u8,
}

impl CoreTraits {
    /// Trait values in canonical order (openness, sportiness, social,
    /// natural), for pairwise scoring and display-word derivation.
    pub fn values(&self) -> [u8; 4] {
        [self.openness, self.sportiness, self.social, self.natural]
    }
}

/// Stance on one binary preference axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferenceValue {
    Neutral,
    Positive,
    Negative,
}

impl PreferenceValue {
    pub fn is_neutral(&self) -> bool {
        matches!(self, PreferenceValue::Neutral)
    }
}

/// The ten binary preference axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MiscPreferences {
    pub cats: PreferenceValue,
    pub dogs: PreferenceValue,
    pub smoking: PreferenceValue,
    pub drinking: PreferenceValue,
    pub travel: PreferenceValue,
    pub cooking: PreferenceValue,
    pub reading: PreferenceValue,
    pub music: PreferenceValue,
    pub movies: PreferenceValue,
    pub outdoors: PreferenceValue,
}

impl MiscPreferences {
    /// All axes neutral.
    pub fn neutral() -> Self {
        MiscPreferences {
            cats: PreferenceValue::Neutral,
            dogs: PreferenceValue::Neutral,
            smoking: PreferenceValue::Neutral,
            drinking: PreferenceValue::Neutral,
            travel: PreferenceValue::Neutral,
            cooking: PreferenceValue::Neutral,
            reading: PreferenceValue::Neutral,
            music: PreferenceValue::Neutral,
            movies: PreferenceValue::Neutral,
            outdoors: PreferenceValue::Neutral,
        }
    }

    /// Axis values in canonical order, paired with their names.
    pub fn axes(&self) -> [(&'static str, PreferenceValue); 10] {
        [
            ("cats", self.cats),
            ("dogs", self.dogs),
            ("smoking", self.smoking),
            ("drinking", self.drinking),
            ("travel", self.travel),
            ("cooking", self.cooking),
            ("reading", self.reading),
            ("music", self.music),
            ("movies", self.movies),
            ("outdoors", self.outdoors),
        ]
    }

    /// Mutable access by axis position, canonical order.
    pub fn set_axis(&mut self, index: usize, value: PreferenceValue) {
        match index {
            0 => self.cats = value,
            1 => self.dogs = value,
            2 => self.smoking = value,
            3 => self.drinking = value,
            4 => self.travel = value,
            5 => self.cooking = value,
            6 => self.reading = value,
            7 => self.music = value,
            8 => self.movies = value,
            9 => self.outdoors = value,
            _ => unreachable!("preference axis index out of range"),
        }
    }

    pub const AXIS_COUNT: usize = 10;
}

/// A generated person. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: EntityId,
    pub name: String,
    pub image: String,
    pub gender: Gender,
    pub looking_for: LookingFor,
    pub core_traits: CoreTraits,
    pub misc_preferences: MiscPreferences,
    /// Human-readable trait words derived from the numeric vectors.
    pub display_traits: Vec<String>,
}

impl Person {
    /// Whether this person's orientation includes the other's gender.
    pub fn attracted_to(&self, other: &Person) -> bool {
        match self.looking_for {
            LookingFor::Both => true,
            LookingFor::Male => other.gender == Gender::Male,
            LookingFor::Female => other.gender == Gender::Female,
        }
    }
}
