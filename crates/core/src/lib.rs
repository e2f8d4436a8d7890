//! parlor-core: shared data model for the Parlor timed trial engine.
//!
//! Everything a completed trial hands to the external timeline runner lives
//! here: the timestamped action log, the round ledger with its found items,
//! the generated entity types (players and persons), and the append-only
//! match/couple record databases. All exported types serialize by value so
//! the flattening/export collaborator never has to chase references.
//!
//! # Public API
//!
//! Key types are re-exported at the crate root for convenience:
//!
//! - [`Action`], [`ActionRecorder`] -- the per-trial action stream
//! - [`Round`], [`FoundItem`], [`RoundLedger`] -- round/attempt structure
//! - [`Person`], [`Player`] -- generated entities
//! - [`MatchRecord`], [`CoupleRecord`] -- append-only outcome databases
//! - [`TrialConfig`] -- the per-trial configuration contract
//! - [`TrialError`] -- invariant-violation error type

pub mod action;
pub mod config;
pub mod entity;
pub mod error;
pub mod ledger;
pub mod person;
pub mod player;
pub mod records;

// ── Convenience re-exports ───────────────────────────────────────────

pub use action::{Action, ActionRecorder, Millis};
pub use config::TrialConfig;
pub use entity::{EntityId, IdAllocator};
pub use error::TrialError;
pub use ledger::{FoundItem, Round, RoundLedger};
pub use person::{CoreTraits, Gender, LookingFor, MiscPreferences, Person, PreferenceValue};
pub use player::{Player, PlayerRole, PlayerStats, MAX_STAR_RATING, STAR_VALUES};
pub use records::{CoupleRecord, MatchOutcome, MatchRecord, SlotFill, Winner};
