//! parlor-engine: the Timed Trial Engine.
//!
//! Runs a single interactive task under a wall-clock time budget with a
//! graceful end-of-time negotiation, records every user action as an
//! ordered, timestamped, replayable event log nested inside rounds and
//! attempts, and houses the deterministic simulation/scoring algorithms:
//! a left-to-right arithmetic evaluator, a two-team match simulator with
//! a live commentary timeline, and a pairwise compatibility judge.
//!
//! The engine is single-threaded and event-driven: all state transitions
//! happen synchronously in response to discrete calls (clock ticks, user
//! input, control activations). There are no timers or threads inside --
//! the embedding event loop delivers ticks, and abandoning a trial is
//! simply dropping its controller.
//!
//! Randomness is never ambient. Every generator and simulator takes an
//! explicit `rand::Rng` handle, so a seeded trial replays exactly.

pub mod clock;
pub mod expr;
pub mod football;
pub mod judge;
pub mod numbers;
pub mod people;
pub mod roster;
pub mod ticker;
pub mod trial;
pub mod words;

// ── Convenience re-exports ───────────────────────────────────────────

pub use clock::{ClockSignal, TimeoutPhase, TrialClock};
pub use trial::dating::DatingTrial;
pub use trial::numbers::NumbersTrial;
pub use trial::sports::SportsTrial;
pub use trial::word::WordTrial;
