//! Trial controllers, one per game type.
//!
//! A controller owns its clock, round ledger, generators, and databases
//! exclusively and reacts synchronously to typed input calls. Rejected
//! input is an advisory value (the model is left unchanged and nothing
//! is logged); programmer errors surface as [`parlor_core::TrialError`].
//!
//! Every controller follows the same lifecycle: construct with a config
//! and a seed, feed it input and one [`tick`](crate::TrialClock::tick)
//! per second, walk the end-of-time negotiation when the clock asks for
//! it, and call `finish` exactly once to obtain the result object for
//! the external timeline runner.

pub mod dating;
pub mod numbers;
pub mod sports;
pub mod word;

/// Label of the synthetic action appended when a trial is finished.
pub const TRIAL_END_LABEL: &str = "TRIAL_END";
