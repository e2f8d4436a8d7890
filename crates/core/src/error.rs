use thiserror::Error;

/// Invariant violations raised by the trial data model.
///
/// These are programmer errors, not participant errors: rejected user
/// input is modeled as advisory rejection values on the engine side and
/// never reaches this type. Debug builds additionally assert on these
/// paths so a violation fails loudly during development.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrialError {
    /// The trial ledger was sealed by `close_trial` and a mutation was
    /// attempted afterwards.
    #[error("trial ledger is closed")]
    TrialClosed,

    /// An item commit was attempted before any round was opened.
    #[error("no active round to commit into")]
    NoActiveRound,
}
