use serde::{Deserialize, Serialize};

/// Per-trial configuration supplied by the external timeline runner.
///
/// Unknown options are rejected at deserialization time; missing options
/// fall back to the defaults below, so a bare `{}` is a valid config.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct TrialConfig {
    /// Wall-clock budget for the trial, in seconds.
    pub time_limit_seconds: u32,

    /// Offer the end-of-time popup and one grace move instead of cutting
    /// the trial off mid-input.
    pub allow_graceful_extension: bool,

    /// Surface per-submission correctness to the participant. The data
    /// always records correctness; this only controls presentation.
    pub show_correctness_markers: bool,
}

impl Default for TrialConfig {
    fn default() -> Self {
        TrialConfig {
            time_limit_seconds: 240,
            allow_graceful_extension: true,
            show_correctness_markers: false,
        }
    }
}
