//! Countdown clock with the graceful end-of-time negotiation protocol.
//!
//! Phases walk strictly forward: `Playing -> Popup -> Grace -> Ended`
//! (or `Playing -> Ended` directly when the graceful extension is
//! disabled). There is no path back to `Playing`.
//!
//! The clock owns no timer. The embedding event loop calls [`tick`]
//! once per second of wall time; everything else is a synchronous
//! reaction to participant controls. Dropping the clock at any phase is
//! a valid teardown.
//!
//! End-of-trial is armed exactly once: [`fire_end`] answers `true` on
//! the first call after `Ended` is reached and `false` on every call
//! after that, so a double-activated finish control cannot flush the
//! trial data twice.
//!
//! [`tick`]: TrialClock::tick
//! [`fire_end`]: TrialClock::fire_end

use parlor_core::TrialConfig;

/// Where the trial stands relative to its time budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutPhase {
    /// Countdown active, normal input enabled.
    Playing,
    /// Time is up; the participant is being asked whether to continue.
    /// The clock is paused and normal input is disabled.
    Popup,
    /// The participant chose to continue: exactly one further move is
    /// permitted.
    Grace,
    /// Terminal. Only the explicit finish control remains.
    Ended,
}

/// What a clock call observed. `Idle` means the call was a no-op for
/// the current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockSignal {
    /// Countdown continues; carries the remaining seconds.
    Running(u32),
    /// The countdown hit zero with the graceful extension enabled.
    PopupOpened,
    /// The trial reached `Ended`.
    TrialEnded,
    Idle,
}

#[derive(Debug)]
pub struct TrialClock {
    remaining_seconds: u32,
    phase: TimeoutPhase,
    graceful: bool,
    end_fired: bool,
}

impl TrialClock {
    pub fn new(config: &TrialConfig) -> Self {
        TrialClock {
            remaining_seconds: config.time_limit_seconds,
            phase: TimeoutPhase::Playing,
            graceful: config.allow_graceful_extension,
            end_fired: false,
        }
    }

    pub fn phase(&self) -> TimeoutPhase {
        self.phase
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Normal play input is accepted while `Playing`; during `Grace` the
    /// one permitted move is accepted as well.
    pub fn input_allowed(&self) -> bool {
        matches!(self.phase, TimeoutPhase::Playing | TimeoutPhase::Grace)
    }

    pub fn in_grace(&self) -> bool {
        self.phase == TimeoutPhase::Grace
    }

    pub fn is_ended(&self) -> bool {
        self.phase == TimeoutPhase::Ended
    }

    /// Advance the countdown by one second. Outside `Playing` this is a
    /// no-op; the clock is paused during the popup and grace phases and
    /// dead after `Ended`.
    pub fn tick(&mut self) -> ClockSignal {
        if self.phase != TimeoutPhase::Playing {
            return ClockSignal::Idle;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds > 0 {
            return ClockSignal::Running(self.remaining_seconds);
        }
        if self.graceful {
            tracing::debug!("time limit reached, opening continue popup");
            self.phase = TimeoutPhase::Popup;
            ClockSignal::PopupOpened
        } else {
            tracing::debug!("time limit reached, ending trial");
            self.phase = TimeoutPhase::Ended;
            ClockSignal::TrialEnded
        }
    }

    /// Popup choice: continue for one grace move.
    pub fn choose_continue(&mut self) -> ClockSignal {
        if self.phase != TimeoutPhase::Popup {
            return ClockSignal::Idle;
        }
        self.phase = TimeoutPhase::Grace;
        ClockSignal::Idle
    }

    /// Popup choice: end the trial now.
    pub fn choose_end(&mut self) -> ClockSignal {
        if self.phase != TimeoutPhase::Popup {
            return ClockSignal::Idle;
        }
        self.phase = TimeoutPhase::Ended;
        ClockSignal::TrialEnded
    }

    /// The one grace move finished. Transitions to `Ended` but does NOT
    /// arm the end callback -- the in-flight move's data would be lost if
    /// the flush happened here, so the participant must still activate
    /// the explicit finish control.
    pub fn grace_move_done(&mut self) {
        if self.phase == TimeoutPhase::Grace {
            self.phase = TimeoutPhase::Ended;
        }
    }

    /// Force the terminal phase, whatever the current one. Used by the
    /// explicit finish control and by external abandonment.
    pub fn end_now(&mut self) {
        self.phase = TimeoutPhase::Ended;
    }

    /// Arm the end-of-trial flush. Idempotent: `true` exactly once.
    pub fn fire_end(&mut self) -> bool {
        if self.phase != TimeoutPhase::Ended || self.end_fired {
            return false;
        }
        self.end_fired = true;
        true
    }
}
