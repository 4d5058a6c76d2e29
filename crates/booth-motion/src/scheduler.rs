//! Warm scheduling state machine.
//!
//! A pure value object: it owns the phase and the warming timestamps and
//! decides what each trigger means, but never touches timers or I/O. The
//! engine task applies its decisions, so checking state and flipping it
//! happen with no suspension in between.

use std::time::Duration;

use tokio::time::Instant;

use booth_models::TriggerKind;

/// Scheduler phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarmPhase {
    /// Nothing scheduled or running
    Idle,
    /// A one-shot timer is armed for the remaining cooldown
    PendingCooldown,
    /// A warm attempt is running
    InFlight,
    /// Warming suppressed while a real capture request runs
    Frozen,
}

/// Why a trigger was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    InFlight,
    Frozen,
}

/// What the engine should do with a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerDecision {
    /// Invoke the warm client now
    Fire,
    /// Arm the one-shot cooldown timer, replacing any armed one
    Defer(Duration),
    /// Drop the trigger; triggers are never queued
    Skip(SkipReason),
}

/// Decides when warm attempts may run.
///
/// The cooldown is measured from the last *successful* warm, so persistent
/// upstream failures do not silence future attempts once the cooldown
/// nominally expires — while a freshly failed attempt does not re-fire on
/// its own, since scheduling only happens in response to a new trigger.
pub struct WarmScheduler {
    cooldown: Duration,
    phase: WarmPhase,
    last_attempt: Option<Instant>,
    last_success: Option<Instant>,
}

impl WarmScheduler {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            phase: WarmPhase::Idle,
            last_attempt: None,
            last_success: None,
        }
    }

    pub fn phase(&self) -> WarmPhase {
        self.phase
    }

    /// True while a warm attempt is running or warming is frozen.
    pub fn is_warming(&self) -> bool {
        matches!(self.phase, WarmPhase::InFlight | WarmPhase::Frozen)
    }

    pub fn last_attempt(&self) -> Option<Instant> {
        self.last_attempt
    }

    pub fn last_success(&self) -> Option<Instant> {
        self.last_success
    }

    /// Cooldown still to serve at `now`. Zero when no warm has succeeded yet.
    pub fn remaining_cooldown(&self, now: Instant) -> Duration {
        match self.last_success {
            Some(at) => self.cooldown.saturating_sub(now.duration_since(at)),
            None => Duration::ZERO,
        }
    }

    /// Handle a motion or interaction trigger.
    pub fn on_trigger(&mut self, _kind: TriggerKind, now: Instant) -> TriggerDecision {
        match self.phase {
            WarmPhase::InFlight => TriggerDecision::Skip(SkipReason::InFlight),
            WarmPhase::Frozen => TriggerDecision::Skip(SkipReason::Frozen),
            WarmPhase::Idle | WarmPhase::PendingCooldown => {
                let remaining = self.remaining_cooldown(now);
                if remaining.is_zero() {
                    self.phase = WarmPhase::InFlight;
                    TriggerDecision::Fire
                } else {
                    self.phase = WarmPhase::PendingCooldown;
                    TriggerDecision::Defer(remaining)
                }
            }
        }
    }

    /// The armed cooldown timer fired. Returns true when a warm attempt
    /// should start; false when the timer was already obsolete (frozen or
    /// otherwise moved on).
    pub fn on_timer_fired(&mut self) -> bool {
        if self.phase == WarmPhase::PendingCooldown {
            self.phase = WarmPhase::InFlight;
            true
        } else {
            false
        }
    }

    /// A warm attempt finished. Bookkeeping always advances so a failure
    /// can never leave the machine stuck in `InFlight`.
    pub fn on_complete(&mut self, success: bool, now: Instant) {
        self.last_attempt = Some(now);
        if success {
            self.last_success = Some(now);
        }
        // A freeze that arrived mid-attempt stays in force until reset()
        if self.phase == WarmPhase::InFlight {
            self.phase = WarmPhase::Idle;
        }
    }

    /// Suppress all warming, from any state. Called right before the real
    /// capture request goes out.
    pub fn freeze(&mut self) {
        self.phase = WarmPhase::Frozen;
    }

    /// Lift a freeze. The just-completed real request counts as having
    /// warmed the model, so the cooldown restarts from `now`.
    pub fn reset(&mut self, now: Instant) {
        self.phase = WarmPhase::Idle;
        self.last_success = Some(now);
    }
}
