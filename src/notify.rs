use std::time::{Duration, Instant};

use crate::types::{Command, StateFlags, TriggerEvent};

/// A single pending deadline. Scheduling again replaces the previous one,
/// so at most one firing is ever pending.
#[derive(Debug, Clone, Default)]
pub struct Debouncer {
    deadline: Option<Instant>,
}

impl Debouncer {
    /// Returns true when a pending deadline was replaced.
    pub fn schedule(&mut self, now: Instant, delay: Duration) -> bool {
        self.deadline.replace(now + delay).is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Consumes the deadline if it has passed.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Decides when notifications reach the host.
///
/// `change` may be coalesced through the debouncer; everything else goes out
/// synchronously. Display-state flags are level-triggered: an add/remove is
/// produced only when a flag actually flips.
#[derive(Debug, Clone, Default)]
pub struct NotificationGate {
    window: Option<Duration>,
    debouncer: Debouncer,
    flags: StateFlags,
}

impl NotificationGate {
    pub fn new(window: Option<Duration>) -> Self {
        Self {
            window,
            ..Self::default()
        }
    }

    pub fn set_window(&mut self, window: Option<Duration>) {
        self.window = window;
    }

    /// The `change` to emit right away, or `None` when it was deferred.
    ///
    /// A deferred change carries whatever the value is when it fires, see
    /// [`NotificationGate::fire_due`].
    pub fn change(&mut self, value: &str, now: Instant) -> Option<TriggerEvent> {
        match self.window {
            Some(delay) => {
                if self.debouncer.schedule(now, delay) {
                    tracing::trace!(?delay, "rescheduled debounced change");
                }
                None
            }
            None => Some(TriggerEvent::Change {
                value: value.to_string(),
            }),
        }
    }

    /// True once when the pending debounced change is due.
    pub fn fire_due(&mut self, now: Instant) -> bool {
        self.debouncer.fire(now)
    }

    pub fn is_debouncing(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    pub fn flags(&self) -> StateFlags {
        self.flags
    }

    /// Brings the flags selected by `mask` in line with `desired`, pushing one
    /// command per flag that flipped.
    pub fn sync_flags(&mut self, desired: StateFlags, mask: StateFlags, out: &mut Vec<Command>) {
        let target = desired & mask;
        let current = self.flags & mask;
        for flag in (target - current).singles() {
            out.push(Command::AddState(flag));
        }
        for flag in (current - target).singles() {
            out.push(Command::RemoveState(flag));
        }
        self.flags = (self.flags - mask) | target;
    }
}
