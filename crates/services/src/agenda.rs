//! Virtual-time queue of pending session wake-ups.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::timer::CountdownToken;

/// Deferred work a session has scheduled for itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wakeup {
    CountdownSecond(CountdownToken),
    LoadNextQuestion,
    RestartLevel,
}

/// Wake-ups keyed by deadline, measured from the session's start.
///
/// Equal deadlines fire in the order they were scheduled.
#[derive(Debug, Default)]
pub struct Agenda {
    now: Duration,
    seq: u64,
    entries: BTreeMap<(Duration, u64), Wakeup>,
}

impl Agenda {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time reached so far.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule(&mut self, after: Duration, wakeup: Wakeup) {
        let at = self.now.saturating_add(after);
        self.entries.insert((at, self.seq), wakeup);
        self.seq = self.seq.wrapping_add(1);
    }

    /// Drop every pending wake-up matching `pred`.
    pub fn cancel_where(&mut self, pred: impl Fn(&Wakeup) -> bool) {
        self.entries.retain(|_, wakeup| !pred(wakeup));
    }

    /// Time left until the earliest pending wake-up.
    #[must_use]
    pub fn until_next(&self) -> Option<Duration> {
        self.entries
            .first_key_value()
            .map(|((at, _), _)| at.saturating_sub(self.now))
    }

    /// Pop the earliest wake-up due at or before `until`, moving virtual
    /// time to its deadline.
    pub fn pop_due(&mut self, until: Duration) -> Option<Wakeup> {
        let (&(at, _), _) = self.entries.first_key_value()?;
        if at > until {
            return None;
        }
        let ((at, _), wakeup) = self.entries.pop_first()?;
        self.now = self.now.max(at);
        Some(wakeup)
    }

    /// Move virtual time to `until` once everything due has been popped.
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
