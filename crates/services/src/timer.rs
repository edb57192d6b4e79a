//! Per-question countdown.
//!
//! The countdown holds no clock of its own. Whoever owns it schedules a
//! wake-up one second out, carrying the token returned by `start`, and feeds
//! it back through `on_second`. Restarting or cancelling bumps or clears the
//! live generation, so wake-ups already in flight become no-ops.

/// Identifies one run of a [`Countdown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CountdownToken(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownEvent {
    /// A second elapsed; `remaining` is at least 1.
    Tick { remaining: u32 },
    /// The last second elapsed. Reported exactly once per run.
    Expired,
}

/// One-second resolution countdown with at most one live run.
#[derive(Debug, Default)]
pub struct Countdown {
    generation: u64,
    remaining: Option<u32>,
}

impl Countdown {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a run of `seconds`, cancelling any live run first.
    pub fn start(&mut self, seconds: u32) -> CountdownToken {
        self.cancel();
        self.generation = self.generation.wrapping_add(1);
        self.remaining = Some(seconds);
        CountdownToken(self.generation)
    }

    /// Stop the live run, if any.
    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        self.remaining.is_some()
    }

    /// Whole seconds left in the live run.
    #[must_use]
    pub fn remaining(&self) -> Option<u32> {
        self.remaining
    }

    /// Account for one elapsed second of the run identified by `token`.
    ///
    /// Returns `None` for stale tokens and stopped runs.
    pub fn on_second(&mut self, token: CountdownToken) -> Option<CountdownEvent> {
        if token.0 != self.generation {
            return None;
        }
        let next = self.remaining?.saturating_sub(1);
        if next == 0 {
            self.remaining = None;
            Some(CountdownEvent::Expired)
        } else {
            self.remaining = Some(next);
            Some(CountdownEvent::Tick { remaining: next })
        }
    }
}
