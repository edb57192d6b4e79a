use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info};

use flag_core::model::{LevelSummary, QuizSettings};

use super::events::{LevelIntent, SessionEvent};
use super::service::QuizSession;
use crate::Clock;
use crate::error::SessionError;

/// Receives every session event as it happens.
pub trait Presenter {
    fn present(&mut self, event: &SessionEvent);
}

impl<F> Presenter for F
where
    F: FnMut(&SessionEvent),
{
    fn present(&mut self, event: &SessionEvent) {
        self(event);
    }
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    AllLevelsComplete,
    /// The guess source closed before the last level was passed.
    Abandoned,
}

/// Result of [`QuizLoop::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub outcome: RunOutcome,
    /// One entry per finished playthrough, retries included.
    pub summaries: Vec<LevelSummary>,
    pub restarts: u32,
}

/// Plays levels back to back on real time, acting on each session's intents.
///
/// Passing a level starts the next one, failing restarts the same level with
/// a fresh shuffle, and passing the last level ends the run.
pub struct QuizLoop<R = StdRng> {
    settings: QuizSettings,
    clock: Clock,
    rng: R,
}

impl QuizLoop<StdRng> {
    #[must_use]
    pub fn new(settings: QuizSettings, clock: Clock) -> Self {
        Self::with_rng(settings, clock, StdRng::from_rng(&mut rand::rng()))
    }

    /// Same shuffles for the same seed.
    #[must_use]
    pub fn seeded(settings: QuizSettings, clock: Clock, seed: u64) -> Self {
        Self::with_rng(settings, clock, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> QuizLoop<R> {
    #[must_use]
    pub fn with_rng(settings: QuizSettings, clock: Clock, rng: R) -> Self {
        Self {
            settings,
            clock,
            rng,
        }
    }

    /// Start a session for `level` using this loop's settings, RNG and clock.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidLevel` for levels outside `1..=5`.
    pub fn start_session(&mut self, level: u32) -> Result<QuizSession, SessionError> {
        QuizSession::start_level(level, &self.settings, &mut self.rng, self.clock.now())
    }

    /// Run from `level` until every level is passed or `guesses` closes.
    ///
    /// Guesses and timer wake-ups are handled one at a time on the calling
    /// task.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidLevel` if `level` is out of range.
    pub async fn run<P>(
        &mut self,
        level: u32,
        guesses: &mut mpsc::Receiver<String>,
        presenter: &mut P,
    ) -> Result<RunReport, SessionError>
    where
        P: Presenter + ?Sized,
    {
        let mut session = self.start_session(level)?;
        let mut last = Instant::now();
        let mut summaries = Vec::new();
        let mut restarts = 0_u32;

        loop {
            let mut intent = None;
            for event in session.drain_events() {
                presenter.present(&event);
                match event {
                    SessionEvent::LevelCompleted { summary, .. } => summaries.push(summary),
                    SessionEvent::Intent(next) => intent = Some(next),
                    _ => {}
                }
            }

            match intent {
                Some(LevelIntent::NavigateTo(next)) => {
                    debug!(level = %next, "advancing to next level");
                    session = self.start_session(next.get())?;
                    last = Instant::now();
                    continue;
                }
                Some(LevelIntent::RestartLevel(same)) => {
                    debug!(level = %same, "restarting level");
                    restarts += 1;
                    session = self.start_session(same.get())?;
                    last = Instant::now();
                    continue;
                }
                Some(LevelIntent::AllLevelsComplete) => {
                    info!(restarts, "all levels complete");
                    return Ok(RunReport {
                        outcome: RunOutcome::AllLevelsComplete,
                        summaries,
                        restarts,
                    });
                }
                None => {}
            }

            let wait = session.until_next_wakeup();
            tokio::select! {
                guess = guesses.recv() => {
                    let now = Instant::now();
                    session.advance(now.saturating_duration_since(last))?;
                    last = now;
                    match guess {
                        Some(text) => {
                            session.submit_guess(&text);
                        }
                        None => {
                            info!(level = %session.level(), "guess source closed");
                            return Ok(RunReport {
                                outcome: RunOutcome::Abandoned,
                                summaries,
                                restarts,
                            });
                        }
                    }
                }
                () = sleep_for(wait) => {
                    let now = Instant::now();
                    session.advance(now.saturating_duration_since(last))?;
                    last = now;
                }
            }
        }
    }
}

async fn sleep_for(wait: Option<Duration>) {
    match wait {
        Some(wait) => tokio::time::sleep(wait).await,
        None => std::future::pending().await,
    }
}
