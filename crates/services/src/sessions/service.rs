use chrono::{DateTime, Utc};
use rand::Rng;
use std::fmt;
use std::mem;
use std::time::Duration;
use tracing::{debug, info, trace};

use flag_core::guess;
use flag_core::model::{AnswerRecord, Country, Level, LevelSummary, QuizSettings};
use flag_core::pools::LevelPool;
use flag_core::shuffle::shuffled;
use flag_core::time::offset;

use super::events::{Feedback, LevelIntent, SessionEvent, SubmitOutcome};
use super::state::{Completion, SessionState};
use crate::agenda::{Agenda, Wakeup};
use crate::error::SessionError;
use crate::timer::{Countdown, CountdownEvent};

const ONE_SECOND: Duration = Duration::from_secs(1);

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One playthrough of a level.
///
/// Asks the first `questions_per_level` countries of a freshly shuffled pool,
/// one at a time, each under the level's countdown. Time only moves when the
/// host calls [`QuizSession::advance`]; everything the session wants shown is
/// queued as [`SessionEvent`]s for [`QuizSession::drain_events`].
///
/// A retry never reuses a session: the host starts a new one.
pub struct QuizSession {
    level: Level,
    settings: QuizSettings,
    shuffled_pool: Vec<Country>,
    index: usize,
    score: usize,
    current: Option<Country>,
    state: SessionState,
    feedback: Feedback,
    countdown: Countdown,
    agenda: Agenda,
    answers: Vec<AnswerRecord>,
    started_at: DateTime<Utc>,
    summary: Option<LevelSummary>,
    events: Vec<SessionEvent>,
}

impl QuizSession {
    /// Start a playthrough of `level` and load its first question.
    ///
    /// `started_at` should come from the services layer clock.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidLevel` if `level` is outside `1..=5`.
    pub fn start_level<R>(
        level: u32,
        settings: &QuizSettings,
        rng: &mut R,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError>
    where
        R: Rng + ?Sized,
    {
        let level = Level::new(level)?;
        let pool = LevelPool::for_level(level);

        let mut session = Self {
            level,
            settings: settings.clone(),
            shuffled_pool: shuffled(pool.countries(), rng),
            index: 0,
            score: 0,
            current: None,
            state: SessionState::AwaitingQuestion,
            feedback: Feedback::Cleared,
            countdown: Countdown::new(),
            agenda: Agenda::new(),
            answers: Vec::new(),
            started_at,
            summary: None,
            events: Vec::new(),
        };
        debug!(level = %level, "level started");
        session.load_next_question()?;
        Ok(session)
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    /// Questions finished so far (answered or timed out).
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn current_country(&self) -> Option<&Country> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    /// The whole level pool in this session's order.
    #[must_use]
    pub fn shuffled_pool(&self) -> &[Country] {
        &self.shuffled_pool
    }

    /// Seconds allowed per question on this level.
    #[must_use]
    pub fn timer_seconds(&self) -> u32 {
        self.settings.timer_seconds(self.level)
    }

    /// Seconds left on the live countdown, if a question is active.
    #[must_use]
    pub fn remaining_seconds(&self) -> Option<u32> {
        self.countdown.remaining()
    }

    #[must_use]
    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    /// Set once the level is complete.
    #[must_use]
    pub fn summary(&self) -> Option<&LevelSummary> {
        self.summary.as_ref()
    }

    /// How long the host may wait before the session has something to do.
    #[must_use]
    pub fn until_next_wakeup(&self) -> Option<Duration> {
        self.agenda.until_next()
    }

    /// Take every event queued since the last call.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        mem::take(&mut self.events)
    }

    /// Check a guess against the current flag.
    ///
    /// Only an active question accepts guesses; anything else, including a
    /// second submission during the feedback pause, is ignored.
    pub fn submit_guess(&mut self, text: &str) -> SubmitOutcome {
        if self.state != SessionState::QuestionActive {
            trace!(level = %self.level, state = ?self.state, "guess ignored");
            return SubmitOutcome::Ignored;
        }
        let Some(country) = self.current.clone() else {
            return SubmitOutcome::Ignored;
        };

        let correct = guess::is_correct(text, country.name());
        let record = AnswerRecord::guessed(country, text.trim(), correct);
        self.conclude_question(record.clone());
        SubmitOutcome::Recorded(record)
    }

    /// Move virtual time forward, firing every wake-up that falls due.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Summary` if the level summary cannot be built.
    pub fn advance(&mut self, elapsed: Duration) -> Result<(), SessionError> {
        let until = self.agenda.now().saturating_add(elapsed);
        while let Some(wakeup) = self.agenda.pop_due(until) {
            self.handle(wakeup)?;
        }
        self.agenda.settle(until);
        Ok(())
    }

    fn handle(&mut self, wakeup: Wakeup) -> Result<(), SessionError> {
        match wakeup {
            Wakeup::CountdownSecond(token) => match self.countdown.on_second(token) {
                Some(CountdownEvent::Tick { remaining }) => {
                    self.events.push(SessionEvent::Countdown { remaining });
                    self.agenda.schedule(ONE_SECOND, Wakeup::CountdownSecond(token));
                }
                Some(CountdownEvent::Expired) => {
                    self.events.push(SessionEvent::Countdown { remaining: 0 });
                    if let (SessionState::QuestionActive, Some(country)) =
                        (self.state, self.current.clone())
                    {
                        debug!(level = %self.level, index = self.index, "countdown expired");
                        self.conclude_question(AnswerRecord::timed_out(country));
                    }
                }
                None => {}
            },
            Wakeup::LoadNextQuestion => {
                if self.state == SessionState::AwaitingQuestion {
                    self.load_next_question()?;
                }
            }
            Wakeup::RestartLevel => {
                if self.state == SessionState::LevelComplete(Completion::Retry) {
                    self.events
                        .push(SessionEvent::Intent(LevelIntent::RestartLevel(self.level)));
                }
            }
        }
        Ok(())
    }

    fn load_next_question(&mut self) -> Result<(), SessionError> {
        let next = if self.index < self.settings.questions_per_level() {
            self.shuffled_pool.get(self.index).cloned()
        } else {
            None
        };
        let Some(country) = next else {
            return self.finalize_level();
        };

        let seconds = self.timer_seconds();
        self.stop_countdown();
        let token = self.countdown.start(seconds);
        self.agenda.schedule(ONE_SECOND, Wakeup::CountdownSecond(token));

        debug!(
            level = %self.level,
            index = self.index,
            code = %country.region_code(),
            "question loaded"
        );
        self.current = Some(country.clone());
        self.set_feedback(Feedback::Cleared);
        self.events.push(SessionEvent::QuestionLoaded {
            level: self.level,
            index: self.index,
            total: self.settings.questions_per_level(),
            country,
        });
        self.events.push(SessionEvent::Countdown { remaining: seconds });
        self.state = SessionState::QuestionActive;
        Ok(())
    }

    /// Shared path for guesses and timeouts.
    fn conclude_question(&mut self, record: AnswerRecord) {
        self.stop_countdown();

        if record.verdict.is_correct() {
            self.score += 1;
        }
        self.index += 1;
        debug!(
            level = %self.level,
            index = self.index,
            score = self.score,
            verdict = ?record.verdict,
            "answer recorded"
        );

        let feedback = if record.verdict.is_correct() {
            Feedback::Correct
        } else {
            Feedback::Incorrect {
                answer: record.country.name().to_string(),
            }
        };
        self.answers.push(record.clone());
        self.events.push(SessionEvent::Answered {
            record,
            score: self.score,
        });
        self.set_feedback(feedback);

        self.agenda
            .schedule(self.settings.feedback_delay(), Wakeup::LoadNextQuestion);
        self.state = SessionState::AwaitingQuestion;
    }

    fn finalize_level(&mut self) -> Result<(), SessionError> {
        self.stop_countdown();

        let completed_at = offset(self.started_at, self.agenda.now());
        let summary = LevelSummary::from_answers(
            self.level,
            self.started_at,
            completed_at,
            &self.answers,
            self.settings.required_score(),
        )?;

        let completion = if self.score >= self.settings.required_score() {
            match self.level.next() {
                Some(next) => Completion::Advance { next },
                None => Completion::AllLevelsComplete,
            }
        } else {
            Completion::Retry
        };
        info!(
            level = %self.level,
            score = self.score,
            required = self.settings.required_score(),
            ?completion,
            "level finished"
        );

        self.state = SessionState::LevelComplete(completion);
        self.summary = Some(summary.clone());
        self.events.push(SessionEvent::LevelCompleted {
            summary,
            completion,
        });

        match completion {
            Completion::Advance { next } => {
                self.events
                    .push(SessionEvent::Intent(LevelIntent::NavigateTo(next)));
            }
            Completion::AllLevelsComplete => {
                self.set_feedback(Feedback::AllLevelsComplete);
                self.events
                    .push(SessionEvent::Intent(LevelIntent::AllLevelsComplete));
            }
            Completion::Retry => {
                self.set_feedback(Feedback::Retry {
                    required: self.settings.required_score(),
                    total: self.settings.questions_per_level(),
                });
                self.agenda
                    .schedule(self.settings.retry_delay(), Wakeup::RestartLevel);
            }
        }
        Ok(())
    }

    fn stop_countdown(&mut self) {
        self.countdown.cancel();
        self.agenda
            .cancel_where(|wakeup| matches!(wakeup, Wakeup::CountdownSecond(_)));
    }

    fn set_feedback(&mut self, feedback: Feedback) {
        self.feedback = feedback.clone();
        self.events.push(SessionEvent::Feedback(feedback));
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("level", &self.level)
            .field("state", &self.state)
            .field("index", &self.index)
            .field("score", &self.score)
            .field("current", &self.current.as_ref().map(Country::name))
            .field("elapsed", &self.agenda.now())
            .field("pending_events", &self.events.len())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
