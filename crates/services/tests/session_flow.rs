use std::collections::HashSet;
use std::time::Duration;

use flag_core::model::{Level, QuizSettings, Verdict};
use flag_core::pools::LevelPool;
use flag_core::time::fixed_now;
use rand::SeedableRng;
use rand::rngs::StdRng;
use services::{
    Completion, Feedback, LevelIntent, QuizSession, SessionError, SessionEvent, SessionState,
    SubmitOutcome,
};

fn start(level: u32, seed: u64) -> QuizSession {
    let mut rng = StdRng::seed_from_u64(seed);
    QuizSession::start_level(level, &QuizSettings::default(), &mut rng, fixed_now()).unwrap()
}

fn answer_correctly(session: &mut QuizSession) {
    let answer = session.current_country().unwrap().name().to_string();
    let outcome = session.submit_guess(&answer);
    assert!(matches!(outcome, SubmitOutcome::Recorded(ref r) if r.verdict == Verdict::Correct));
}

fn let_time_run_out(session: &mut QuizSession) {
    let secs = session.timer_seconds();
    session.advance(Duration::from_secs(u64::from(secs))).unwrap();
}

fn pause(session: &mut QuizSession) {
    let delay = session.settings().feedback_delay();
    session.advance(delay).unwrap();
}

fn intents(events: &[SessionEvent]) -> Vec<LevelIntent> {
    events
        .iter()
        .filter_map(|event| match event {
            SessionEvent::Intent(intent) => Some(*intent),
            _ => None,
        })
        .collect()
}

#[test]
fn every_level_shuffles_its_whole_pool() {
    let settings = QuizSettings::default();
    for (raw, expected_secs) in (1..=5).zip([15, 20, 25, 30, 35]) {
        let session = start(raw, u64::from(raw));
        let level = Level::new(raw).unwrap();

        let pool: HashSet<_> = LevelPool::for_level(level).into_countries().into_iter().collect();
        let shuffled: HashSet<_> = session.shuffled_pool().iter().cloned().collect();
        assert_eq!(session.shuffled_pool().len(), 20);
        assert_eq!(shuffled, pool);

        assert_eq!(session.timer_seconds(), expected_secs);
        assert_eq!(settings.timer_seconds(level), expected_secs);
    }
}

#[test]
fn three_correct_answers_advance_to_level_two() {
    let mut session = start(1, 11);
    let mut events = Vec::new();

    for _ in 0..3 {
        answer_correctly(&mut session);
        pause(&mut session);
        events.extend(session.drain_events());
    }

    assert_eq!(session.score(), 3);
    assert_eq!(
        session.state(),
        SessionState::LevelComplete(Completion::Advance {
            next: Level::new(2).unwrap()
        })
    );
    assert_eq!(
        intents(&events),
        vec![LevelIntent::NavigateTo(Level::new(2).unwrap())]
    );

    let summary = session.summary().unwrap();
    assert_eq!(summary.correct(), 3);
    assert!(summary.passed());
    assert_eq!(summary.completed_at(), fixed_now() + chrono::TimeDelta::milliseconds(2_100));
}

#[test]
fn two_timeouts_trigger_retry_then_restart() {
    let settings = QuizSettings::default();
    let mut session = start(1, 12);

    let_time_run_out(&mut session);
    pause(&mut session);
    let_time_run_out(&mut session);
    pause(&mut session);
    answer_correctly(&mut session);
    pause(&mut session);

    assert_eq!(session.score(), 1);
    assert_eq!(
        session.state(),
        SessionState::LevelComplete(Completion::Retry)
    );
    assert_eq!(
        session.feedback(),
        &Feedback::Retry {
            required: 2,
            total: 3
        }
    );
    let summary = session.summary().unwrap();
    assert_eq!(summary.timed_out(), 2);
    assert_eq!(summary.correct(), 1);
    assert!(intents(&session.drain_events()).is_empty());

    // The restart intent only follows the retry delay.
    session
        .advance(settings.retry_delay() - Duration::from_millis(1))
        .unwrap();
    assert!(intents(&session.drain_events()).is_empty());
    session.advance(Duration::from_millis(1)).unwrap();
    assert_eq!(
        intents(&session.drain_events()),
        vec![LevelIntent::RestartLevel(Level::FIRST)]
    );

    let mut rng = StdRng::seed_from_u64(99);
    let fresh = QuizSession::start_level(1, &settings, &mut rng, fixed_now()).unwrap();
    assert_eq!(fresh.score(), 0);
    assert_eq!(fresh.index(), 0);
    assert_eq!(fresh.state(), SessionState::QuestionActive);
    assert_ne!(fresh.shuffled_pool(), session.shuffled_pool());
}

#[test]
fn resubmitting_before_next_flag_changes_nothing() {
    let mut session = start(1, 13);
    answer_correctly(&mut session);
    let (score, index) = (session.score(), session.index());

    session.advance(Duration::from_millis(300)).unwrap();
    let answer = session.answers()[0].country.name().to_string();
    assert!(session.submit_guess(&answer).is_ignored());
    assert!(session.submit_guess("anything").is_ignored());

    assert_eq!(session.score(), score);
    assert_eq!(session.index(), index);
}

#[test]
fn guesses_after_completion_are_ignored() {
    let mut session = start(1, 14);
    for _ in 0..3 {
        answer_correctly(&mut session);
        pause(&mut session);
    }
    assert!(session.is_complete());
    assert!(session.submit_guess("France").is_ignored());
    assert_eq!(session.score(), 3);
}

#[test]
fn out_of_range_levels_are_rejected() {
    let mut rng = StdRng::seed_from_u64(0);
    for level in [0, 6] {
        let err = QuizSession::start_level(level, &QuizSettings::default(), &mut rng, fixed_now())
            .unwrap_err();
        assert!(
            matches!(err, SessionError::InvalidLevel(_)),
            "level {level} should be invalid"
        );
    }
}

#[test]
fn passing_the_last_level_completes_the_game() {
    let mut session = start(5, 15);
    let mut events = Vec::new();
    for _ in 0..3 {
        answer_correctly(&mut session);
        pause(&mut session);
        events.extend(session.drain_events());
    }

    assert_eq!(
        session.state(),
        SessionState::LevelComplete(Completion::AllLevelsComplete)
    );
    assert_eq!(intents(&events), vec![LevelIntent::AllLevelsComplete]);
    assert_eq!(session.feedback(), &Feedback::AllLevelsComplete);
    assert_eq!(session.until_next_wakeup(), None);
}

#[test]
fn custom_pacing_keeps_feedback_before_advance() {
    let settings = QuizSettings::default().with_feedback_delay(Duration::from_millis(50));
    let mut rng = StdRng::seed_from_u64(16);
    let mut session = QuizSession::start_level(2, &settings, &mut rng, fixed_now()).unwrap();
    session.drain_events();

    answer_correctly(&mut session);
    session.advance(Duration::from_millis(50)).unwrap();
    let events = session.drain_events();

    let feedback_at = events
        .iter()
        .position(|e| *e == SessionEvent::Feedback(Feedback::Correct))
        .unwrap();
    let loaded_at = events
        .iter()
        .position(|e| matches!(e, SessionEvent::QuestionLoaded { index: 1, .. }))
        .unwrap();
    assert!(feedback_at < loaded_at);
}
