use std::time::Duration;

use flag_core::model::QuizSettings;
use flag_core::time::fixed_clock;
use services::{LevelIntent, QuizLoop, RunOutcome, SessionEvent};
use tokio::sync::mpsc;

#[tokio::test(start_paused = true)]
async fn correct_answers_clear_every_level() {
    let (tx, mut rx) = mpsc::channel::<String>(8);
    let mut quiz = QuizLoop::seeded(QuizSettings::default(), fixed_clock(), 7);

    let mut loaded = 0;
    let mut presenter = |event: &SessionEvent| {
        if let SessionEvent::QuestionLoaded { country, .. } = event {
            loaded += 1;
            tx.try_send(format!(" {} ", country.name().to_lowercase()))
                .unwrap();
        }
    };

    let report = quiz.run(1, &mut rx, &mut presenter).await.unwrap();

    assert_eq!(report.outcome, RunOutcome::AllLevelsComplete);
    assert_eq!(report.restarts, 0);
    assert_eq!(report.summaries.len(), 5);
    assert!(report.summaries.iter().all(|s| s.correct() == 3));
    assert_eq!(loaded, 15);
}

#[tokio::test(start_paused = true)]
async fn silence_retries_until_input_closes() {
    let (tx, mut rx) = mpsc::channel::<String>(1);
    let mut quiz = QuizLoop::seeded(QuizSettings::default(), fixed_clock(), 8);

    let mut sender = Some(tx);
    let mut restarts_seen = 0;
    let mut presenter = |event: &SessionEvent| {
        if let SessionEvent::Intent(LevelIntent::RestartLevel(_)) = event {
            restarts_seen += 1;
            if restarts_seen == 2 {
                sender.take();
            }
        }
    };

    let started = tokio::time::Instant::now();
    let report = quiz.run(1, &mut rx, &mut presenter).await.unwrap();

    assert_eq!(report.outcome, RunOutcome::Abandoned);
    assert_eq!(report.restarts, 2);
    assert_eq!(report.summaries.len(), 2);
    assert!(report.summaries.iter().all(|s| s.timed_out() == 3 && !s.passed()));

    // Two rounds of three 15s countdowns, feedback pauses and a retry delay.
    let round = Duration::from_secs(45) + Duration::from_millis(3 * 700 + 2_200);
    assert!(started.elapsed() >= round * 2);
}

#[tokio::test]
async fn invalid_start_level_is_reported() {
    let (_tx, mut rx) = mpsc::channel::<String>(1);
    let mut quiz = QuizLoop::new(QuizSettings::default(), fixed_clock());
    let mut presenter = |_: &SessionEvent| {};
    assert!(quiz.run(6, &mut rx, &mut presenter).await.is_err());
}
