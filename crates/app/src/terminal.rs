use flag_core::model::FlagImageSource;
use services::{LevelIntent, Presenter, SessionEvent};
use tracing::warn;

/// Renders session events as plain lines on stdout.
pub struct TerminalPresenter {
    flags: FlagImageSource,
    timer_seconds: u32,
}

impl TerminalPresenter {
    #[must_use]
    pub fn new(flags: FlagImageSource) -> Self {
        Self {
            flags,
            timer_seconds: 0,
        }
    }

    /// Full countdowns would flood the terminal; show the start, every fifth
    /// second and the last three.
    fn shows_countdown(&self, remaining: u32) -> bool {
        remaining == self.timer_seconds || remaining % 5 == 0 || remaining <= 3
    }
}

impl Presenter for TerminalPresenter {
    fn present(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::QuestionLoaded {
                level,
                index,
                total,
                country,
            } => {
                self.timer_seconds = 0;
                println!();
                println!("Level {level} · flag {}/{total}", index + 1);
                match self.flags.url_for(country.region_code()) {
                    Ok(url) => println!("  {url}"),
                    Err(err) => {
                        warn!(%err, "cannot build flag url");
                        println!("  [{}]", country.region_code());
                    }
                }
                println!("  Which country is this?");
            }
            SessionEvent::Countdown { remaining } => {
                if self.timer_seconds == 0 {
                    self.timer_seconds = *remaining;
                }
                if self.shows_countdown(*remaining) {
                    println!("  ⏱ {remaining}s");
                }
            }
            SessionEvent::Answered { score, .. } => println!("  Score: {score}"),
            SessionEvent::Feedback(feedback) => {
                let text = feedback.to_string();
                if !text.is_empty() {
                    println!("  {text}");
                }
            }
            SessionEvent::LevelCompleted { summary, .. } => {
                println!();
                println!(
                    "Level {} finished: {}/{} correct ({} timed out)",
                    summary.level(),
                    summary.correct(),
                    summary.total(),
                    summary.timed_out()
                );
            }
            SessionEvent::Intent(LevelIntent::NavigateTo(next)) => {
                println!("Moving on to level {next}…");
            }
            SessionEvent::Intent(LevelIntent::RestartLevel(level)) => {
                println!("Restarting level {level}…");
            }
            SessionEvent::Intent(LevelIntent::AllLevelsComplete) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flag_core::model::{Country, DEFAULT_FLAG_BASE_URL, Level};

    fn presenter() -> TerminalPresenter {
        TerminalPresenter::new(FlagImageSource::new(DEFAULT_FLAG_BASE_URL).unwrap())
    }

    fn load(presenter: &mut TerminalPresenter) {
        presenter.present(&SessionEvent::QuestionLoaded {
            level: Level::FIRST,
            index: 0,
            total: 3,
            country: Country::new("France", "fr").unwrap(),
        });
    }

    #[test]
    fn first_countdown_after_load_sets_the_start_value() {
        let mut presenter = presenter();
        load(&mut presenter);
        assert_eq!(presenter.timer_seconds, 0);

        presenter.present(&SessionEvent::Countdown { remaining: 17 });
        assert_eq!(presenter.timer_seconds, 17);

        presenter.present(&SessionEvent::Countdown { remaining: 16 });
        assert_eq!(presenter.timer_seconds, 17);
    }

    #[test]
    fn countdown_shows_start_fifths_and_last_three() {
        let mut presenter = presenter();
        load(&mut presenter);
        presenter.present(&SessionEvent::Countdown { remaining: 17 });

        let shown: Vec<u32> = (0..=17)
            .rev()
            .filter(|&s| presenter.shows_countdown(s))
            .collect();
        assert_eq!(shown, vec![17, 15, 10, 5, 3, 2, 1, 0]);
    }

    #[test]
    fn next_question_reseeds_the_start_value() {
        let mut presenter = presenter();
        load(&mut presenter);
        presenter.present(&SessionEvent::Countdown { remaining: 17 });

        load(&mut presenter);
        presenter.present(&SessionEvent::Countdown { remaining: 22 });
        assert_eq!(presenter.timer_seconds, 22);
        assert!(presenter.shows_countdown(22));
        assert!(!presenter.shows_countdown(17));
    }
}
