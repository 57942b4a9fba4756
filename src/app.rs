use std::sync::Arc;

use crate::bank::WordBank;
use crate::bank::sampler::OPTION_COUNT;
use crate::config::Config;
use crate::quiz::engine::{QuizEngine, Step};
use crate::quiz::session::SessionState;
use crate::quiz::view::QuizView;
use crate::quiz::{Action, Outcome, Phase, QuizError};
use crate::ui::theme::Theme;

pub struct App {
    pub engine: QuizEngine,
    pub state: SessionState,
    pub theme: &'static Theme,
    pub selected_option: usize,
    /// Last answer feedback (correct or retry) for the current question.
    pub feedback: Option<Outcome>,
    /// Data problem reported by the engine, shown until the next good action.
    pub status: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        config: &Config,
        bank: Arc<WordBank>,
        theme: &'static Theme,
        seed: Option<u64>,
    ) -> Self {
        let engine = match seed {
            Some(seed) => QuizEngine::seeded(bank, seed),
            None => QuizEngine::new(bank),
        };
        let state = SessionState::new(config.show_pinyin);
        tracing::info!(cards = engine.total(), "session started");

        Self {
            engine,
            state,
            theme,
            selected_option: 0,
            feedback: None,
            status: None,
            should_quit: false,
        }
    }

    pub fn view(&self) -> QuizView<'_> {
        QuizView::new(self.engine.bank(), &self.state)
    }

    pub fn phase(&self) -> Phase {
        self.engine.phase(&self.state)
    }

    pub fn dispatch(&mut self, action: Action) {
        match self.engine.apply(&self.state, action) {
            Ok(Step { state, outcome }) => {
                self.state = state;
                self.status = None;
                match outcome {
                    Outcome::Correct { .. } | Outcome::Retry => self.feedback = Some(outcome),
                    Outcome::PinyinToggled(_) => {}
                    Outcome::OptionsRevealed(_) | Outcome::OptionsHidden => self.feedback = None,
                    Outcome::Advanced { .. } | Outcome::Completed { .. } | Outcome::Restarted => {
                        self.feedback = None;
                        self.selected_option = 0;
                    }
                }
            }
            Err(err @ QuizError::InsufficientDistractors(_)) => {
                tracing::error!(%err, "cannot continue quiz");
                self.status = Some(err.to_string());
            }
            Err(err @ QuizError::InvalidAction { .. }) => {
                tracing::debug!(%err, "ignored action");
            }
        }
    }

    pub fn reveal(&mut self) {
        self.dispatch(Action::Reveal);
    }

    pub fn hide(&mut self) {
        self.dispatch(Action::Hide);
    }

    pub fn advance(&mut self) {
        self.dispatch(Action::Advance);
    }

    pub fn restart(&mut self) {
        self.dispatch(Action::Restart);
    }

    pub fn toggle_pinyin(&mut self) {
        self.dispatch(Action::TogglePinyin);
    }

    pub fn select_next(&mut self) {
        self.selected_option = (self.selected_option + 1) % OPTION_COUNT;
    }

    pub fn select_prev(&mut self) {
        if self.selected_option > 0 {
            self.selected_option -= 1;
        } else {
            self.selected_option = OPTION_COUNT - 1;
        }
    }

    pub fn submit_selected(&mut self) {
        self.submit_option(self.selected_option);
    }

    pub fn submit_option(&mut self, idx: usize) {
        if self.phase() != Phase::Choosing {
            return;
        }
        let Some(choice) = self.state.options().and_then(|o| o.get(idx)) else {
            return;
        };
        let choice = choice.to_string();
        self.selected_option = idx;
        self.dispatch(Action::Submit(choice));
    }

    /// Enter/Space: do whatever moves the current question forward.
    pub fn primary_action(&mut self) {
        match self.phase() {
            Phase::Hidden => self.reveal(),
            Phase::Choosing => self.submit_selected(),
            Phase::Answered => self.advance(),
            Phase::Complete => self.restart(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app(csv: &str) -> App {
        let bank = WordBank::from_reader(csv.as_bytes()).unwrap();
        let theme: &'static Theme = Box::leak(Box::new(Theme::default()));
        App::new(&Config::default(), Arc::new(bank), theme, Some(9))
    }

    const FOUR: &str = "character,pinyin,examples\n爱,ài,爱心|可爱\n人,rén,大人\n口,kǒu,人口\n大,dà,大小\n";

    fn answer_idx(app: &App) -> usize {
        let answer = &app.engine.bank().get(app.state.index).unwrap().pinyin;
        app.state
            .options()
            .unwrap()
            .iter()
            .position(|p| p == answer.as_str())
            .unwrap()
    }

    #[test]
    fn test_primary_action_walks_a_question() {
        let mut app = test_app(FOUR);
        assert_eq!(app.phase(), Phase::Hidden);
        app.primary_action();
        assert_eq!(app.phase(), Phase::Choosing);

        app.selected_option = answer_idx(&app);
        app.primary_action();
        assert_eq!(app.phase(), Phase::Answered);
        assert_eq!(app.feedback.as_ref().and_then(|f| f.message()), Some("✅ 正确！"));

        app.primary_action();
        assert_eq!(app.state.index, 1);
        assert_eq!(app.phase(), Phase::Hidden);
        assert!(app.feedback.is_none());
        assert_eq!(app.selected_option, 0);
    }

    #[test]
    fn test_wrong_option_sets_retry_feedback() {
        let mut app = test_app(FOUR);
        app.reveal();
        let wrong = (answer_idx(&app) + 1) % OPTION_COUNT;
        app.submit_option(wrong);
        assert_eq!(app.phase(), Phase::Choosing);
        assert_eq!(app.feedback, Some(Outcome::Retry));
        assert_eq!(app.selected_option, wrong);
        assert!(app.state.had_error);
    }

    #[test]
    fn test_submit_ignored_while_hidden() {
        let mut app = test_app(FOUR);
        app.submit_option(0);
        assert_eq!(app.phase(), Phase::Hidden);
        assert!(app.feedback.is_none());
    }

    #[test]
    fn test_selection_wraps() {
        let mut app = test_app(FOUR);
        app.select_prev();
        assert_eq!(app.selected_option, OPTION_COUNT - 1);
        app.select_next();
        assert_eq!(app.selected_option, 0);
    }

    #[test]
    fn test_insufficient_distractors_reported_in_status() {
        let mut app = test_app("character,pinyin,examples\n他,tā,\n我,wǒ,\n你,nǐ,\n");
        app.reveal();
        assert_eq!(app.phase(), Phase::Hidden);
        assert!(app.status.as_deref().unwrap().contains("4 distinct pinyin"));
    }

    #[test]
    fn test_toggle_pinyin_keeps_feedback() {
        let mut app = test_app(FOUR);
        app.reveal();
        let wrong = (answer_idx(&app) + 1) % OPTION_COUNT;
        app.submit_option(wrong);
        app.toggle_pinyin();
        assert!(!app.state.show_pinyin);
        assert_eq!(app.feedback, Some(Outcome::Retry));
    }
}
