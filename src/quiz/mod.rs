pub mod engine;
pub mod session;
pub mod view;

use std::fmt;

use thiserror::Error;

use crate::bank::sampler::{InsufficientDistractors, QuestionOptions};

/// Where the current question stands. Derived from [`session::SessionState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Hidden,
    Choosing,
    Answered,
    Complete,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Hidden => "hidden",
            Phase::Choosing => "choosing",
            Phase::Answered => "answered",
            Phase::Complete => "complete",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Reveal,
    Hide,
    Submit(String),
    Advance,
    Restart,
    TogglePinyin,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Reveal => "reveal",
            Action::Hide => "hide",
            Action::Submit(_) => "submit",
            Action::Advance => "advance",
            Action::Restart => "restart",
            Action::TogglePinyin => "toggle-pinyin",
        }
    }
}

/// What a transition emits for the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    OptionsRevealed(QuestionOptions),
    OptionsHidden,
    Correct { examples: Vec<String>, first_try: bool },
    Retry,
    Advanced { missed: Option<String> },
    Completed { total: usize, correct: usize },
    Restarted,
    PinyinToggled(bool),
}

impl Outcome {
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Outcome::Correct { .. } => Some("✅ 正确！"),
            Outcome::Retry => Some("❌ 错误，请再试一次。"),
            _ => None,
        }
    }

    /// Example words, only available right after a correct answer.
    pub fn examples_text(&self) -> Option<String> {
        match self {
            Outcome::Correct { examples, .. } => Some(examples.join("、")),
            _ => None,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuizError {
    #[error(transparent)]
    InsufficientDistractors(#[from] InsufficientDistractors),
    #[error("cannot {action} while {phase}")]
    InvalidAction { action: &'static str, phase: Phase },
}
