use crate::bank::sampler::QuestionOptions;
use crate::bank::{Card, WordBank};
use crate::quiz::Phase;
use crate::quiz::session::SessionState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WrongEntry<'a> {
    pub character: &'a str,
    pub pinyin: Option<&'a str>,
}

/// Read-only snapshot of a session for rendering.
#[derive(Clone, Debug)]
pub struct QuizView<'a> {
    pub total: usize,
    pub index: usize,
    pub correct_count: usize,
    pub phase: Phase,
    pub card: Option<&'a Card>,
    pub options: Option<&'a QuestionOptions>,
    pub show_pinyin: bool,
    pub wrong: Vec<WrongEntry<'a>>,
}

impl<'a> QuizView<'a> {
    pub fn new(bank: &'a WordBank, state: &'a SessionState) -> Self {
        let total = bank.len();
        let phase = state.phase(total);
        // index >= total never reaches the bank
        let card = if phase == Phase::Complete {
            None
        } else {
            bank.get(state.index)
        };
        let options = if state.show_options && card.is_some() {
            state.options()
        } else {
            None
        };
        let wrong = state
            .wrong_chars
            .iter()
            .map(|c| WrongEntry {
                character: c.as_str(),
                pinyin: if state.show_pinyin {
                    bank.pinyin_of(c)
                } else {
                    None
                },
            })
            .collect();

        Self {
            total,
            index: state.index,
            correct_count: state.correct_count,
            phase,
            card,
            options,
            show_pinyin: state.show_pinyin,
            wrong,
        }
    }

    pub fn character(&self) -> Option<&'a str> {
        self.card.map(|c| c.character.as_str())
    }

    /// Example words, shown once the current question is answered.
    pub fn examples_text(&self) -> Option<String> {
        match (self.phase, self.card) {
            (Phase::Answered, Some(card)) => Some(card.examples_text()),
            _ => None,
        }
    }

    pub fn progress(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        self.index as f64 / self.total as f64
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    pub fn summary(&self) -> Option<String> {
        self.is_complete().then(|| {
            format!(
                "你完成了全部题目，共 {} 题，答对了 {} 题",
                self.total, self.correct_count
            )
        })
    }
}
