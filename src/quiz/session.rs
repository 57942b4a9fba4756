use std::collections::HashMap;

use crate::bank::sampler::QuestionOptions;
use crate::quiz::Phase;

/// Everything one quiz session remembers. Lives only in memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    pub index: usize,
    pub correct_count: usize,
    pub had_error: bool,
    pub answered_correctly: bool,
    pub show_options: bool,
    pub show_pinyin: bool,
    pub wrong_chars: Vec<String>,
    pub options_cache: HashMap<usize, QuestionOptions>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(true)
    }
}

impl SessionState {
    pub fn new(show_pinyin: bool) -> Self {
        Self {
            index: 0,
            correct_count: 0,
            had_error: false,
            answered_correctly: false,
            show_options: false,
            show_pinyin,
            wrong_chars: Vec::new(),
            options_cache: HashMap::new(),
        }
    }

    pub fn phase(&self, total: usize) -> Phase {
        if self.index >= total {
            Phase::Complete
        } else if self.answered_correctly {
            Phase::Answered
        } else if self.show_options {
            Phase::Choosing
        } else {
            Phase::Hidden
        }
    }

    pub fn options(&self) -> Option<&QuestionOptions> {
        self.options_cache.get(&self.index)
    }

    /// Record a missed character once, keeping first-miss order.
    pub fn record_miss(&mut self, character: &str) -> bool {
        if self.wrong_chars.iter().any(|c| c == character) {
            return false;
        }
        self.wrong_chars.push(character.to_string());
        true
    }

    /// Back to a fresh session, keeping the pinyin display preference.
    pub fn reset(&mut self) {
        *self = Self::new(self.show_pinyin);
    }
}
