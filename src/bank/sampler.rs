use std::collections::BTreeSet;

use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;

pub const OPTION_COUNT: usize = 4;
pub const DISTRACTOR_COUNT: usize = OPTION_COUNT - 1;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("word bank needs at least 4 distinct pinyin values, found {} besides the answer", .available)]
pub struct InsufficientDistractors {
    pub available: usize,
}

/// The four pinyin choices offered for one question, in display order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionOptions(Vec<String>);

impl QuestionOptions {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn get(&self, idx: usize) -> Option<&str> {
        self.0.get(idx).map(String::as_str)
    }

    pub fn contains(&self, pinyin: &str) -> bool {
        self.0.iter().any(|p| p == pinyin)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

pub struct DistractorSampler<R: Rng> {
    rng: R,
}

impl<R: Rng> DistractorSampler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draw three distinct distractors from `universe` (excluding `correct`),
    /// add the answer and shuffle. Every call is an independent draw.
    pub fn sample(
        &mut self,
        correct: &str,
        universe: &BTreeSet<String>,
    ) -> Result<QuestionOptions, InsufficientDistractors> {
        let candidates: Vec<&String> = universe.iter().filter(|p| *p != correct).collect();
        if candidates.len() < DISTRACTOR_COUNT {
            return Err(InsufficientDistractors {
                available: candidates.len(),
            });
        }

        let mut options: Vec<String> = candidates
            .choose_multiple(&mut self.rng, DISTRACTOR_COUNT)
            .map(|p| (*p).clone())
            .collect();
        options.push(correct.to_string());
        options.shuffle(&mut self.rng);

        Ok(QuestionOptions(options))
    }
}
