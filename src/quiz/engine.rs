use std::collections::BTreeSet;
use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::bank::sampler::{DistractorSampler, OPTION_COUNT, QuestionOptions};
use crate::bank::{Card, WordBank};
use crate::quiz::session::SessionState;
use crate::quiz::{Action, Outcome, Phase, QuizError};

/// Result of a successful transition: the next state plus what it emitted.
#[derive(Clone, Debug)]
pub struct Step {
    pub state: SessionState,
    pub outcome: Outcome,
}

pub struct QuizEngine<R: Rng = SmallRng> {
    bank: Arc<WordBank>,
    universe: BTreeSet<String>,
    sampler: DistractorSampler<R>,
}

impl QuizEngine<SmallRng> {
    pub fn new(bank: Arc<WordBank>) -> Self {
        Self::with_rng(bank, SmallRng::from_entropy())
    }

    pub fn seeded(bank: Arc<WordBank>, seed: u64) -> Self {
        Self::with_rng(bank, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> QuizEngine<R> {
    pub fn with_rng(bank: Arc<WordBank>, rng: R) -> Self {
        let universe = bank.pinyin_universe();
        if universe.len() < OPTION_COUNT {
            tracing::warn!(
                distinct_pinyin = universe.len(),
                "word bank has too few distinct pinyin values to build options"
            );
        }
        Self {
            bank,
            universe,
            sampler: DistractorSampler::new(rng),
        }
    }

    pub fn bank(&self) -> &WordBank {
        &self.bank
    }

    pub fn total(&self) -> usize {
        self.bank.len()
    }

    pub fn phase(&self, state: &SessionState) -> Phase {
        state.phase(self.total())
    }

    /// Apply one user action. `state` is never modified; on error the caller
    /// keeps its current state as-is.
    pub fn apply(&mut self, state: &SessionState, action: Action) -> Result<Step, QuizError> {
        let total = self.total();
        let phase = state.phase(total);
        let mut next = state.clone();

        tracing::debug!(index = state.index, %phase, action = action.name(), "quiz action");

        let outcome = match (phase, action) {
            (_, Action::TogglePinyin) => {
                next.show_pinyin = !next.show_pinyin;
                Outcome::PinyinToggled(next.show_pinyin)
            }
            (Phase::Hidden, Action::Reveal) => {
                let options = self.options_for(&mut next)?;
                next.show_options = true;
                Outcome::OptionsRevealed(options)
            }
            (Phase::Choosing, Action::Hide) => {
                next.show_options = false;
                Outcome::OptionsHidden
            }
            (Phase::Choosing, Action::Submit(choice)) => {
                let card = self.card_at(next.index, "submit")?;
                if choice == card.pinyin {
                    let first_try = !next.had_error;
                    if first_try {
                        next.correct_count += 1;
                    }
                    next.answered_correctly = true;
                    Outcome::Correct {
                        examples: card.examples.clone(),
                        first_try,
                    }
                } else {
                    next.had_error = true;
                    Outcome::Retry
                }
            }
            (Phase::Answered, Action::Advance) => {
                let card = self.card_at(next.index, "advance")?;
                let missed = if next.had_error && next.record_miss(&card.character) {
                    Some(card.character.clone())
                } else {
                    None
                };
                next.had_error = false;
                next.answered_correctly = false;
                next.show_options = false;
                next.index += 1;

                if next.index >= total {
                    tracing::info!(total, correct = next.correct_count, "quiz complete");
                    Outcome::Completed {
                        total,
                        correct: next.correct_count,
                    }
                } else {
                    Outcome::Advanced { missed }
                }
            }
            (Phase::Complete, Action::Restart) => {
                next.reset();
                tracing::info!("quiz restarted");
                Outcome::Restarted
            }
            (phase, action) => {
                return Err(QuizError::InvalidAction {
                    action: action.name(),
                    phase,
                });
            }
        };

        Ok(Step {
            state: next,
            outcome,
        })
    }

    fn card_at(&self, index: usize, action: &'static str) -> Result<&Card, QuizError> {
        self.bank.get(index).ok_or(QuizError::InvalidAction {
            action,
            phase: Phase::Complete,
        })
    }

    /// Cached options for the current index, sampling them on first use.
    fn options_for(&mut self, state: &mut SessionState) -> Result<QuestionOptions, QuizError> {
        if let Some(cached) = state.options_cache.get(&state.index) {
            return Ok(cached.clone());
        }

        let correct = self.card_at(state.index, "reveal")?.pinyin.clone();
        let options = self
            .sampler
            .sample(&correct, &self.universe)
            .inspect_err(|err| tracing::warn!(index = state.index, %err, "cannot build options"))?;
        state.options_cache.insert(state.index, options.clone());
        Ok(options)
    }
}
