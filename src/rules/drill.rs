//! Drill trait for game implementations.

use serde::{Deserialize, Serialize};

use crate::core::rng::RandomSource;

/// Classified result of checking the player's input.
///
/// Wrong answers are ordinary outcomes handled with corrective
/// feedback, not errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Input matches the answer.
    Correct,
    /// Paid more than the target.
    TooMuch,
    /// Paid something, but short of the target.
    TooLittle {
        /// Amount still missing.
        remaining: u32,
    },
    /// Nothing paid yet.
    Empty,
    /// Nothing usable entered; state is left untouched.
    Incomplete,
    /// Input present but wrong.
    Incorrect,
}

impl Outcome {
    /// Did the player get it right?
    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, Outcome::Correct)
    }

    /// Should the player be told to try again?
    #[must_use]
    pub fn needs_retry(self) -> bool {
        matches!(
            self,
            Outcome::TooMuch | Outcome::TooLittle { .. } | Outcome::Empty | Outcome::Incorrect
        )
    }
}

/// Question generation and answer validation for one game.
///
/// ## Implementation Notes
///
/// - `generate`: Pure apart from the supplied randomness. Must not
///   return a question equal to `previous` unless the level can only
///   produce one question.
/// - `evaluate`: Pure. Evaluating the same answer against the same
///   question always yields the same `Outcome`.
pub trait Drill {
    /// Immutable level configuration.
    type Level;
    /// One generated problem.
    type Question: PartialEq;
    /// The player's input being checked.
    type Answer: ?Sized;

    /// Produce the next question for a level.
    fn generate<R: RandomSource>(
        &self,
        level: &Self::Level,
        previous: Option<&Self::Question>,
        rng: &mut R,
    ) -> Self::Question;

    /// Classify the player's input against a question.
    fn evaluate(&self, question: &Self::Question, answer: &Self::Answer) -> Outcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_classification() {
        assert!(Outcome::Correct.is_correct());
        assert!(!Outcome::Correct.needs_retry());

        assert!(Outcome::TooMuch.needs_retry());
        assert!(Outcome::TooLittle { remaining: 5 }.needs_retry());
        assert!(Outcome::Empty.needs_retry());
        assert!(Outcome::Incorrect.needs_retry());

        // Incomplete input is silently ignored
        assert!(!Outcome::Incomplete.needs_retry());
        assert!(!Outcome::Incomplete.is_correct());
    }
}
