//! Place-value game implementation.

use serde::{Deserialize, Serialize};

use crate::core::{format_tenths, Catalog, Deadline, GameRng, Millis, RandomSource, Ticker};
use crate::rules::{draw_avoiding, Drill, Outcome};

use super::level::{PlaceLevel, PlaceQuestion, TOTAL_QUESTIONS};
use super::pad::DigitPad;

/// Pause after a correct answer before moving on.
pub const CORRECT_PAUSE_MS: u64 = 1_000;

/// Pause after a wrong answer before the columns are cleared.
pub const WRONG_PAUSE_MS: u64 = 1_200;

/// Rules of the place-value game.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlaceValueDrill;

impl Drill for PlaceValueDrill {
    type Level = PlaceLevel;
    type Question = PlaceQuestion;
    type Answer = DigitPad;

    /// Repeats are judged on the digits alone; coins are split after.
    fn generate<R: RandomSource>(
        &self,
        level: &PlaceLevel,
        previous: Option<&PlaceQuestion>,
        rng: &mut R,
    ) -> PlaceQuestion {
        let digits = draw_avoiding(previous.map(|q| &q.digits), || level.draw_digits(rng));
        let coins = level
            .places
            .iter()
            .zip(&digits)
            .map(|(&place, &digit)| level.split.split(place, digit, rng))
            .collect();
        PlaceQuestion {
            places: level.places.clone(),
            digits,
            coins,
        }
    }

    /// Whole-answer check with no partial credit.
    ///
    /// Columns before the first nonzero digit must stay empty (an
    /// explicit `0` there is wrong); every later column must hold its
    /// exact digit.
    fn evaluate(&self, question: &PlaceQuestion, pad: &DigitPad) -> Outcome {
        if !pad.has_any_entry() || pad.len() != question.len() {
            return Outcome::Incomplete;
        }
        let first = question.first_significant();
        let correct = question.digits.iter().enumerate().all(|(i, &digit)| {
            let entry = pad.entry(i);
            if i < first {
                entry.is_none()
            } else {
                entry == Some(digit)
            }
        });
        if correct {
            Outcome::Correct
        } else {
            Outcome::Incorrect
        }
    }
}

/// Screen the session is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacePhase {
    /// Choosing a level.
    LevelSelect,
    /// Answering question `number` (1-based).
    Question { number: usize },
    /// All questions answered.
    Result { elapsed_tenths: u64 },
}

/// Player input, independent of pointer, touch or keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaceEvent {
    SelectLevel(usize),
    /// Begin a game on the selected level.
    Start,
    Digit(u8),
    Delete,
    /// Tap a column.
    Focus(usize),
    Submit,
    /// Play the same level again from the result screen.
    Retry,
    /// Return to level select, abandoning any game in progress.
    Back,
    /// Let a pending feedback pause expire.
    Poll,
}

/// What changed in response to an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaceResponse {
    Ignored,
    LevelSelected(usize),
    NewQuestion { number: usize },
    /// Column entries or the cursor changed.
    PadChanged,
    /// Answer checked; feedback pause started.
    Checked(Outcome),
    /// Wrong-answer pause over, columns emptied.
    Cleared,
    Finished { elapsed_tenths: u64 },
    BackToSelect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Feedback {
    Correct(Deadline),
    Wrong(Deadline),
}

impl Feedback {
    fn deadline(self) -> Deadline {
        match self {
            Feedback::Correct(d) | Feedback::Wrong(d) => d,
        }
    }
}

/// One player's run of `TOTAL_QUESTIONS` place-value questions.
#[derive(Clone, Debug)]
pub struct PlaceValueSession<R: RandomSource = GameRng> {
    catalog: Catalog<PlaceLevel>,
    rng: R,
    drill: PlaceValueDrill,
    selected: Option<usize>,
    phase: PlacePhase,
    question: Option<PlaceQuestion>,
    pad: DigitPad,
    stopwatch: Ticker,
    feedback: Option<Feedback>,
}

impl PlaceValueSession<GameRng> {
    /// Level select screen with a seeded RNG.
    pub fn new(catalog: Catalog<PlaceLevel>, seed: u64) -> Self {
        Self::with_rng(catalog, GameRng::new(seed))
    }

    /// Level select screen with an RNG seeded by the operating system.
    pub fn from_entropy(catalog: Catalog<PlaceLevel>) -> Self {
        Self::with_rng(catalog, GameRng::from_entropy())
    }
}

impl<R: RandomSource> PlaceValueSession<R> {
    /// Level select screen with the given random source.
    pub fn with_rng(catalog: Catalog<PlaceLevel>, rng: R) -> Self {
        Self {
            catalog,
            rng,
            drill: PlaceValueDrill,
            selected: None,
            phase: PlacePhase::LevelSelect,
            question: None,
            pad: DigitPad::default(),
            stopwatch: Ticker::tenths(),
            feedback: None,
        }
    }

    /// Apply one input event.
    pub fn handle(&mut self, event: PlaceEvent, now: Millis) -> PlaceResponse {
        let answering =
            matches!(self.phase, PlacePhase::Question { .. }) && self.feedback.is_none();
        match event {
            PlaceEvent::SelectLevel(index)
                if self.phase == PlacePhase::LevelSelect && self.catalog.contains(index) =>
            {
                self.selected = Some(index);
                PlaceResponse::LevelSelected(index)
            }
            PlaceEvent::Start
                if self.phase == PlacePhase::LevelSelect && self.selected.is_some() =>
            {
                self.start_game(now)
            }
            PlaceEvent::Digit(d) if answering => Self::pad_response(self.pad.enter(d)),
            PlaceEvent::Delete if answering => Self::pad_response(self.pad.delete()),
            PlaceEvent::Focus(column) if answering => Self::pad_response(self.pad.focus(column)),
            PlaceEvent::Submit if answering => self.submit(now),
            PlaceEvent::Retry if matches!(self.phase, PlacePhase::Result { .. }) => {
                self.start_game(now)
            }
            PlaceEvent::Back if self.phase != PlacePhase::LevelSelect => self.back(now),
            PlaceEvent::Poll => self.poll(now),
            _ => PlaceResponse::Ignored,
        }
    }

    fn pad_response(changed: bool) -> PlaceResponse {
        if changed {
            PlaceResponse::PadChanged
        } else {
            PlaceResponse::Ignored
        }
    }

    fn start_game(&mut self, now: Millis) -> PlaceResponse {
        self.stopwatch.reset();
        self.stopwatch.start(now);
        self.feedback = None;
        tracing::debug!(level = ?self.selected, "place-value game started");
        self.next_question(0)
    }

    fn next_question(&mut self, answered: usize) -> PlaceResponse {
        let Some(index) = self.selected else {
            return PlaceResponse::Ignored;
        };
        let level = &self.catalog[index];
        let question = self.drill.generate(level, self.question.as_ref(), &mut self.rng);
        let number = answered + 1;

        tracing::debug!(
            level = index,
            number,
            digits = ?question.digits,
            "new place-value question"
        );
        self.pad = DigitPad::new(question.len());
        self.question = Some(question);
        self.phase = PlacePhase::Question { number };
        PlaceResponse::NewQuestion { number }
    }

    fn submit(&mut self, now: Millis) -> PlaceResponse {
        let Some(question) = &self.question else {
            return PlaceResponse::Ignored;
        };
        let outcome = self.drill.evaluate(question, &self.pad);
        tracing::debug!(answer = %self.pad.preview(), ?outcome, "submit");

        self.feedback = match outcome {
            Outcome::Correct => Some(Feedback::Correct(Deadline::after(now, CORRECT_PAUSE_MS))),
            Outcome::Incorrect => Some(Feedback::Wrong(Deadline::after(now, WRONG_PAUSE_MS))),
            _ => return PlaceResponse::Ignored,
        };
        PlaceResponse::Checked(outcome)
    }

    fn poll(&mut self, now: Millis) -> PlaceResponse {
        let Some(feedback) = self.feedback else {
            return PlaceResponse::Ignored;
        };
        if !feedback.deadline().is_due(now) {
            return PlaceResponse::Ignored;
        }
        self.feedback = None;

        match feedback {
            Feedback::Wrong(_) => {
                self.pad.clear();
                PlaceResponse::Cleared
            }
            Feedback::Correct(deadline) => {
                let PlacePhase::Question { number } = self.phase else {
                    return PlaceResponse::Ignored;
                };
                if number < TOTAL_QUESTIONS {
                    return self.next_question(number);
                }
                self.stopwatch.stop(deadline.due());
                let elapsed_tenths = self.stopwatch.ticks(now);
                self.phase = PlacePhase::Result { elapsed_tenths };
                tracing::info!(
                    level = ?self.selected,
                    elapsed = %format_tenths(elapsed_tenths),
                    "place-value game finished"
                );
                PlaceResponse::Finished { elapsed_tenths }
            }
        }
    }

    fn back(&mut self, now: Millis) -> PlaceResponse {
        self.stopwatch.stop(now);
        self.feedback = None;
        self.phase = PlacePhase::LevelSelect;
        PlaceResponse::BackToSelect
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> PlacePhase {
        self.phase
    }

    /// Selected level index.
    #[must_use]
    pub fn selected_level(&self) -> Option<usize> {
        self.selected
    }

    /// All levels.
    #[must_use]
    pub fn catalog(&self) -> &Catalog<PlaceLevel> {
        &self.catalog
    }

    /// Question on screen, if any.
    #[must_use]
    pub fn question(&self) -> Option<&PlaceQuestion> {
        self.question.as_ref()
    }

    /// Column entries.
    #[must_use]
    pub fn pad(&self) -> &DigitPad {
        &self.pad
    }

    /// Outcome being shown during a feedback pause.
    #[must_use]
    pub fn feedback(&self, now: Millis) -> Option<Outcome> {
        self.feedback.filter(|f| !f.deadline().is_due(now)).map(|f| match f {
            Feedback::Correct(_) => Outcome::Correct,
            Feedback::Wrong(_) => Outcome::Incorrect,
        })
    }

    /// Stopwatch in tenths of a second.
    #[must_use]
    pub fn elapsed_tenths(&self, now: Millis) -> u64 {
        self.stopwatch.ticks(now)
    }

    /// Stopwatch with one decimal, e.g. `12.3`.
    #[must_use]
    pub fn elapsed_display(&self, now: Millis) -> String {
        format_tenths(self.elapsed_tenths(now))
    }
}
