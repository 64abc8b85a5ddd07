//! Amount game implementation.

use serde::{Deserialize, Serialize};

use crate::core::{Catalog, ConfigError, Deadline, GameRng, GameRngState, Millis, RandomSource};
use crate::rules::{pick_avoiding, Drill, Outcome};

use super::stage::Stage;
use super::wallet::{CoinId, Wallet};

/// How long a "try again" hint stays up after a wrong payment.
pub const HINT_MS: u64 = 1_200;

/// The target the player has to pay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AmountQuestion {
    pub target: u32,
}

/// Rules of the amount game.
#[derive(Clone, Copy, Debug, Default)]
pub struct AmountDrill;

impl AmountDrill {
    /// Compare a paid total with the target.
    #[must_use]
    pub fn classify(target: u32, paid: u32) -> Outcome {
        if paid == target {
            Outcome::Correct
        } else if paid == 0 {
            Outcome::Empty
        } else if paid > target {
            Outcome::TooMuch
        } else {
            Outcome::TooLittle {
                remaining: target - paid,
            }
        }
    }
}

impl Drill for AmountDrill {
    type Level = Stage;
    type Question = AmountQuestion;
    type Answer = Wallet;

    /// Panics if the stage has no amounts; `Catalog` rejects such stages.
    fn generate<R: RandomSource>(
        &self,
        level: &Stage,
        previous: Option<&AmountQuestion>,
        rng: &mut R,
    ) -> AmountQuestion {
        let previous = previous.map(|q| q.target);
        let target = pick_avoiding(&level.amounts, previous.as_ref(), rng)
            .expect("stage has target amounts");
        AmountQuestion { target }
    }

    fn evaluate(&self, question: &AmountQuestion, wallet: &Wallet) -> Outcome {
        Self::classify(question.target, wallet.total())
    }
}

/// Where the session is in its stage progression.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmountPhase {
    /// Moving coins and paying.
    Question,
    /// Paid correctly; waiting for `Next`.
    Solved,
    /// A stage was just cleared; `Next` starts the following one.
    StageCleared { cleared: usize, next: usize },
    /// The last stage was cleared; `Next` starts over from stage 0.
    AllCleared,
}

/// Player input, independent of pointer, touch or keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmountEvent {
    /// Drop a coin on the tray.
    Commit(CoinId),
    /// Drop a coin back in the wallet.
    Release(CoinId),
    /// Check the payment.
    Pay,
    /// Advance after a correct payment or a stage clear.
    Next,
    /// New question at the same position.
    Reset,
    /// Jump to a stage from the sidebar.
    SelectStage(usize),
}

/// What changed in response to an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmountResponse {
    /// Event not applicable in the current phase.
    Ignored,
    /// Tray total after a coin move.
    Total(u32),
    /// Result of paying.
    Paid(Outcome),
    /// A fresh question is up.
    NewQuestion { target: u32 },
    /// Stage quota reached.
    StageCleared { cleared: usize, next: usize },
    /// Every stage cleared.
    AllCleared,
}

/// Position in the stage list plus the repeat guard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Current stage index.
    pub stage: usize,
    /// Question index within the stage (0-based).
    pub question: usize,
    /// Last target asked, excluded from the next draw.
    pub last_amount: Option<u32>,
}

/// Header line data: stage label and question counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StageIndicator<'a> {
    pub name: &'a str,
    pub description: &'a str,
    /// 1-based question number.
    pub number: usize,
    pub quota: usize,
}

/// Saved stage position and random stream of an amount session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountCheckpoint {
    pub progress: Progress,
    pub rng: GameRngState,
}

/// One player's run through the amount game.
#[derive(Clone, Debug)]
pub struct AmountSession<R: RandomSource = GameRng> {
    catalog: Catalog<Stage>,
    rng: R,
    drill: AmountDrill,
    progress: Progress,
    question: AmountQuestion,
    wallet: Wallet,
    phase: AmountPhase,
    hint: Option<(Outcome, Deadline)>,
}

impl AmountSession<GameRng> {
    /// Start at stage 0 with a seeded RNG.
    pub fn new(catalog: Catalog<Stage>, seed: u64) -> Self {
        Self::with_rng(catalog, GameRng::new(seed))
    }

    /// Start at stage 0 with an RNG seeded by the operating system.
    pub fn from_entropy(catalog: Catalog<Stage>) -> Self {
        Self::with_rng(catalog, GameRng::from_entropy())
    }

    /// Capture the stage position and random stream.
    #[must_use]
    pub fn checkpoint(&self) -> AmountCheckpoint {
        AmountCheckpoint {
            progress: self.progress,
            rng: self.rng.state(),
        }
    }

    /// Pick up at a saved position with a fresh question.
    ///
    /// The question is the one `Reset` would have drawn when the
    /// checkpoint was taken.
    pub fn resume(
        catalog: Catalog<Stage>,
        checkpoint: &AmountCheckpoint,
    ) -> Result<Self, ConfigError> {
        let stage = checkpoint.progress.stage;
        if !catalog.contains(stage) {
            return Err(ConfigError::UnknownLevel {
                index: stage,
                len: catalog.len(),
            });
        }
        let mut session = Self::idle(catalog, GameRng::from_state(&checkpoint.rng));
        session.progress = checkpoint.progress;
        session.new_question();
        Ok(session)
    }

    /// A second player on the same catalog, starting at stage 0 with
    /// an independent random stream.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        Self::with_rng(self.catalog.clone(), self.rng.fork())
    }
}

impl<R: RandomSource> AmountSession<R> {
    /// Start at stage 0 with the given random source.
    pub fn with_rng(catalog: Catalog<Stage>, rng: R) -> Self {
        let mut session = Self::idle(catalog, rng);
        session.new_question();
        session
    }

    fn idle(catalog: Catalog<Stage>, rng: R) -> Self {
        Self {
            catalog,
            rng,
            drill: AmountDrill,
            progress: Progress::default(),
            question: AmountQuestion { target: 0 },
            wallet: Wallet::default(),
            phase: AmountPhase::Question,
            hint: None,
        }
    }

    /// Apply one input event.
    pub fn handle(&mut self, event: AmountEvent, now: Millis) -> AmountResponse {
        let in_question = self.phase == AmountPhase::Question;
        match event {
            AmountEvent::Commit(coin) if in_question => {
                AmountResponse::Total(self.wallet.commit(coin))
            }
            AmountEvent::Release(coin) if in_question => {
                AmountResponse::Total(self.wallet.release(coin))
            }
            AmountEvent::Pay if in_question => self.pay(now),
            AmountEvent::Next => self.advance(),
            AmountEvent::Reset
                if matches!(self.phase, AmountPhase::Question | AmountPhase::Solved) =>
            {
                self.new_question()
            }
            AmountEvent::SelectStage(index) => self.select_stage(index),
            _ => AmountResponse::Ignored,
        }
    }

    fn pay(&mut self, now: Millis) -> AmountResponse {
        let outcome = self.drill.evaluate(&self.question, &self.wallet);
        tracing::debug!(amount = self.question.target, paid = self.wallet.total(), ?outcome, "pay");

        if outcome.is_correct() {
            self.phase = AmountPhase::Solved;
            self.hint = None;
        } else {
            self.hint = Some((outcome, Deadline::after(now, HINT_MS)));
        }
        AmountResponse::Paid(outcome)
    }

    fn advance(&mut self) -> AmountResponse {
        match self.phase {
            AmountPhase::Question => AmountResponse::Ignored,
            AmountPhase::StageCleared { .. } | AmountPhase::AllCleared => self.new_question(),
            AmountPhase::Solved => {
                self.progress.question += 1;
                let quota = self.catalog[self.progress.stage].quota;
                if self.progress.question < quota {
                    return self.new_question();
                }

                let cleared = self.progress.stage;
                self.progress.question = 0;
                self.progress.stage += 1;
                self.progress.last_amount = None;

                if self.progress.stage >= self.catalog.len() {
                    self.progress.stage = 0;
                    self.phase = AmountPhase::AllCleared;
                    tracing::info!(stages = self.catalog.len(), "all stages cleared");
                    AmountResponse::AllCleared
                } else {
                    let next = self.progress.stage;
                    self.phase = AmountPhase::StageCleared { cleared, next };
                    tracing::info!(cleared, next, "stage cleared");
                    AmountResponse::StageCleared { cleared, next }
                }
            }
        }
    }

    fn select_stage(&mut self, index: usize) -> AmountResponse {
        if index == self.progress.stage || !self.catalog.contains(index) {
            return AmountResponse::Ignored;
        }
        self.progress = Progress {
            stage: index,
            question: 0,
            last_amount: None,
        };
        self.new_question()
    }

    fn new_question(&mut self) -> AmountResponse {
        let stage = &self.catalog[self.progress.stage];
        let previous = self.progress.last_amount.map(|target| AmountQuestion { target });

        self.question = self.drill.generate(stage, previous.as_ref(), &mut self.rng);
        self.wallet = Wallet::synthesize(stage, self.question.target);
        self.progress.last_amount = Some(self.question.target);
        self.phase = AmountPhase::Question;
        self.hint = None;

        tracing::debug!(
            stage = self.progress.stage,
            question = self.progress.question,
            amount = self.question.target,
            coins = self.wallet.len(),
            "new amount question"
        );
        AmountResponse::NewQuestion {
            target: self.question.target,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> AmountPhase {
        self.phase
    }

    /// Stage/question position.
    #[must_use]
    pub fn progress(&self) -> Progress {
        self.progress
    }

    /// Current question.
    #[must_use]
    pub fn question(&self) -> AmountQuestion {
        self.question
    }

    /// Amount to pay.
    #[must_use]
    pub fn target(&self) -> u32 {
        self.question.target
    }

    /// Coins for the current question.
    #[must_use]
    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    /// Amount currently in the tray.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.wallet.total()
    }

    /// Current stage definition.
    #[must_use]
    pub fn stage(&self) -> &Stage {
        &self.catalog[self.progress.stage]
    }

    /// All stages.
    #[must_use]
    pub fn catalog(&self) -> &Catalog<Stage> {
        &self.catalog
    }

    /// Stage label and question counter for the header.
    #[must_use]
    pub fn indicator(&self) -> StageIndicator<'_> {
        let stage = self.stage();
        StageIndicator {
            name: &stage.name,
            description: &stage.description,
            number: self.progress.question + 1,
            quota: stage.quota,
        }
    }

    /// The wrong-payment hint, while it is still showing.
    #[must_use]
    pub fn hint(&self, now: Millis) -> Option<Outcome> {
        self.hint
            .filter(|(_, deadline)| !deadline.is_due(now))
            .map(|(outcome, _)| outcome)
    }
}
