//! "Pay this amount" game.
//!
//! The player is asked for a target amount and drags coins from a
//! wallet onto a tray until the tray adds up to it:
//! - Each stage has a pool of target amounts and a base wallet
//! - The wallet is topped up so the target is always payable
//! - Paying classifies the tray as correct, too much, too little or empty
//! - Seven correct payments clear a stage; clearing the last stage
//!   starts over from the first

mod game;
mod stage;
mod wallet;

pub use game::{
    AmountCheckpoint, AmountDrill, AmountEvent, AmountPhase, AmountQuestion, AmountResponse,
    AmountSession, Progress, StageIndicator, HINT_MS,
};
pub use stage::{builtin_stages, Stage, QUESTIONS_PER_STAGE};
pub use wallet::{CoinId, Placement, Wallet, WalletGroup, MAX_WALLET_COINS, STACK_THRESHOLD};
