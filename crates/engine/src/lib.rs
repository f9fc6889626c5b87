#![forbid(unsafe_code)]

pub mod bank;
pub mod error;
pub mod round;

pub use quiz_core::Clock;

pub use bank::QuestionBank;
pub use error::LoadError;
pub use round::{
    Cue, Navigator, Notifier, Phase, Presenter, QuestionView, RevealOutcome, RoundController,
    RoundExit, RoundProgress, SlotFeedback,
};
