mod controller;
mod events;
mod progress;
mod timer;

// Public API of the round subsystem.
pub use controller::{Phase, RoundController};
pub use events::{
    Cue, Navigator, Notifier, Presenter, QuestionView, RevealOutcome, RoundExit, SlotFeedback,
};
pub use progress::RoundProgress;
