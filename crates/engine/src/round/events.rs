//! Declarative events and collaborator seams for the round controller.
//!
//! The controller never touches rendering, audio or navigation directly; it
//! emits outcome data through these traits and the host decides what a
//! "render" or a "cue" means.

use quiz_core::model::{AnswerOutcome, OPTION_SLOTS, RoundSummary};

use crate::error::LoadError;

//
// ─── RENDER EVENTS ─────────────────────────────────────────────────────────────
//

/// Everything the presenter needs to render one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    /// Zero-based position within the session.
    pub index: usize,
    /// Questions this session will present in total.
    pub total: usize,
    pub prompt: String,
    pub options: [String; OPTION_SLOTS],
    /// Full answering window, for an initial countdown display.
    pub time_limit_secs: u32,
}

/// Per-slot feedback revealed after a round resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotFeedback {
    Neutral,
    Correct,
    Wrong,
}

/// Outcome event for the reveal phase.
///
/// The correct slot is always marked `Correct`; the player's chosen slot is
/// marked `Wrong` only when it differs from the correct one. No slot ever
/// carries both flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealOutcome {
    correct_index: usize,
    selected: Option<usize>,
    slots: [SlotFeedback; OPTION_SLOTS],
}

impl RevealOutcome {
    /// Derive per-slot feedback from a resolved answer.
    ///
    /// The outcome's indices are controller-validated, always within
    /// `[0, OPTION_SLOTS)`.
    #[must_use]
    pub fn from_answer(outcome: &AnswerOutcome) -> Self {
        let mut slots = [SlotFeedback::Neutral; OPTION_SLOTS];
        slots[outcome.correct_index()] = SlotFeedback::Correct;
        if let Some(chosen) = outcome.selected() {
            if chosen != outcome.correct_index() {
                slots[chosen] = SlotFeedback::Wrong;
            }
        }
        Self {
            correct_index: outcome.correct_index(),
            selected: outcome.selected(),
            slots,
        }
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    /// `None` when the answering window expired without a selection.
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn slots(&self) -> &[SlotFeedback; OPTION_SLOTS] {
        &self.slots
    }
}

//
// ─── COLLABORATORS ─────────────────────────────────────────────────────────────
//

/// Audio-style cues fired at fixed transition points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// An answer selection was accepted.
    Select,
    /// A round outcome was revealed.
    Reveal,
    /// The session completed.
    Finish,
}

/// Reason the round flow hands control back to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundExit {
    /// Every question resolved; the session ran to completion.
    Finished,
    /// No playable content: the load failed or produced an empty set.
    NoContent,
}

/// Receives declarative render events from the controller.
pub trait Presenter: Send + Sync {
    fn question_presented(&self, view: &QuestionView);

    /// Countdown update, the ceiling of the remaining seconds. Emitted on
    /// every tick of the answering window, including the expiring one.
    fn countdown(&self, remaining_secs: u32);

    fn revealed(&self, outcome: &RevealOutcome);

    fn round_completed(&self, summary: &RoundSummary);

    /// Load-time failure; no session will start.
    fn load_failed(&self, reason: &LoadError);
}

/// Plays feedback cues at fixed transition points.
pub trait Notifier: Send + Sync {
    fn cue(&self, cue: Cue);
}

/// Receives the exit signal when the round flow is over.
pub trait Navigator: Send + Sync {
    fn exit_round(&self, exit: RoundExit);
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
