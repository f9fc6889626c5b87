use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, error, trace};

use quiz_core::Clock;
use quiz_core::model::{
    AnswerOutcome, OPTION_SLOTS, QuestionSet, RoundSettings, RoundSummary, SessionId,
};

use super::events::{Cue, Navigator, Notifier, Presenter, QuestionView, RevealOutcome, RoundExit};
use super::progress::RoundProgress;
use super::timer::{Countdown, DelayTimer};

//
// ─── PHASE ─────────────────────────────────────────────────────────────────────
//

/// Lifecycle of the round state machine.
///
/// `Locked` is transient: resolution runs as soon as it is entered, so
/// observers normally see the controller move straight on to `Revealing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Presenting,
    Timing,
    Locked,
    Revealing,
    Completed,
}

//
// ─── CONTROLLER ────────────────────────────────────────────────────────────────
//

/// Drives a question set through present/time/lock/reveal/advance cycles.
///
/// All transitions run on the caller's thread and return immediately; the
/// host feeds elapsed time through `tick` and selections through `select`,
/// draining input before advancing time so a selection received in the same
/// host iteration as a timeout-crossing tick wins.
///
/// Exactly one resolution path fires per question: `select` leaves `Timing`,
/// and every stimulus outside its valid phase is discarded without touching
/// state.
pub struct RoundController {
    questions: QuestionSet,
    settings: RoundSettings,
    clock: Clock,
    presenter: Arc<dyn Presenter>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,

    session_id: SessionId,
    phase: Phase,
    current: usize,
    selected: Option<usize>,
    countdown: Countdown,
    pending: Option<DelayTimer>,
    outcomes: Vec<AnswerOutcome>,
    started_at: Option<DateTime<Utc>>,
    summary: Option<RoundSummary>,
}

impl RoundController {
    #[must_use]
    pub fn new(
        questions: QuestionSet,
        settings: RoundSettings,
        clock: Clock,
        presenter: Arc<dyn Presenter>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            questions,
            settings,
            clock,
            presenter,
            notifier,
            navigator,
            session_id: SessionId::new(),
            phase: Phase::Idle,
            current: 0,
            selected: None,
            countdown: Countdown::new(0.0),
            pending: None,
            outcomes: Vec::new(),
            started_at: None,
            summary: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Summary of the finished session; `None` until `Completed`.
    #[must_use]
    pub fn summary(&self) -> Option<&RoundSummary> {
        self.summary.as_ref()
    }

    /// Seconds left in the current answering window, clamped at zero.
    #[must_use]
    pub fn remaining_time(&self) -> f32 {
        self.countdown.remaining()
    }

    /// Questions this session will present: `min(|set|, max_questions)`.
    #[must_use]
    pub fn limit(&self) -> usize {
        let cap = usize::try_from(self.settings.max_questions()).unwrap_or(usize::MAX);
        self.questions.len().min(cap)
    }

    /// Returns a summary of the current session progress.
    #[must_use]
    pub fn progress(&self) -> RoundProgress {
        let total = self.limit();
        let answered = self.outcomes.len();
        RoundProgress {
            total,
            answered,
            remaining: total.saturating_sub(answered),
            is_complete: self.phase == Phase::Completed,
        }
    }

    /// Begin a new session from the first question.
    ///
    /// Restarting mid-session resets in place: outstanding transition
    /// timers are cancelled first, so nothing stale can fire into the new
    /// session's state.
    pub fn start(&mut self) {
        self.reset();
        self.session_id = SessionId::new();
        self.started_at = Some(self.clock.now());
        debug!(
            session = %self.session_id,
            questions = self.limit(),
            "round session started"
        );
        self.phase = Phase::Presenting;
        self.present_current();
    }

    /// Return to `Idle`, cancelling any scheduled transition.
    pub fn reset(&mut self) {
        if let Some(timer) = self.pending.as_mut() {
            timer.cancel();
        }
        self.pending = None;
        self.phase = Phase::Idle;
        self.current = 0;
        self.selected = None;
        self.countdown = Countdown::new(0.0);
        self.outcomes.clear();
        self.started_at = None;
        self.summary = None;
    }

    /// Feed elapsed time into the machine.
    ///
    /// In `Timing` this drives the countdown and, on expiry, the timeout
    /// resolution; in `Revealing` and `Presenting` it drives the scheduled
    /// reveal/next-question transition. Anywhere else it is a no-op.
    pub fn tick(&mut self, dt: f32) {
        if !dt.is_finite() || dt < 0.0 {
            trace!(session = %self.session_id, dt, "discarding nonsensical tick delta");
            return;
        }

        match self.phase {
            Phase::Timing => {
                let expired = self.countdown.advance(dt);
                self.presenter.countdown(self.countdown.remaining_secs_ceil());
                if expired {
                    trace!(
                        session = %self.session_id,
                        question = self.current,
                        "answer window expired"
                    );
                    self.lock(None);
                }
            }
            Phase::Revealing | Phase::Presenting => {
                let fired = match self.pending.as_mut() {
                    Some(timer) => timer.advance(dt),
                    None => false,
                };
                if fired {
                    self.pending = None;
                    if self.phase == Phase::Revealing {
                        self.advance();
                    } else {
                        self.present_current();
                    }
                }
            }
            Phase::Idle | Phase::Locked | Phase::Completed => {}
        }
    }

    /// Record an answer selection for the current question.
    ///
    /// Only the first selection inside the answering window counts; late or
    /// out-of-range input is discarded.
    pub fn select(&mut self, option: usize) {
        if self.phase != Phase::Timing {
            trace!(
                session = %self.session_id,
                option,
                phase = ?self.phase,
                "selection discarded outside the answering window"
            );
            return;
        }
        if option >= OPTION_SLOTS {
            debug!(
                session = %self.session_id,
                option,
                "selection discarded: no such option slot"
            );
            return;
        }

        self.notifier.cue(Cue::Select);
        self.lock(Some(option));
    }

    fn present_current(&mut self) {
        let Some(question) = self.questions.get(self.current) else {
            return;
        };
        let view = QuestionView {
            index: self.current,
            total: self.limit(),
            prompt: question.prompt().to_string(),
            options: question.options().clone(),
            time_limit_secs: Countdown::new(self.settings.question_time()).remaining_secs_ceil(),
        };

        self.selected = None;
        self.countdown = Countdown::new(self.settings.question_time());
        self.phase = Phase::Timing;
        debug!(
            session = %self.session_id,
            question = self.current,
            "question presented"
        );
        self.presenter.question_presented(&view);
    }

    fn lock(&mut self, selected: Option<usize>) {
        self.selected = selected;
        self.phase = Phase::Locked;
        self.resolve();
    }

    fn resolve(&mut self) {
        let Some(question) = self.questions.get(self.current) else {
            return;
        };
        let outcome = AnswerOutcome::new(self.current, question.correct_index(), self.selected);
        self.outcomes.push(outcome);

        self.phase = Phase::Revealing;
        self.pending = Some(DelayTimer::after(self.settings.reveal_delay()));
        debug!(
            session = %self.session_id,
            question = self.current,
            correct = outcome.is_correct(),
            timed_out = outcome.timed_out(),
            "round resolved"
        );
        self.notifier.cue(Cue::Reveal);
        self.presenter.revealed(&RevealOutcome::from_answer(&outcome));
    }

    fn advance(&mut self) {
        self.current += 1;
        if self.current >= self.limit() {
            self.complete();
        } else {
            self.phase = Phase::Presenting;
            self.pending = Some(DelayTimer::after(self.settings.inter_round_pause()));
        }
    }

    fn complete(&mut self) {
        self.phase = Phase::Completed;
        self.pending = None;

        let completed_at = self.clock.now();
        let started_at = self.started_at.unwrap_or(completed_at);
        match RoundSummary::from_outcomes(self.limit(), &self.outcomes, started_at, completed_at) {
            Ok(summary) => {
                debug!(
                    session = %self.session_id,
                    correct = summary.correct(),
                    timed_out = summary.timed_out(),
                    "round session completed"
                );
                self.presenter.round_completed(&summary);
                self.summary = Some(summary);
            }
            Err(err) => {
                // Unreachable with a well-behaved clock; surfaced rather
                // than panicking so a host clock jump cannot kill the loop.
                error!(session = %self.session_id, %err, "round summary rejected");
            }
        }
        self.notifier.cue(Cue::Finish);
        self.navigator.exit_round(RoundExit::Finished);
    }
}

impl fmt::Debug for RoundController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoundController")
            .field("session_id", &self.session_id)
            .field("phase", &self.phase)
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("selected", &self.selected)
            .field("outcomes_len", &self.outcomes.len())
            .field("started_at", &self.started_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
