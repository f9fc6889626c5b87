use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("question time must be positive and finite")]
    InvalidQuestionTime,

    #[error("max questions must be > 0")]
    InvalidMaxQuestions,

    #[error("reveal delay must be non-negative and finite")]
    InvalidRevealDelay,

    #[error("inter-round pause must be non-negative and finite")]
    InvalidInterRoundPause,
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Configuration for one quiz session.
///
/// All durations are in seconds, matching the `tick(dt)` units the host
/// loop feeds into the controller.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSettings {
    question_time: f32,
    max_questions: u32,
    reveal_delay: f32,
    inter_round_pause: f32,
    random_seed: Option<u64>,
}

impl RoundSettings {
    /// Creates validated settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the question time is not positive, the
    /// question cap is zero, or either pause is negative or non-finite.
    pub fn new(
        question_time: f32,
        max_questions: u32,
        reveal_delay: f32,
        inter_round_pause: f32,
        random_seed: Option<u64>,
    ) -> Result<Self, SettingsError> {
        if !question_time.is_finite() || question_time <= 0.0 {
            return Err(SettingsError::InvalidQuestionTime);
        }
        if max_questions == 0 {
            return Err(SettingsError::InvalidMaxQuestions);
        }
        if !reveal_delay.is_finite() || reveal_delay < 0.0 {
            return Err(SettingsError::InvalidRevealDelay);
        }
        if !inter_round_pause.is_finite() || inter_round_pause < 0.0 {
            return Err(SettingsError::InvalidInterRoundPause);
        }

        Ok(Self {
            question_time,
            max_questions,
            reveal_delay,
            inter_round_pause,
            random_seed,
        })
    }

    /// Fix the shuffle seed, for reproducible question order.
    #[must_use]
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Seconds the player has to answer each question.
    #[must_use]
    pub fn question_time(&self) -> f32 {
        self.question_time
    }

    /// Upper bound on presented questions, never zero.
    #[must_use]
    pub fn max_questions(&self) -> u32 {
        self.max_questions
    }

    /// Seconds the revealed outcome stays on screen before advancing.
    #[must_use]
    pub fn reveal_delay(&self) -> f32 {
        self.reveal_delay
    }

    /// Pause between a reveal and the next question.
    #[must_use]
    pub fn inter_round_pause(&self) -> f32 {
        self.inter_round_pause
    }

    #[must_use]
    pub fn random_seed(&self) -> Option<u64> {
        self.random_seed
    }
}

impl Default for RoundSettings {
    /// Ten seconds per question, half-second reveal pause, one-and-a-half
    /// second pause between rounds, no practical cap, fresh shuffle order
    /// every run.
    fn default() -> Self {
        Self {
            question_time: 10.0,
            max_questions: u32::MAX,
            reveal_delay: 0.5,
            inter_round_pause: 1.5,
            random_seed: None,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
