use thiserror::Error;

/// Number of answer slots every question presents.
pub const OPTION_SLOTS: usize = 3;

//
// ─── QUESTION TYPES ────────────────────────────────────────────────────────────
//

/// Unvalidated question as it arrives from the wire document.
///
/// `correct_index` stays signed here so negative wire values surface as a
/// bounds error instead of a deserialization failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_index: i64,
}

impl QuestionDraft {
    /// Validate the draft into a presentable question record.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt or an option is blank, the
    /// option count does not match the display slots, or `correct_index`
    /// does not address an option.
    pub fn validate(self) -> Result<QuestionRecord, QuestionError> {
        if self.prompt.trim().is_empty() {
            return Err(QuestionError::BlankPrompt);
        }

        let found = self.options.len();
        if found != OPTION_SLOTS {
            return Err(QuestionError::OptionCountMismatch { found });
        }
        if let Some(slot) = self.options.iter().position(|option| option.trim().is_empty()) {
            return Err(QuestionError::BlankOption { slot });
        }

        let index = self.correct_index;
        let correct_index = usize::try_from(index)
            .ok()
            .filter(|i| *i < OPTION_SLOTS)
            .ok_or(QuestionError::CorrectIndexOutOfBounds { index })?;

        let options: [String; OPTION_SLOTS] = self
            .options
            .try_into()
            .map_err(|_| QuestionError::OptionCountMismatch { found })?;

        Ok(QuestionRecord {
            prompt: self.prompt,
            options,
            correct_index,
        })
    }
}

/// A validated multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRecord {
    prompt: String,
    options: [String; OPTION_SLOTS],
    correct_index: usize,
}

impl QuestionRecord {
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String; OPTION_SLOTS] {
        &self.options
    }

    /// Index of the correct option, always within `[0, OPTION_SLOTS)`.
    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }
}

//
// ─── QUESTION VALIDATION ERRORS ────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be blank")]
    BlankPrompt,

    #[error("expected {OPTION_SLOTS} options, found {found}")]
    OptionCountMismatch { found: usize },

    #[error("option slot {slot} cannot be blank")]
    BlankOption { slot: usize },

    #[error("correct index {index} does not address an option slot")]
    CorrectIndexOutOfBounds { index: i64 },
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(correct_index: i64) -> QuestionDraft {
        QuestionDraft {
            prompt: "Which planet is closest to the sun?".into(),
            options: vec!["Mercury".into(), "Venus".into(), "Mars".into()],
            correct_index,
        }
    }

    #[test]
    fn valid_draft_validates() {
        let record = draft(0).validate().unwrap();
        assert_eq!(record.prompt(), "Which planet is closest to the sun?");
        assert_eq!(record.correct_index(), 0);
        assert_eq!(record.options()[2], "Mars");
    }

    #[test]
    fn blank_prompt_is_rejected() {
        let mut d = draft(0);
        d.prompt = "   ".into();
        assert_eq!(d.validate().unwrap_err(), QuestionError::BlankPrompt);
    }

    #[test]
    fn option_count_must_match_slots() {
        let mut d = draft(0);
        d.options.pop();
        assert_eq!(
            d.validate().unwrap_err(),
            QuestionError::OptionCountMismatch { found: 2 }
        );

        let mut d = draft(0);
        d.options.push("Jupiter".into());
        assert_eq!(
            d.validate().unwrap_err(),
            QuestionError::OptionCountMismatch { found: 4 }
        );
    }

    #[test]
    fn blank_option_is_rejected() {
        let mut d = draft(0);
        d.options[1] = " ".into();
        assert_eq!(
            d.validate().unwrap_err(),
            QuestionError::BlankOption { slot: 1 }
        );
    }

    #[test]
    fn correct_index_is_bounds_checked() {
        assert_eq!(
            draft(3).validate().unwrap_err(),
            QuestionError::CorrectIndexOutOfBounds { index: 3 }
        );
        assert_eq!(
            draft(-1).validate().unwrap_err(),
            QuestionError::CorrectIndexOutOfBounds { index: -1 }
        );
    }
}
