use crate::errors::DraftError;
use crate::models::{FactDraft, MAX_TEXT_LEN};

/// Local state of the recipe submission form: the three input fields plus the
/// uploading flag that disables every input while an insert is in flight.
#[derive(Debug, Clone, Default)]
pub struct NewFactForm {
    text: String,
    source: String,
    category: String,
    is_uploading: bool,
}

impl NewFactForm {
    pub fn new() -> Self {
        Self::default()
    }

    // Setters mirror typing into the inputs; they are ignored while an
    // upload is in flight, the same as a disabled input.

    pub fn set_text(&mut self, value: impl Into<String>) {
        if !self.is_uploading {
            self.text = value.into();
        }
    }

    pub fn set_source(&mut self, value: impl Into<String>) {
        if !self.is_uploading {
            self.source = value.into();
        }
    }

    pub fn set_category(&mut self, value: impl Into<String>) {
        if !self.is_uploading {
            self.category = value.into();
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn is_uploading(&self) -> bool {
        self.is_uploading
    }

    pub(crate) fn set_uploading(&mut self, uploading: bool) {
        self.is_uploading = uploading;
    }

    /// Live remaining-character counter next to the text input. Goes negative
    /// once the user types past the limit.
    pub fn remaining_chars(&self) -> i64 {
        MAX_TEXT_LEN as i64 - self.text.chars().count() as i64
    }

    /// Runs the submission gate over the current fields.
    pub fn draft(&self) -> Result<FactDraft, DraftError> {
        let draft = FactDraft {
            text: self.text.clone(),
            source: self.source.clone(),
            category: self.category.clone(),
        };
        draft.validate()?;
        Ok(draft)
    }

    /// Clears all three fields. The uploading flag is managed by the shell.
    pub fn reset(&mut self) {
        self.text.clear();
        self.source.clear();
        self.category.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_starts_at_the_limit_and_follows_the_text() {
        let mut form = NewFactForm::new();
        assert_eq!(form.remaining_chars(), 200);
        form.set_text("Tacos");
        assert_eq!(form.remaining_chars(), 195);
        form.set_text("x".repeat(205));
        assert_eq!(form.remaining_chars(), -5);
    }

    #[test]
    fn inputs_are_frozen_while_uploading() {
        let mut form = NewFactForm::new();
        form.set_text("Tacos");
        form.set_uploading(true);
        form.set_text("Pizza");
        form.set_source("https://example.com");
        form.set_category("Pizza");
        assert_eq!(form.text(), "Tacos");
        assert_eq!(form.source(), "");
        assert_eq!(form.category(), "");

        form.set_uploading(false);
        form.set_source("https://example.com");
        assert_eq!(form.source(), "https://example.com");
    }

    #[test]
    fn draft_applies_the_submission_gate() {
        let mut form = NewFactForm::new();
        assert!(form.draft().is_err());

        form.set_text("Tacos");
        form.set_source("https://example.com/tacos");
        form.set_category("Pizza");
        let draft = form.draft().unwrap();
        assert_eq!(draft.text, "Tacos");
        assert_eq!(draft.category, "Pizza");
    }

    #[test]
    fn reset_clears_every_field() {
        let mut form = NewFactForm::new();
        form.set_text("Tacos");
        form.set_source("https://example.com/tacos");
        form.set_category("Pizza");
        form.reset();
        assert_eq!(form.text(), "");
        assert_eq!(form.source(), "");
        assert_eq!(form.category(), "");
        assert_eq!(form.remaining_chars(), 200);
    }
}
