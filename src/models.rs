use serde::{Deserialize, Serialize};
use url::Url;

use crate::categories;
use crate::errors::DraftError;

/// Upper bound on recipe text, enforced before any insert is attempted.
pub const MAX_TEXT_LEN: usize = 200;

/// A single recipe record as stored in the `facts` table.
///
/// `id` and `created_in` are assigned by the backend and immutable; vote
/// counts start at zero and only ever grow. Wire names are camelCase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fact {
    pub id: i64,
    pub text: String,
    pub source: String,
    pub category: String,
    pub votes_interesting: u64,
    pub votes_mindblowing: u64,
    pub votes_false: u64,
    pub created_in: i32,
}

/// The three-field insert payload. Everything else on a [`Fact`] is
/// backend-assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactDraft {
    pub text: String,
    pub source: String,
    pub category: String,
}

impl FactDraft {
    /// The submission gate: text present and within the limit, source an
    /// http/https URL, category one of the fixed set. Applied identically by
    /// the form and by the HTTP surface.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.text.is_empty() {
            return Err(DraftError::EmptyText);
        }
        let len = self.text.chars().count();
        if len > MAX_TEXT_LEN {
            return Err(DraftError::TextTooLong(len));
        }
        if !is_valid_http_url(&self.source) {
            return Err(DraftError::InvalidSource(self.source.clone()));
        }
        if self.category.is_empty() {
            return Err(DraftError::EmptyCategory);
        }
        if !categories::is_known(&self.category) {
            return Err(DraftError::UnknownCategory(self.category.clone()));
        }
        Ok(())
    }
}

/// URL-shape check on recipe sources: must parse, and must be http or https.
pub fn is_valid_http_url(raw: &str) -> bool {
    match Url::parse(raw) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// Identifies which of the three vote tallies a vote click targets.
/// Serializes to the wire/attribute name of the corresponding field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoteKind {
    #[serde(rename = "votesInteresting")]
    Interesting,
    #[serde(rename = "votesMindblowing")]
    Mindblowing,
    #[serde(rename = "votesFalse")]
    False,
}

impl VoteKind {
    pub const fn field_name(self) -> &'static str {
        match self {
            VoteKind::Interesting => "votesInteresting",
            VoteKind::Mindblowing => "votesMindblowing",
            VoteKind::False => "votesFalse",
        }
    }

    /// Currently displayed tally for this kind on the given fact.
    pub fn count_in(self, fact: &Fact) -> u64 {
        match self {
            VoteKind::Interesting => fact.votes_interesting,
            VoteKind::Mindblowing => fact.votes_mindblowing,
            VoteKind::False => fact.votes_false,
        }
    }

    pub fn set_in(self, fact: &mut Fact, count: u64) {
        match self {
            VoteKind::Interesting => fact.votes_interesting = count,
            VoteKind::Mindblowing => fact.votes_mindblowing = count,
            VoteKind::False => fact.votes_false = count,
        }
    }
}

/// Single-field vote patch applied to a fact, keyed by id in the request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteUpdate {
    pub field: VoteKind,
    pub value: u64,
}
