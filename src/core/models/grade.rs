//! Grade model and the vocabulary of non-numeric grade tokens

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest numeric grade that completes a course
pub const PASSING_GRADE: u8 = 55;

/// A validated course grade
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Grade {
    /// Whole-number grade in 1..=100 (a zero grade is recorded as absent)
    Numeric(u8),
    /// Non-numeric token from the grade vocabulary, stored as entered
    Token(String),
}

impl Grade {
    /// Whether this grade completes the course under the given vocabulary
    #[must_use]
    pub fn completes(&self, vocabulary: &GradeVocabulary) -> bool {
        match self {
            Self::Numeric(value) => *value >= PASSING_GRADE,
            Self::Token(label) => vocabulary
                .find(label)
                .is_some_and(|token| token.kind.completes()),
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(value) => write!(f, "{value}"),
            Self::Token(label) => f.write_str(label),
        }
    }
}

/// Meaning of a non-numeric grade token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenKind {
    /// Binary pass
    Pass,
    /// Binary fail
    Fail,
    /// Course was not completed (e.g. did not sit the exam)
    NotCompleted,
    /// Exempt, no credit points awarded
    ExemptWithoutCredit,
    /// Exempt, credit points awarded
    ExemptWithCredit,
}

impl TokenKind {
    /// Whether a grade of this kind completes the course
    #[must_use]
    pub const fn completes(self) -> bool {
        matches!(
            self,
            Self::Pass | Self::ExemptWithoutCredit | Self::ExemptWithCredit
        )
    }
}

/// A non-numeric grade token: the label students pick and what it means
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GradeToken {
    /// Label as displayed and stored (e.g. "עבר")
    pub label: String,
    /// Meaning of the label
    pub kind: TokenKind,
}

impl GradeToken {
    /// Create a grade token
    #[must_use]
    pub fn new(label: impl Into<String>, kind: TokenKind) -> Self {
        Self {
            label: label.into(),
            kind,
        }
    }
}

/// The set of non-numeric grade tokens accepted by the validator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeVocabulary {
    /// Accepted tokens, in display order
    #[serde(default)]
    pub tokens: Vec<GradeToken>,
}

impl GradeVocabulary {
    /// Create a vocabulary from a list of tokens
    #[must_use]
    pub const fn new(tokens: Vec<GradeToken>) -> Self {
        Self { tokens }
    }

    /// Find a token by its exact label
    #[must_use]
    pub fn find(&self, label: &str) -> Option<&GradeToken> {
        self.tokens.iter().find(|token| token.label == label)
    }

    /// Find the first token of a kind
    #[must_use]
    pub fn token_of(&self, kind: TokenKind) -> Option<&GradeToken> {
        self.tokens.iter().find(|token| token.kind == kind)
    }

    /// Labels of all tokens, in display order
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.tokens.iter().map(|token| token.label.as_str()).collect()
    }

    /// Whether the vocabulary has no tokens
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl Default for GradeVocabulary {
    /// The Hebrew tokens used by the degree catalogs
    fn default() -> Self {
        Self::new(vec![
            GradeToken::new("עבר", TokenKind::Pass),
            GradeToken::new("נכשל", TokenKind::Fail),
            GradeToken::new("לא השלים", TokenKind::NotCompleted),
            GradeToken::new("פטור ללא ניקוד", TokenKind::ExemptWithoutCredit),
            GradeToken::new("פטור עם ניקוד", TokenKind::ExemptWithCredit),
        ])
    }
}
