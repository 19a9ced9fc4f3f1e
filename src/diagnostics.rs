//! Parse diagnostics
//!
//! Every parse failure is returned as a value binding the offending
//! parameter description to a snapshot of the stream, so the presentation
//! layer can render a precise user-facing message without re-deriving
//! context. Nothing in this crate panics or unwinds across its boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::params::ParameterDescription;
use crate::presentation::TypeMismatch;
use crate::tokens::Token;

/// Where the stream stood when a parse failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamSnapshot {
    /// Zero-based cursor position
    pub position: usize,
    /// Tokens from the cursor to the end, unconsumed
    pub remaining: Vec<Token>,
}

impl StreamSnapshot {
    /// Render the unconsumed input the way the user typed it
    pub fn remaining_text(&self) -> String {
        self.remaining
            .iter()
            .map(Token::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Kind of argument parse failure
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A positional parameter had no token left to match
    #[error("missing required parameter '{0}'")]
    MissingParameter(String),

    /// A token was present but failed its validator
    #[error(transparent)]
    ValidationFailure(TypeMismatch),

    /// An undeclared keyword designator was encountered
    #[error("unknown keyword '--{keyword}'")]
    UnknownKeyword {
        keyword: String,
        suggestions: Vec<String>,
    },

    /// A value-carrying keyword had no value token to consume
    #[error("keyword '--{0}' expects a value but none was supplied")]
    MissingKeywordValue(String),
}

impl ParseErrorKind {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingParameter(_) => "E101",
            Self::ValidationFailure(_) => "E102",
            Self::UnknownKeyword { .. } => "E103",
            Self::MissingKeywordValue(_) => "E104",
        }
    }

    /// Hint for fixing the error
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::UnknownKeyword { suggestions, .. } if !suggestions.is_empty() => {
                let names: Vec<String> = suggestions
                    .iter()
                    .map(|name| format!("--{}", name))
                    .collect();
                Some(format!("did you mean: {}?", names.join(", ")))
            }
            _ => None,
        }
    }
}

/// A parse failure bound to the parameter that caused it
#[derive(Debug, Error, Clone)]
#[error("{kind}")]
pub struct ArgumentParseError {
    parameter: ParameterDescription,
    kind: ParseErrorKind,
    snapshot: StreamSnapshot,
}

impl ArgumentParseError {
    pub fn new(
        parameter: ParameterDescription,
        kind: ParseErrorKind,
        snapshot: StreamSnapshot,
    ) -> Self {
        Self {
            parameter,
            kind,
            snapshot,
        }
    }

    /// The description of the parameter that failed
    pub fn parameter(&self) -> &ParameterDescription {
        &self.parameter
    }

    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    pub fn snapshot(&self) -> &StreamSnapshot {
        &self.snapshot
    }

    /// Full user-facing diagnostic: message, position, unparsed input, hint
    pub fn render(&self) -> String {
        let mut out = format!("error[{}]: {}", self.kind.code(), self.kind);
        out.push_str(&format!(
            "\n  --> argument position {}",
            self.snapshot.position
        ));
        if !self.snapshot.remaining.is_empty() {
            out.push_str(&format!(
                "\n  | unparsed input: {}",
                self.snapshot.remaining_text()
            ));
        }
        if let Some(hint) = self.kind.hint() {
            out.push_str(&format!("\n  = help: {}", hint));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::string_type;

    fn snapshot(position: usize, remaining: Vec<Token>) -> StreamSnapshot {
        StreamSnapshot {
            position,
            remaining,
        }
    }

    #[test]
    fn test_render_includes_code_position_and_rest() {
        let err = ArgumentParseError::new(
            ParameterDescription::new("target", string_type()),
            ParseErrorKind::MissingParameter("target".to_string()),
            snapshot(2, vec![Token::Keyword("oops".to_string())]),
        );
        let rendered = err.render();
        assert!(rendered.contains("error[E101]"));
        assert!(rendered.contains("missing required parameter 'target'"));
        assert!(rendered.contains("argument position 2"));
        assert!(rendered.contains("--oops"));
    }

    #[test]
    fn test_unknown_keyword_hint() {
        let kind = ParseErrorKind::UnknownKeyword {
            keyword: "dry-rum".to_string(),
            suggestions: vec!["dry-run".to_string()],
        };
        assert_eq!(kind.code(), "E103");
        assert_eq!(kind.hint(), Some("did you mean: --dry-run?".to_string()));
    }

    #[test]
    fn test_validation_failure_is_transparent() {
        let kind = ParseErrorKind::ValidationFailure(TypeMismatch {
            expected: "user".to_string(),
            actual: "spam".to_string(),
        });
        assert_eq!(kind.to_string(), "expected user, got spam");
    }

    #[test]
    fn test_missing_keyword_value_message() {
        let kind = ParseErrorKind::MissingKeywordValue("room".to_string());
        assert_eq!(
            kind.to_string(),
            "keyword '--room' expects a value but none was supplied"
        );
        assert!(kind.hint().is_none());
    }
}
