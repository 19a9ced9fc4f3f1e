//! Presentation types: named single-token validators
//!
//! A presentation type classifies exactly one token; it never consumes or
//! inspects more than the token it is given. Types are either a named
//! predicate or a union of branches, so a union rejection can always name
//! every attempted branch instead of just the last failure.

use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::tokens::Token;

/// Predicate over a single token
pub type TokenPredicate = Arc<dyn Fn(&Token) -> bool + Send + Sync>;

/// Rejection produced when a token fails its presentation type
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("expected {expected}, got {actual}")]
pub struct TypeMismatch {
    /// The type name, or the `one of ...` list for unions
    pub expected: String,
    /// The offending token, rendered the way the user typed it
    pub actual: String,
}

/// A named classification of a single token
#[derive(Clone)]
pub struct PresentationType {
    name: String,
    kind: ValidatorKind,
}

#[derive(Clone)]
enum ValidatorKind {
    Simple(TokenPredicate),
    Union(Vec<PresentationType>),
}

impl PresentationType {
    /// Wrap a boolean predicate into a named validator
    pub fn simple(
        name: impl Into<String>,
        predicate: impl Fn(&Token) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            kind: ValidatorKind::Simple(Arc::new(predicate)),
        }
    }

    /// Build a validator that succeeds if any branch succeeds
    ///
    /// On total failure the rejection names every attempted branch.
    pub fn union(branches: impl IntoIterator<Item = PresentationType>) -> Self {
        let branches: Vec<PresentationType> = branches.into_iter().collect();
        let name = branches
            .iter()
            .map(PresentationType::name)
            .collect::<Vec<_>>()
            .join("|");
        Self {
            name,
            kind: ValidatorKind::Union(branches),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the validator against one token
    pub fn validate(&self, token: &Token) -> Result<(), TypeMismatch> {
        if self.accepts(token) {
            Ok(())
        } else {
            Err(TypeMismatch {
                expected: self.expected(),
                actual: token.to_string(),
            })
        }
    }

    fn accepts(&self, token: &Token) -> bool {
        match &self.kind {
            ValidatorKind::Simple(predicate) => predicate(token),
            ValidatorKind::Union(branches) => branches.iter().any(|branch| branch.accepts(token)),
        }
    }

    /// What this type expects, for rejection messages
    fn expected(&self) -> String {
        match &self.kind {
            ValidatorKind::Simple(_) => self.name.clone(),
            ValidatorKind::Union(branches) => format!(
                "one of {}",
                branches
                    .iter()
                    .map(PresentationType::name)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }
}

impl fmt::Debug for PresentationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ValidatorKind::Simple(_) => f
                .debug_struct("PresentationType")
                .field("name", &self.name)
                .finish(),
            ValidatorKind::Union(branches) => f
                .debug_struct("PresentationType")
                .field("name", &self.name)
                .field("branches", &branches.len())
                .finish(),
        }
    }
}

/// Wrap a boolean predicate into a named validator (convenience function)
pub fn simple_type_validator(
    name: impl Into<String>,
    predicate: impl Fn(&Token) -> bool + Send + Sync + 'static,
) -> PresentationType {
    PresentationType::simple(name, predicate)
}

// =============================================================================
// BUILTIN TYPES
// =============================================================================

/// `string`: accepts any plain text token
pub fn string_type() -> PresentationType {
    PresentationType::simple("string", |token| matches!(token, Token::Text(_)))
}

/// `keyword`: accepts a keyword designator token
pub fn keyword_type() -> PresentationType {
    PresentationType::simple("keyword", |token| matches!(token, Token::Keyword(_)))
}

/// `user`: accepts a user identifier token
pub fn user_type() -> PresentationType {
    PresentationType::simple("user", |token| matches!(token, Token::UserId(_)))
}

/// `room`: accepts a room identifier or alias token
pub fn room_type() -> PresentationType {
    PresentationType::simple("room", |token| matches!(token, Token::RoomReference(_)))
}

/// `any`: accepts every token kind
pub fn any_type() -> PresentationType {
    PresentationType::simple("any", |_| true)
}
