//! Token model for pre-parsed command input
//!
//! The tokenizer (an external collaborator) turns raw command text into a
//! flat ordered sequence of tokens; this module defines the closed set of
//! token kinds the engine accepts. Tokens are immutable once produced and
//! owned by the stream for the duration of a single parse call.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One atomic unit of pre-parsed command input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Token {
    /// A plain value: a bare word or a quoted string
    Text(String),
    /// A keyword designator such as `--dry-run` (stored without the `--`)
    Keyword(String),
    /// A user identifier, e.g. `@alice:example.org`
    UserId(String),
    /// A room identifier or alias, e.g. `#moderation:example.org`
    RoomReference(String),
}

impl Token {
    /// Check whether this token is a keyword designator
    pub fn is_keyword(&self) -> bool {
        matches!(self, Token::Keyword(_))
    }

    /// The designator name, if this token is a keyword
    pub fn keyword_name(&self) -> Option<&str> {
        match self {
            Token::Keyword(name) => Some(name),
            _ => None,
        }
    }

    /// The content of a plain value token
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Token::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Human-readable name of the token kind
    pub fn kind_name(&self) -> &'static str {
        match self {
            Token::Text(_) => "text",
            Token::Keyword(_) => "keyword",
            Token::UserId(_) => "user id",
            Token::RoomReference(_) => "room reference",
        }
    }
}

impl fmt::Display for Token {
    /// Render the token the way the user typed it
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Text(text) => write!(f, "{}", text),
            Token::Keyword(name) => write!(f, "--{}", name),
            Token::UserId(id) => write!(f, "{}", id),
            Token::RoomReference(room) => write!(f, "{}", room),
        }
    }
}
