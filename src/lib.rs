//! cmd-core: command-argument parsing and validation engine
//!
//! Turns a flat ordered sequence of pre-tokenized command input items into
//! a typed, validated argument bundle, or a structured, position-aware
//! error. This crate contains no platform dependencies:
//! - Token model and sequential stream cursor
//! - Presentation types (named single-token validators) with a union combinator
//! - Process-wide extensible presentation-type registry
//! - Fail-fast argument-list parser with plain-rest and keyword rest strategies
//! - Value-typed diagnostics with did-you-mean hints
//!
//! Tokenizing raw text, resolving identifiers to platform entities, and
//! dispatching commands stay with the caller.
//!
//! ```
//! use cmd_core::{
//!     parse_arguments, ArgumentListParser, KeywordParameterDescription,
//!     KeywordsDescription, ParameterDescription, Token,
//! };
//! use cmd_core::presentation::user_type;
//!
//! let parser = ArgumentListParser::new(vec![
//!     ParameterDescription::new("target", user_type()),
//! ])
//! .with_keywords(
//!     KeywordsDescription::new()
//!         .with_keyword(KeywordParameterDescription::flag("dry-run")),
//! );
//!
//! let parsed = parse_arguments(
//!     &parser,
//!     vec![
//!         Token::UserId("@spammer:example.org".to_string()),
//!         Token::Keyword("dry-run".to_string()),
//!     ],
//! )
//! .unwrap();
//! assert!(parsed.is_flag_set("dry-run"));
//! ```

pub mod diagnostics;
pub mod params;
pub mod parser;
pub mod presentation;
pub mod registry;
pub mod stream;
pub mod suggestions;
pub mod tokens;

// Re-export commonly used types
pub use diagnostics::{ArgumentParseError, ParseErrorKind, StreamSnapshot};
pub use params::{
    KeywordParameterDescription, KeywordsDescription, ParameterDescription, RestDescription,
    RestStrategy,
};
pub use parser::{
    parse_arguments, ArgumentListParser, KeywordValue, ParseResult, ParsedArguments, RestBundle,
};
pub use presentation::{simple_type_validator, PresentationType, TypeMismatch};
pub use registry::{
    find_presentation_type, register_presentation_type, registry, PresentationRegistry,
    RegistryError,
};
pub use stream::{ArgumentStream, ExhaustedStream};
pub use tokens::Token;
