//! Argument-list parser
//!
//! Consumes a stream strictly against an ordered list of positional
//! parameter descriptions, then hands the remainder to the configured
//! rest strategy. The match is strict, non-backtracking, and fail-fast:
//! once a parameter is satisfied its token is never reconsidered, and a
//! failure at parameter *k* never attempts parameter *k+1* or any
//! reordering.
//!
//! ## Pipeline
//!
//! ```text
//! tokenizer -> ArgumentStream -> positional match -> [rest | keywords] -> ParsedArguments
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::diagnostics::{ArgumentParseError, ParseErrorKind};
use crate::params::{
    KeywordParameterDescription, KeywordsDescription, ParameterDescription, RestDescription,
    RestStrategy,
};
use crate::presentation::any_type;
use crate::stream::ArgumentStream;
use crate::suggestions::similar_names;
use crate::tokens::Token;

/// Outcome of a parse call
pub type ParseResult = Result<ParsedArguments, ArgumentParseError>;

// =============================================================================
// PARSED OUTPUT
// =============================================================================

/// Value recorded for a keyword parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum KeywordValue {
    /// The keyword is a flag; its presence is the signal
    Flag,
    /// The keyword consumed this value token
    Value(Token),
}

impl KeywordValue {
    pub fn as_token(&self) -> Option<&Token> {
        match self {
            KeywordValue::Value(token) => Some(token),
            KeywordValue::Flag => None,
        }
    }
}

/// Leftover tokens and keyword values consumed by a rest strategy
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RestBundle {
    /// Leftover positional tokens, in encountered order
    pub rest: Vec<Token>,
    /// Keyword name -> recorded value or flag
    pub keyword_values: HashMap<String, KeywordValue>,
}

/// A validated argument bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedArguments {
    /// One token per satisfied positional parameter, in declaration order
    pub immediate_arguments: Vec<Token>,
    /// Present when a rest strategy consumed the remainder
    pub rest: Option<RestBundle>,
}

impl ParsedArguments {
    /// Token matched by the positional parameter at `index`
    pub fn argument(&self, index: usize) -> Option<&Token> {
        self.immediate_arguments.get(index)
    }

    /// Leftover tokens collected by the rest strategy
    pub fn rest_tokens(&self) -> &[Token] {
        self.rest
            .as_ref()
            .map(|bundle| bundle.rest.as_slice())
            .unwrap_or(&[])
    }

    /// Value recorded for a keyword, if any
    pub fn keyword(&self, name: &str) -> Option<&KeywordValue> {
        self.rest
            .as_ref()
            .and_then(|bundle| bundle.keyword_values.get(name))
    }

    /// Whether a flag keyword was supplied
    pub fn is_flag_set(&self, name: &str) -> bool {
        matches!(self.keyword(name), Some(KeywordValue::Flag))
    }
}

// =============================================================================
// PARSER
// =============================================================================

/// Parser for one command's declared argument list
#[derive(Debug, Clone)]
pub struct ArgumentListParser {
    parameters: Vec<ParameterDescription>,
    rest: Option<RestStrategy>,
}

impl ArgumentListParser {
    pub fn new(parameters: Vec<ParameterDescription>) -> Self {
        Self {
            parameters,
            rest: None,
        }
    }

    /// Collect every leftover token verbatim after the positionals
    pub fn with_rest(mut self, rest: RestDescription) -> Self {
        self.rest = Some(RestStrategy::Rest(rest));
        self
    }

    /// Partition the remainder into keyword values and leftover positionals
    pub fn with_keywords(mut self, keywords: KeywordsDescription) -> Self {
        self.rest = Some(RestStrategy::Keywords(keywords));
        self
    }

    /// Match the stream against the declared argument list
    ///
    /// A pure function of its inputs: the same descriptions and the same
    /// fresh token sequence always yield equal outcomes.
    pub fn parse(&self, stream: &mut ArgumentStream) -> ParseResult {
        let mut immediate_arguments = Vec::with_capacity(self.parameters.len());

        for parameter in &self.parameters {
            let Some(token) = stream.peek().cloned() else {
                return Err(ArgumentParseError::new(
                    parameter.clone(),
                    ParseErrorKind::MissingParameter(parameter.name.clone()),
                    stream.snapshot(),
                ));
            };
            if let Err(mismatch) = parameter.acceptor.validate(&token) {
                // the offending token stays unconsumed
                return Err(ArgumentParseError::new(
                    parameter.clone(),
                    ParseErrorKind::ValidationFailure(mismatch),
                    stream.snapshot(),
                ));
            }
            if stream.read().is_ok() {
                immediate_arguments.push(token);
            }
        }

        let rest = match &self.rest {
            None => None,
            Some(RestStrategy::Rest(_)) => Some(parse_rest(stream)),
            Some(RestStrategy::Keywords(keywords)) => Some(parse_keywords(keywords, stream)?),
        };

        trace!(
            immediate = immediate_arguments.len(),
            leftover = stream.remainder().len(),
            "argument list matched"
        );
        Ok(ParsedArguments {
            immediate_arguments,
            rest,
        })
    }
}

/// Single entry point for command dispatch
pub fn parse_arguments(parser: &ArgumentListParser, tokens: Vec<Token>) -> ParseResult {
    let mut stream = ArgumentStream::new(tokens);
    parser.parse(&mut stream)
}

// =============================================================================
// REST STRATEGIES
// =============================================================================

/// Collect every remaining token verbatim, in order
fn parse_rest(stream: &mut ArgumentStream) -> RestBundle {
    let mut bundle = RestBundle::default();
    while let Ok(token) = stream.read() {
        bundle.rest.push(token);
    }
    bundle
}

/// Partition the remainder into keyword values/flags and leftover tokens
///
/// Keyword designators may interleave anywhere among rest tokens; order
/// between keywords and rest tokens is not required to be contiguous.
fn parse_keywords(
    keywords: &KeywordsDescription,
    stream: &mut ArgumentStream,
) -> Result<RestBundle, ArgumentParseError> {
    let mut bundle = RestBundle::default();

    while let Some(next) = stream.peek().cloned() {
        let Some(name) = next.keyword_name().map(str::to_string) else {
            if stream.read().is_ok() {
                bundle.rest.push(next);
            }
            continue;
        };

        // error snapshots point at the designator, before it is consumed
        let snapshot = stream.snapshot();

        let description = match keywords.get(&name) {
            Some(description) => description.clone(),
            None if keywords.allow_other_keys => {
                KeywordParameterDescription::option(name.clone(), any_type())
            }
            None => {
                return Err(ArgumentParseError::new(
                    undeclared_parameter(&name),
                    ParseErrorKind::UnknownKeyword {
                        keyword: name.clone(),
                        suggestions: similar_names(&name, keywords.names()),
                    },
                    snapshot,
                ));
            }
        };

        if stream.read().is_err() {
            break;
        }

        if description.is_flag {
            bundle.keyword_values.insert(name, KeywordValue::Flag);
            continue;
        }

        match stream.peek().cloned() {
            Some(value) if !value.is_keyword() => {
                if let Some(acceptor) = &description.acceptor {
                    if let Err(mismatch) = acceptor.validate(&value) {
                        return Err(ArgumentParseError::new(
                            keyword_as_parameter(&description),
                            ParseErrorKind::ValidationFailure(mismatch),
                            stream.snapshot(),
                        ));
                    }
                }
                if stream.read().is_ok() {
                    bundle.keyword_values.insert(name, KeywordValue::Value(value));
                }
            }
            // end of stream, or the value slot occupied by another keyword
            _ => {
                return Err(ArgumentParseError::new(
                    keyword_as_parameter(&description),
                    ParseErrorKind::MissingKeywordValue(name),
                    snapshot,
                ));
            }
        }
    }

    Ok(bundle)
}

/// Bind a keyword description into the positional shape diagnostics carry
fn keyword_as_parameter(description: &KeywordParameterDescription) -> ParameterDescription {
    let acceptor = description.acceptor.clone().unwrap_or_else(any_type);
    let parameter = ParameterDescription::new(description.name.clone(), acceptor);
    match &description.description {
        Some(text) => parameter.with_description(text.clone()),
        None => parameter,
    }
}

/// Description synthesized for a keyword that was never declared
fn undeclared_parameter(name: &str) -> ParameterDescription {
    ParameterDescription::new(name.to_string(), any_type())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::{string_type, user_type, PresentationType};

    fn text(s: &str) -> Token {
        Token::Text(s.to_string())
    }

    fn keyword(s: &str) -> Token {
        Token::Keyword(s.to_string())
    }

    fn user(s: &str) -> Token {
        Token::UserId(s.to_string())
    }

    #[test]
    fn test_positionals_match_in_order() {
        let parser = ArgumentListParser::new(vec![
            ParameterDescription::new("target", user_type()),
            ParameterDescription::new("reason", string_type()),
        ]);
        let parsed =
            parse_arguments(&parser, vec![user("@a:example.org"), text("spam")]).unwrap();
        assert_eq!(
            parsed.immediate_arguments,
            vec![user("@a:example.org"), text("spam")]
        );
        assert!(parsed.rest.is_none());
    }

    #[test]
    fn test_missing_parameter_binds_failing_description() {
        let parser = ArgumentListParser::new(vec![
            ParameterDescription::new("target", user_type()),
            ParameterDescription::new("reason", string_type()),
        ]);
        let err = parse_arguments(&parser, vec![user("@a:example.org")]).unwrap_err();
        assert_eq!(err.parameter().name, "reason");
        assert_eq!(
            err.kind(),
            &ParseErrorKind::MissingParameter("reason".to_string())
        );
        assert_eq!(err.snapshot().position, 1);
    }

    #[test]
    fn test_validation_failure_leaves_token_unconsumed() {
        let parser = ArgumentListParser::new(vec![ParameterDescription::new(
            "target",
            user_type(),
        )]);
        let err = parse_arguments(&parser, vec![text("not-a-user")]).unwrap_err();
        assert_eq!(err.parameter().name, "target");
        assert_eq!(err.snapshot().position, 0);
        assert_eq!(err.snapshot().remaining, vec![text("not-a-user")]);
    }

    #[test]
    fn test_leftover_without_rest_strategy_is_ignored() {
        let parser =
            ArgumentListParser::new(vec![ParameterDescription::new("reason", string_type())]);
        let parsed = parse_arguments(&parser, vec![text("spam"), text("extra")]).unwrap();
        assert_eq!(parsed.immediate_arguments, vec![text("spam")]);
        assert!(parsed.rest.is_none());
    }

    #[test]
    fn test_plain_rest_collects_everything() {
        let parser = ArgumentListParser::new(vec![ParameterDescription::new(
            "target",
            user_type(),
        )])
        .with_rest(RestDescription::new("reason"));
        let parsed = parse_arguments(
            &parser,
            vec![user("@a:example.org"), text("spam"), keyword("not-special")],
        )
        .unwrap();
        // a plain rest strategy keeps keyword designators verbatim
        assert_eq!(
            parsed.rest_tokens(),
            &[text("spam"), keyword("not-special")]
        );
    }

    #[test]
    fn test_keywords_partition_interleaved_remainder() {
        let keywords = KeywordsDescription::new()
            .with_keyword(KeywordParameterDescription::flag("dry-run"))
            .with_keyword(KeywordParameterDescription::option(
                "room",
                PresentationType::simple("room", |t| matches!(t, Token::RoomReference(_))),
            ));
        let parser = ArgumentListParser::new(vec![]).with_keywords(keywords);

        let parsed = parse_arguments(
            &parser,
            vec![
                keyword("dry-run"),
                text("alice"),
                keyword("room"),
                Token::RoomReference("#x:example.org".to_string()),
                text("reason"),
                text("text"),
            ],
        )
        .unwrap();

        assert_eq!(
            parsed.rest_tokens(),
            &[text("alice"), text("reason"), text("text")]
        );
        assert!(parsed.is_flag_set("dry-run"));
        assert_eq!(
            parsed.keyword("room").and_then(KeywordValue::as_token),
            Some(&Token::RoomReference("#x:example.org".to_string()))
        );
    }

    #[test]
    fn test_missing_keyword_value_at_end_of_stream() {
        let keywords = KeywordsDescription::new()
            .with_keyword(KeywordParameterDescription::option("room", any_type()));
        let parser = ArgumentListParser::new(vec![]).with_keywords(keywords);

        let err = parse_arguments(&parser, vec![keyword("room")]).unwrap_err();
        assert_eq!(err.parameter().name, "room");
        assert_eq!(
            err.kind(),
            &ParseErrorKind::MissingKeywordValue("room".to_string())
        );
    }

    #[test]
    fn test_missing_keyword_value_when_slot_holds_another_keyword() {
        let keywords = KeywordsDescription::new()
            .with_keyword(KeywordParameterDescription::option("room", any_type()))
            .with_keyword(KeywordParameterDescription::flag("dry-run"));
        let parser = ArgumentListParser::new(vec![]).with_keywords(keywords);

        let err =
            parse_arguments(&parser, vec![keyword("room"), keyword("dry-run")]).unwrap_err();
        assert_eq!(err.parameter().name, "room");
        assert_eq!(
            err.kind(),
            &ParseErrorKind::MissingKeywordValue("room".to_string())
        );
        // snapshot points at the designator, with the whole remainder intact
        assert_eq!(err.snapshot().remaining[0], keyword("room"));
    }

    #[test]
    fn test_unknown_keyword_rejected_with_suggestions() {
        let keywords = KeywordsDescription::new()
            .with_keyword(KeywordParameterDescription::flag("dry-run"));
        let parser = ArgumentListParser::new(vec![]).with_keywords(keywords);

        let err = parse_arguments(&parser, vec![keyword("dry-rum")]).unwrap_err();
        match err.kind() {
            ParseErrorKind::UnknownKeyword {
                keyword,
                suggestions,
            } => {
                assert_eq!(keyword, "dry-rum");
                assert_eq!(suggestions, &vec!["dry-run".to_string()]);
            }
            other => panic!("expected UnknownKeyword, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_keyword_tolerated_with_allow_other_keys() {
        let keywords = KeywordsDescription::new().with_other_keys_allowed();
        let parser = ArgumentListParser::new(vec![]).with_keywords(keywords);

        let parsed =
            parse_arguments(&parser, vec![keyword("color"), text("red")]).unwrap();
        assert_eq!(
            parsed.keyword("color").and_then(KeywordValue::as_token),
            Some(&text("red"))
        );
    }

    #[test]
    fn test_keyword_value_validated_against_acceptor() {
        let keywords = KeywordsDescription::new()
            .with_keyword(KeywordParameterDescription::option("target", user_type()));
        let parser = ArgumentListParser::new(vec![]).with_keywords(keywords);

        let err =
            parse_arguments(&parser, vec![keyword("target"), text("not-a-user")]).unwrap_err();
        assert_eq!(err.parameter().name, "target");
        assert!(matches!(
            err.kind(),
            ParseErrorKind::ValidationFailure(_)
        ));
    }

    #[test]
    fn test_later_keyword_occurrence_wins() {
        let keywords = KeywordsDescription::new()
            .with_keyword(KeywordParameterDescription::option("room", any_type()));
        let parser = ArgumentListParser::new(vec![]).with_keywords(keywords);

        let parsed = parse_arguments(
            &parser,
            vec![keyword("room"), text("first"), keyword("room"), text("second")],
        )
        .unwrap();
        assert_eq!(
            parsed.keyword("room").and_then(KeywordValue::as_token),
            Some(&text("second"))
        );
    }
}
