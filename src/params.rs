//! Parameter descriptions
//!
//! Static declarations supplied by command definitions: required
//! positionals in order, optional keyword parameters, and an optional
//! rest catch-all. Descriptions are pure data, declared once at start-up
//! and referenced (never mutated) by the parser.

use std::collections::HashMap;

use crate::presentation::PresentationType;

/// A required positional parameter
#[derive(Debug, Clone)]
pub struct ParameterDescription {
    pub name: String,
    pub description: Option<String>,
    /// Validator the supplied token must satisfy
    pub acceptor: PresentationType,
}

impl ParameterDescription {
    pub fn new(name: impl Into<String>, acceptor: PresentationType) -> Self {
        Self {
            name: name.into(),
            description: None,
            acceptor,
        }
    }

    /// Attach a human-readable description, for usage rendering
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A keyword parameter: `--name value`, or a bare `--flag`
#[derive(Debug, Clone)]
pub struct KeywordParameterDescription {
    pub name: String,
    pub description: Option<String>,
    /// Validator for the value token; flags carry none
    pub acceptor: Option<PresentationType>,
    pub is_flag: bool,
}

impl KeywordParameterDescription {
    /// A keyword that consumes exactly one following value token
    pub fn option(name: impl Into<String>, acceptor: PresentationType) -> Self {
        Self {
            name: name.into(),
            description: None,
            acceptor: Some(acceptor),
            is_flag: false,
        }
    }

    /// A keyword whose mere presence is the signal
    pub fn flag(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            acceptor: None,
            is_flag: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// The set of keyword parameters a command accepts
#[derive(Debug, Clone, Default)]
pub struct KeywordsDescription {
    keywords: HashMap<String, KeywordParameterDescription>,
    /// Tolerate keyword designators that were never declared
    pub allow_other_keys: bool,
}

impl KeywordsDescription {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a keyword parameter
    pub fn with_keyword(mut self, keyword: KeywordParameterDescription) -> Self {
        self.keywords.insert(keyword.name.clone(), keyword);
        self
    }

    /// Tolerate undeclared keyword designators
    pub fn with_other_keys_allowed(mut self) -> Self {
        self.allow_other_keys = true;
        self
    }

    pub fn get(&self, name: &str) -> Option<&KeywordParameterDescription> {
        self.keywords.get(name)
    }

    /// Declared keyword names
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.keywords.keys().map(String::as_str)
    }
}

/// Names the catch-all that soaks up leftover tokens, e.g. `reason...`
#[derive(Debug, Clone)]
pub struct RestDescription {
    pub name: String,
    pub description: Option<String>,
}

impl RestDescription {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// How the remainder of the stream is consumed once every positional
/// parameter is satisfied
#[derive(Debug, Clone)]
pub enum RestStrategy {
    /// Collect every remaining token verbatim
    Rest(RestDescription),
    /// Partition the remainder into keyword values and leftover positionals
    Keywords(KeywordsDescription),
}
