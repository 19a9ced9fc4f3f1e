//! Presentation-type registry
//!
//! Process-wide mapping from a unique name to its validator. Populated
//! during start-up, before command parsing begins; read-only for the rest
//! of the process lifetime. Registration after start-up is legal, but a
//! name collision is a programming error and should abort initialization.
//!
//! Isolated [`PresentationRegistry`] instances are constructible so tests
//! never have to touch the process-wide one.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

use thiserror::Error;
use tracing::debug;

use crate::presentation::{
    any_type, keyword_type, room_type, string_type, user_type, PresentationType,
};
use crate::suggestions::similar_names;

/// Registry failure
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A type with this name is already registered
    #[error("presentation type '{0}' is already registered")]
    DuplicateTypeName(String),

    /// No type with this name exists
    #[error("unknown presentation type '{name}'")]
    UnknownTypeName {
        name: String,
        suggestions: Vec<String>,
    },
}

impl RegistryError {
    /// Hint for fixing the error
    pub fn hint(&self) -> Option<String> {
        match self {
            RegistryError::UnknownTypeName { suggestions, .. } if !suggestions.is_empty() => {
                Some(format!("did you mean: {}?", suggestions.join(", ")))
            }
            _ => None,
        }
    }
}

/// Name -> validator map with init-once-then-read-only discipline
pub struct PresentationRegistry {
    types: RwLock<HashMap<String, PresentationType>>,
}

impl PresentationRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            types: RwLock::new(HashMap::new()),
        }
    }

    /// Create a registry pre-populated with the builtin types
    pub fn with_builtins() -> Self {
        let mut types = HashMap::new();
        for ty in [
            string_type(),
            keyword_type(),
            user_type(),
            room_type(),
            any_type(),
        ] {
            types.insert(ty.name().to_string(), ty);
        }
        Self {
            types: RwLock::new(types),
        }
    }

    /// Register a new presentation type
    ///
    /// Fails without touching the map if the name is taken.
    pub fn register(&self, ty: PresentationType) -> Result<(), RegistryError> {
        let mut types = self.types.write().unwrap();
        match types.entry(ty.name().to_string()) {
            Entry::Occupied(_) => Err(RegistryError::DuplicateTypeName(ty.name().to_string())),
            Entry::Vacant(slot) => {
                debug!(name = %ty.name(), "registered presentation type");
                slot.insert(ty);
                Ok(())
            }
        }
    }

    /// Look up a presentation type by name
    pub fn find(&self, name: &str) -> Result<PresentationType, RegistryError> {
        let types = self.types.read().unwrap();
        match types.get(name) {
            Some(ty) => Ok(ty.clone()),
            None => Err(RegistryError::UnknownTypeName {
                name: name.to_string(),
                suggestions: similar_names(name, types.keys().map(String::as_str)),
            }),
        }
    }

    /// Check if a type exists
    pub fn contains(&self, name: &str) -> bool {
        self.types.read().unwrap().contains_key(name)
    }

    /// Total registered type count
    pub fn len(&self) -> usize {
        self.types.read().unwrap().len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.types.read().unwrap().is_empty()
    }

    /// All registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.types.read().unwrap().keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for PresentationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// PROCESS-WIDE REGISTRY
// =============================================================================

static REGISTRY: OnceLock<PresentationRegistry> = OnceLock::new();

/// The process-wide registry, initialized with the builtin types on first use
pub fn registry() -> &'static PresentationRegistry {
    REGISTRY.get_or_init(PresentationRegistry::with_builtins)
}

/// Register a type in the process-wide registry (convenience function)
pub fn register_presentation_type(ty: PresentationType) -> Result<(), RegistryError> {
    registry().register(ty)
}

/// Look up a type in the process-wide registry (convenience function)
pub fn find_presentation_type(name: &str) -> Result<PresentationType, RegistryError> {
    registry().find(name)
}
