//! Error types raised while translating and registering routes.

use thiserror::Error;

/// Failure to translate a route into one locale.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
    /// A literal path segment has no dictionary entry for the locale.
    #[error("missing translation for segment '{segment}' in locale '{locale}'")]
    MissingTranslation { locale: String, segment: String },

    /// The translated path is not a valid route pattern, typically because a
    /// dictionary value contains `(`, `)`, `:` or `*`.
    #[error("translated path '{path}' for locale '{locale}' is not a valid pattern: {source}")]
    InvalidTranslation {
        locale: String,
        path: String,
        #[source]
        source: PatternError,
    },
}

impl TranslationError {
    /// Whether this error is a missing dictionary entry.
    pub fn is_missing_translation(&self) -> bool {
        matches!(self, TranslationError::MissingTranslation { .. })
    }

    /// Whether the locale can be skipped while the route's other locales
    /// are still registered.
    ///
    /// Both variants come from the dictionary entries of a single locale.
    pub fn is_locale_specific(&self) -> bool {
        matches!(
            self,
            TranslationError::MissingTranslation { .. } | TranslationError::InvalidTranslation { .. }
        )
    }
}

/// A path pattern that does not follow the route pattern grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("unbalanced '(' in pattern '{pattern}'")]
    UnclosedGroup { pattern: String },

    #[error("unexpected ')' at byte {position} in pattern '{pattern}'")]
    UnexpectedGroupEnd { pattern: String, position: usize },

    #[error("empty parameter name at byte {position} in pattern '{pattern}'")]
    EmptyParameter { pattern: String, position: usize },
}

/// A route the axum adapter cannot express.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdapterError {
    #[error("optional segments are not supported by axum paths: '{path}'")]
    OptionalSegment { path: String },

    #[error("parameter '{name}' must fill its whole segment in axum path '{path}'")]
    EmbeddedParameter { path: String, name: String },

    #[error("route path '{path}' is not valid: {source}")]
    Pattern {
        path: String,
        #[source]
        source: PatternError,
    },
}
