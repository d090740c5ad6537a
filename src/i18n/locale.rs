//! Locale type: an opaque language/region tag with an optional native marker.
//!
//! A locale such as `native_es` asks for region-native strings. The marker is
//! kept on the identifier (so requirements and generated names can tell the
//! variants apart) and stripped whenever the locale is used for a dictionary
//! lookup or exposed to request handlers.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Marker prepended to a locale tag to request its native variant.
pub const NATIVE_PREFIX: &str = "native_";

/// A locale identifier (e.g. "en", "pt-BR", "native_es").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    /// Create a locale from a tag, kept exactly as given.
    pub fn new(tag: impl Into<String>) -> Self {
        Locale(tag.into())
    }

    /// Create the native variant of a locale tag.
    ///
    /// # Example
    /// ```
    /// use route_translator::Locale;
    ///
    /// assert_eq!(Locale::native("es").as_str(), "native_es");
    /// ```
    pub fn native(tag: &str) -> Self {
        Locale(format!("{}{}", NATIVE_PREFIX, tag))
    }

    /// The tag as given, native marker included.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether this is a native variant.
    pub fn is_native(&self) -> bool {
        self.0.starts_with(NATIVE_PREFIX)
    }

    /// The tag with the native marker removed.
    ///
    /// This is the value used for dictionary lookups and for the locale
    /// default handed to request handlers.
    pub fn sanitized(&self) -> &str {
        self.0.strip_prefix(NATIVE_PREFIX).unwrap_or(&self.0)
    }

    /// The snake_case form used when deriving identifiers (route names,
    /// helper names) from this locale.
    pub fn underscored(&self) -> String {
        underscore(&self.0)
    }

    /// The lowercase form used as a path prefix.
    pub fn path_segment(&self) -> String {
        self.0.to_lowercase()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Locale {
    fn from(tag: &str) -> Self {
        Locale::new(tag)
    }
}

impl From<String> for Locale {
    fn from(tag: String) -> Self {
        Locale(tag)
    }
}

impl AsRef<str> for Locale {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

static ACRONYM_BOUNDARY: OnceLock<Regex> = OnceLock::new();
static CAMEL_BOUNDARY: OnceLock<Regex> = OnceLock::new();

/// Convert an identifier to snake_case.
///
/// Word boundaries are inserted between camel-case humps, `-` becomes `_`,
/// `::` becomes `/` and the result is lowercased, so `pt-BR` becomes `pt_br`
/// and `zhHant` becomes `zh_hant`.
pub fn underscore(word: &str) -> String {
    let acronym = ACRONYM_BOUNDARY
        .get_or_init(|| Regex::new(r"([A-Z\d]+)([A-Z][a-z])").unwrap());
    let camel = CAMEL_BOUNDARY.get_or_init(|| Regex::new(r"([a-z\d])([A-Z])").unwrap());

    let word = word.replace("::", "/");
    let word = acronym.replace_all(&word, "${1}_${2}");
    let word = camel.replace_all(&word, "${1}_${2}");
    word.replace('-', "_").to_lowercase()
}
