//! Path segment dictionary: the lookup backend used by the path translator.
//!
//! The translator only needs "translate one key for one locale". `Catalog`
//! is the in-memory implementation, loadable from JSON:
//!
//! ```json
//! {
//!   "translations": { "de": { "about": "ueber-uns" } },
//!   "fallbacks": { "de-AT": ["de"] }
//! }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// A per-(locale, key) string lookup.
///
/// Implementations must be pure lookups: the same arguments always yield the
/// same answer for the lifetime of a route definition pass.
pub trait Dictionary: Send + Sync {
    /// Look up `key` for `locale`. `None` means the translation is missing.
    fn lookup(&self, locale: &str, key: &str) -> Option<String>;
}

impl<F> Dictionary for F
where
    F: Fn(&str, &str) -> Option<String> + Send + Sync,
{
    fn lookup(&self, locale: &str, key: &str) -> Option<String> {
        self(locale, key)
    }
}

/// In-memory translation catalog with optional per-locale fallback chains.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// locale -> key -> translated segment
    #[serde(default)]
    translations: BTreeMap<String, BTreeMap<String, String>>,

    /// locale -> locales consulted, in order, when the key is missing
    #[serde(default)]
    fallbacks: BTreeMap<String, Vec<String>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse translation catalog")
    }

    /// Load a catalog from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read translation catalog {}", path.display()))?;
        Self::from_json(&content)
    }

    /// Add (or replace) one translation.
    pub fn insert(&mut self, locale: &str, key: &str, value: &str) -> &mut Self {
        self.translations
            .entry(locale.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Builder form of [`Catalog::insert`].
    pub fn with(mut self, locale: &str, key: &str, value: &str) -> Self {
        self.insert(locale, key, value);
        self
    }

    /// Set the fallback chain for a locale.
    pub fn with_fallbacks<I, S>(mut self, locale: &str, chain: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fallbacks
            .insert(locale.to_string(), chain.into_iter().map(Into::into).collect());
        self
    }

    /// Locales with at least one translation.
    pub fn locales(&self) -> Vec<&str> {
        self.translations.keys().map(String::as_str).collect()
    }

    fn get_non_empty(&self, locale: &str, key: &str) -> Option<String> {
        self.translations
            .get(locale)
            .and_then(|entries| entries.get(key))
            .filter(|value| !value.is_empty())
            .cloned()
    }
}

impl Dictionary for Catalog {
    fn lookup(&self, locale: &str, key: &str) -> Option<String> {
        if let Some(value) = self.get_non_empty(locale, key) {
            return Some(value);
        }

        self.fallbacks
            .get(locale)
            .into_iter()
            .flatten()
            .find_map(|fallback| self.get_non_empty(fallback, key))
    }
}
