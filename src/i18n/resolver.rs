//! Locale resolver: the ordered list of locales a route is expanded into.

use crate::config::TranslatorConfig;
use crate::i18n::Locale;
use std::collections::HashSet;

/// Computes the deterministic locale order used for route expansion.
pub struct LocaleResolver;

impl LocaleResolver {
    /// Resolve the expansion order.
    ///
    /// The result is the union of `active` and `native` (first occurrence
    /// wins, duplicates dropped) with `default` moved to the end. The default
    /// locale is translated last because its path is the one most likely to
    /// omit the locale prefix; registered first it would catch every path like
    /// a wildcard and shadow the prefixed routes.
    ///
    /// # Arguments
    /// * `active` - Configured active locales, in configuration order
    /// * `native` - Native-variant locales to expand in addition
    /// * `default` - The default locale, always present in the result
    ///
    /// # Example
    /// ```
    /// use route_translator::{Locale, LocaleResolver};
    ///
    /// let order = LocaleResolver::resolve(
    ///     &[Locale::new("en"), Locale::new("de"), Locale::new("fr")],
    ///     &[],
    ///     &Locale::new("en"),
    /// );
    /// assert_eq!(order, vec![Locale::new("de"), Locale::new("fr"), Locale::new("en")]);
    /// ```
    pub fn resolve(active: &[Locale], native: &[Locale], default: &Locale) -> Vec<Locale> {
        let mut seen: HashSet<&Locale> = HashSet::new();
        let mut order: Vec<Locale> = active
            .iter()
            .chain(native.iter())
            .filter(|locale| *locale != default && seen.insert(*locale))
            .cloned()
            .collect();

        order.push(default.clone());
        order
    }

    /// Resolve the expansion order for a configuration snapshot.
    pub fn from_config(config: &TranslatorConfig) -> Vec<Locale> {
        Self::resolve(
            &config.available_locales,
            &config.native_locales,
            &config.default_locale,
        )
    }
}
