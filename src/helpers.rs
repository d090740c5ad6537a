//! Helper registry: which locale-specific route helpers exist, and which one a
//! generic call such as `users_path` should resolve to.
//!
//! Every named translated route `users_es` provides the helpers
//! `users_es_path` and `users_es_url`. The registry is filled while routes are
//! registered, so resolution is a plain map lookup.

use crate::config::TranslatorConfig;
use crate::i18n::{underscore, Locale, NATIVE_PREFIX};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Helper suffixes generated for every named route.
pub const HELPER_SUFFIXES: [&str; 2] = ["path", "url"];

/// Resolve the helper to call for `{base_name}_{suffix}`.
///
/// Precedence:
/// 1. `explicit_locale`, when host locales are configured and one was given
/// 2. the native variant of `current_locale`, if such a helper exists
/// 3. `current_locale`, if such a helper exists
/// 4. the default locale
///
/// # Example
/// ```
/// use route_translator::{resolve_call_name, Locale, TranslatorConfig};
/// use std::collections::HashSet;
///
/// let config = TranslatorConfig::new("en");
/// let available: HashSet<String> = ["users_es_path".to_string()].into();
///
/// let name = resolve_call_name("path", "users", None, &Locale::new("es"), &available, &config);
/// assert_eq!(name, "users_es_path");
/// ```
pub fn resolve_call_name(
    suffix: &str,
    base_name: &str,
    explicit_locale: Option<&Locale>,
    current_locale: &Locale,
    available: &HashSet<String>,
    config: &TranslatorConfig,
) -> String {
    let current = current_locale.underscored();
    let native = format!("{}{}", NATIVE_PREFIX, current);
    let exists = |locale: &str| available.contains(&format!("{}_{}_{}", base_name, locale, suffix));

    let locale = match explicit_locale {
        Some(locale) if config.host_locales_enabled() => locale.underscored(),
        _ if exists(&native) => native,
        _ if exists(&current) => current,
        _ => underscore(config.default_locale.as_str()),
    };

    format!("{}_{}_{}", base_name, locale, suffix)
}

/// Registry of generated helpers, keyed by helper name.
#[derive(Debug, Clone, Default)]
pub struct HelperRegistry {
    bases: BTreeSet<String>,
    helpers: BTreeMap<String, String>,
}

impl HelperRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `base_name` has localized variants.
    pub fn add_base(&mut self, base_name: &str) {
        if !base_name.is_empty() {
            self.bases.insert(base_name.to_string());
        }
    }

    /// Record the helpers of a registered route.
    pub fn add_route(&mut self, route_name: &str, path: &str) {
        for suffix in HELPER_SUFFIXES {
            self.helpers
                .insert(format!("{}_{}", route_name, suffix), path.to_string());
        }
    }

    /// Whether `base_name` was registered as a localized route.
    pub fn is_localized(&self, base_name: &str) -> bool {
        self.bases.contains(base_name)
    }

    /// Names of all generated helpers.
    pub fn helper_names(&self) -> HashSet<String> {
        self.helpers.keys().cloned().collect()
    }

    /// See [`resolve_call_name`].
    pub fn resolve_call_name(
        &self,
        suffix: &str,
        base_name: &str,
        explicit_locale: Option<&Locale>,
        current_locale: &Locale,
        config: &TranslatorConfig,
    ) -> String {
        resolve_call_name(
            suffix,
            base_name,
            explicit_locale,
            current_locale,
            &self.helper_names(),
            config,
        )
    }

    /// The path pattern behind `{base_name}_path` for the current locale.
    pub fn path_for(
        &self,
        base_name: &str,
        explicit_locale: Option<&Locale>,
        current_locale: &Locale,
        config: &TranslatorConfig,
    ) -> Option<&str> {
        let helper =
            self.resolve_call_name("path", base_name, explicit_locale, current_locale, config);
        self.helpers.get(&helper).map(String::as_str)
    }
}
