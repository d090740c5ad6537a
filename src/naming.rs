//! Locale-qualified route names.

use crate::i18n::Locale;
use std::collections::HashSet;

/// Derives the per-locale name of a translated route.
pub struct NameAllocator;

impl NameAllocator {
    /// Allocate `"{base_name}_{locale}"` with the locale in snake_case.
    ///
    /// # Returns
    /// * `None` if the route is unnamed (absent or empty base name)
    /// * `None` if the candidate is already registered; the route is then
    ///   registered unnamed for this locale instead of failing
    /// * `Some(name)` otherwise
    ///
    /// # Example
    /// ```
    /// use route_translator::{Locale, NameAllocator};
    /// use std::collections::HashSet;
    ///
    /// let name = NameAllocator::allocate(Some("users"), &Locale::new("pt-BR"), &HashSet::new());
    /// assert_eq!(name.as_deref(), Some("users_pt_br"));
    /// ```
    pub fn allocate(
        base_name: Option<&str>,
        locale: &Locale,
        existing_names: &HashSet<String>,
    ) -> Option<String> {
        let base_name = base_name.filter(|name| !name.is_empty())?;
        let candidate = Self::candidate(base_name, locale);

        if existing_names.contains(&candidate) {
            None
        } else {
            Some(candidate)
        }
    }

    /// The name a route would get for `locale`, ignoring collisions.
    pub fn candidate(base_name: &str, locale: &Locale) -> String {
        format!("{}_{}", base_name, locale.underscored())
    }
}
