//! Route expansion: one declared route in, one translated route per locale out.

use crate::config::TranslatorConfig;
use crate::error::TranslationError;
use crate::helpers::HelperRegistry;
use crate::host::{HostLocaleLookup, HostLocales, VerificationPredicates};
use crate::i18n::{Dictionary, Locale, LocaleResolver};
use crate::metrics::ExpansionMetrics;
use crate::naming::NameAllocator;
use crate::path::PathTranslator;
use crate::route::{Conditions, Route};
use crate::route_set::RouteTable;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Routes produced for one declared route.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpansionResult<A> {
    /// Translated routes, in resolved locale order.
    pub routes: Vec<Route<A>>,
    /// The untranslated route, when configured.
    pub canonical: Option<Route<A>>,
}

impl<A> ExpansionResult<A> {
    /// All routes in registration order: translated routes, then the
    /// canonical route.
    pub fn into_routes(self) -> Vec<Route<A>> {
        let mut routes = self.routes;
        routes.extend(self.canonical);
        routes
    }

    pub fn len(&self) -> usize {
        self.routes.len() + usize::from(self.canonical.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Expands routes into their localized variants.
///
/// Holds the configuration snapshot, the segment dictionary, the memo table
/// of host-consistency predicates and the helper registry filled by
/// [`RouteTranslator::add_localized_route`].
pub struct RouteTranslator {
    config: TranslatorConfig,
    dictionary: Arc<dyn Dictionary>,
    predicates: VerificationPredicates,
    helpers: HelperRegistry,
    metrics: ExpansionMetrics,
}

impl RouteTranslator {
    /// Create a translator; host locales come from `config.host_locales`.
    pub fn new(config: TranslatorConfig, dictionary: Arc<dyn Dictionary>) -> Result<Self> {
        config.validate()?;
        let hosts = HostLocales::from_config(&config).context("Invalid host locale pattern")?;

        Ok(Self {
            config,
            dictionary,
            predicates: VerificationPredicates::new(Arc::new(hosts)),
            helpers: HelperRegistry::new(),
            metrics: ExpansionMetrics::new(),
        })
    }

    /// Replace the host → locale mapping used by verification predicates.
    pub fn with_host_lookup(mut self, hosts: Arc<dyn HostLocaleLookup>) -> Self {
        self.predicates = VerificationPredicates::new(hosts);
        self
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    pub fn helpers(&self) -> &HelperRegistry {
        &self.helpers
    }

    pub fn metrics(&self) -> &ExpansionMetrics {
        &self.metrics
    }

    /// The locale order routes are expanded in.
    pub fn locales(&self) -> Vec<Locale> {
        LocaleResolver::from_config(&self.config)
    }

    /// Expand `route` for every configured locale.
    ///
    /// Nothing is returned on failure: with `disable_fallback` set, the first
    /// missing translation fails the whole route.
    pub fn expand<A: Clone>(
        &self,
        route: &Route<A>,
        existing_names: &HashSet<String>,
    ) -> Result<ExpansionResult<A>, TranslationError> {
        let mut routes = Vec::new();
        self.expand_with(route, existing_names, |translated| routes.push(translated))?;

        Ok(ExpansionResult {
            routes,
            canonical: self.canonical_route(route),
        })
    }

    /// Expand `route`, handing each translated route to `emit` as soon as it
    /// is built.
    ///
    /// Routes emitted before a fatal missing translation stay emitted.
    ///
    /// # Returns
    /// The number of routes emitted.
    pub fn expand_with<A, F>(
        &self,
        route: &Route<A>,
        existing_names: &HashSet<String>,
        emit: F,
    ) -> Result<usize, TranslationError>
    where
        A: Clone,
        F: FnMut(Route<A>),
    {
        self.expand_locales(route, &self.locales(), existing_names, emit)
    }

    /// Expand `route` for an explicit locale sequence.
    pub fn expand_locales<A, F>(
        &self,
        route: &Route<A>,
        locales: &[Locale],
        existing_names: &HashSet<String>,
        mut emit: F,
    ) -> Result<usize, TranslationError>
    where
        A: Clone,
        F: FnMut(Route<A>),
    {
        let translator = PathTranslator::new(&self.config, self.dictionary.as_ref());
        let key = &self.config.locale_param_key;
        let mut allocated: HashSet<String> = HashSet::new();
        let mut emitted = 0;

        for locale in locales {
            let translated = self.translate_route(&translator, route, locale);
            let (translated_path, conditions) = match translated {
                Ok(translated) => translated,
                Err(e) if e.is_locale_specific() && !self.config.disable_fallback => {
                    debug!("Skipping locale {} for {}: {}", locale, route.path(), e);
                    self.metrics.record_locale_skipped();
                    continue;
                }
                Err(e) => return Err(e),
            };

            let mut defaults = route.defaults.clone();
            defaults.insert(key.clone(), locale.sanitized().to_string());

            let mut requirements = route.requirements.clone();
            requirements.insert(key.clone(), locale.to_string());

            let name = NameAllocator::allocate(route.name.as_deref(), locale, existing_names)
                .filter(|name| !allocated.contains(name));
            match (&name, route.name.as_deref()) {
                (Some(name), _) => {
                    allocated.insert(name.clone());
                }
                (None, Some(base)) if !base.is_empty() => {
                    warn!(
                        "Route name {} is already taken, registering {} unnamed",
                        NameAllocator::candidate(base, locale),
                        translated_path
                    );
                    self.metrics.record_name_collision();
                }
                _ => {}
            }

            let mut constraints = route.constraints.clone();
            if self.config.verify_host_path_consistency {
                constraints.push(self.predicates.for_locale(locale));
            }

            debug!(
                "Translated {} -> {} ({})",
                route.path(),
                translated_path,
                name.as_deref().unwrap_or("unnamed")
            );

            emit(Route {
                app: route.app.clone(),
                constraints,
                conditions,
                requirements,
                defaults,
                name,
                anchor: route.anchor,
            });
            self.metrics.record_route_emitted();
            emitted += 1;
        }

        Ok(emitted)
    }

    fn translate_route<A>(
        &self,
        translator: &PathTranslator<'_>,
        route: &Route<A>,
        locale: &Locale,
    ) -> Result<(String, Conditions), TranslationError> {
        let path = translator.translate(route.path(), locale)?;
        let conditions = route
            .conditions
            .translated(&path, &self.config.locale_param_key)
            .map_err(|source| TranslationError::InvalidTranslation {
                locale: locale.to_string(),
                path: path.clone(),
                source,
            })?;
        Ok((path, conditions))
    }

    /// The untranslated route to register after the localized ones, if any.
    ///
    /// `generate_unlocalized_routes` keeps the original name and takes
    /// precedence over `generate_unnamed_unlocalized_routes`.
    pub fn canonical_route<A: Clone>(&self, route: &Route<A>) -> Option<Route<A>> {
        if self.config.generate_unlocalized_routes {
            Some(route.clone())
        } else if self.config.generate_unnamed_unlocalized_routes {
            let mut canonical = route.clone();
            canonical.name = None;
            Some(canonical)
        } else {
            None
        }
    }

    /// Define a localized route on `table`.
    ///
    /// Translated routes are added one by one in locale order, followed by
    /// the canonical route when configured. Helpers of the named translated
    /// routes are recorded in [`RouteTranslator::helpers`].
    ///
    /// # Returns
    /// The number of routes added to `table`.
    pub fn add_localized_route<A, T>(
        &mut self,
        table: &mut T,
        route: Route<A>,
    ) -> Result<usize, TranslationError>
    where
        A: Clone,
        T: RouteTable<A> + ?Sized,
    {
        if let Some(name) = route.name.as_deref() {
            self.helpers.add_base(name);
        }

        let existing = table.named_routes();
        let mut registered = Vec::new();
        let outcome = self.expand_with(&route, &existing, |translated| {
            if let Some(name) = translated.name.as_deref() {
                registered.push((name.to_string(), translated.path().to_string()));
            }
            table.add_route(translated);
        });

        for (name, path) in &registered {
            self.helpers.add_route(name, path);
        }
        let mut added = outcome?;

        if let Some(canonical) = self.canonical_route(&route) {
            table.add_route(canonical);
            self.metrics.record_canonical_route();
            added += 1;
        }

        info!(
            "Localized route {} registered as {} routes",
            route.name.as_deref().unwrap_or(route.path()),
            added
        );
        Ok(added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Catalog;
    use crate::route_set::MemoryRouteTable;

    fn catalog() -> Catalog {
        Catalog::new()
            .with("a", "about", "ueber-uns")
            .with("b", "about", "about-b")
            .with("a", "users", "benutzer")
            .with("b", "users", "users-b")
            .with("d", "users", "users")
    }

    fn config() -> TranslatorConfig {
        TranslatorConfig::new("d").with_available_locales(["d", "a", "b", "d"])
    }

    fn translator(config: TranslatorConfig) -> RouteTranslator {
        RouteTranslator::new(config, Arc::new(catalog())).unwrap()
    }

    fn about() -> Route<&'static str> {
        Route::new("pages#about", "/about").unwrap().named("about")
    }

    // ==================== Expansion Tests ====================

    #[test]
    fn test_missing_locale_is_skipped() {
        let translator = translator(config());
        let result = translator.expand(&about(), &HashSet::new()).unwrap();

        let paths: Vec<_> = result.routes.iter().map(|r| r.path()).collect();
        assert_eq!(paths, vec!["/a/ueber-uns", "/b/about-b"]);
        assert!(result.canonical.is_none());
        assert_eq!(translator.metrics().locales_skipped(), 1);
    }

    #[test]
    fn test_missing_locale_is_fatal_when_fallback_disabled() {
        let translator = translator(config().with_disable_fallback(true));
        let err = translator.expand(&about(), &HashSet::new()).unwrap_err();

        assert_eq!(
            err,
            TranslationError::MissingTranslation {
                locale: "d".to_string(),
                segment: "about".to_string(),
            }
        );
    }

    #[test]
    fn test_incremental_emission_keeps_earlier_locales() {
        let translator = translator(config().with_disable_fallback(true));
        let mut emitted = Vec::new();
        let result = translator.expand_with(&about(), &HashSet::new(), |route| {
            emitted.push(route.path().to_string())
        });

        assert!(result.is_err());
        assert_eq!(emitted, vec!["/a/ueber-uns", "/b/about-b"]);
    }

    #[test]
    fn test_defaults_and_requirements_carry_locale() {
        let config = config().with_native_locales(["native_a"]);
        let translator = translator(config);
        let route = Route::new("users#index", "/users")
            .unwrap()
            .with_default("controller", "users")
            .with_requirement("format", "html");
        let result = translator.expand(&route, &HashSet::new()).unwrap();

        let native = &result.routes[2];
        assert_eq!(native.path(), "/benutzer");
        assert_eq!(native.defaults.get("locale").map(String::as_str), Some("a"));
        assert_eq!(
            native.requirements.get("locale").map(String::as_str),
            Some("native_a")
        );
        assert_eq!(
            native.defaults.get("controller").map(String::as_str),
            Some("users")
        );
        assert_eq!(native.requirements.get("format").map(String::as_str), Some("html"));
    }

    #[test]
    fn test_locale_order_with_native() {
        let translator = translator(config().with_native_locales(["native_a"]));
        let route = Route::new("users#index", "/users").unwrap();
        let result = translator.expand(&route, &HashSet::new()).unwrap();

        let locales: Vec<_> = result
            .routes
            .iter()
            .map(|r| r.requirements["locale"].as_str())
            .collect();
        assert_eq!(locales, vec!["a", "b", "native_a", "d"]);
    }

    #[test]
    fn test_conditions_follow_translated_path() {
        let translator = translator(config());
        let mut route = about();
        route.conditions = route.conditions.with_required_defaults(["controller"]);
        let result = translator.expand(&route, &HashSet::new()).unwrap();

        let first = &result.routes[0];
        assert_eq!(first.conditions.path_info, "/a/ueber-uns");
        assert_eq!(
            first.conditions.parsed_path_info.as_ref().map(|p| p.to_string()),
            Some("/a/ueber-uns".to_string())
        );
        assert_eq!(
            first.conditions.required_defaults,
            Some(vec!["controller".to_string(), "locale".to_string()])
        );
    }

    #[test]
    fn test_custom_locale_param_key() {
        let translator = translator(config().with_locale_param_key("lang"));
        let result = translator.expand(&about(), &HashSet::new()).unwrap();
        assert_eq!(result.routes[0].defaults.get("lang").map(String::as_str), Some("a"));
        assert!(result.routes[0].defaults.get("locale").is_none());
    }

    #[test]
    fn test_anchor_and_app_are_kept() {
        let translator = translator(config());
        let route = about().with_anchor(false);
        let result = translator.expand(&route, &HashSet::new()).unwrap();
        assert!(result.routes.iter().all(|r| !r.anchor && r.app == "pages#about"));
    }

    #[test]
    fn test_unparseable_translation_skips_locale() {
        let catalog = catalog().with("b", "about", "about(b");
        let translator = RouteTranslator::new(config(), Arc::new(catalog)).unwrap();
        let result = translator.expand(&about(), &HashSet::new()).unwrap();

        let paths: Vec<_> = result.routes.iter().map(|r| r.path()).collect();
        assert_eq!(paths, vec!["/a/ueber-uns"]);
        assert_eq!(translator.metrics().locales_skipped(), 2);
    }

    #[test]
    fn test_unparseable_translation_is_fatal_when_fallback_disabled() {
        let catalog = catalog()
            .with("b", "about", "about:")
            .with("d", "about", "about");
        let config = config().with_disable_fallback(true);
        let translator = RouteTranslator::new(config, Arc::new(catalog)).unwrap();
        let err = translator.expand(&about(), &HashSet::new()).unwrap_err();

        match err {
            TranslationError::InvalidTranslation { locale, path, .. } => {
                assert_eq!(locale, "b");
                assert_eq!(path, "/b/about:");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    // ==================== Naming Tests ====================

    #[test]
    fn test_names_are_locale_qualified() {
        let translator = translator(config());
        let result = translator.expand(&about(), &HashSet::new()).unwrap();
        let names: Vec<_> = result.routes.iter().map(|r| r.name.as_deref()).collect();
        assert_eq!(names, vec![Some("about_a"), Some("about_b")]);
    }

    #[test]
    fn test_name_collision_degrades_to_unnamed() {
        let translator = translator(config());
        let existing: HashSet<String> = ["about_a".to_string()].into();
        let result = translator.expand(&about(), &existing).unwrap();

        assert_eq!(result.routes[0].name, None);
        assert_eq!(result.routes[1].name.as_deref(), Some("about_b"));
        assert_eq!(translator.metrics().name_collisions(), 1);
    }

    #[test]
    fn test_same_call_collision_degrades_to_unnamed() {
        let catalog = Catalog::new()
            .with("en-US", "about", "about-us")
            .with("en_US", "about", "about-us2")
            .with("d", "about", "about");
        let config = TranslatorConfig::new("d").with_available_locales(["en-US", "en_US", "d"]);
        let translator = RouteTranslator::new(config, Arc::new(catalog)).unwrap();
        let result = translator.expand(&about(), &HashSet::new()).unwrap();

        let names: Vec<_> = result.routes.iter().map(|r| r.name.as_deref()).collect();
        assert_eq!(names, vec![Some("about_en_us"), None, Some("about_d")]);
    }

    // ==================== Canonical Route Tests ====================

    #[test]
    fn test_unnamed_canonical_route() {
        let translator = translator(config().with_generate_unnamed_unlocalized_routes(true));
        let result = translator.expand(&about(), &HashSet::new()).unwrap();

        let canonical = result.canonical.as_ref().unwrap();
        assert_eq!(canonical.path(), "/about");
        assert_eq!(canonical.name, None);
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_named_canonical_route() {
        let translator = translator(config().with_generate_unlocalized_routes(true));
        let result = translator.expand(&about(), &HashSet::new()).unwrap();
        assert_eq!(result.canonical.unwrap().name.as_deref(), Some("about"));
    }

    #[test]
    fn test_named_canonical_supersedes_unnamed() {
        let translator = translator(
            config()
                .with_generate_unlocalized_routes(true)
                .with_generate_unnamed_unlocalized_routes(true),
        );
        let routes = translator
            .expand(&about(), &HashSet::new())
            .unwrap()
            .into_routes();

        assert_eq!(routes.len(), 3);
        let canonical = routes.last().unwrap();
        assert_eq!(canonical.path(), "/about");
        assert_eq!(canonical.name.as_deref(), Some("about"));
        assert!(canonical.defaults.get("locale").is_none());
    }

    #[test]
    fn test_canonical_route_does_not_share_default_path() {
        let catalog = catalog().with("d", "about", "about");
        let config = config().with_generate_unlocalized_routes(true);
        let mut translator = RouteTranslator::new(config, Arc::new(catalog)).unwrap();
        let mut table = MemoryRouteTable::new();
        translator.add_localized_route(&mut table, about()).unwrap();

        let routes: Vec<_> = table
            .routes()
            .iter()
            .map(|r| (r.path(), r.name.as_deref()))
            .collect();
        assert_eq!(
            routes,
            vec![
                ("/a/ueber-uns", Some("about_a")),
                ("/b/about-b", Some("about_b")),
                ("/d/about", Some("about_d")),
                ("/about", Some("about")),
            ]
        );
    }

    // ==================== Host Verification Tests ====================

    #[test]
    fn test_host_predicates_attached_per_locale() {
        let config = config()
            .with_verify_host_path_consistency(true)
            .with_host_locales([("*.a", "a"), ("*.b", "b")])
            .with_available_locales(["a", "b", "d"]);
        let translator = translator(config);
        let route = Route::new("users#index", "/users").unwrap();
        let result = translator.expand(&route, &HashSet::new()).unwrap();

        let request = crate::host::RequestHead {
            host: "shop.a",
            method: "GET",
            path: "/",
        };
        let accepted: Vec<bool> = result
            .routes
            .iter()
            .map(|r| r.constraints.iter().all(|c| c.matches(&request)))
            .collect();
        assert_eq!(accepted, vec![true, false, false]);
    }

    #[test]
    fn test_no_predicates_without_verification() {
        let translator = translator(config());
        let result = translator.expand(&about(), &HashSet::new()).unwrap();
        assert!(result.routes.iter().all(|r| r.constraints.is_empty()));
    }

    // ==================== Idempotence Tests ====================

    #[test]
    fn test_expansion_is_repeatable() {
        let translator = translator(
            config()
                .with_verify_host_path_consistency(true)
                .with_generate_unlocalized_routes(true),
        );
        let existing: HashSet<String> = ["about_b".to_string()].into();
        let first = translator.expand(&about(), &existing).unwrap();
        let second = translator.expand(&about(), &existing).unwrap();
        assert_eq!(first, second);
    }

    // ==================== Route Table Tests ====================

    #[test]
    fn test_add_localized_route_registers_in_order() {
        let mut translator = translator(config().with_generate_unlocalized_routes(true));
        let mut table = MemoryRouteTable::new();

        let added = translator.add_localized_route(&mut table, about()).unwrap();
        assert_eq!(added, 3);

        let paths: Vec<_> = table.routes().iter().map(|r| r.path()).collect();
        assert_eq!(paths, vec!["/a/ueber-uns", "/b/about-b", "/about"]);
        assert!(translator.helpers().is_localized("about"));
        assert!(translator.helpers().helper_names().contains("about_a_path"));
        assert_eq!(translator.metrics().canonical_routes(), 1);
    }

    #[test]
    fn test_add_localized_route_twice_degrades_names() {
        let mut translator = translator(config());
        let mut table = MemoryRouteTable::new();

        translator.add_localized_route(&mut table, about()).unwrap();
        translator.add_localized_route(&mut table, about()).unwrap();

        let names: Vec<_> = table.routes().iter().map(|r| r.name.clone()).collect();
        assert_eq!(
            names,
            vec![Some("about_a".to_string()), Some("about_b".to_string()), None, None]
        );
    }

    #[test]
    fn test_add_localized_route_failure_keeps_emitted_routes() {
        let mut translator = translator(
            config()
                .with_disable_fallback(true)
                .with_generate_unlocalized_routes(true),
        );
        let mut table = MemoryRouteTable::new();

        let result = translator.add_localized_route(&mut table, about());
        assert!(result.is_err());
        assert_eq!(table.len(), 2);
        assert!(translator.helpers().helper_names().contains("about_b_url"));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let result = RouteTranslator::new(TranslatorConfig::new(""), Arc::new(catalog()));
        assert!(result.is_err());
    }
}
