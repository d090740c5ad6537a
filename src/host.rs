//! Host based locales and the per-locale request predicates that keep a
//! translated route bound to the host of its locale.
//!
//! Predicates run on every incoming request, concurrently. They are pure
//! functions of the request; the only shared state is the memo table in
//! [`VerificationPredicates`].

use crate::config::TranslatorConfig;
use crate::i18n::Locale;
use regex::Regex;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// The parts of an incoming request a constraint may inspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestHead<'a> {
    /// Host name without port.
    pub host: &'a str,
    pub method: &'a str,
    pub path: &'a str,
}

/// A request-match predicate attached to a route.
pub trait RequestConstraint: Send + Sync {
    fn matches(&self, request: &RequestHead<'_>) -> bool;
}

impl<F> RequestConstraint for F
where
    F: Fn(&RequestHead<'_>) -> bool + Send + Sync,
{
    fn matches(&self, request: &RequestHead<'_>) -> bool {
        self(request)
    }
}

/// Maps a request host to the locale it implies.
pub trait HostLocaleLookup: Send + Sync {
    fn locale_from_host(&self, host: &str) -> Locale;
}

/// Host pattern table built from configuration.
///
/// `*` in a pattern matches any run of characters and each `.` may be
/// absent. Matching is anchored and case-insensitive. The first pattern that
/// matches and maps to an available locale wins; hosts matching nothing map
/// to the default locale.
#[derive(Debug, Clone)]
pub struct HostLocales {
    patterns: Vec<(Regex, Locale)>,
    available: Vec<Locale>,
    default_locale: Locale,
}

impl HostLocales {
    pub fn new(
        patterns: &[(String, Locale)],
        available: &[Locale],
        default_locale: Locale,
    ) -> Result<Self, regex::Error> {
        let patterns = patterns
            .iter()
            .map(|(pattern, locale)| Ok((regex_for(pattern)?, locale.clone())))
            .collect::<Result<Vec<_>, regex::Error>>()?;

        Ok(Self {
            patterns,
            available: available.to_vec(),
            default_locale,
        })
    }

    pub fn from_config(config: &TranslatorConfig) -> Result<Self, regex::Error> {
        Self::new(
            &config.host_locales,
            &config.available_locales,
            config.default_locale.clone(),
        )
    }
}

impl HostLocaleLookup for HostLocales {
    fn locale_from_host(&self, host: &str) -> Locale {
        self.patterns
            .iter()
            .filter(|(regex, _)| regex.is_match(host))
            .map(|(_, locale)| locale)
            .find(|locale| self.available.contains(locale))
            .unwrap_or(&self.default_locale)
            .clone()
    }
}

fn regex_for(pattern: &str) -> Result<Regex, regex::Error> {
    let escaped = regex::escape(pattern)
        .replace(r"\*", ".*?")
        .replace(r"\.", r"\.?");
    Regex::new(&format!("(?i)^{}$", escaped))
}

/// Accepts a request only when its host implies `locale`.
struct LocalePredicate {
    locale: String,
    hosts: Arc<dyn HostLocaleLookup>,
}

impl RequestConstraint for LocalePredicate {
    fn matches(&self, request: &RequestHead<'_>) -> bool {
        self.hosts.locale_from_host(request.host).as_str() == self.locale
    }
}

/// Memo table of host-consistency predicates, one per locale.
///
/// Asking twice for the same locale returns the same `Arc`. Concurrent first
/// requests may race to build a predicate; whichever is stored first wins and
/// both are equivalent.
pub struct VerificationPredicates {
    hosts: Arc<dyn HostLocaleLookup>,
    cache: RwLock<HashMap<String, Arc<dyn RequestConstraint>>>,
}

impl VerificationPredicates {
    pub fn new(hosts: Arc<dyn HostLocaleLookup>) -> Self {
        Self {
            hosts,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// The predicate for `locale`. Native variants share the predicate of
    /// their plain locale.
    pub fn for_locale(&self, locale: &Locale) -> Arc<dyn RequestConstraint> {
        let key = locale.sanitized();

        if let Some(predicate) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
        {
            return Arc::clone(predicate);
        }

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        let predicate = cache.entry(key.to_string()).or_insert_with(|| {
            Arc::new(LocalePredicate {
                locale: key.to_string(),
                hosts: Arc::clone(&self.hosts),
            })
        });
        Arc::clone(predicate)
    }

    /// Number of distinct locales with a cached predicate.
    pub fn len(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
