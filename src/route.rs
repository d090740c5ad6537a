//! Route descriptors: one routable path with its match and parameter metadata.

use crate::error::PatternError;
use crate::host::RequestConstraint;
use crate::path::PathPattern;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Parameter map used for route defaults and requirements.
pub type Params = BTreeMap<String, String>;

/// Request match conditions of a route.
///
/// `path_info` and `parsed_path_info` always describe the same path: every
/// constructor that changes one recomputes the other.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Conditions {
    pub path_info: String,
    pub parsed_path_info: Option<PathPattern>,
    pub request_method: Vec<String>,
    /// Defaults that must be present when generating a path for this route.
    pub required_defaults: Option<Vec<String>>,
    pub extra: BTreeMap<String, String>,
}

impl Conditions {
    /// Conditions for a path, without a parsed representation.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path_info: path.into(),
            ..Self::default()
        }
    }

    /// Conditions for a path, carrying its parsed representation.
    pub fn parsed(path: impl Into<String>) -> Result<Self, PatternError> {
        let path_info = path.into();
        let parsed = PathPattern::parse(&path_info)?;
        Ok(Self {
            path_info,
            parsed_path_info: Some(parsed),
            ..Self::default()
        })
    }

    pub fn with_request_method(mut self, method: &str) -> Self {
        self.request_method.push(method.to_ascii_uppercase());
        self
    }

    pub fn with_required_defaults<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_defaults = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_extra(mut self, key: &str, value: &str) -> Self {
        self.extra.insert(key.to_string(), value.to_string());
        self
    }

    /// Copy these conditions for a translated path.
    ///
    /// The parsed path is recomputed only if the source carried one, and the
    /// locale parameter joins `required_defaults` when that list exists.
    pub fn translated(&self, path: &str, locale_param_key: &str) -> Result<Self, PatternError> {
        let mut conditions = self.clone();
        conditions.path_info = path.to_string();
        if self.parsed_path_info.is_some() {
            conditions.parsed_path_info = Some(PathPattern::parse(path)?);
        }

        if let Some(required) = conditions.required_defaults.as_mut() {
            if !required.iter().any(|key| key == locale_param_key) {
                required.push(locale_param_key.to_string());
            }
        }

        Ok(conditions)
    }
}

/// A route ready for registration into a route table.
///
/// `A` is the application the router dispatches to when the route matches.
#[derive(Clone)]
pub struct Route<A> {
    pub app: A,
    /// Request predicates that must all accept before `app` is dispatched to.
    pub constraints: Vec<Arc<dyn RequestConstraint>>,
    pub conditions: Conditions,
    pub requirements: Params,
    pub defaults: Params,
    pub name: Option<String>,
    /// Whether the path must match to the end of the request path.
    pub anchor: bool,
}

impl<A> Route<A> {
    /// An anchored, unnamed route for `path` with a parsed path representation.
    pub fn new(app: A, path: &str) -> Result<Self, PatternError> {
        Ok(Self::with_conditions(app, Conditions::parsed(path)?))
    }

    pub fn with_conditions(app: A, conditions: Conditions) -> Self {
        Self {
            app,
            constraints: Vec::new(),
            conditions,
            requirements: Params::new(),
            defaults: Params::new(),
            name: None,
            anchor: true,
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_method(mut self, method: &str) -> Self {
        self.conditions = self.conditions.with_request_method(method);
        self
    }

    pub fn with_default(mut self, key: &str, value: &str) -> Self {
        self.defaults.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_requirement(mut self, key: &str, value: &str) -> Self {
        self.requirements.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_constraint(mut self, constraint: Arc<dyn RequestConstraint>) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn with_anchor(mut self, anchor: bool) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn path(&self) -> &str {
        &self.conditions.path_info
    }
}

impl<A: fmt::Debug> fmt::Debug for Route<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("app", &self.app)
            .field("constraints", &self.constraints.len())
            .field("conditions", &self.conditions)
            .field("requirements", &self.requirements)
            .field("defaults", &self.defaults)
            .field("name", &self.name)
            .field("anchor", &self.anchor)
            .finish()
    }
}

/// Constraints compare by identity.
impl<A: PartialEq> PartialEq for Route<A> {
    fn eq(&self, other: &Self) -> bool {
        self.app == other.app
            && self.constraints.len() == other.constraints.len()
            && self
                .constraints
                .iter()
                .zip(&other.constraints)
                .all(|(a, b)| Arc::ptr_eq(a, b))
            && self.conditions == other.conditions
            && self.requirements == other.requirements
            && self.defaults == other.defaults
            && self.name == other.name
            && self.anchor == other.anchor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Conditions Tests ====================

    #[test]
    fn test_translated_replaces_path_and_parsed_path() {
        let conditions = Conditions::parsed("/about").unwrap();
        let translated = conditions.translated("/de/ueber-uns", "locale").unwrap();

        assert_eq!(translated.path_info, "/de/ueber-uns");
        assert_eq!(
            translated.parsed_path_info.map(|p| p.to_string()),
            Some("/de/ueber-uns".to_string())
        );
    }

    #[test]
    fn test_translated_without_parsed_path_stays_unparsed() {
        let conditions = Conditions::new("/about");
        let translated = conditions.translated("/de/ueber-uns", "locale").unwrap();
        assert!(translated.parsed_path_info.is_none());
    }

    #[test]
    fn test_translated_adds_locale_to_required_defaults_once() {
        let conditions = Conditions::new("/about").with_required_defaults(["controller"]);
        let once = conditions.translated("/de/ueber-uns", "locale").unwrap();
        let twice = once.translated("/de/ueber-uns", "locale").unwrap();

        assert_eq!(
            twice.required_defaults,
            Some(vec!["controller".to_string(), "locale".to_string()])
        );
    }

    #[test]
    fn test_translated_leaves_absent_required_defaults_absent() {
        let conditions = Conditions::new("/about");
        let translated = conditions.translated("/de/ueber-uns", "locale").unwrap();
        assert!(translated.required_defaults.is_none());
    }

    #[test]
    fn test_translated_keeps_other_conditions() {
        let conditions = Conditions::new("/about")
            .with_request_method("get")
            .with_extra("subdomain", "www");
        let translated = conditions.translated("/de/ueber-uns", "locale").unwrap();
        assert_eq!(translated.request_method, vec!["GET"]);
        assert_eq!(translated.extra.get("subdomain").map(String::as_str), Some("www"));
    }

    #[test]
    fn test_translated_invalid_path() {
        let conditions = Conditions::parsed("/about").unwrap();
        assert!(conditions.translated("/de/(", "locale").is_err());
    }

    // ==================== Route Tests ====================

    #[test]
    fn test_route_builder() {
        let route = Route::new("pages#about", "/about")
            .unwrap()
            .named("about")
            .with_method("GET")
            .with_default("controller", "pages");

        assert_eq!(route.path(), "/about");
        assert_eq!(route.name.as_deref(), Some("about"));
        assert!(route.anchor);
        assert_eq!(route.defaults.get("controller").map(String::as_str), Some("pages"));
        assert!(route.conditions.parsed_path_info.is_some());
    }

    #[test]
    fn test_route_debug_hides_constraints() {
        let route = Route::new("app", "/").unwrap();
        let debug = format!("{:?}", route);
        assert!(debug.contains("constraints: 0"));
    }
}
