//! Expand one declared route into a family of locale-specific routes.
//!
//! Given a route (path pattern, name, conditions, defaults, requirements) and
//! the configured locales, [`RouteTranslator`] produces one translated route
//! per locale: the path with each static segment looked up in a
//! [`Dictionary`], a locale-qualified name, locale-tagged defaults and
//! requirements, and optionally a predicate tying the route to the host of
//! its locale.
//!
//! ```rust
//! use route_translator::{Catalog, MemoryRouteTable, Route, RouteTranslator, TranslatorConfig};
//! use std::sync::Arc;
//!
//! let config = TranslatorConfig::new("en").with_available_locales(["en", "de"]);
//! let catalog = Catalog::new()
//!     .with("en", "about", "about")
//!     .with("de", "about", "ueber-uns");
//! let mut translator = RouteTranslator::new(config, Arc::new(catalog)).unwrap();
//!
//! let mut table = MemoryRouteTable::new();
//! let route = Route::new("pages#about", "/about").unwrap().named("about");
//! translator.add_localized_route(&mut table, route).unwrap();
//!
//! let paths: Vec<_> = table.routes().iter().map(|r| r.path()).collect();
//! assert_eq!(paths, vec!["/de/ueber-uns", "/about"]);
//! assert!(table.get("about_de").is_some());
//! ```

pub mod config;
pub mod error;
pub mod expander;
pub mod helpers;
pub mod host;
pub mod i18n;
pub mod metrics;
pub mod naming;
pub mod path;
pub mod route;
pub mod route_set;
pub mod router;

pub use config::TranslatorConfig;
pub use error::{AdapterError, PatternError, TranslationError};
pub use expander::{ExpansionResult, RouteTranslator};
pub use helpers::{resolve_call_name, HelperRegistry};
pub use host::{HostLocaleLookup, HostLocales, RequestConstraint, RequestHead, VerificationPredicates};
pub use i18n::{Catalog, Dictionary, Locale, LocaleResolver};
pub use metrics::{ExpansionMetrics, MetricsReport};
pub use naming::NameAllocator;
pub use route::{Conditions, Params, Route};
pub use route_set::{MemoryRouteTable, RouteTable};
pub use router::{AxumRouteTable, RouteParams};
