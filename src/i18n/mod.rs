//! Internationalization (i18n) module: locales and the segment dictionary.
//!
//! # Architecture
//!
//! - `locale`: The `Locale` identifier and its native-variant marker
//! - `resolver`: Ordered list of locales a route is expanded into
//! - `catalog`: The `Dictionary` lookup seam and its in-memory `Catalog`
//!
//! # Example
//!
//! ```rust
//! use route_translator::{Catalog, Dictionary, Locale, LocaleResolver};
//!
//! let order = LocaleResolver::resolve(
//!     &[Locale::new("en"), Locale::new("es")],
//!     &[Locale::native("es")],
//!     &Locale::new("en"),
//! );
//! assert_eq!(order.last(), Some(&Locale::new("en")));
//!
//! let catalog = Catalog::new().with("es", "users", "usuarios");
//! assert_eq!(catalog.lookup("es", "users").as_deref(), Some("usuarios"));
//! ```

mod catalog;
mod locale;
mod resolver;

pub use catalog::{Catalog, Dictionary};
pub use locale::{underscore, Locale, NATIVE_PREFIX};
pub use resolver::LocaleResolver;
