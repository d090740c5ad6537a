//! Expansion metrics: counts of what route translation produced and dropped.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters owned by a [`crate::RouteTranslator`].
#[derive(Debug, Default)]
pub struct ExpansionMetrics {
    /// Translated routes emitted
    routes_emitted: AtomicUsize,

    /// Locales skipped because a segment had no translation
    locales_skipped: AtomicUsize,

    /// Translated names dropped because they were already registered
    name_collisions: AtomicUsize,

    /// Untranslated (canonical) routes emitted
    canonical_routes: AtomicUsize,
}

impl ExpansionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_route_emitted(&self) {
        self.routes_emitted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_locale_skipped(&self) {
        self.locales_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_name_collision(&self) {
        self.name_collisions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_canonical_route(&self) {
        self.canonical_routes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn routes_emitted(&self) -> usize {
        self.routes_emitted.load(Ordering::Relaxed)
    }

    pub fn locales_skipped(&self) -> usize {
        self.locales_skipped.load(Ordering::Relaxed)
    }

    pub fn name_collisions(&self) -> usize {
        self.name_collisions.load(Ordering::Relaxed)
    }

    pub fn canonical_routes(&self) -> usize {
        self.canonical_routes.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let emitted = self.routes_emitted();
        let skipped = self.locales_skipped();
        let attempted = emitted + skipped;
        let coverage_rate = if attempted > 0 {
            (emitted as f64 / attempted as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            routes_emitted: emitted,
            locales_skipped: skipped,
            name_collisions: self.name_collisions(),
            canonical_routes: self.canonical_routes(),
            coverage_rate,
        }
    }
}

/// Snapshot of [`ExpansionMetrics`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    pub routes_emitted: usize,
    pub locales_skipped: usize,
    pub name_collisions: usize,
    pub canonical_routes: usize,

    /// Share of (route, locale) pairs that produced a route, as a percentage
    pub coverage_rate: f64,
}
