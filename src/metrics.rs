//! Counters for index and store activity.
//!
//! Production code records into the process-wide [`TranslationMetrics::global`]
//! instance. Tests build their own instance so counts stay isolated.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

#[derive(Debug, Default)]
pub struct TranslationMetrics {
    /// Number of times an index was (re)built from the store
    index_builds: AtomicUsize,

    /// Lookups answered with a row
    index_hits: AtomicUsize,

    /// Lookups that found no row for the resolved locale
    index_misses: AtomicUsize,

    /// Reads served from a locale other than the requested one
    fallbacks: AtomicUsize,

    /// Rows created or updated
    writes: AtomicUsize,

    /// Rows deleted
    deletes: AtomicUsize,
}

static METRICS: OnceLock<TranslationMetrics> = OnceLock::new();

impl TranslationMetrics {
    /// Create a zeroed set of counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the process-wide metrics instance.
    ///
    /// Initialized on first call; every later call returns the same instance.
    pub fn global() -> &'static TranslationMetrics {
        METRICS.get_or_init(TranslationMetrics::new)
    }

    /// Record an index (re)build from the store.
    pub fn record_index_build(&self) {
        self.index_builds.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a read answered by a cached row.
    pub fn record_hit(&self) {
        self.index_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a read that found no row for the resolved locale.
    pub fn record_miss(&self) {
        self.index_misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a read served from a locale other than the requested one.
    pub fn record_fallback(&self) {
        self.fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a row created or updated in the store.
    pub fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a row deleted from the store.
    pub fn record_delete(&self) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the current index build count.
    pub fn index_builds(&self) -> usize {
        self.index_builds.load(Ordering::Relaxed)
    }

    /// Get the current index hit count.
    pub fn index_hits(&self) -> usize {
        self.index_hits.load(Ordering::Relaxed)
    }

    /// Get the current index miss count.
    pub fn index_misses(&self) -> usize {
        self.index_misses.load(Ordering::Relaxed)
    }

    /// Get the current fallback read count.
    pub fn fallbacks(&self) -> usize {
        self.fallbacks.load(Ordering::Relaxed)
    }

    /// Get the current write count.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }

    /// Get the current delete count.
    pub fn deletes(&self) -> usize {
        self.deletes.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.index_hits();
        let misses = self.index_misses();
        let lookups = hits + misses;
        let hit_rate = if lookups > 0 {
            (hits as f64 / lookups as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            index_builds: self.index_builds(),
            index_hits: hits,
            index_misses: misses,
            hit_rate,
            fallbacks: self.fallbacks(),
            writes: self.writes(),
            deletes: self.deletes(),
        }
    }
}

/// Snapshot of [`TranslationMetrics`].
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub index_builds: usize,
    pub index_hits: usize,
    pub index_misses: usize,

    /// Hit rate as a percentage (0-100)
    pub hit_rate: f64,

    pub fallbacks: usize,
    pub writes: usize,
    pub deletes: usize,
}
