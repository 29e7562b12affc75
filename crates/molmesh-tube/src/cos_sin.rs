//! Memoized cosine/sine tables around the unit circle.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::trace;

/// Cosine and sine of `2π·j/n` for `j in 0..n`.
#[derive(Debug, Clone, PartialEq)]
pub struct CosSin {
    /// `cos(2π·j/n)`.
    pub cos: Vec<f64>,
    /// `sin(2π·j/n)`.
    pub sin: Vec<f64>,
}

impl CosSin {
    /// Compute the table for `radial_segments` samples.
    pub fn new(radial_segments: usize) -> Self {
        let mut cos = Vec::with_capacity(radial_segments);
        let mut sin = Vec::with_capacity(radial_segments);
        for j in 0..radial_segments {
            let t = 2.0 * std::f64::consts::PI * j as f64 / radial_segments as f64;
            cos.push(t.cos());
            sin.push(t.sin());
        }
        Self { cos, sin }
    }

    /// Number of angular samples.
    pub fn len(&self) -> usize {
        self.cos.len()
    }

    /// True for a zero-sample table.
    pub fn is_empty(&self) -> bool {
        self.cos.is_empty()
    }
}

/// Cache of [`CosSin`] tables keyed by radial segment count.
///
/// Tables are computed on first request and kept for the lifetime of the
/// cache; there is no eviction. Lookups take a shared lock, inserts take the
/// write lock, so one cache can be shared between threads.
#[derive(Debug, Default)]
pub struct CosSinCache {
    tables: RwLock<HashMap<usize, Arc<CosSin>>>,
}

impl CosSinCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table for `radial_segments`, computing it on first use.
    ///
    /// Repeated calls with the same count return the same `Arc`.
    pub fn get(&self, radial_segments: usize) -> Arc<CosSin> {
        if let Some(table) = self.tables.read().get(&radial_segments) {
            return Arc::clone(table);
        }
        let mut tables = self.tables.write();
        let table = tables.entry(radial_segments).or_insert_with(|| {
            trace!(radial_segments, "computing cos/sin table");
            Arc::new(CosSin::new(radial_segments))
        });
        Arc::clone(table)
    }

    /// Number of cached tables.
    pub fn len(&self) -> usize {
        self.tables.read().len()
    }

    /// True when no table has been computed yet.
    pub fn is_empty(&self) -> bool {
        self.tables.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_table_values() {
        let table = CosSin::new(4);
        assert_eq!(table.len(), 4);
        assert_relative_eq!(table.cos[0], 1.0);
        assert_relative_eq!(table.sin[0], 0.0);
        assert_relative_eq!(table.sin[1], 1.0);
        assert_relative_eq!(table.cos[2], -1.0);
        assert_relative_eq!(table.sin[3], -1.0);
        assert!(table.cos[1].abs() < 1e-15);
    }

    #[test]
    fn test_same_table_by_identity() {
        let cache = CosSinCache::new();
        let a = cache.get(12);
        let b = cache.get(12);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_independent_of_call_order() {
        let forward = CosSinCache::new();
        let f6 = forward.get(6);
        let f9 = forward.get(9);

        let backward = CosSinCache::new();
        let b9 = backward.get(9);
        let b6 = backward.get(6);

        assert_eq!(*f6, *b6);
        assert_eq!(*f9, *b9);
        assert_eq!(*f6, CosSin::new(6));
        assert_eq!(forward.len(), 2);
    }

    #[test]
    fn test_shared_between_threads() {
        let cache = Arc::new(CosSinCache::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || cache.get(16))
            })
            .collect();
        let tables: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for t in &tables[1..] {
            assert!(Arc::ptr_eq(&tables[0], t));
        }
    }
}
