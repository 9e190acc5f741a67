use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::graph::Point;

/// Remembers the last point its source was evaluated at and the value it
/// returned.
///
/// This is the only stateful module. The read-check-write sequence runs under
/// a mutex, so sampling one graph from several threads is sound, though the
/// threads then take turns through this node. The entry is dropped whenever
/// the source is replaced or any module in the graph is edited.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Cache {
    #[serde(skip)]
    entry: Mutex<Option<(Point, f64)>>,
}

impl Clone for Cache {
    // A copy starts cold; the cached value belongs to the original graph.
    fn clone(&self) -> Self {
        Self::default()
    }
}

impl Cache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_cached(&self) -> bool {
        self.entry.lock().is_some()
    }

    pub fn clear(&self) {
        *self.entry.lock() = None;
    }

    pub(crate) fn get_or_eval(&self, point: Point, eval: impl FnOnce() -> f64) -> f64 {
        let mut entry = self.entry.lock();
        if let Some((cached, value)) = *entry {
            if cached == point {
                return value;
            }
        }
        let value = eval();
        *entry = Some((point, value));
        value
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::Cache;
    use crate::graph::Point;

    #[test]
    fn repeated_point_skips_eval() {
        let cache = Cache::new();
        let calls = Cell::new(0);
        let eval = || {
            calls.set(calls.get() + 1);
            0.5
        };
        let p = Point::D3([1.0, 2.0, 3.0]);
        assert_eq!(cache.get_or_eval(p, eval), 0.5);
        assert_eq!(cache.get_or_eval(p, eval), 0.5);
        assert_eq!(calls.get(), 1);

        assert_eq!(cache.get_or_eval(Point::D3([1.0, 2.0, 3.5]), eval), 0.5);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn clear_forces_eval() {
        let cache = Cache::new();
        let p = Point::D3([0.0; 3]);
        cache.get_or_eval(p, || 1.0);
        assert!(cache.is_cached());
        cache.clear();
        assert!(!cache.is_cached());
        assert_eq!(cache.get_or_eval(p, || 2.0), 2.0);
    }

    #[test]
    fn dimensions_do_not_alias() {
        let cache = Cache::new();
        cache.get_or_eval(Point::D3([0.0; 3]), || 1.0);
        assert_eq!(cache.get_or_eval(Point::D6([0.0; 6]), || 2.0), 2.0);
    }

    #[test]
    fn clone_starts_cold() {
        let cache = Cache::new();
        cache.get_or_eval(Point::D3([0.0; 3]), || 1.0);
        assert!(!cache.clone().is_cached());
    }
}
