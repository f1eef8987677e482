//! Metrics collection and export for object pools

use std::collections::HashMap;

/// Metrics snapshot for a pool
///
/// # Examples
///
/// ```
/// use stackpool::Pool;
///
/// let mut pool = Pool::with_preferred_size(|| Vec::<u8>::new(), 2);
///
/// let a = pool.get();
/// let _b = pool.get();
/// let _c = pool.get();
/// pool.put(a);
///
/// let metrics = pool.metrics();
/// assert_eq!(metrics.hits, 2);
/// assert_eq!(metrics.misses, 1);
/// assert_eq!(metrics.created, 3);
/// assert_eq!(metrics.returned, 1);
/// assert_eq!(metrics.available, 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PoolMetrics {
    /// Gets served from pooled objects
    pub hits: usize,

    /// Gets served by the factory because the pool was empty
    pub misses: usize,

    /// Total factory calls, including the initial fill and warm-ups
    pub created: usize,

    /// Objects handed back with `put`
    pub returned: usize,

    /// Objects discarded by `fit`, passed to the release hook when one is set
    pub released: usize,

    /// Number of `fit` calls that reallocated storage
    pub shrinks: usize,

    /// Objects currently available
    pub available: usize,

    /// Current storage capacity
    pub capacity: usize,

    /// Current preferred size
    pub preferred_size: usize,
}

impl PoolMetrics {
    /// Fraction of gets served without calling the factory (0.0 to 1.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Objects above the preferred size that the next `fit` would release
    pub fn surplus(&self) -> usize {
        self.available.saturating_sub(self.preferred_size)
    }

    /// Export metrics as a HashMap
    pub fn export(&self) -> HashMap<String, String> {
        let mut metrics = HashMap::new();
        metrics.insert("hits".to_string(), self.hits.to_string());
        metrics.insert("misses".to_string(), self.misses.to_string());
        metrics.insert("created".to_string(), self.created.to_string());
        metrics.insert("returned".to_string(), self.returned.to_string());
        metrics.insert("released".to_string(), self.released.to_string());
        metrics.insert("shrinks".to_string(), self.shrinks.to_string());
        metrics.insert("available".to_string(), self.available.to_string());
        metrics.insert("capacity".to_string(), self.capacity.to_string());
        metrics.insert("preferred_size".to_string(), self.preferred_size.to_string());
        metrics.insert("hit_rate".to_string(), format!("{:.2}", self.hit_rate()));
        metrics
    }
}

/// Metrics exporter for Prometheus format
pub struct MetricsExporter;

impl MetricsExporter {
    /// Export metrics in Prometheus exposition format
    ///
    /// # Examples
    ///
    /// ```
    /// use stackpool::{MetricsExporter, Pool};
    /// use std::collections::HashMap;
    ///
    /// let pool = Pool::with_preferred_size(String::new, 4);
    ///
    /// let mut tags = HashMap::new();
    /// tags.insert("service".to_string(), "parser".to_string());
    ///
    /// let output = MetricsExporter::export_prometheus(&pool.metrics(), "strings", Some(&tags));
    /// assert!(output.contains("stackpool_objects_available{pool=\"strings\",service=\"parser\"} 4"));
    /// ```
    pub fn export_prometheus(
        metrics: &PoolMetrics,
        pool_name: &str,
        tags: Option<&HashMap<String, String>>,
    ) -> String {
        let labels = Self::format_labels(pool_name, tags);
        let mut output = String::new();

        let gauges: [(&str, &str, String); 4] = [
            ("stackpool_objects_available", "Objects currently available", metrics.available.to_string()),
            ("stackpool_storage_capacity", "Current storage capacity", metrics.capacity.to_string()),
            ("stackpool_preferred_size", "Size the pool shrinks back to", metrics.preferred_size.to_string()),
            ("stackpool_hit_rate", "Fraction of gets served from the pool", format!("{:.2}", metrics.hit_rate())),
        ];
        for (name, help, value) in gauges {
            Self::write_metric(&mut output, name, help, "gauge", &labels, &value);
        }

        let counters: [(&str, &str, usize); 6] = [
            ("stackpool_hits_total", "Gets served from pooled objects", metrics.hits),
            ("stackpool_misses_total", "Gets served by the factory", metrics.misses),
            ("stackpool_objects_created_total", "Total factory calls", metrics.created),
            ("stackpool_objects_returned_total", "Objects returned with put", metrics.returned),
            ("stackpool_objects_released_total", "Objects discarded by fit", metrics.released),
            ("stackpool_shrinks_total", "Fits that reallocated storage", metrics.shrinks),
        ];
        for (name, help, value) in counters {
            Self::write_metric(&mut output, name, help, "counter", &labels, &value.to_string());
        }

        output
    }

    fn write_metric(output: &mut String, name: &str, help: &str, kind: &str, labels: &str, value: &str) {
        output.push_str(&format!("# HELP {} {}\n", name, help));
        output.push_str(&format!("# TYPE {} {}\n", name, kind));
        output.push_str(&format!("{}{{{}}} {}\n", name, labels, value));
    }

    fn format_labels(pool_name: &str, tags: Option<&HashMap<String, String>>) -> String {
        let mut labels = vec![format!("pool=\"{}\"", pool_name)];

        if let Some(tags) = tags {
            let mut sorted: Vec<_> = tags.iter().collect();
            sorted.sort();
            for (key, value) in sorted {
                labels.push(format!("{}=\"{}\"", key, value));
            }
        }

        labels.join(",")
    }
}

/// Internal counters kept by the pool
#[derive(Debug, Default, Clone)]
pub(crate) struct MetricsTracker {
    pub hits: usize,
    pub misses: usize,
    pub created: usize,
    pub returned: usize,
    pub released: usize,
    pub shrinks: usize,
}

impl MetricsTracker {
    pub fn snapshot(&self, available: usize, capacity: usize, preferred_size: usize) -> PoolMetrics {
        PoolMetrics {
            hits: self.hits,
            misses: self.misses,
            created: self.created,
            returned: self.returned,
            released: self.released,
            shrinks: self.shrinks,
            available,
            capacity,
            preferred_size,
        }
    }
}
