//! Health monitoring for object pools

use crate::metrics::PoolMetrics;

/// Minimum number of gets before a low hit rate is reported
const HIT_RATE_MIN_SAMPLES: usize = 100;

/// Hit rate below which the pool is considered undersized
const LOW_HIT_RATE: f64 = 0.5;

/// Health status of an object pool
///
/// # Examples
///
/// ```
/// use stackpool::Pool;
///
/// let mut pool = Pool::with_preferred_size(|| [0u8; 16], 3);
///
/// let health = pool.health_status();
/// assert!(health.is_healthy());
/// assert_eq!(health.available_objects, 3);
///
/// pool.put([1u8; 16]);
/// assert!(pool.health_status().needs_fit());
/// ```
#[derive(Debug, Clone)]
pub struct HealthStatus {
    /// Whether the pool is healthy
    pub is_healthy: bool,

    /// Number of warnings detected
    pub warning_count: usize,

    /// Fraction of gets served from the pool (0.0 to 1.0)
    pub hit_rate: f64,

    /// Available objects count
    pub available_objects: usize,

    /// Objects a `fit` would release
    pub surplus: usize,

    /// Current preferred size
    pub preferred_size: usize,

    /// Warning messages
    pub warnings: Vec<String>,
}

impl HealthStatus {
    /// Derive a health status from a metrics snapshot
    pub fn from_metrics(metrics: &PoolMetrics) -> Self {
        let hit_rate = metrics.hit_rate();
        let surplus = metrics.surplus();
        let mut warnings = Vec::new();
        let mut is_healthy = true;

        if surplus > 0 {
            warnings.push(format!(
                "{} objects above preferred size {}; fit would release them",
                surplus, metrics.preferred_size
            ));
        }

        if metrics.available == 0 {
            warnings.push("Pool is empty - next get calls the factory".to_string());
        }

        if metrics.hits + metrics.misses >= HIT_RATE_MIN_SAMPLES && hit_rate < LOW_HIT_RATE {
            warnings.push(format!("Low hit rate: {:.1}%", hit_rate * 100.0));
            is_healthy = false;
        }

        Self {
            is_healthy,
            warning_count: warnings.len(),
            hit_rate,
            available_objects: metrics.available,
            surplus,
            preferred_size: metrics.preferred_size,
            warnings,
        }
    }

    /// Check if the pool is healthy
    pub fn is_healthy(&self) -> bool {
        self.is_healthy
    }

    /// Whether calling `fit` would release objects
    pub fn needs_fit(&self) -> bool {
        self.surplus > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(hits: usize, misses: usize, available: usize, preferred_size: usize) -> PoolMetrics {
        PoolMetrics {
            hits,
            misses,
            created: misses,
            returned: 0,
            released: 0,
            shrinks: 0,
            available,
            capacity: available,
            preferred_size,
        }
    }

    #[test]
    fn test_balanced_pool_has_no_warnings() {
        let status = HealthStatus::from_metrics(&metrics(10, 0, 5, 5));
        assert!(status.is_healthy());
        assert!(!status.needs_fit());
        assert_eq!(status.warning_count, 0);
    }

    #[test]
    fn test_empty_pool_warns_but_stays_healthy() {
        let status = HealthStatus::from_metrics(&metrics(0, 0, 0, 5));
        assert!(status.is_healthy());
        assert_eq!(status.warning_count, 1);
        assert!(status.warnings[0].contains("empty"));
    }

    #[test]
    fn test_low_hit_rate_needs_enough_samples() {
        assert!(HealthStatus::from_metrics(&metrics(1, 9, 1, 1)).is_healthy());

        let status = HealthStatus::from_metrics(&metrics(20, 80, 1, 1));
        assert!(!status.is_healthy());
        assert!(status.warnings.iter().any(|w| w.contains("20.0%")));
    }

    #[test]
    fn test_surplus_reported() {
        let status = HealthStatus::from_metrics(&metrics(0, 0, 7, 4));
        assert!(status.needs_fit());
        assert_eq!(status.surplus, 3);
    }
}
