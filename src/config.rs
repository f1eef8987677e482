//! Pool configuration options

use crate::errors::{PoolError, PoolResult};

/// Default preferred size of a pool.
pub const DEFAULT_PREFERRED_SIZE: usize = 100;

/// Configuration for object pool behavior
///
/// # Examples
///
/// ```
/// use stackpool::PoolConfiguration;
///
/// let config = PoolConfiguration::new()
///     .with_preferred_size(64)
///     .with_warmup(16);
///
/// assert_eq!(config.preferred_size, 64);
/// assert_eq!(config.initial_size(), 16);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PoolConfiguration {
    /// Number of objects the pool shrinks back to on `fit`
    pub preferred_size: usize,

    /// Number of objects materialized at construction.
    /// `None` fills the pool up to `preferred_size`.
    pub warmup_size: Option<usize>,
}

impl Default for PoolConfiguration {
    fn default() -> Self {
        Self {
            preferred_size: DEFAULT_PREFERRED_SIZE,
            warmup_size: None,
        }
    }
}

impl PoolConfiguration {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the preferred size
    ///
    /// # Examples
    ///
    /// ```
    /// use stackpool::PoolConfiguration;
    ///
    /// let config = PoolConfiguration::new().with_preferred_size(8);
    ///
    /// assert_eq!(config.preferred_size, 8);
    /// assert_eq!(config.initial_size(), 8);
    /// ```
    pub fn with_preferred_size(mut self, size: usize) -> Self {
        self.preferred_size = size;
        self
    }

    /// Set warm-up size
    pub fn with_warmup(mut self, size: usize) -> Self {
        self.warmup_size = Some(size);
        self
    }

    /// Number of objects the factory produces when the pool is built
    pub fn initial_size(&self) -> usize {
        self.warmup_size.unwrap_or(self.preferred_size)
    }

    /// Check the configuration for contradictory settings
    pub fn validate(&self) -> PoolResult<()> {
        if let Some(warmup) = self.warmup_size {
            if warmup > self.preferred_size {
                return Err(PoolError::InvalidConfiguration(format!(
                    "warmup size {} exceeds preferred size {}",
                    warmup, self.preferred_size
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PoolConfiguration::default();
        assert_eq!(config.preferred_size, 100);
        assert_eq!(config.warmup_size, None);
        assert_eq!(config.initial_size(), 100);
    }

    #[test]
    fn test_warmup_larger_than_preferred_is_rejected() {
        let config = PoolConfiguration::new()
            .with_preferred_size(4)
            .with_warmup(5);

        match config.validate() {
            Err(PoolError::InvalidConfiguration(msg)) => {
                assert!(msg.contains("warmup size 5"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_zero_sizes_are_valid() {
        let config = PoolConfiguration::new()
            .with_preferred_size(0)
            .with_warmup(0);
        assert!(config.validate().is_ok());
        assert_eq!(config.initial_size(), 0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_with_missing_fields() {
        let config: PoolConfiguration =
            serde_json::from_str(r#"{ "preferred_size": 12 }"#).unwrap();
        assert_eq!(config.preferred_size, 12);
        assert_eq!(config.warmup_size, None);
    }
}
