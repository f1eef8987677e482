//! Error types for the object pool

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("Pool is empty - no pooled objects available")]
    Empty,

    #[error("Invalid pool configuration: {0}")]
    InvalidConfiguration(String),
}

pub type PoolResult<T> = Result<T, PoolError>;
