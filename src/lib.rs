//! # stackpool
//!
//! Single-owner object pool that recycles previously constructed objects
//! instead of dropping and reallocating them.
//!
//! ## Features
//!
//! - LIFO reuse: `get` hands out the most recently returned object
//! - Factory fallback when the pool is empty
//! - Unbounded `put`, with `fit` trimming back to a preferred size
//! - Release hook called exactly once per object discarded by `fit`
//! - Configuration with optional warm-up size
//! - Metrics snapshot, Prometheus text export and health status
//! - Structured logging through `tracing`
//!
//! The pool is not thread-safe; wrap it in a lock to share it.
//!
//! ## Quick Start
//!
//! ```rust
//! use stackpool::Pool;
//!
//! let mut pool = Pool::with_preferred_size(|| Vec::<u8>::with_capacity(1024), 4)
//!     .on_release(|buf| println!("releasing buffer of {} bytes", buf.capacity()));
//!
//! let mut buf = pool.get();
//! buf.extend_from_slice(b"payload");
//! buf.clear();
//! pool.put(buf);
//!
//! pool.put(Vec::new());
//! assert_eq!(pool.len(), 5);
//! pool.fit();
//! assert_eq!(pool.len(), 4);
//! ```

mod config;
mod errors;
mod health;
mod metrics;
mod pool;

pub use config::{PoolConfiguration, DEFAULT_PREFERRED_SIZE};
pub use errors::{PoolError, PoolResult};
pub use health::HealthStatus;
pub use metrics::{MetricsExporter, PoolMetrics};
pub use pool::Pool;
