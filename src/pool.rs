//! Core object pool implementation

use crate::config::{PoolConfiguration, DEFAULT_PREFERRED_SIZE};
use crate::errors::{PoolError, PoolResult};
use crate::health::HealthStatus;
use crate::metrics::{MetricsTracker, PoolMetrics};

use std::fmt;
use std::mem;
use tracing::{debug, trace};

type Factory<T> = Box<dyn FnMut() -> T>;
type ReleaseHook<T> = Box<dyn FnMut(T)>;

/// Single-owner object pool backed by a LIFO stack
///
/// Objects handed out by [`get`](Pool::get) are owned by the caller until they
/// are given back with [`put`](Pool::put). The pool accepts any number of
/// returned objects; [`fit`](Pool::fit) trims it back to the preferred size and
/// passes every discarded object to the release hook.
///
/// The pool is not thread-safe. Callers sharing one across threads must wrap it
/// in their own lock.
///
/// # Examples
///
/// ```
/// use stackpool::Pool;
///
/// let mut pool = Pool::with_preferred_size(|| String::with_capacity(64), 2);
///
/// let mut s = pool.get();
/// s.push_str("hello");
/// s.clear();
/// pool.put(s);
///
/// assert_eq!(pool.len(), 2);
/// ```
pub struct Pool<T> {
    storage: Vec<T>,
    factory: Factory<T>,
    release_hook: Option<ReleaseHook<T>>,
    preferred_size: usize,
    metrics: MetricsTracker,
}

impl<T> Pool<T> {
    /// Create a pool with the default preferred size of 100 objects
    ///
    /// The factory is called once per object to fill the pool.
    pub fn new<F>(factory: F) -> Self
    where
        F: FnMut() -> T + 'static,
    {
        Self::with_preferred_size(factory, DEFAULT_PREFERRED_SIZE)
    }

    /// Create a pool filled with `preferred_size` objects
    ///
    /// # Examples
    ///
    /// ```
    /// use stackpool::Pool;
    ///
    /// let pool = Pool::with_preferred_size(|| 0u64, 8);
    /// assert_eq!(pool.len(), 8);
    /// assert_eq!(pool.preferred_size(), 8);
    /// ```
    pub fn with_preferred_size<F>(factory: F, preferred_size: usize) -> Self
    where
        F: FnMut() -> T + 'static,
    {
        Self::build(Box::new(factory), preferred_size, preferred_size)
    }

    /// Create a pool from a configuration
    ///
    /// Fails when the configuration does not validate.
    ///
    /// # Examples
    ///
    /// ```
    /// use stackpool::{Pool, PoolConfiguration};
    ///
    /// let config = PoolConfiguration::new()
    ///     .with_preferred_size(32)
    ///     .with_warmup(4);
    ///
    /// let pool = Pool::with_config(Vec::<u8>::new, config).unwrap();
    /// assert_eq!(pool.len(), 4);
    /// assert_eq!(pool.preferred_size(), 32);
    /// ```
    pub fn with_config<F>(factory: F, config: PoolConfiguration) -> PoolResult<Self>
    where
        F: FnMut() -> T + 'static,
    {
        config.validate()?;
        Ok(Self::build(
            Box::new(factory),
            config.preferred_size,
            config.initial_size(),
        ))
    }

    /// Create a pool filled with `preferred_size` objects and a release hook
    ///
    /// # Examples
    ///
    /// ```
    /// use std::cell::RefCell;
    /// use std::rc::Rc;
    /// use stackpool::Pool;
    ///
    /// let closed = Rc::new(RefCell::new(Vec::new()));
    /// let sink = Rc::clone(&closed);
    ///
    /// let mut pool = Pool::with_release_hook(|| 0u32, move |id| sink.borrow_mut().push(id), 1);
    /// pool.put(5);
    /// pool.put(6);
    /// pool.fit();
    ///
    /// assert_eq!(pool.len(), 1);
    /// assert_eq!(*closed.borrow(), vec![5, 6]);
    /// ```
    pub fn with_release_hook<F, H>(factory: F, hook: H, preferred_size: usize) -> Self
    where
        F: FnMut() -> T + 'static,
        H: FnMut(T) + 'static,
    {
        let mut pool = Self::build(Box::new(factory), preferred_size, preferred_size);
        pool.release_hook = Some(Box::new(hook));
        pool
    }

    fn build(factory: Factory<T>, preferred_size: usize, initial_size: usize) -> Self {
        let mut pool = Self {
            storage: Vec::with_capacity(preferred_size.max(initial_size)),
            factory,
            release_hook: None,
            preferred_size,
            metrics: MetricsTracker::default(),
        };
        for _ in 0..initial_size {
            let object = pool.create();
            pool.storage.push(object);
        }
        debug!(preferred_size, initial_size, "created object pool");
        pool
    }

    /// Set the hook that receives every object discarded by [`fit`](Pool::fit)
    ///
    /// Objects still in the pool when it is dropped are not passed to the hook.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::cell::Cell;
    /// use std::rc::Rc;
    /// use stackpool::Pool;
    ///
    /// let released = Rc::new(Cell::new(0));
    /// let counter = Rc::clone(&released);
    ///
    /// let mut pool = Pool::with_preferred_size(|| 0u32, 1)
    ///     .on_release(move |_| counter.set(counter.get() + 1));
    ///
    /// pool.put(7);
    /// pool.put(8);
    /// pool.fit();
    /// assert_eq!(released.get(), 2);
    /// ```
    pub fn on_release<H>(mut self, hook: H) -> Self
    where
        H: FnMut(T) + 'static,
    {
        self.release_hook = Some(Box::new(hook));
        self
    }

    /// Get an object
    ///
    /// Returns the most recently pooled object, or a new one from the factory
    /// when the pool is empty.
    pub fn get(&mut self) -> T {
        match self.storage.pop() {
            Some(object) => {
                self.metrics.hits += 1;
                object
            }
            None => {
                self.metrics.misses += 1;
                trace!("pool empty, creating object");
                self.create()
            }
        }
    }

    /// Get a pooled object without calling the factory
    ///
    /// # Examples
    ///
    /// ```
    /// use stackpool::{Pool, PoolError};
    ///
    /// let mut pool = Pool::with_preferred_size(|| 1u8, 1);
    /// assert_eq!(pool.try_get(), Ok(1));
    /// assert_eq!(pool.try_get(), Err(PoolError::Empty));
    /// ```
    pub fn try_get(&mut self) -> PoolResult<T> {
        let object = self.storage.pop().ok_or(PoolError::Empty)?;
        self.metrics.hits += 1;
        Ok(object)
    }

    /// Return an object to the pool
    ///
    /// Any object is accepted; storage grows as needed.
    pub fn put(&mut self, object: T) {
        self.storage.push(object);
        self.metrics.returned += 1;
    }

    /// Shrink the pool to its preferred size
    ///
    /// Does nothing when the pool holds no more than `preferred_size` objects.
    /// Otherwise the first `preferred_size` objects move to new storage and the
    /// rest are passed to the release hook in storage order.
    ///
    /// The retained objects are installed before the hook runs. If the hook
    /// panics, the pool is already at its preferred size and the objects not
    /// yet released are dropped without a hook call.
    pub fn fit(&mut self) {
        let preferred_size = self.preferred_size;
        let before = self.storage.len();
        if before <= preferred_size {
            return;
        }

        let mut surplus = mem::replace(&mut self.storage, Vec::with_capacity(preferred_size));
        self.storage.extend(surplus.drain(..preferred_size));
        self.metrics.shrinks += 1;
        debug!(
            before,
            preferred_size,
            released = surplus.len(),
            "shrinking object pool"
        );

        match self.release_hook.as_mut() {
            Some(hook) => {
                for object in surplus {
                    hook(object);
                    self.metrics.released += 1;
                }
            }
            None => {
                self.metrics.released += surplus.len();
            }
        }
    }

    /// Materialize `count` more objects with the factory
    ///
    /// # Examples
    ///
    /// ```
    /// use stackpool::Pool;
    ///
    /// let mut pool = Pool::with_preferred_size(|| 0i32, 0);
    /// pool.warmup(5);
    /// assert_eq!(pool.len(), 5);
    /// ```
    pub fn warmup(&mut self, count: usize) {
        self.storage.reserve(count);
        for _ in 0..count {
            let object = self.create();
            self.storage.push(object);
        }
        debug!(count, available = self.storage.len(), "warmed up object pool");
    }

    /// The number of objects currently in the pool
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Whether the next [`get`](Pool::get) will call the factory
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Capacity of the backing storage
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// The size [`fit`](Pool::fit) shrinks the pool to
    pub fn preferred_size(&self) -> usize {
        self.preferred_size
    }

    /// Change the preferred size
    ///
    /// Storage is left untouched until the next [`fit`](Pool::fit).
    pub fn set_preferred_size(&mut self, preferred_size: usize) {
        debug!(
            from = self.preferred_size,
            to = preferred_size,
            "changed preferred size"
        );
        self.preferred_size = preferred_size;
    }

    /// Read-only view of the pooled objects, oldest first
    ///
    /// Intended for inspection; the last element is the next one handed out.
    pub fn storage(&self) -> &[T] {
        &self.storage
    }

    /// Get pool metrics
    pub fn metrics(&self) -> PoolMetrics {
        self.metrics.snapshot(
            self.storage.len(),
            self.storage.capacity(),
            self.preferred_size,
        )
    }

    /// Get health status
    pub fn health_status(&self) -> HealthStatus {
        HealthStatus::from_metrics(&self.metrics())
    }

    fn create(&mut self) -> T {
        let object = (self.factory)();
        self.metrics.created += 1;
        object
    }
}

impl<T> fmt::Debug for Pool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("len", &self.storage.len())
            .field("capacity", &self.storage.capacity())
            .field("preferred_size", &self.preferred_size)
            .field("has_release_hook", &self.release_hook.is_some())
            .finish_non_exhaustive()
    }
}
