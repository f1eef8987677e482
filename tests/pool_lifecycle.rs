use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use stackpool::{MetricsExporter, Pool, PoolConfiguration};

#[derive(Debug)]
struct Connection {
    id: usize,
    buffer: Vec<u8>,
}

fn connection_pool(
    preferred_size: usize,
) -> (Pool<Connection>, Rc<RefCell<Vec<usize>>>) {
    let next_id = Rc::new(RefCell::new(0));
    let released = Rc::new(RefCell::new(Vec::new()));

    let ids = Rc::clone(&next_id);
    let sink = Rc::clone(&released);
    let pool = Pool::with_preferred_size(
        move || {
            let mut id = ids.borrow_mut();
            *id += 1;
            Connection {
                id: *id,
                buffer: Vec::with_capacity(256),
            }
        },
        preferred_size,
    )
    .on_release(move |conn: Connection| sink.borrow_mut().push(conn.id));

    (pool, released)
}

#[test]
fn burst_then_fit_returns_to_preferred_size() {
    let (mut pool, released) = connection_pool(4);

    let burst: Vec<_> = (0..10).map(|_| pool.get()).collect();
    assert_eq!(pool.len(), 0);
    assert_eq!(pool.metrics().misses, 6);

    for mut conn in burst {
        conn.buffer.clear();
        pool.put(conn);
    }
    assert_eq!(pool.len(), 10);
    assert!(pool.health_status().needs_fit());

    pool.fit();

    assert_eq!(pool.len(), 4);
    assert_eq!(released.borrow().len(), 6);
    assert!(!pool.health_status().needs_fit());

    // Retained objects are the first four returned, in storage order.
    let kept: Vec<_> = pool.storage().iter().map(|c| c.id).collect();
    let mut all: Vec<_> = kept.iter().chain(released.borrow().iter()).copied().collect();
    all.sort();
    assert_eq!(all, (1..=10).collect::<Vec<_>>());
}

#[test]
fn steady_state_never_allocates() {
    let (mut pool, released) = connection_pool(8);

    for _ in 0..1_000 {
        let a = pool.get();
        let b = pool.get();
        pool.put(b);
        pool.put(a);
    }
    pool.fit();

    let metrics = pool.metrics();
    assert_eq!(metrics.created, 8);
    assert_eq!(metrics.misses, 0);
    assert_eq!(metrics.hit_rate(), 1.0);
    assert!(released.borrow().is_empty());
}

#[test]
fn configured_pool_grows_on_demand() {
    let config = PoolConfiguration::new().with_preferred_size(16).with_warmup(0);
    let mut pool = Pool::with_config(|| String::with_capacity(32), config).unwrap();
    assert!(pool.is_empty());

    let s = pool.get();
    pool.put(s);
    assert_eq!(pool.len(), 1);

    let output = MetricsExporter::export_prometheus(&pool.metrics(), "strings", None);
    assert!(output.contains("stackpool_misses_total{pool=\"strings\"} 1"));
    assert!(output.contains("stackpool_preferred_size{pool=\"strings\"} 16"));

    let exported: HashMap<_, _> = pool.metrics().export();
    assert_eq!(exported["returned"], "1");
}
