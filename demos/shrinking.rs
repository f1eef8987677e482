//! Bursty workload: grow past the preferred size, then fit back

use std::collections::HashMap;

use stackpool::{MetricsExporter, Pool};

#[derive(Debug)]
struct Connection {
    id: usize,
    data: String,
}

impl Connection {
    fn new(id: usize) -> Self {
        Self {
            id,
            data: format!("Connection-{}", id),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stackpool=debug".into()),
        )
        .init();

    println!("=== stackpool - Shrinking ===\n");

    let mut next_id = 0;
    let mut pool = Pool::with_preferred_size(
        move || {
            next_id += 1;
            Connection::new(next_id)
        },
        4,
    )
    .on_release(|conn: Connection| println!("   closing {} ({})", conn.id, conn.data));

    println!("1. Burst of 10 requests:");
    let active: Vec<_> = (0..10).map(|_| pool.get()).collect();
    println!("   Active: {}, pooled: {}", active.len(), pool.len());

    println!("\n2. Requests finished:");
    for conn in active {
        pool.put(conn);
    }
    println!("   Pooled: {}, capacity: {}", pool.len(), pool.capacity());

    println!("\n3. Fit back to preferred size:");
    pool.fit();
    println!("   Pooled: {}, capacity: {}", pool.len(), pool.capacity());

    println!("\n4. Prometheus export:");
    let mut tags = HashMap::new();
    tags.insert("service".to_string(), "demo".to_string());
    print!(
        "{}",
        MetricsExporter::export_prometheus(&pool.metrics(), "connections", Some(&tags))
    );
}
