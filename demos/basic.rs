//! Basic usage examples for Pool

use stackpool::{Pool, PoolConfiguration};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stackpool=debug".into()),
        )
        .init();

    println!("=== stackpool - Basic Examples ===\n");

    // Example 1: Simple pool of buffers
    simple_pool();

    // Example 2: Pool with configuration
    configured_pool();

    // Example 3: Try methods
    try_methods();

    // Example 4: Metrics and health
    metrics_and_health();
}

fn simple_pool() {
    println!("1. Simple Pool:");
    let mut pool = Pool::with_preferred_size(|| Vec::<u8>::with_capacity(1024), 3);

    let mut buf = pool.get();
    buf.extend_from_slice(b"hello");
    println!("   Got buffer, wrote {} bytes", buf.len());
    buf.clear();
    pool.put(buf);

    println!("   Available after return: {}\n", pool.len());
}

fn configured_pool() {
    println!("2. Configured Pool:");

    let config = PoolConfiguration::new()
        .with_preferred_size(10)
        .with_warmup(2);

    let mut pool = match Pool::with_config(String::new, config) {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("   {}", e);
            return;
        }
    };

    println!("   Warmed up: {}, preferred: {}", pool.len(), pool.preferred_size());
    let a = pool.get();
    let b = pool.get();
    let c = pool.get();
    println!("   Handed out 3, available: {}", pool.len());
    pool.put(a);
    pool.put(b);
    pool.put(c);
    println!("   After return - Available: {}\n", pool.len());
}

fn try_methods() {
    println!("3. Try Methods:");
    let mut pool = Pool::with_preferred_size(|| 42, 1);

    match pool.try_get() {
        Ok(value) => println!("   First try: {}", value),
        Err(e) => println!("   First try: {}", e),
    }

    match pool.try_get() {
        Ok(value) => println!("   Second try: {}", value),
        Err(e) => println!("   Second try: {}", e),
    }

    println!("   get() still succeeds via the factory: {}\n", pool.get());
}

fn metrics_and_health() {
    println!("4. Metrics and Health:");
    let mut pool = Pool::with_preferred_size(|| [0u8; 32], 5);

    for _ in 0..3 {
        pool.put([1u8; 32]);
    }
    let _held = pool.get();

    let health = pool.health_status();
    println!("   Health: {}", if health.is_healthy() { "Healthy" } else { "Unhealthy" });
    for warning in &health.warnings {
        println!("   Warning: {}", warning);
    }

    let metrics = pool.metrics().export();
    let mut keys: Vec<_> = metrics.keys().collect();
    keys.sort();
    println!("\n   Metrics:");
    for key in keys {
        println!("     {}: {}", key, metrics[key]);
    }
}
