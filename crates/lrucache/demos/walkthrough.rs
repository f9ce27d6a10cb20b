//! Walkthrough of the cache's eviction behaviour
//!
//! Run with `cargo run --example walkthrough`; set `RUST_LOG=lrucache=trace`
//! to watch evictions.

use anyhow::Result;
use lrucache::CacheConfig;
use tracing::info;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let mut cache = CacheConfig::new(3).build()?;
    info!("Cache capacity: {}", cache.capacity());

    cache.put("1", "one");
    cache.put("2", "two");
    cache.put("3", "three");

    match cache.get("1") {
        Ok(value) => println!("{}", value), // one
        Err(e) => println!("{}", e),
    }

    cache.put("4", "four");

    match cache.get("2") {
        Ok(value) => println!("{}", value),
        Err(e) => println!("{}", e), // key '2' not found in cache
    }

    let stats = cache.stats();
    info!(
        "hits={} misses={} evictions={} hit_ratio={:.2}",
        stats.hits(),
        stats.misses(),
        stats.evictions(),
        stats.hit_ratio()
    );

    Ok(())
}
