//! Policy Cache demo host
//!
//! Builds a shared cache from environment configuration, replays the
//! two-slot walkthrough, drives a concurrent workload against it and prints
//! the final statistics as JSON.

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinSet;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use policy_cache::{CacheStore, Config, PolicyKind, SharedCache};

/// Main entry point for the demo host.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Run the walkthrough on a private two-slot cache
/// 4. Run the concurrent workload until done or interrupted
/// 5. Print statistics
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "policy_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("failed to load configuration")?;
    info!(
        "Configuration loaded: policy={}, max_capacity={}, workers={}, ops_per_worker={}",
        config.policy, config.max_capacity, config.workers, config.ops_per_worker
    );

    walkthrough(config.policy).context("walkthrough failed")?;

    let cache = SharedCache::with_policy(config.policy, config.max_capacity)
        .context("failed to build cache")?;

    tokio::select! {
        result = run_workload(cache.clone(), &config) => result?,
        _ = shutdown_signal() => warn!("Workload interrupted"),
    }

    let report = cache.report();
    println!("{}", serde_json::to_string_pretty(&report)?);
    info!("Demo complete");

    Ok(())
}

/// Two slots, three keys: a read of "a" decides which key survives.
fn walkthrough(kind: PolicyKind) -> policy_cache::Result<()> {
    let mut store = CacheStore::new(kind, 2)?;

    store.put("a", "1")?;
    store.put("b", "2")?;
    let hit = store.get("a");
    store.put("c", "3")?;

    info!(
        policy = %kind,
        read_a = ?hit.map(|v| String::from_utf8_lossy(&v).into_owned()),
        resident = ?store.keys(),
        "walkthrough finished"
    );
    Ok(())
}

/// Spawns `config.workers` tasks mixing reads and writes over a key space
/// twice the cache size, with a hot subset read far more often.
async fn run_workload(cache: SharedCache, config: &Config) -> anyhow::Result<()> {
    let key_space = config.max_capacity.saturating_mul(2).max(1);
    let hot_keys = (config.max_capacity / 4).max(1);
    let mut tasks = JoinSet::new();

    for worker in 0..config.workers {
        let cache = cache.clone();
        let ops = config.ops_per_worker;

        tasks.spawn(async move {
            let mut rng = Lcg::new(worker as u64 + 1);
            for i in 0..ops {
                let roll = rng.next_u64();
                let key = if roll % 4 == 0 {
                    format!("key-{}", rng.next_u64() as usize % key_space)
                } else {
                    format!("key-{}", rng.next_u64() as usize % hot_keys)
                };

                if cache.get(&key).is_none() {
                    cache.put(key, format!("worker-{}-op-{}", worker, i))?;
                }

                if i % 64 == 0 {
                    tokio::task::yield_now().await;
                }
            }
            Ok::<_, policy_cache::CacheError>(())
        });
    }

    while let Some(joined) = tasks.join_next().await {
        joined
            .context("workload task panicked")?
            .context("workload task failed")?;
    }

    let stats = cache.stats();
    info!(
        hits = stats.hits,
        misses = stats.misses,
        evictions = stats.evictions,
        "Workload finished"
    );
    Ok(())
}

/// Minimal linear congruential generator so runs are reproducible.
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, stopping workload...");
        }
        _ = terminate => {
            info!("Received SIGTERM, stopping workload...");
        }
    }
}
